use stagehand_events::EventSender;

/// Context for one install run
#[derive(Clone, Debug)]
pub struct InstallContext {
    /// Voice-only variant: skip the shared-asset backup and legacy purge
    pub voice_only: bool,

    /// Event sender for progress reporting
    pub event_sender: Option<EventSender>,
}

context_builder! {
    InstallContext {
        voice_only: bool,
    }
}
