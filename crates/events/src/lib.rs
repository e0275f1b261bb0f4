#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in stagehand
//!
//! All observable output of the install engine goes through events - no
//! direct logging or printing happens inside the core crates. Events are
//! grouped by functional domain and carry enough metadata to be routed into
//! tracing spans by whatever front end consumes them.

pub mod meta;
pub use meta::{EventLevel, EventMeta};

pub mod events;
pub use events::{AppEvent, GeneralEvent, InstallCheckpoint, InstallEvent, ProgressEvent};

use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender using the `AppEvent` system
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver using the `AppEvent` system
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel with the `AppEvent` system
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout the stagehand system
///
/// This trait provides a single, consistent API for emitting events regardless
/// of whether you have a raw `EventSender` or a struct that contains one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    ///
    /// Every emission is stamped with fresh [`EventMeta`] and mirrored into
    /// tracing at the level the event carries before it goes on the channel.
    fn emit(&self, event: AppEvent) {
        let meta = event.meta();
        match meta.level {
            EventLevel::Debug => tracing::debug!(event_id = %meta.event_id, event = ?event),
            EventLevel::Info => tracing::info!(event_id = %meta.event_id, event = ?event),
            EventLevel::Warn => tracing::warn!(event_id = %meta.event_id, event = ?event),
            EventLevel::Error => tracing::error!(event_id = %meta.event_id, event = ?event),
        }
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an operation started event
    fn emit_operation_started(&self, operation: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationStarted {
            operation: operation.into(),
        }));
    }

    /// Emit an operation completed event
    fn emit_operation_completed(&self, operation: impl Into<String>, success: bool) {
        self.emit(AppEvent::General(GeneralEvent::OperationCompleted {
            operation: operation.into(),
            success,
        }));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            error: error.into(),
        }));
    }

    /// Emit a coarse progress milestone
    fn emit_milestone(&self, percent: u8, message: impl Into<String>) {
        self.emit(AppEvent::Progress(ProgressEvent::milestone(
            percent, message,
        )));
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
/// This allows `EventSender` to be used directly where `EventEmitter` is expected
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

/// Implementation for optional senders so call sites holding
/// `Option<EventSender>` can emit without unwrapping
impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
