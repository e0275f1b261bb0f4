#![warn(clippy::pedantic)]
#![deny(clippy::all)]

//! Staged, crash-tolerant file replacement for stagehand
//!
//! This crate applies a downloaded-and-extracted update to a live game
//! directory tree: legacy artifact purges scoped by full-vs-partial update,
//! a recursive staged move with forced overwrite of read-only files, and a
//! checkpointed version-state commit bracketing the destructive portion.

#[macro_use]
mod macros;
mod api;
mod collab;
mod constants;
mod installer;
mod layout;
mod scope;
mod staging;

pub use collab::{FetchPlan, VersionStore};
pub use installer::Installer;
pub use layout::InstallLayout;
pub use scope::purge_legacy_artifacts;
pub use staging::merge_into;

// Re-export the public API surface from api module
pub use api::config::InstallConfig;
pub use api::context::InstallContext;
pub use api::result::InstallResult;

// Re-export EventSender for use by macros and contexts
pub use stagehand_events::EventSender;
