#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for the stagehand update engine
//!
//! This crate provides the fundamental types used throughout the system:
//! platform profiles, update scoping, and downloader work items.

pub mod platform;
pub mod scope;
pub mod work;

pub use platform::{AuxFile, PlatformProfile};
pub use scope::UpdateScope;
pub use work::WorkItem;
