//! Public API surface for the install crate

pub mod config;
pub mod context;
pub mod result;
