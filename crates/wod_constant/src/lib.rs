//! Shared constants for the wod workspace.

pub mod app;
pub mod defaults;
