//! Image session management module
//!
//! This module contains:
//! - Per-image session state and on-canvas control layout
//! - Event types and the handler interface
//! - Console command parsing and event sources

pub mod messages;
pub mod script;
pub mod shortcuts;
pub mod state;
