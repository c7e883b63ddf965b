//! Batch orchestration
//!
//! This module contains:
//! - The controller that walks the image queue and reacts to session events
//! - The runner that resolves settings and feeds events to the controller

pub mod app;
pub mod controller;
