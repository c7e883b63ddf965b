//! Preview rendering module
//!
//! This module contains:
//! - Outline and control geometry shared by the drawing code
//! - Image rendering using tiny-skia (for the preview file)

pub mod geometry;
pub mod image;
