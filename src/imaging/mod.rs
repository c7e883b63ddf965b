//! Image loading for sessions
//!
//! Decoding and resampling are delegated to the `image` crate; this module
//! only decides sizes.

pub mod source;
