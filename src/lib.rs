//! Mark square regions on a folder of images, export them as crops and
//! archive the originals.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod imaging;
pub mod lot;
pub mod render;
pub mod session;
