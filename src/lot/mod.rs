//! Lot folders and the queue of images waiting in the source folder

pub mod queue;
pub mod workspace;
