//! Events the input surface sends to an image session
//!
//! This module contains:
//! - `SessionEvent`, the input vocabulary of a session
//! - `SessionHandler`, the narrow interface a controller implements
//!
//! Any front end (a GUI canvas, a scripted replay, a text console) only has
//! to produce `SessionEvent`s; it never needs to know about the controller.

use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// Discrete on-canvas controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Commit the current image and move on
    Advance,
    /// Remove the most recent region
    Undo,
}

/// One input event, carried in preview-space coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    PointerDown { x: i32, y: i32 },
    PointerDrag { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    Advance,
    Undo,
    /// Keyboard alias for undo
    DeleteLast,
}

impl SessionEvent {
    pub fn pointer_down(x: i32, y: i32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_drag(x: i32, y: i32) -> Self {
        Self::PointerDrag { x, y }
    }

    pub fn pointer_up(x: i32, y: i32) -> Self {
        Self::PointerUp { x, y }
    }

    /// Route this event to the matching handler method
    pub fn dispatch<H: SessionHandler + ?Sized>(self, handler: &mut H) -> Result<H::Output, H::Error> {
        match self {
            Self::PointerDown { x, y } => handler.on_pointer_down(Point::new(x, y)),
            Self::PointerDrag { x, y } => handler.on_pointer_drag(Point::new(x, y)),
            Self::PointerUp { x, y } => handler.on_pointer_up(Point::new(x, y)),
            Self::Advance => handler.on_advance(),
            Self::Undo | Self::DeleteLast => handler.on_undo(),
        }
    }
}

impl From<Control> for SessionEvent {
    fn from(control: Control) -> Self {
        match control {
            Control::Advance => SessionEvent::Advance,
            Control::Undo => SessionEvent::Undo,
        }
    }
}

/// Receiver of session events
pub trait SessionHandler {
    type Output;
    type Error;

    fn on_pointer_down(&mut self, point: Point) -> Result<Self::Output, Self::Error>;
    fn on_pointer_drag(&mut self, point: Point) -> Result<Self::Output, Self::Error>;
    fn on_pointer_up(&mut self, point: Point) -> Result<Self::Output, Self::Error>;
    fn on_advance(&mut self) -> Result<Self::Output, Self::Error>;
    fn on_undo(&mut self) -> Result<Self::Output, Self::Error>;
}
