use std::path::Path;

use anyhow::Result;
use image::RgbaImage;

use crate::domain::{DisplayBounds, Point, Rect, RegionHandle, RegionTracker};
use crate::imaging::source::SourceImage;
use crate::session::messages::Control;

/// Horizontal gap between a control and the preview edge
pub const CONTROL_MARGIN: i32 = 10;
/// Distance from the preview bottom to the controls' bottom edge
pub const CONTROL_BOTTOM_OFFSET: i32 = 130;
pub const CONTROL_WIDTH: i32 = 80;
pub const CONTROL_HEIGHT: i32 = 30;

/// Where the on-canvas controls sit for the current preview
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlLayout {
    pub undo: Rect,
    pub advance: Rect,
}

impl ControlLayout {
    /// Undo in the bottom-left corner, advance in the bottom-right, both
    /// lifted off the bottom edge. Tiny previews push them to the top.
    pub fn for_preview(width: u32, height: u32) -> Self {
        let width = width as i32;
        let bottom = (height as i32 - CONTROL_BOTTOM_OFFSET).max(CONTROL_HEIGHT);
        let top = bottom - CONTROL_HEIGHT;

        let undo_left = CONTROL_MARGIN;
        let advance_right = (width - CONTROL_MARGIN).max(undo_left + 2 * CONTROL_WIDTH);

        Self {
            undo: Rect::new(undo_left, top, undo_left + CONTROL_WIDTH, bottom),
            advance: Rect::new(advance_right - CONTROL_WIDTH, top, advance_right, bottom),
        }
    }

    /// The control under `point`, if any
    pub fn hit(&self, point: Point) -> Option<Control> {
        if self.advance.contains_point(point) {
            Some(Control::Advance)
        } else if self.undo.contains_point(point) {
            Some(Control::Undo)
        } else {
            None
        }
    }
}

/// Everything that belongs to the image currently on screen
#[derive(Clone, Debug)]
pub struct DisplaySession {
    pub file_name: String,
    pub source: SourceImage,
    pub preview_size: (u32, u32),
    pub tracker: RegionTracker,
    /// Region being dragged right now, between pointer down and up
    pub active: Option<RegionHandle>,
    pub controls: ControlLayout,
    /// Resampled preview, only kept when something renders it
    pub preview: Option<RgbaImage>,
}

impl DisplaySession {
    /// Load `file_name` from `dir` and open a fresh session for it
    pub fn open(dir: &Path, file_name: &str, bounds: DisplayBounds, keep_preview: bool) -> Result<Self> {
        let source = SourceImage::open(&dir.join(file_name), bounds)?;
        let preview_size = source.preview_size();
        let preview = keep_preview.then(|| source.preview());

        Ok(Self {
            file_name: file_name.to_string(),
            controls: ControlLayout::for_preview(preview_size.0, preview_size.1),
            preview_size,
            tracker: RegionTracker::new(),
            active: None,
            preview,
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }

    pub fn scale(&self) -> f64 {
        self.source.scale
    }
}
