//! Conversions between preview space and source-image space

use super::geometry::{Point, Rect};

/// Usable display area the preview has to fit in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayBounds {
    pub width: u32,
    pub height: u32,
}

impl DisplayBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A position in source-image pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourcePoint {
    pub x: u32,
    pub y: u32,
}

/// Crop box in source-image pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Scale that fits a `source_w`x`source_h` image inside `bounds`.
///
/// Images that already fit are shown at 1.0; larger ones are shrunk by the
/// tighter of the two axis ratios so the aspect ratio is kept.
pub fn scale_factor(source_w: u32, source_h: u32, bounds: DisplayBounds) -> f64 {
    if source_w > bounds.width || source_h > bounds.height {
        let width_ratio = bounds.width as f64 / source_w as f64;
        let height_ratio = bounds.height as f64 / source_h as f64;
        width_ratio.min(height_ratio)
    } else {
        1.0
    }
}

/// Preview dimensions for a source image drawn at `scale`
pub fn preview_size(source_w: u32, source_h: u32, scale: f64) -> (u32, u32) {
    (
        (source_w as f64 * scale).round_ties_even() as u32,
        (source_h as f64 * scale).round_ties_even() as u32,
    )
}

/// Map a preview-space point back to source pixels
pub fn to_source(point: Point, scale: f64) -> SourcePoint {
    SourcePoint {
        x: (point.x as f64 / scale).round_ties_even() as u32,
        y: (point.y as f64 / scale).round_ties_even() as u32,
    }
}

/// Map a preview-space region to a source crop box
pub fn rect_to_source(rect: Rect, scale: f64) -> SourceRect {
    let top_left = to_source(rect.top_left(), scale);
    let bottom_right = to_source(rect.bottom_right(), scale);
    SourceRect {
        x: top_left.x,
        y: top_left.y,
        width: bottom_right.x.saturating_sub(top_left.x),
        height: bottom_right.y.saturating_sub(top_left.y),
    }
}
