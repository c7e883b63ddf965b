//! Shared drawing constants for the preview

/// Region outline constants
pub mod outline {
    /// Stroke width of a region outline in preview pixels
    pub const THICKNESS: f32 = 1.5;
}

/// On-canvas control constants
pub mod control {
    /// Fill of a control box (RGBA)
    pub const FILL: [u8; 4] = [240, 240, 240, 255];
    /// Border of a control box (RGBA), matches the active button color
    pub const BORDER: [u8; 4] = [0x33, 0xB5, 0xE5, 255];
    pub const BORDER_THICKNESS: f32 = 2.0;
}

/// Outline path corners for a rectangle given as left/top/right/bottom
#[inline]
pub fn rect_corners(left: i32, top: i32, right: i32, bottom: i32) -> [(f32, f32); 4] {
    let (l, t, r, b) = (left as f32, top as f32, right as f32, bottom as f32);
    [(l, t), (r, t), (r, b), (l, b)]
}
