//! Preview rendering using tiny-skia
//!
//! These functions draw regions and controls onto the resampled preview so
//! an external viewer can show what the operator is marking.

use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::geometry::{self, control, outline};
use crate::config::OutlineColor;
use crate::domain::Rect;
use crate::session::state::{ControlLayout, DisplaySession};

/// Convert RgbaImage to Pixmap, apply drawing function, and copy back
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let (w, h) = (img.width(), img.height());
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };

    f(&mut pixmap);

    // Copy back
    img.copy_from_slice(pixmap.data());
}

fn build_rect_path(rect: &Rect) -> Option<tiny_skia::Path> {
    let [first, rest @ ..] = geometry::rect_corners(rect.left, rect.top, rect.right, rect.bottom);

    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for (x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Square,
        line_join: LineJoin::Miter,
        ..Default::default()
    }
}

/// Draw hollow region outlines onto the preview
pub fn draw_regions_on_image(img: &mut RgbaImage, rects: &[Rect], color: OutlineColor) {
    if rects.is_empty() {
        return;
    }

    with_pixmap(img, |pixmap| {
        let [r, g, b, a] = color.to_rgba_u8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        for rect in rects {
            let Some(path) = build_rect_path(rect) else {
                continue;
            };
            pixmap.stroke_path(
                &path,
                &paint,
                &stroke(outline::THICKNESS),
                Transform::identity(),
                None,
            );
        }
    });
}

/// Draw the undo and advance boxes onto the preview
pub fn draw_controls_on_image(img: &mut RgbaImage, controls: &ControlLayout) {
    with_pixmap(img, |pixmap| {
        for rect in [controls.undo, controls.advance] {
            let Some(path) = build_rect_path(&rect) else {
                continue;
            };

            let [r, g, b, a] = control::FILL;
            let mut fill = Paint::default();
            fill.set_color_rgba8(r, g, b, a);
            pixmap.fill_path(
                &path,
                &fill,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                None,
            );

            let [r, g, b, a] = control::BORDER;
            let mut border = Paint::default();
            border.set_color_rgba8(r, g, b, a);
            pixmap.stroke_path(
                &path,
                &border,
                &stroke(control::BORDER_THICKNESS),
                Transform::identity(),
                None,
            );
        }
    });
}

/// Compose the preview, controls and regions of `session`.
///
/// `None` when the session kept no preview.
pub fn render_session(session: &DisplaySession, color: OutlineColor) -> Option<RgbaImage> {
    let mut img = session.preview.clone()?;
    draw_controls_on_image(&mut img, &session.controls);
    draw_regions_on_image(&mut img, &session.tracker.rects(), color);
    Some(img)
}

/// Writes the rendered preview to a fixed file for an external viewer
#[derive(Clone, Debug)]
pub struct PreviewWriter {
    path: PathBuf,
    color: OutlineColor,
}

impl PreviewWriter {
    pub fn new(path: impl Into<PathBuf>, color: OutlineColor) -> Self {
        Self {
            path: path.into(),
            color,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, session: &DisplaySession) -> Result<()> {
        let Some(img) = render_session(session, self.color) else {
            return Ok(());
        };
        img.save_with_format(&self.path, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write preview: {}", self.path.display()))?;
        log::trace!("Preview written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn region_outline_is_drawn_but_interior_is_untouched() {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        let color = OutlineColor::default();

        draw_regions_on_image(&mut img, &[Rect::new(10, 10, 50, 50)], color);

        let edge = img.get_pixel(30, 10);
        assert!(edge[0] > 100, "edge pixel {edge:?}");
        assert_eq!(img.get_pixel(30, 30), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(80, 80), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn controls_are_filled() {
        let mut img = RgbaImage::from_pixel(400, 300, Rgba([0, 0, 0, 255]));
        let controls = ControlLayout::for_preview(400, 300);

        draw_controls_on_image(&mut img, &controls);

        let centre_x = ((controls.advance.left + controls.advance.right) / 2) as u32;
        let centre_y = ((controls.advance.top + controls.advance.bottom) / 2) as u32;
        assert_eq!(img.get_pixel(centre_x, centre_y), &Rgba(control::FILL));
    }

    #[test]
    fn no_regions_leaves_image_unchanged() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([5, 5, 5, 255]));
        let before = img.clone();

        draw_regions_on_image(&mut img, &[], OutlineColor::default());

        assert_eq!(img, before);
    }
}
