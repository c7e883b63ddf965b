//! Source image type for the image currently on screen

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};

use crate::domain::{DisplayBounds, preview_size, scale_factor};

/// A decoded source image together with the scale it is shown at
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub scale: f64,
}

impl SourceImage {
    /// Decode `path` and work out the scale that fits it inside `bounds`
    pub fn open(path: &Path, bounds: DisplayBounds) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Failed to open image: {}", path.display()))?;
        let scale = scale_factor(image.width(), image.height(), bounds);

        log::info!("Original image is {}x{}", image.width(), image.height());
        if scale < 1.0 {
            let (w, h) = preview_size(image.width(), image.height(), scale);
            log::info!("Image was resized to {}x{}", w, h);
        }

        Ok(Self {
            path: path.to_path_buf(),
            image,
            scale,
        })
    }

    /// Get the width of the source image
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Get the height of the source image
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn preview_size(&self) -> (u32, u32) {
        preview_size(self.width(), self.height(), self.scale)
    }

    /// Resample the source to preview size
    pub fn preview(&self) -> RgbaImage {
        let (w, h) = self.preview_size();
        if (w, h) == (self.width(), self.height()) {
            self.image.to_rgba8()
        } else {
            self.image.resize_exact(w, h, FilterType::Lanczos3).to_rgba8()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn large_image_is_scaled_to_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::from_pixel(400, 100, Rgb([9, 9, 9])).save(&path).unwrap();

        let source = SourceImage::open(&path, DisplayBounds::new(200, 200)).unwrap();

        assert_eq!(source.scale, 0.5);
        assert_eq!(source.preview_size(), (200, 50));
        assert_eq!(source.preview().dimensions(), (200, 50));
    }

    #[test]
    fn small_image_keeps_its_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.jpg");
        RgbImage::from_pixel(64, 48, Rgb([200, 10, 10])).save(&path).unwrap();

        let source = SourceImage::open(&path, DisplayBounds::new(200, 200)).unwrap();

        assert_eq!(source.scale, 1.0);
        assert_eq!(source.preview().dimensions(), (64, 48));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(SourceImage::open(&path, DisplayBounds::new(200, 200)).is_err());
    }
}
