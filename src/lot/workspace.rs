//! Folder layout for one lot and the file operations that fill it
//!
//! ```text
//! <root>/                       source images (the queue)
//! <root>/<lot>/Training Images/ one cropped file per region
//! <root>/<lot>/Processed Images/ originals, moved here once done
//! ```

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::domain::{Rect, rect_to_source};

/// Names used inside a lot folder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotLayout {
    pub training_folder: String,
    pub processed_folder: String,
    /// Word placed between the source name and the region number
    pub crop_label: String,
}

impl Default for LotLayout {
    fn default() -> Self {
        Self {
            training_folder: "Training Images".to_string(),
            processed_folder: "Processed Images".to_string(),
            crop_label: "tree".to_string(),
        }
    }
}

/// Resolved folders for one lot. All three exist once this value does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LotWorkspace {
    pub lot_id: String,
    pub source_dir: PathBuf,
    pub training_dir: PathBuf,
    pub processed_dir: PathBuf,
    crop_label: String,
}

impl LotWorkspace {
    /// Create (or reuse) the lot folders under `root` with the default names
    pub fn ensure(root: &Path, lot_id: &str) -> Result<Self> {
        Self::ensure_with(root, lot_id, &LotLayout::default())
    }

    /// Create (or reuse) the lot folders under `root`.
    ///
    /// Only missing folders are created, so calling this again for the same
    /// lot is always safe. Invalid input is rejected before anything is
    /// written.
    pub fn ensure_with(root: &Path, lot_id: &str, layout: &LotLayout) -> Result<Self> {
        let lot_id = validate_lot_id(lot_id)?;
        if root.as_os_str().is_empty() {
            bail!("No folder was chosen for this batch of images");
        }
        if !root.is_dir() {
            bail!("Image folder does not exist: {}", root.display());
        }

        let lot_dir = root.join(lot_id);
        let training_dir = lot_dir.join(&layout.training_folder);
        let processed_dir = lot_dir.join(&layout.processed_folder);

        if lot_dir.is_dir() {
            log::info!("Reusing lot folder {}", lot_dir.display());
        } else {
            log::info!("Creating lot folder {}", lot_dir.display());
        }
        for dir in [&training_dir, &processed_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create folder: {}", dir.display()))?;
        }

        Ok(Self {
            lot_id: lot_id.to_string(),
            source_dir: root.to_path_buf(),
            training_dir,
            processed_dir,
            crop_label: layout.crop_label.clone(),
        })
    }

    /// Training file name for region `ordinal` (1-based) of `source_name`
    pub fn crop_file_name(&self, source_name: &str, ordinal: usize) -> String {
        let path = Path::new(source_name);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        format!("{stem}-{} {ordinal}{ext}", self.crop_label)
    }

    /// Write region `ordinal` (1-based) of `source_path` into the training folder.
    ///
    /// The original file is duplicated first and the duplicate is cropped in
    /// place, so every region is cut from a fresh decode of the original.
    pub fn export_crop(
        &self,
        source_path: &Path,
        ordinal: usize,
        region: Rect,
        scale: f64,
    ) -> Result<PathBuf> {
        let source_name = file_name(source_path)?;
        let target = self.training_dir.join(self.crop_file_name(&source_name, ordinal));

        std::fs::copy(source_path, &target).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source_path.display(),
                target.display()
            )
        })?;

        if let Err(err) = crop_in_place(&target, region, scale) {
            // Don't leave an uncropped duplicate behind looking like a crop
            if let Err(remove_err) = std::fs::remove_file(&target) {
                log::error!(
                    "Failed to remove partial crop {}: {}",
                    target.display(),
                    remove_err
                );
            }
            return Err(err);
        }

        log::info!("Wrote {}", target.display());
        Ok(target)
    }

    /// Where `source_path` will be archived.
    ///
    /// Fails when that file already exists: a name clash means this image
    /// was archived before, and its crops from that run are still in the
    /// training folder.
    pub fn archive_target(&self, source_path: &Path) -> Result<PathBuf> {
        let target = self.processed_dir.join(file_name(source_path)?);
        if target.exists() {
            bail!("Already archived: {}", target.display());
        }
        Ok(target)
    }

    /// Move the original into the processed folder, never replacing a file
    /// that is already there
    pub fn archive_original(&self, source_path: &Path) -> Result<PathBuf> {
        let target = self.archive_target(source_path)?;

        std::fs::rename(source_path, &target).with_context(|| {
            format!(
                "Failed to move {} to {}",
                source_path.display(),
                target.display()
            )
        })?;

        log::info!("Archived {}", target.display());
        Ok(target)
    }
}

fn validate_lot_id(lot_id: &str) -> Result<&str> {
    let lot_id = lot_id.trim();
    if lot_id.is_empty() {
        bail!("No name was given for the lot number");
    }
    if lot_id == "." || lot_id == ".." || lot_id.contains(['/', '\\']) {
        bail!("Lot number must be a plain folder name, got {lot_id:?}");
    }
    Ok(lot_id)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file path: {}", path.display()))
}

fn crop_in_place(path: &Path, region: Rect, scale: f64) -> Result<()> {
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    let (width, height) = (image.width(), image.height());

    let crop = rect_to_source(region, scale);
    if crop.x >= width || crop.y >= height || crop.width == 0 || crop.height == 0 {
        bail!(
            "Region {:?} lies outside {}x{} image {}",
            region,
            width,
            height,
            path.display()
        );
    }

    let crop_w = crop.width.min(width - crop.x);
    let crop_h = crop.height.min(height - crop.y);
    if (crop_w, crop_h) != (crop.width, crop.height) {
        log::warn!(
            "Region {:?} runs past the image edge, cropping {}x{} instead of {}x{}",
            region,
            crop_w,
            crop_h,
            crop.width,
            crop.height
        );
    }

    image
        .crop_imm(crop.x, crop.y, crop_w, crop_h)
        .save(path)
        .with_context(|| format!("Failed to save crop: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_image(path: &Path, width: u32, height: u32) {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn ensure_creates_all_folders() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();

        assert_eq!(lot.source_dir, root.path());
        assert_eq!(lot.training_dir, root.path().join("LOT1").join("Training Images"));
        assert_eq!(lot.processed_dir, root.path().join("LOT1").join("Processed Images"));
        assert!(lot.training_dir.is_dir());
        assert!(lot.processed_dir.is_dir());
    }

    #[test]
    fn ensure_twice_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let first = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        std::fs::write(first.training_dir.join("kept.png"), b"x").unwrap();

        let second = LotWorkspace::ensure(root.path(), "LOT1").unwrap();

        assert_eq!(first, second);
        assert!(second.training_dir.join("kept.png").exists());
        let lot_entries = std::fs::read_dir(root.path().join("LOT1")).unwrap().count();
        assert_eq!(lot_entries, 2);
    }

    #[test]
    fn ensure_fills_in_missing_subfolder() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("LOT1").join("Training Images")).unwrap();

        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();

        assert!(lot.processed_dir.is_dir());
    }

    #[test]
    fn invalid_lot_ids_create_nothing() {
        let root = tempfile::tempdir().unwrap();
        for lot_id in ["", "   ", "..", "a/b"] {
            assert!(LotWorkspace::ensure(root.path(), lot_id).is_err(), "{lot_id:?}");
        }
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_root_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        assert!(LotWorkspace::ensure(&root.path().join("nope"), "LOT1").is_err());
        assert!(LotWorkspace::ensure(Path::new(""), "LOT1").is_err());
    }

    #[test]
    fn custom_layout_names_are_used() {
        let root = tempfile::tempdir().unwrap();
        let layout = LotLayout {
            training_folder: "train".into(),
            processed_folder: "done".into(),
            crop_label: "log".into(),
        };
        let lot = LotWorkspace::ensure_with(root.path(), "L2", &layout).unwrap();

        assert!(root.path().join("L2").join("train").is_dir());
        assert!(root.path().join("L2").join("done").is_dir());
        assert_eq!(lot.crop_file_name("x.jpg", 3), "x-log 3.jpg");
    }

    #[test]
    fn crop_file_name_keeps_extension_case() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();

        assert_eq!(lot.crop_file_name("IMG_01.JPG", 1), "IMG_01-tree 1.JPG");
        assert_eq!(lot.crop_file_name("a.b.png", 12), "a.b-tree 12.png");
    }

    #[test]
    fn export_crop_maps_region_to_source_pixels() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        let source = root.path().join("big.png");
        write_image(&source, 400, 300);

        let out = lot
            .export_crop(&source, 1, Rect::new(10, 20, 30, 40), 0.5)
            .unwrap();

        assert_eq!(out, lot.training_dir.join("big-tree 1.png"));
        let crop = image::open(&out).unwrap().to_rgb8();
        assert_eq!(crop.dimensions(), (40, 40));
        // Top-left pixel of the crop is source pixel (20, 40)
        assert_eq!(crop.get_pixel(0, 0), &Rgb([20, 40, 0]));
        assert!(source.exists());
    }

    #[test]
    fn export_crop_clamps_to_image_edge() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        let source = root.path().join("small.png");
        write_image(&source, 50, 50);

        let out = lot
            .export_crop(&source, 2, Rect::new(30, 30, 70, 70), 1.0)
            .unwrap();

        assert_eq!(image::open(&out).unwrap().width(), 20);
    }

    #[test]
    fn failed_crop_leaves_no_file_behind() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        let source = root.path().join("small.png");
        write_image(&source, 20, 20);

        let result = lot.export_crop(&source, 1, Rect::new(40, 40, 50, 50), 1.0);

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(&lot.training_dir).unwrap().count(), 0);
    }

    #[test]
    fn archive_moves_the_original() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        let source = root.path().join("a.png");
        std::fs::write(&source, b"original").unwrap();

        let archived = lot.archive_original(&source).unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(archived).unwrap(), b"original");
    }

    #[test]
    fn archive_refuses_to_overwrite() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        let source = root.path().join("a.png");
        std::fs::write(&source, b"new").unwrap();
        std::fs::write(lot.processed_dir.join("a.png"), b"old").unwrap();

        assert!(lot.archive_original(&source).is_err());
        assert!(source.exists());
        assert_eq!(std::fs::read(lot.processed_dir.join("a.png")).unwrap(), b"old");
    }

    #[test]
    fn archive_target_reports_clash_without_touching_files() {
        let root = tempfile::tempdir().unwrap();
        let lot = LotWorkspace::ensure(root.path(), "LOT1").unwrap();
        let source = root.path().join("a.png");
        std::fs::write(&source, b"new").unwrap();

        assert_eq!(
            lot.archive_target(&source).unwrap(),
            lot.processed_dir.join("a.png")
        );
        std::fs::write(lot.processed_dir.join("a.png"), b"old").unwrap();
        assert!(lot.archive_target(&source).is_err());
        assert!(source.exists());
    }
}
