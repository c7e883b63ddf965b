//! Configuration persistence for timbercrop settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::DisplayBounds;
use crate::lot::workspace::LotLayout;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for OutlineColor {
    fn default() -> Self {
        // gray90
        Self {
            r: 0.898,
            g: 0.898,
            b: 0.898,
        }
    }
}

impl OutlineColor {
    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// Application configuration persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimberCropConfig {
    /// Usable display width the preview must fit in
    pub display_width: u32,
    /// Usable display height the preview must fit in
    pub display_height: u32,
    /// Folder inside the lot that receives the crops
    pub training_folder: String,
    /// Folder inside the lot that receives finished originals
    pub processed_folder: String,
    /// Word between the source name and the region number in crop names
    pub crop_label: String,
    /// Where to write the rendered preview, if anywhere
    pub preview_path: Option<PathBuf>,
    /// Region outline color on the preview
    pub outline_color: OutlineColor,
}

impl Default for TimberCropConfig {
    fn default() -> Self {
        let layout = LotLayout::default();
        Self {
            display_width: 1920,
            display_height: 1080,
            training_folder: layout.training_folder,
            processed_folder: layout.processed_folder,
            crop_label: layout.crop_label,
            preview_path: None,
            outline_color: OutlineColor::default(),
        }
    }
}

impl TimberCropConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "timbercrop";

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory on this platform, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("No config directory on this platform, not saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_width == 0 || self.display_height == 0 {
            anyhow::bail!(
                "Display bounds must be non-zero, got {}x{}",
                self.display_width,
                self.display_height
            );
        }
        for (name, value) in [
            ("training_folder", &self.training_folder),
            ("processed_folder", &self.processed_folder),
        ] {
            if value.trim().is_empty() || value.contains(['/', '\\']) {
                anyhow::bail!("{name} must be a plain folder name, got {value:?}");
            }
        }
        if self.training_folder == self.processed_folder {
            anyhow::bail!("training_folder and processed_folder must differ");
        }
        Ok(())
    }

    pub fn bounds(&self) -> DisplayBounds {
        DisplayBounds::new(self.display_width, self.display_height)
    }

    pub fn layout(&self) -> LotLayout {
        LotLayout {
            training_folder: self.training_folder.clone(),
            processed_folder: self.processed_folder.clone(),
            crop_label: self.crop_label.clone(),
        }
    }
}
