//! Pending source images for the current lot

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::path::Path;

/// Extensions that get a session; everything else is skipped
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// File names still waiting to be processed, head first
#[derive(Clone, Debug, Default)]
pub struct ImageQueue {
    pending: VecDeque<String>,
}

impl ImageQueue {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Queue every file in `dir` (following symlinks), sorted by name.
    ///
    /// Folders and names that are not valid UTF-8 are left out, each with a
    /// log line.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to list source folder: {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            let path = entry.path();

            let metadata = match std::fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    log::warn!("Leaving out {}: {}", path.display(), err);
                    continue;
                }
            };
            if !metadata.is_file() {
                log::info!("Leaving out {}; not a file", path.display());
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => log::warn!(
                    "Leaving out {:?}; file name is not valid UTF-8",
                    name
                ),
            }
        }
        names.sort();

        log::debug!("Queued {} files from {}", names.len(), dir.display());
        Ok(Self::new(names))
    }

    pub fn peek(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    pub fn drop_head(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Whether `name` has one of the accepted image extensions (any case)
    pub fn is_acceptable(name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
