//! YAML configuration for the album selector.

use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::album::CoverFallback;
use crate::scan::DEFAULT_IMAGE_EXTENSIONS;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Number of album covers per page.
    pub page_size: NonZeroUsize,
    /// File extensions counted as images (case-insensitive, without dot).
    pub image_extensions: Vec<String>,
    /// Name of the per-folder JSON sidecar holding album properties.
    pub album_properties_file: String,
    /// Cover choice when a folder has no usable cover override.
    pub cover_fallback: CoverFallback,
}

impl Configuration {
    const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(20).unwrap();

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate and normalise values that serde defaults alone cannot express.
    pub fn validated(mut self) -> Result<Self> {
        self.image_extensions = self
            .image_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        ensure!(
            !self.image_extensions.is_empty(),
            "image-extensions must name at least one extension"
        );
        ensure!(
            !self.album_properties_file.trim().is_empty(),
            "album-properties-file must not be empty"
        );
        ensure!(
            !self.album_properties_file.contains(['/', '\\']),
            "album-properties-file must be a bare file name"
        );
        Ok(self)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(path) => Self::from_yaml_file(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?,
            None => Self::default(),
        };
        cfg.validated().context("invalid configuration values")
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            album_properties_file: "album.json".to_string(),
            cover_fallback: CoverFallback::default(),
        }
    }
}
