use std::path::{Path, PathBuf};

use crate::poster::PosterKind;
use crate::{Error, Result};

/// Where series and posters live and how posters are finished.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterConfig {
    pub images_dir: PathBuf,
    pub color_files_dir: PathBuf,
    /// Counter-clockwise rotation in degrees applied before saving.
    pub rotation: f64,
    /// Largest side of a saved poster; larger posters are scaled down.
    pub max_size: Option<u32>,
    pub posters: Vec<PosterKind>,
    /// Extract again even when a series file already exists.
    pub force_extract: bool,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("Images"),
            color_files_dir: PathBuf::from("ColorFiles"),
            rotation: 0.0,
            max_size: None,
            posters: PosterKind::ALL.to_vec(),
            force_extract: false,
        }
    }
}

impl PosterConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.rotation.is_finite() {
            return Err(Error::invalid_config("rotation must be a finite angle"));
        }
        if self.max_size == Some(0) {
            return Err(Error::invalid_config("max size must be at least 1 pixel"));
        }
        if self.posters.is_empty() {
            return Err(Error::invalid_config("no posters selected"));
        }
        Ok(())
    }

    pub fn series_path(&self, name: &str) -> PathBuf {
        self.color_files_dir.join(name)
    }

    pub fn poster_path(&self, name: &str, kind: PosterKind) -> PathBuf {
        self.images_dir.join(kind.file_name(name))
    }
}

/// The name outputs of `video` are keyed by: its file name without extension.
pub fn base_name(video: &Path) -> Result<String> {
    video
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| Error::source_unavailable(video, "path has no usable file name"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_keyed_by_name() {
        let config = PosterConfig::default();
        assert_eq!(config.series_path("heat"), Path::new("ColorFiles/heat"));
        assert_eq!(
            config.poster_path("heat", PosterKind::Wave),
            Path::new("Images/heat_wave.png")
        );
    }

    #[test]
    fn base_name_drops_directory_and_extension() {
        assert_eq!(base_name(Path::new("/movies/Heat.mkv")).unwrap(), "Heat");
        assert_eq!(base_name(Path::new("clip")).unwrap(), "clip");
        assert!(base_name(Path::new("/")).is_err());
    }

    #[test]
    fn rejects_unusable_settings() {
        let mut config = PosterConfig {
            rotation: f64::INFINITY,
            ..PosterConfig::default()
        };
        assert!(config.validate().is_err());
        config.rotation = 90.0;
        assert!(config.validate().is_ok());
        config.posters.clear();
        assert!(config.validate().is_err());
    }
}
