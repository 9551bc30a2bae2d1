use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::config::{self, PosterConfig};
use crate::poster::PosterKind;
use crate::sequencer::{ExtractOptions, FrameSequencer, Progress};
use crate::series::{self, ColorSeries};
use crate::video::{self, VideoSource};
use crate::{Error, Result};

/// Renders one poster, applies rotation and resizing, and saves it.
pub fn render_poster(
    kind: PosterKind,
    series: &[Color],
    name: &str,
    config: &PosterConfig,
) -> Result<PathBuf> {
    let mut canvas = kind.render(series)?;
    if config.rotation != 0.0 {
        canvas = canvas.rotate(config.rotation);
    }
    if let Some(max_size) = config.max_size {
        canvas = canvas.fit_within(max_size);
    }

    let path = config.poster_path(name, kind);
    canvas.save(&path)?;
    tracing::info!(poster = %kind, path = %path.display(), "saved poster");
    Ok(path)
}

/// Renders every configured poster. A poster the series is too short
/// for is skipped; any other failure stops the batch, and so does a
/// series too short for every poster.
pub fn render_posters(series: &[Color], name: &str, config: &PosterConfig) -> Result<Vec<PathBuf>> {
    config.validate()?;
    create_dir(&config.images_dir)?;

    let mut saved = Vec::with_capacity(config.posters.len());
    let mut skipped = None;
    for &kind in &config.posters {
        match render_poster(kind, series, name, config) {
            Ok(path) => saved.push(path),
            Err(e @ Error::InsufficientData { .. }) => {
                tracing::warn!(poster = %kind, error = %e, "skipping poster");
                skipped = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    match skipped {
        Some(e) if saved.is_empty() => Err(e),
        _ => Ok(saved),
    }
}

/// Loads the series stored for `name`, or extracts it from the source
/// returned by `open` when there is none (or a fresh one is forced).
/// An empty stored series is extracted again.
pub fn load_or_extract<S, F, P>(
    name: &str,
    open: F,
    options: ExtractOptions,
    config: &PosterConfig,
    progress: P,
) -> Result<ColorSeries>
where
    S: VideoSource,
    F: FnOnce() -> Result<S>,
    P: FnMut(Progress),
{
    let path = config.series_path(name);
    if path.is_file() && !config.force_extract {
        let stored = series::load(&path)?;
        if !stored.is_empty() {
            tracing::info!(path = %path.display(), "reusing stored color series");
            return Ok(stored);
        }
        tracing::warn!(path = %path.display(), "stored color series is empty, extracting again");
    }

    let mut sequencer = FrameSequencer::new(options)?.on_progress(progress);
    let mut source = open()?;
    create_dir(&config.color_files_dir)?;
    sequencer.extract(&mut source, &path)
}

/// Extracts (or reuses) the series for `video` and renders its posters.
pub fn generate(
    video: &Path,
    options: ExtractOptions,
    config: &PosterConfig,
    progress: impl FnMut(Progress),
) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let name = config::base_name(video)?;
    let series = load_or_extract(&name, || video::open_video(video), options, config, progress)?;
    render_posters(&series, &name, config)
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io("create directory", dir, e))
}
