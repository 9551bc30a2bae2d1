use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::Level;

use crate::config::{self, PosterConfig};
use crate::pipeline;
use crate::poster::PosterKind;
use crate::sampler::SampleMode;
use crate::sequencer::{ExtractOptions, FrameSequencer, Progress};
use crate::series;
use crate::video;
use crate::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "videoposter", version, about)]
pub struct Cli {
    /// Log more (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample a video's colors into a series file.
    Extract(ExtractArgs),
    /// Render posters from an existing series file.
    Render(RenderArgs),
    /// Extract (unless a series already exists) and render posters.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Video to sample.
    video: PathBuf,

    /// Series file to write [default: <color-files-dir>/<video name>].
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory holding series files.
    #[arg(long, default_value = "ColorFiles")]
    color_files_dir: PathBuf,

    #[command(flatten)]
    sampling: SamplingArgs,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Series file to render.
    series: PathBuf,

    /// Base name of the poster files [default: series file name].
    #[arg(long)]
    name: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Video to sample.
    video: PathBuf,

    /// Extract again even if a series file exists.
    #[arg(long)]
    force: bool,

    /// Directory holding series files.
    #[arg(long, default_value = "ColorFiles")]
    color_files_dir: PathBuf,

    #[command(flatten)]
    sampling: SamplingArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SamplingArgs {
    /// Average every pixel of each frame instead of a random sample (slow).
    #[arg(long)]
    full_frame: bool,

    /// Fraction of pixels drawn per frame when sampling randomly.
    #[arg(long, default_value_t = crate::sampler::DEFAULT_SAMPLE_RATE)]
    sample_rate: f64,

    /// Frames sampled per second of video.
    #[arg(long, default_value_t = 1)]
    samples_per_second: u32,

    /// Seed for random sampling, for reproducible series.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory posters are saved to.
    #[arg(long, default_value = "Images")]
    images_dir: PathBuf,

    /// Counter-clockwise rotation in degrees, 90 for wallpaper orientation.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// Scale posters down so neither side exceeds this many pixels.
    #[arg(long)]
    max_size: Option<u32>,

    /// Posters to render [default: all].
    #[arg(long = "poster", value_enum)]
    posters: Vec<PosterKind>,
}

impl SamplingArgs {
    fn options(&self) -> ExtractOptions {
        let mode = if self.full_frame {
            SampleMode::FullAverage
        } else {
            SampleMode::RandomSample {
                rate: self.sample_rate,
            }
        };
        ExtractOptions {
            mode,
            samples_per_second: self.samples_per_second,
            seed: self.seed,
        }
    }
}

impl OutputArgs {
    fn config(&self, color_files_dir: Option<PathBuf>) -> PosterConfig {
        let defaults = PosterConfig::default();
        PosterConfig {
            images_dir: self.images_dir.clone(),
            color_files_dir: color_files_dir.unwrap_or(defaults.color_files_dir),
            rotation: self.rotation,
            max_size: self.max_size,
            posters: if self.posters.is_empty() {
                defaults.posters
            } else {
                self.posters.clone()
            },
            force_extract: false,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract(args) => {
            let out = match args.out {
                Some(out) => out,
                None => args.color_files_dir.join(config::base_name(&args.video)?),
            };
            let mut sequencer = FrameSequencer::new(args.sampling.options())?
                .on_progress(progress_logger());
            let mut source = video::open_video(&args.video)?;
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| Error::io("create directory", parent, e))?;
            }
            let series = sequencer.extract(&mut source, &out)?;
            tracing::info!(samples = series.len(), path = %out.display(), "wrote color series");
        }
        Command::Render(args) => {
            let name = match args.name {
                Some(name) => name,
                None => config::base_name(&args.series)?,
            };
            let series = series::load(&args.series)?;
            let saved = pipeline::render_posters(&series, &name, &args.output.config(None))?;
            tracing::info!(posters = saved.len(), "done");
        }
        Command::Generate(args) => {
            let mut config = args.output.config(Some(args.color_files_dir));
            config.force_extract = args.force;
            let saved = pipeline::generate(
                &args.video,
                args.sampling.options(),
                &config,
                progress_logger(),
            )?;
            tracing::info!(posters = saved.len(), "done");
        }
    }
    Ok(())
}

/// Logs extraction progress every ten percent.
fn progress_logger() -> impl FnMut(Progress) {
    let mut next_percent = 0;
    move |progress: Progress| {
        if let Some(percent) = progress_milestone(progress, &mut next_percent) {
            tracing::info!(
                processed = progress.processed,
                expected = progress.expected,
                "{}% of samples analyzed",
                percent
            );
        }
    }
}

/// The percentage to report for `progress`, if it reaches `next_percent`.
/// Moves `next_percent` on to the following multiple of ten.
fn progress_milestone(progress: Progress, next_percent: &mut u64) -> Option<u64> {
    let percent = progress.processed * 100 / progress.expected.max(1);
    if percent < *next_percent {
        return None;
    }
    *next_percent = percent - percent % 10 + 10;
    Some(percent)
}
