use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::sampler::{self, SampleMode};
use crate::series::{self, ColorSeries};
use crate::video::VideoSource;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractOptions {
    pub mode: SampleMode,
    pub samples_per_second: u32,
    /// Seed for random pixel sampling; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            mode: SampleMode::default(),
            samples_per_second: 1,
            seed: None,
        }
    }
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_second == 0 {
            return Err(Error::invalid_config(
                "samples per second must be at least 1",
            ));
        }
        self.mode.validate()
    }
}

/// Extraction progress, reported once per sampling iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: u64,
    pub expected: u64,
}

/// The sampling schedule derived from a source's frame rate and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Frames advanced before each sample.
    pub step: u64,
    /// Number of samples requested.
    pub samples: u64,
}

impl Schedule {
    pub fn new(frame_count: u64, frame_rate: f64, samples_per_second: u32) -> Self {
        let step = ((frame_rate / f64::from(samples_per_second)) as u64).max(1);
        Self {
            step,
            samples: frame_count / step,
        }
    }
}

/// Drives a [`VideoSource`] at a fixed rate and samples one color per step.
pub struct FrameSequencer<'a> {
    options: ExtractOptions,
    rng: StdRng,
    progress: Option<Box<dyn FnMut(Progress) + 'a>>,
}

impl<'a> FrameSequencer<'a> {
    pub fn new(options: ExtractOptions) -> Result<Self> {
        options.validate()?;
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            options,
            rng,
            progress: None,
        })
    }

    pub fn on_progress(mut self, observer: impl FnMut(Progress) + 'a) -> Self {
        self.progress = Some(Box::new(observer));
        self
    }

    /// Samples `source` into an in-memory series.
    ///
    /// Frames that fail to decode are skipped, so the series can be
    /// shorter than the schedule asks for. Keeping no sample at all is an
    /// [`Error::NoSamples`].
    pub fn collect<S: VideoSource + ?Sized>(&mut self, source: &mut S) -> Result<ColorSeries> {
        let schedule = Schedule::new(
            source.frame_count(),
            source.frame_rate(),
            self.options.samples_per_second,
        );
        tracing::info!(
            step = schedule.step,
            samples = schedule.samples,
            mode = ?self.options.mode,
            "extracting colors"
        );

        let mut series = ColorSeries::new();
        let mut skipped = 0u64;
        for index in 0..schedule.samples {
            match self.sample_next(source, schedule.step) {
                Ok(color) => series.push(color),
                Err(e) if e.is_recoverable() => {
                    skipped += 1;
                    tracing::debug!(sample = index, error = %e, "skipping frame");
                }
                Err(e) => return Err(e),
            }
            if let Some(observer) = self.progress.as_mut() {
                observer(Progress {
                    processed: index + 1,
                    expected: schedule.samples,
                });
            }
        }

        if series.is_empty() {
            return Err(Error::NoSamples {
                expected: schedule.samples,
            });
        }
        tracing::info!(samples = series.len(), skipped, "extraction finished");
        Ok(series)
    }

    /// Samples `source` and writes the series to `destination`.
    ///
    /// Nothing is written when extraction fails.
    pub fn extract<S: VideoSource + ?Sized>(
        &mut self,
        source: &mut S,
        destination: &Path,
    ) -> Result<ColorSeries> {
        let series = self.collect(source)?;
        series::save(destination, &series)?;
        Ok(series)
    }

    fn sample_next<S: VideoSource + ?Sized>(
        &mut self,
        source: &mut S,
        step: u64,
    ) -> Result<crate::Color> {
        source.advance(step)?;
        let frame = source.retrieve()?;
        sampler::sample(&frame, self.options.mode, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::Frame;

    /// Reports `frames` frames at 10 fps, none of which decode.
    struct Undecodable {
        frames: u64,
    }

    impl VideoSource for Undecodable {
        fn frame_count(&self) -> u64 {
            self.frames
        }

        fn frame_rate(&self) -> f64 {
            10.0
        }

        fn advance(&mut self, _frames: u64) -> Result<()> {
            Ok(())
        }

        fn retrieve(&mut self) -> Result<Frame> {
            Err(Error::decode("corrupt"))
        }
    }

    #[test]
    fn schedule_follows_frame_rate() {
        assert_eq!(
            Schedule::new(300, 30.0, 1),
            Schedule {
                step: 30,
                samples: 10
            }
        );
        assert_eq!(Schedule::new(300, 30.0, 2).step, 15);
        assert_eq!(Schedule::new(300, 29.97, 1).step, 29);
        assert_eq!(Schedule::new(299, 30.0, 1).samples, 9);
    }

    #[test]
    fn step_never_drops_below_one_frame() {
        let schedule = Schedule::new(50, 24.0, 60);
        assert_eq!(schedule.step, 1);
        assert_eq!(schedule.samples, 50);
    }

    #[test]
    fn zero_samples_per_second_is_rejected() {
        let options = ExtractOptions {
            samples_per_second: 0,
            ..ExtractOptions::default()
        };
        assert!(matches!(
            FrameSequencer::new(options),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn nothing_decoded_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie");
        let mut sequencer = FrameSequencer::new(ExtractOptions::default()).unwrap();

        let err = sequencer
            .extract(&mut Undecodable { frames: 50 }, &path)
            .unwrap_err();
        assert!(matches!(err, Error::NoSamples { expected: 5 }));
        assert!(!path.exists());
    }

    #[test]
    fn empty_source_is_an_error() {
        let mut sequencer = FrameSequencer::new(ExtractOptions::default()).unwrap();
        assert!(matches!(
            sequencer.collect(&mut Undecodable { frames: 0 }),
            Err(Error::NoSamples { expected: 0 })
        ));
    }
}
