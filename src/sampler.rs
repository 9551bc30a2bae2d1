use rand::Rng;

use crate::color::{Color, ColorSum};
use crate::video::Frame;
use crate::{Error, Result};

pub const DEFAULT_SAMPLE_RATE: f64 = 0.01;

/// How a frame is reduced to one representative color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleMode {
    /// Mean over every pixel of the frame.
    FullAverage,
    /// Mean over `rate * pixel_count` pixels drawn uniformly with replacement.
    RandomSample { rate: f64 },
}

impl Default for SampleMode {
    fn default() -> Self {
        Self::RandomSample {
            rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl SampleMode {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FullAverage => Ok(()),
            Self::RandomSample { rate } if rate.is_finite() && rate > 0.0 => Ok(()),
            Self::RandomSample { rate } => Err(Error::invalid_config(format!(
                "sample rate must be a positive fraction, got {}",
                rate
            ))),
        }
    }
}

/// Computes the representative RGB color of `frame`.
///
/// Frames arrive in blue, green, red order; the returned color is RGB.
pub fn sample<R: Rng + ?Sized>(frame: &Frame, mode: SampleMode, rng: &mut R) -> Result<Color> {
    let total = frame.pixel_count();
    if total == 0 {
        return Err(Error::decode("frame has no pixels"));
    }

    let mut sum = ColorSum::default();
    match mode {
        SampleMode::FullAverage => {
            for pixel in frame.pixels() {
                sum.add(pixel);
            }
        }
        SampleMode::RandomSample { rate } => {
            let draws = ((rate * total as f64) as usize).max(1);
            for _ in 0..draws {
                sum.add(frame.pixel(rng.gen_range(0..total)));
            }
        }
    }

    let [b, g, r] = sum
        .mean()
        .ok_or_else(|| Error::decode("no pixels sampled"))?;
    Ok(Color::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn full_average_reverses_channels() {
        let frame = Frame::filled(4, 3, [10, 20, 30]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let color = sample(&frame, SampleMode::FullAverage, &mut rng).unwrap();
        assert_eq!(color, Color::new(30, 20, 10));
    }

    #[test]
    fn full_average_truncates() {
        // two pixels in decoder order: (b, g, r)
        let frame = Frame::new(2, 1, vec![0, 1, 255, 1, 2, 254]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let color = sample(&frame, SampleMode::FullAverage, &mut rng).unwrap();
        assert_eq!(color, Color::new(254, 1, 0));
    }

    #[test]
    fn random_sample_of_uniform_frame_is_exact() {
        let frame = Frame::filled(64, 36, [5, 6, 7]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let color = sample(&frame, SampleMode::default(), &mut rng).unwrap();
        assert_eq!(color, Color::new(7, 6, 5));
    }

    #[test]
    fn random_sample_is_reproducible_with_a_seed() {
        let data: Vec<u8> = (0..100 * 100 * 3).map(|i| (i * 7 % 251) as u8).collect();
        let frame = Frame::new(100, 100, data).unwrap();
        let mode = SampleMode::RandomSample { rate: 0.05 };

        let first = sample(&frame, mode, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = sample(&frame, mode, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tiny_rate_still_draws_one_pixel() {
        let frame = Frame::filled(3, 3, [1, 2, 3]).unwrap();
        let mode = SampleMode::RandomSample { rate: 0.0001 };
        let color = sample(&frame, mode, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(color, Color::new(3, 2, 1));
    }

    #[test]
    fn rejects_non_positive_rates() {
        assert!(SampleMode::RandomSample { rate: 0.0 }.validate().is_err());
        assert!(SampleMode::RandomSample { rate: -0.5 }.validate().is_err());
        assert!(SampleMode::RandomSample { rate: f64::NAN }.validate().is_err());
        assert!(SampleMode::default().validate().is_ok());
        assert!(SampleMode::FullAverage.validate().is_ok());
    }
}
