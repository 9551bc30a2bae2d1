use std::fmt;
use std::str::FromStr;

use image::Rgb;

/// Weights of the red, green and blue channels in [`Color::brightness`].
///
/// They sum to 0.9999, so pure white is slightly below 1.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.114];

/// An RGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `[0, 1]`, a greyscale approximation.
    pub fn brightness(self) -> f64 {
        let [wr, wg, wb] = LUMA_WEIGHTS;
        (f64::from(self.r) * wr + f64::from(self.g) * wg + f64::from(self.b) * wb) / 255.0
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Formats as the series line format, `r,g,b`.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Parses `r,g,b`. Whitespace around each component is ignored, so
/// lines like `12, 34, 56` are accepted too.
impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected 3 components, got {}", parts.len()));
        }
        let mut channels = [0u8; 3];
        for (channel, part) in channels.iter_mut().zip(&parts) {
            *channel = part
                .parse::<u8>()
                .map_err(|_| format!("component '{}' is not an integer in 0..=255", part))?;
        }
        Ok(Self::from(channels))
    }
}

/// Component-wise running sum of colors.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ColorSum {
    totals: [u64; 3],
    count: u64,
}

impl ColorSum {
    pub(crate) fn add(&mut self, channels: [u8; 3]) {
        for (total, channel) in self.totals.iter_mut().zip(channels) {
            *total += u64::from(channel);
        }
        self.count += 1;
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    /// Truncated mean of each channel, in the order they were added.
    pub(crate) fn mean(&self) -> Option<[u8; 3]> {
        if self.count == 0 {
            return None;
        }
        Some(self.totals.map(|total| (total / self.count) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_of_extremes() {
        assert_eq!(Color::new(0, 0, 0).brightness(), 0.0);
        let white = Color::new(255, 255, 255).brightness();
        assert!((white - 0.9999).abs() < 1e-12);
        assert!(white < 1.0);
    }

    #[test]
    fn brightness_stays_in_unit_range() {
        for r in (0..=255).step_by(15) {
            for g in (0..=255).step_by(15) {
                for b in (0..=255).step_by(15) {
                    let v = Color::new(r, g, b).brightness();
                    assert!((0.0..=1.0).contains(&v), "{} out of range", v);
                }
            }
        }
    }

    #[test]
    fn green_dominates_brightness() {
        assert!(Color::new(0, 255, 0).brightness() > Color::new(255, 0, 0).brightness());
        assert!(Color::new(255, 0, 0).brightness() > Color::new(0, 0, 255).brightness());
    }

    #[test]
    fn parses_both_line_styles() {
        assert_eq!("12,34,56".parse::<Color>(), Ok(Color::new(12, 34, 56)));
        assert_eq!("12, 34, 56".parse::<Color>(), Ok(Color::new(12, 34, 56)));
        assert_eq!(Color::new(1, 2, 3).to_string(), "1,2,3");
    }

    #[test]
    fn rejects_out_of_range_and_wrong_arity() {
        assert!("256,0,0".parse::<Color>().is_err());
        assert!("-1,0,0".parse::<Color>().is_err());
        assert!("1,2".parse::<Color>().is_err());
        assert!("1,2,3,4".parse::<Color>().is_err());
        assert!("a,b,c".parse::<Color>().is_err());
    }

    #[test]
    fn sum_truncates_mean() {
        let mut sum = ColorSum::default();
        sum.add([1, 10, 255]);
        sum.add([2, 11, 254]);
        assert_eq!(sum.count(), 2);
        assert_eq!(sum.mean(), Some([1, 10, 254]));
        assert_eq!(ColorSum::default().mean(), None);
    }
}
