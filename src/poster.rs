//! Poster renderers. Each turns a color series into a [`Canvas`].

use std::fmt;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::Result;

pub mod average;
pub mod barcode;
pub mod wave;

/// Background of the wave and average posters.
pub const DARK_BACKGROUND: Color = Color::new(26, 28, 33);

/// Exponent weight of brightness in line half-widths.
pub const BRIGHTNESS_COEFF: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PosterKind {
    Barcode,
    Wave,
    Average,
}

impl PosterKind {
    pub const ALL: [PosterKind; 3] = [PosterKind::Average, PosterKind::Wave, PosterKind::Barcode];

    pub fn name(self) -> &'static str {
        match self {
            PosterKind::Barcode => "barcode",
            PosterKind::Wave => "wave",
            PosterKind::Average => "average",
        }
    }

    /// `<base>_<kind>.png`
    pub fn file_name(self, base: &str) -> String {
        format!("{}_{}.png", base, self.name())
    }

    pub fn render(self, series: &[Color]) -> Result<Canvas> {
        match self {
            PosterKind::Barcode => barcode::render(series),
            PosterKind::Wave => wave::render(series),
            PosterKind::Average => average::render(series),
        }
    }
}

impl fmt::Display for PosterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canvas geometry shared by the wave and average posters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    /// First row drawn.
    pub top: i64,
    pub mid: i64,
    pub min_width: i64,
}

impl Layout {
    /// Height is 1.2 rows per sample with a top margin of 0.1 per sample;
    /// width is `height / aspect`.
    pub fn new(samples: usize, aspect: f64) -> Self {
        let height = (samples as f64 * 1.2) as u32;
        let width = (f64::from(height) / aspect) as u32;
        Self {
            width,
            height,
            top: (samples as f64 * 0.1) as i64,
            mid: i64::from(width / 2),
            min_width: i64::from(width / 20),
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height, DARK_BACKGROUND)
    }
}

/// Half-width of a line for `color`: `min_width ^ (1 + 0.3 * brightness)`,
/// truncated.
pub fn half_width(min_width: i64, color: Color) -> i64 {
    (min_width as f64).powf(1.0 + BRIGHTNESS_COEFF * color.brightness()) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_embed_the_kind() {
        assert_eq!(PosterKind::Barcode.file_name("movie"), "movie_barcode.png");
        assert_eq!(PosterKind::Wave.file_name("movie"), "movie_wave.png");
        assert_eq!(PosterKind::Average.file_name("movie"), "movie_average.png");
    }

    #[test]
    fn layout_truncates_like_integer_pixels() {
        let layout = Layout::new(1000, 1.0 + 7.0 / 9.0);
        assert_eq!(layout.height, 1200);
        assert_eq!(layout.width, 675);
        assert_eq!(layout.top, 100);
        assert_eq!(layout.mid, 337);
        assert_eq!(layout.min_width, 33);
    }

    #[test]
    fn half_width_grows_with_brightness() {
        assert_eq!(half_width(33, Color::new(0, 0, 0)), 33);
        let white = half_width(33, Color::new(255, 255, 255));
        assert_eq!(white, 33f64.powf(1.0 + 0.3 * 0.9999) as i64);
        assert!(white > half_width(33, Color::new(128, 128, 128)));
        assert_eq!(half_width(0, Color::new(255, 255, 255)), 0);
    }
}
