use super::{half_width, Layout};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::{Error, Result};

/// Height over width of the wave poster.
pub const ASPECT: f64 = 1.0 + 7.0 / 9.0;

/// How far a brighter sample can move the line from one row to the next.
pub const LINE_VARIATION: f64 = 40.0;

/// Smoothed half-widths, one per sample.
///
/// Each row moves towards the brightness-driven target width by at most
/// `(3 + 40 * brightness) / 2` pixels, so the silhouette never jumps.
/// Half-widths never go below zero.
pub fn half_widths(series: &[Color], min_width: i64) -> Vec<i64> {
    let Some(first) = series.first() else {
        return Vec::new();
    };

    let mut last = half_width(min_width, *first);
    series
        .iter()
        .map(|color| {
            let brightness = color.brightness();
            let step = 3.0 + LINE_VARIATION * brightness;
            let previous = last as f64;
            let next = if half_width(min_width, *color) > last {
                (previous + step + previous) / 2.0
            } else {
                (previous - step + previous) / 2.0
            };
            last = (next as i64).max(0);
            last
        })
        .collect()
}

/// A centered line per sample whose width follows brightness.
pub fn render(series: &[Color]) -> Result<Canvas> {
    if series.len() < 2 {
        return Err(Error::InsufficientData {
            poster: "wave",
            required: 2,
            actual: series.len(),
        });
    }

    let layout = Layout::new(series.len(), ASPECT);
    tracing::debug!(?layout, "rendering wave poster");

    let mut canvas = layout.canvas();
    let widths = half_widths(series, layout.min_width);
    for ((row, color), width) in (layout.top..).zip(series).zip(widths) {
        canvas.draw_hline(layout.mid - width, layout.mid + width, row, *color);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::poster::DARK_BACKGROUND;

    fn random_series(len: usize, seed: u64) -> Vec<Color> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| Color::from(rng.gen::<[u8; 3]>())).collect()
    }

    #[test]
    fn constant_color_oscillates_around_its_target() {
        let gray = Color::new(128, 128, 128);
        let target = half_width(30, gray);
        let widths = half_widths(&vec![gray; 200], 30);
        let step = (3.0 + LINE_VARIATION * gray.brightness()) / 2.0;
        for width in widths {
            assert!((width - target).abs() as f64 <= step + 1.0, "{} vs {}", width, target);
        }
    }

    #[test]
    fn first_row_shrinks_from_the_seed_width() {
        let black = Color::new(0, 0, 0);
        // target equals the seed, so the first update takes the lower branch
        assert_eq!(half_widths(&[black, black], 20), vec![18, 19]);
    }

    #[test]
    fn half_widths_are_never_negative() {
        let black = Color::new(0, 0, 0);
        assert!(half_widths(&vec![black; 50], 0).iter().all(|w| *w == 0));
        assert!(half_widths(&vec![black; 50], 1).iter().all(|w| *w >= 0));
    }

    #[test]
    fn lines_stay_inside_the_canvas() {
        for (len, seed) in [(300, 1), (600, 2), (1_800, 3), (7_200, 4)] {
            let series = random_series(len, seed);
            let layout = Layout::new(len, ASPECT);
            let bound = half_width(layout.min_width, Color::new(255, 255, 255)) + 22;
            for width in half_widths(&series, layout.min_width) {
                assert!(width >= 0 && width <= bound, "{} exceeds {}", width, bound);
                assert!(layout.mid - width >= 0);
                assert!(layout.mid + width < i64::from(layout.width));
            }
        }
    }

    #[test]
    fn tiny_canvases_clip_wide_lines() {
        let series: Vec<Color> = (0..20)
            .map(|i| if i % 2 == 0 { Color::new(255, 255, 255) } else { Color::new(0, 0, 0) })
            .collect();
        let canvas = render(&series).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (13, 24));
    }

    #[test]
    fn rows_start_below_the_margin() {
        let series = vec![Color::new(200, 180, 160); 100];
        let canvas = render(&series).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (67, 120));

        let mid = 33;
        for y in 0..10 {
            assert_eq!(*canvas.image().get_pixel(mid, y), DARK_BACKGROUND.to_rgb());
        }
        for y in 10..110 {
            assert_eq!(*canvas.image().get_pixel(mid, y), series[0].to_rgb());
        }
        assert_eq!(*canvas.image().get_pixel(mid, 110), DARK_BACKGROUND.to_rgb());
        assert_eq!(*canvas.image().get_pixel(0, 50), DARK_BACKGROUND.to_rgb());
    }

    #[test]
    fn short_series_is_rejected() {
        assert!(matches!(
            render(&[Color::new(1, 1, 1)]),
            Err(Error::InsufficientData {
                poster: "wave",
                required: 2,
                actual: 1
            })
        ));
    }
}
