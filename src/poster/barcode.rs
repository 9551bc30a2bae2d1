use crate::canvas::Canvas;
use crate::color::Color;
use crate::{Error, Result};

const BACKGROUND: Color = Color::new(255, 255, 255);

/// One full-width row per sample, top to bottom. The canvas is
/// `len` rows tall and two thirds as wide, at least one pixel.
pub fn render(series: &[Color]) -> Result<Canvas> {
    if series.is_empty() {
        return Err(Error::InsufficientData {
            poster: "barcode",
            required: 1,
            actual: 0,
        });
    }

    let height = series.len() as u32;
    let width = ((f64::from(height) / 1.5) as u32).max(1);
    tracing::debug!(width, height, "rendering barcode poster");

    let mut canvas = Canvas::new(width, height, BACKGROUND);
    for (row, color) in series.iter().enumerate() {
        canvas.draw_hline(0, i64::from(width), row as i64, *color);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_sample() {
        let series = [
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
        ];
        let canvas = render(&series).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (2, 3));
        for (y, color) in series.iter().enumerate() {
            for x in 0..2 {
                assert_eq!(*canvas.image().get_pixel(x, y as u32), color.to_rgb());
            }
        }
    }

    #[test]
    fn width_is_two_thirds_of_height() {
        let series = vec![Color::new(1, 2, 3); 301];
        let canvas = render(&series).unwrap();
        assert_eq!(canvas.height(), 301);
        assert_eq!(canvas.width(), 200);
    }

    #[test]
    fn single_sample_still_has_a_column() {
        let canvas = render(&[Color::new(9, 9, 9)]).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            render(&[]),
            Err(Error::InsufficientData {
                poster: "barcode",
                required: 1,
                actual: 0
            })
        ));
    }
}
