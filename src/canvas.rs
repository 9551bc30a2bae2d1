//! A minimal raster surface over [`image::RgbImage`]: solid fills, clipped
//! horizontal lines, convex polygons and rotation with bounds expansion.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::color::Color;
use crate::{Error, Result};

/// A point in pixel coordinates. May lie outside the canvas.
pub type Point = (i64, i64);

#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    background: Color,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background.to_rgb()),
            background,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Draws row `y` from `x0` to `x1`, both inclusive and in either order.
    /// Whatever falls outside the canvas is clipped.
    pub fn draw_hline(&mut self, x0: i64, x1: i64, y: i64, color: Color) {
        if y < 0 || y >= i64::from(self.height()) {
            return;
        }
        let (start, end) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let start = start.max(0);
        let end = end.min(i64::from(self.width()) - 1);
        let pixel = color.to_rgb();
        for x in start..=end {
            self.image.put_pixel(x as u32, y as u32, pixel);
        }
    }

    /// Fills a convex polygon, edges included.
    pub fn fill_convex_polygon(&mut self, points: &[Point], color: Color) {
        let (Some(top), Some(bottom)) = (
            points.iter().map(|p| p.1).min(),
            points.iter().map(|p| p.1).max(),
        ) else {
            return;
        };

        let edges = points.iter().zip(points.iter().cycle().skip(1));
        let edges: Vec<(Point, Point)> = edges.map(|(a, b)| (*a, *b)).collect();

        for y in top.max(0)..=bottom.min(i64::from(self.height()) - 1) {
            let mut left = f64::INFINITY;
            let mut right = f64::NEG_INFINITY;
            for &((x0, y0), (x1, y1)) in &edges {
                if y < y0.min(y1) || y > y0.max(y1) {
                    continue;
                }
                if y0 == y1 {
                    left = left.min(x0.min(x1) as f64);
                    right = right.max(x0.max(x1) as f64);
                } else {
                    let x = x0 as f64 + (y - y0) as f64 * (x1 - x0) as f64 / (y1 - y0) as f64;
                    left = left.min(x);
                    right = right.max(x);
                }
            }
            if left <= right {
                self.draw_hline(left.round() as i64, right.round() as i64, y, color);
            }
        }
    }

    /// Rotates counter-clockwise by `degrees`, growing the canvas so the
    /// whole image stays visible. Uncovered area takes the background color.
    pub fn rotate(&self, degrees: f64) -> Canvas {
        let image = match degrees.rem_euclid(360.0) {
            d if d == 0.0 => self.image.clone(),
            d if d == 90.0 => imageops::rotate270(&self.image),
            d if d == 180.0 => imageops::rotate180(&self.image),
            d if d == 270.0 => imageops::rotate90(&self.image),
            d => self.rotate_nearest(d.to_radians()),
        };
        Canvas {
            image,
            background: self.background,
        }
    }

    fn rotate_nearest(&self, radians: f64) -> RgbImage {
        let (sin, cos) = radians.sin_cos();
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        let out_w = (w * cos.abs() + h * sin.abs()).ceil() as u32;
        let out_h = (w * sin.abs() + h * cos.abs()).ceil() as u32;

        let mut out = RgbImage::from_pixel(out_w, out_h, self.background.to_rgb());
        for (x, y, pixel) in out.enumerate_pixels_mut() {
            let dx = f64::from(x) + 0.5 - f64::from(out_w) / 2.0;
            let dy = f64::from(y) + 0.5 - f64::from(out_h) / 2.0;
            let sx = (dx * cos - dy * sin + w / 2.0).floor();
            let sy = (dx * sin + dy * cos + h / 2.0).floor();
            if sx >= 0.0 && sy >= 0.0 && sx < w && sy < h {
                *pixel = *self.image.get_pixel(sx as u32, sy as u32);
            }
        }
        out
    }

    /// Shrinks the canvas to fit in a `max_side` square, keeping its aspect
    /// ratio. Smaller canvases are left alone.
    pub fn fit_within(&self, max_side: u32) -> Canvas {
        let (w, h) = (self.width(), self.height());
        if max_side == 0 || (w <= max_side && h <= max_side) {
            return self.clone();
        }
        let scale = f64::from(max_side) / f64::from(w.max(h));
        let new_w = ((f64::from(w) * scale).round() as u32).clamp(1, max_side);
        let new_h = ((f64::from(h) * scale).round() as u32).clamp(1, max_side);
        Canvas {
            image: imageops::resize(&self.image, new_w, new_h, FilterType::Lanczos3),
            background: self.background,
        }
    }

    /// Saves the canvas; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path).map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })
    }
}
