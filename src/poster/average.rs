use super::{half_width, Layout};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::reduce::{reduce, DEFAULT_GROUP_SIZE};
use crate::{Error, Result};

pub const ASPECT: f64 = 1.5;

/// Samples needed for two averaged groups.
pub const MIN_SAMPLES: usize = 2 * DEFAULT_GROUP_SIZE + 1;

/// Averages the series in groups and draws one trapezoid per group,
/// from its own half-width at the top to the next group's at the bottom.
pub fn render(series: &[Color]) -> Result<Canvas> {
    let insufficient = |required| Error::InsufficientData {
        poster: "average",
        required,
        actual: series.len(),
    };
    if series.len() < 2 {
        return Err(insufficient(2));
    }
    let reduced = reduce(series, DEFAULT_GROUP_SIZE);
    if reduced.len() < 2 {
        return Err(insufficient(MIN_SAMPLES));
    }

    let layout = Layout::new(series.len(), ASPECT);
    tracing::debug!(?layout, groups = reduced.len(), "rendering average poster");

    let group = DEFAULT_GROUP_SIZE as i64;
    let mid = layout.mid;
    let mut canvas = layout.canvas();
    let mut row = layout.top;
    for pair in reduced.windows(2) {
        let top = half_width(layout.min_width, pair[0]);
        let bottom = half_width(layout.min_width, pair[1]);
        canvas.fill_convex_polygon(
            &[
                (mid - top, row),
                (mid + top, row),
                (mid + bottom, row + group),
                (mid - bottom, row + group),
            ],
            pair[0],
        );
        row += group;
    }
    Ok(canvas)
}
