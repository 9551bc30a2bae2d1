use crate::color::{Color, ColorSum};

/// Number of consecutive samples averaged into one entry by default.
pub const DEFAULT_GROUP_SIZE: usize = 30;

/// Downsamples `series` by averaging consecutive groups of `group_size`.
///
/// The walk starts at index 1; the first sample only seeds it. Entry `k`
/// is the truncated mean of indices `1 + k * group_size ..= (k + 1) * group_size`.
/// A trailing partial group is dropped, so the result holds
/// `(len - 1) / group_size` entries.
pub fn reduce(series: &[Color], group_size: usize) -> Vec<Color> {
    if group_size == 0 || series.len() < 2 {
        return Vec::new();
    }

    let mut reduced = Vec::with_capacity((series.len() - 1) / group_size);
    let mut sum = ColorSum::default();
    for color in &series[1..] {
        sum.add([color.r, color.g, color.b]);
        if sum.count() == group_size as u64 {
            if let Some(mean) = sum.mean() {
                reduced.push(Color::from(mean));
            }
            sum = ColorSum::default();
        }
    }
    reduced
}
