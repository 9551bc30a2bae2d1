//! The ordered list of sampled colors and its on-disk text format.
//!
//! A series file holds one color per line as `r,g,b` decimal integers,
//! in sampling order, with no header. A trailing blank line is tolerated.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::ops::Deref;
use std::path::Path;

use crate::color::Color;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorSeries {
    colors: Vec<Color>,
}

impl ColorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: Color) {
        self.colors.push(color);
    }

    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }
}

impl Deref for ColorSeries {
    type Target = [Color];

    fn deref(&self) -> &[Color] {
        &self.colors
    }
}

impl From<Vec<Color>> for ColorSeries {
    fn from(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

impl FromIterator<Color> for ColorSeries {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ColorSeries {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Reads a series from `reader`. `origin` only names the source in errors.
pub fn read_series<R: BufRead>(reader: R, origin: &Path) -> Result<ColorSeries> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        lines.push(line.map_err(|e| read_error(origin, index + 1, e))?);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            line.trim()
                .parse::<Color>()
                .map_err(|reason| Error::MalformedSeries {
                    path: origin.to_path_buf(),
                    line: index + 1,
                    reason,
                })
        })
        .collect()
}

/// Writes one `r,g,b` line per color, joined by newlines.
pub fn write_series<W: Write>(writer: &mut W, series: &[Color]) -> std::io::Result<()> {
    for (index, color) in series.iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        write!(writer, "{}", color)?;
    }
    Ok(())
}

pub fn load(path: &Path) -> Result<ColorSeries> {
    let file = File::open(path).map_err(|e| Error::io("open", path, e))?;
    read_series(BufReader::new(file), path)
}

/// Creates or truncates `path` and writes `series` to it.
pub fn save(path: &Path, series: &[Color]) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io("create", path, e))?;
    let mut writer = BufWriter::new(file);
    write_series(&mut writer, series)
        .and_then(|_| writer.flush())
        .map_err(|e| Error::io("write", path, e))
}

/// Number of samples stored at `path`. Trailing blank lines are not
/// counted, so this always agrees with `load(path)?.len()` for a
/// well-formed file.
pub fn length(path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| Error::io("open", path, e))?;
    let mut count = 0;
    let mut pending_blank = 0;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| read_error(path, index + 1, e))?;
        if line.trim().is_empty() {
            pending_blank += 1;
        } else {
            count += pending_blank + 1;
            pending_blank = 0;
        }
    }
    Ok(count)
}

/// Text that is not UTF-8 is a malformed line, not an I/O failure.
fn read_error(path: &Path, line: usize, error: std::io::Error) -> Error {
    if error.kind() == ErrorKind::InvalidData {
        Error::MalformedSeries {
            path: path.to_path_buf(),
            line,
            reason: error.to_string(),
        }
    } else {
        Error::io("read", path, error)
    }
}
