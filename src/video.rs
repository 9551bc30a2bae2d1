use std::path::Path;

use crate::{Error, Result};

#[cfg(feature = "ffmpeg")]
mod ffmpeg;

#[cfg(feature = "ffmpeg")]
pub use self::ffmpeg::VideoStream;

/// A decoded frame as packed 3-channel pixels in decoder order, which is
/// blue, green, red.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if expected == 0 {
            return Err(Error::decode("frame has no pixels"));
        }
        if data.len() != expected {
            return Err(Error::decode(format!(
                "frame of {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a frame filled with one pixel value, given in decoder order.
    pub fn filled(width: u32, height: u32, pixel: [u8; 3]) -> Result<Self> {
        let count = width as usize * height as usize;
        Self::new(width, height, pixel.repeat(count))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Channels of pixel `index` in row-major order.
    pub fn pixel(&self, index: usize) -> [u8; 3] {
        let offset = index * 3;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

/// A seekable stream of video frames.
///
/// `advance` moves forward without converting the skipped frames;
/// `retrieve` converts the frame at the current position. A frame that
/// cannot be produced is reported as [`Error::Decode`].
pub trait VideoSource {
    fn frame_count(&self) -> u64;

    fn frame_rate(&self) -> f64;

    fn advance(&mut self, frames: u64) -> Result<()>;

    fn retrieve(&mut self) -> Result<Frame>;
}

impl<S: VideoSource + ?Sized> VideoSource for Box<S> {
    fn frame_count(&self) -> u64 {
        (**self).frame_count()
    }

    fn frame_rate(&self) -> f64 {
        (**self).frame_rate()
    }

    fn advance(&mut self, frames: u64) -> Result<()> {
        (**self).advance(frames)
    }

    fn retrieve(&mut self) -> Result<Frame> {
        (**self).retrieve()
    }
}

/// Calls `grab` once per frame until `frames` frames are consumed or the
/// stream ends. A frame that fails to decode still counts as consumed, so
/// the position stays on schedule; the first such failure is returned once
/// the whole step is done.
#[cfg_attr(not(feature = "ffmpeg"), allow(dead_code))]
pub(crate) fn skip_frames<G>(frames: u64, mut grab: G) -> Result<()>
where
    G: FnMut() -> Result<bool>,
{
    let mut failure = None;
    for _ in 0..frames {
        match grab() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_recoverable() => {
                failure.get_or_insert(e);
            }
            Err(e) => return Err(e),
        }
    }
    failure.map_or(Ok(()), Err)
}

/// Opens the video at `path` with the compiled-in decoder.
pub fn open_video(path: &Path) -> Result<Box<dyn VideoSource>> {
    if !path.is_file() {
        return Err(Error::source_unavailable(path, "no such file"));
    }
    open_with_decoder(path)
}

#[cfg(feature = "ffmpeg")]
fn open_with_decoder(path: &Path) -> Result<Box<dyn VideoSource>> {
    Ok(Box::new(VideoStream::open(path)?))
}

#[cfg(not(feature = "ffmpeg"))]
fn open_with_decoder(path: &Path) -> Result<Box<dyn VideoSource>> {
    Err(Error::source_unavailable(
        path,
        "built without a video decoder, enable the `ffmpeg` feature",
    ))
}
