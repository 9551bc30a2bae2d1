use std::path::Path;

use ffmpeg_next as ffmpeg;

use self::ffmpeg::codec::context::Context as CodecContext;
use self::ffmpeg::codec::decoder::Video as Decoder;
use self::ffmpeg::format::context::Input;
use self::ffmpeg::media::Type;
use self::ffmpeg::software::scaling::{Context as Scaler, Flags};
use self::ffmpeg::util::format::pixel::Pixel as PixelFormat;
use self::ffmpeg::util::frame::video::Video as InnerFrame;

use super::{Frame, VideoSource};
use crate::{Error, Result};

/// Microseconds per unit of `Input::duration`.
const TIME_BASE: f64 = 1_000_000.0;

/// The best video stream of a media file, decoded with ffmpeg.
pub struct VideoStream {
    input: Input,
    stream: usize,
    decoder: Decoder,
    frame_count: u64,
    frame_rate: f64,
    current: Option<InnerFrame>,
    scaler: Option<(Scaler, PixelFormat, u32, u32)>,
    exhausted: bool,
}

impl VideoStream {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |error: ffmpeg::Error| Error::source_unavailable(path, error.to_string());

        ffmpeg::init().map_err(unavailable)?;

        let input = ffmpeg::format::input(path).map_err(unavailable)?;

        let (stream, decoder, frame_rate, frames) = {
            let stream = input
                .streams()
                .best(Type::Video)
                .ok_or_else(|| Error::source_unavailable(path, "no video stream"))?;
            let decoder = CodecContext::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
                .map_err(unavailable)?;
            (
                stream.index(),
                decoder,
                f64::from(stream.avg_frame_rate()),
                stream.frames(),
            )
        };

        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(Error::source_unavailable(path, "unknown frame rate"));
        }

        // Containers without a frame count still report a duration.
        let frame_count = if frames > 0 {
            frames as u64
        } else {
            (input.duration().max(0) as f64 / TIME_BASE * frame_rate) as u64
        };

        tracing::debug!(
            path = %path.display(),
            frame_count,
            frame_rate,
            width = decoder.width(),
            height = decoder.height(),
            "opened video stream"
        );

        Ok(Self {
            input,
            stream,
            decoder,
            frame_count,
            frame_rate,
            current: None,
            scaler: None,
            exhausted: false,
        })
    }

    /// Decodes the next frame of the stream without converting it.
    /// Returns `false` once the stream has no frames left.
    fn grab(&mut self) -> Result<bool> {
        let mut decoded = InnerFrame::empty();
        loop {
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                self.current = Some(decoded);
                return Ok(true);
            }
            if self.exhausted {
                self.current = None;
                return Ok(false);
            }
            match self.input.packets().next() {
                Some((stream, packet)) => {
                    if stream.index() == self.stream {
                        self.decoder
                            .send_packet(&packet)
                            .map_err(|e| Error::decode(e.to_string()))?;
                    }
                }
                None => {
                    self.exhausted = true;
                    // Flushing an already flushed decoder fails harmlessly.
                    let _ = self.decoder.send_eof();
                }
            }
        }
    }

    fn convert(&mut self) -> Result<InnerFrame> {
        let frame = self
            .current
            .as_ref()
            .ok_or_else(|| Error::decode("no frame at the current position"))?;
        let (format, width, height) = (frame.format(), frame.width(), frame.height());

        let stale = !matches!(
            &self.scaler,
            Some((_, f, w, h)) if *f == format && *w == width && *h == height
        );
        if stale {
            let scaler = Scaler::get(
                format,
                width,
                height,
                PixelFormat::BGR24,
                width,
                height,
                Flags::BILINEAR,
            )
            .map_err(|e| Error::decode(e.to_string()))?;
            self.scaler = Some((scaler, format, width, height));
        }

        let mut output = InnerFrame::empty();
        if let Some((scaler, ..)) = self.scaler.as_mut() {
            scaler
                .run(frame, &mut output)
                .map_err(|e| Error::decode(e.to_string()))?;
        }
        Ok(output)
    }
}

impl VideoSource for VideoStream {
    fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn advance(&mut self, frames: u64) -> Result<()> {
        super::skip_frames(frames, || self.grab())
    }

    fn retrieve(&mut self) -> Result<Frame> {
        let output = self.convert()?;

        let stride = output.stride(0);
        let row = output.width() as usize * 3;
        let data = output.data(0);

        // If the stride and width are equal, just copy the plane
        let pixels = if stride == row {
            data[..row * output.height() as usize].to_vec()
        // If they aren't (because the data has some padding at the end of each line), skip over it
        } else {
            let mut pixels = Vec::with_capacity(row * output.height() as usize);
            for line in data.chunks(stride).take(output.height() as usize) {
                pixels.extend_from_slice(&line[..row]);
            }
            pixels
        };

        Frame::new(output.width(), output.height(), pixels)
    }
}
