//! Turns a video into posters of its colors.
//!
//! A [`FrameSequencer`] samples a [`VideoSource`] at a fixed rate and reduces
//! each sampled frame to one [`Color`]. The resulting [`ColorSeries`] is
//! stored as plain text and rendered by the [`poster`] module as a barcode,
//! a brightness-driven wave or a band of averaged polygons.
//!
//! Decoding real video files needs the `ffmpeg` feature.

pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
mod error;
pub mod pipeline;
pub mod poster;
pub mod reduce;
pub mod sampler;
pub mod sequencer;
pub mod series;
pub mod video;

pub use canvas::Canvas;
pub use color::Color;
pub use config::PosterConfig;
pub use error::Error;
pub use poster::PosterKind;
pub use sampler::SampleMode;
pub use sequencer::{ExtractOptions, FrameSequencer, Progress};
pub use series::ColorSeries;
pub use video::{Frame, VideoSource};

#[cfg(feature = "ffmpeg")]
pub use video::VideoStream;

pub type Result<T> = std::result::Result<T, Error>;
