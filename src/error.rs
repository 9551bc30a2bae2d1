use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unable to open video source '{}': {reason}", .path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("failed to decode frame: {0}")]
    Decode(String),

    #[error("no frame of the video could be sampled ({expected} requested)")]
    NoSamples { expected: u64 },

    #[error("malformed color series '{}' at line {line}: {reason}", .path.display())]
    MalformedSeries {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{poster} poster needs at least {required} samples, got {actual}")]
    InsufficientData {
        poster: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("failed to {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save image '{}': {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn source_unavailable(path: &Path, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Per-frame failures that extraction absorbs by skipping the sample.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_decode_failures_are_recoverable() {
        assert!(Error::decode("corrupt packet").is_recoverable());
        assert!(!Error::source_unavailable(Path::new("a.mp4"), "missing").is_recoverable());
        assert!(!Error::invalid_config("x").is_recoverable());
        assert!(!Error::NoSamples { expected: 10 }.is_recoverable());
    }

    #[test]
    fn messages_carry_path_and_operation() {
        let err = Error::io(
            "create",
            Path::new("ColorFiles/movie"),
            std::io::Error::other("denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("create"));
        assert!(msg.contains("ColorFiles/movie"));
        assert!(msg.contains("denied"));

        let err = Error::MalformedSeries {
            path: PathBuf::from("series"),
            line: 4,
            reason: "expected 3 components".into(),
        };
        assert!(err.to_string().contains("line 4"));
    }
}
