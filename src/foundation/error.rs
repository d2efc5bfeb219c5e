use std::path::PathBuf;

/// Result alias used across the crate.
pub type LookbookResult<T> = Result<T, LookbookError>;

/// Errors produced while building a lookbook video.
#[derive(thiserror::Error, Debug)]
pub enum LookbookError {
    /// Invalid configuration (canvas, timing, zoom).
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that cannot be constructed (non-positive padding, empty image).
    #[error("layout error: {0}")]
    Layout(String),

    /// A single image could not be turned into a scene.
    #[error("compose error: {0}")]
    Compose(String),

    /// The source directory holds no file with a recognized image extension.
    #[error("no images found in source images directory '{}'", dir.display())]
    NoSourceImages {
        /// Directory that was scanned.
        dir: PathBuf,
    },

    /// Every qualifying image failed to composite.
    #[error("none of the source images could be composited")]
    NoScenes,

    /// Background music decode or looping failure.
    #[error("audio error: {0}")]
    Audio(String),

    /// Encoder (ffmpeg) failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Top-level wrapper for any failure of a batch.
    #[error("error processing video: {0}")]
    Processing(Box<LookbookError>),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LookbookError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn compose(msg: impl Into<String>) -> Self {
        Self::Compose(msg.into())
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Wrap `self` as a batch-level failure. Already wrapped errors are returned unchanged.
    pub fn processing(self) -> Self {
        match self {
            Self::Processing(_) => self,
            other => Self::Processing(Box::new(other)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
