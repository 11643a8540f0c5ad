//! Error types for the STFT operator.

use thiserror::Error;

/// Result type for STFT operations.
pub type Result<T> = std::result::Result<T, StftError>;

/// Error type for STFT operations.
///
/// Every variant other than [`StftError::Fft`] is raised during argument
/// validation, before any frame is computed.
#[derive(Error, Debug)]
pub enum StftError {
    /// An argument was outside its valid domain.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        arg: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// Shape mismatch between two tensors, or between a tensor and its data.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        actual: Vec<usize>,
    },

    /// The FFT backend rejected a buffer.
    #[error("FFT error: {0}")]
    Fft(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StftError {
    /// Shorthand for [`StftError::InvalidArgument`].
    pub(crate) fn invalid(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { arg, reason: reason.into() }
    }
}

impl From<serde_json::Error> for StftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<realfft::FftError> for StftError {
    fn from(err: realfft::FftError) -> Self {
        Self::Fft(err.to_string())
    }
}
