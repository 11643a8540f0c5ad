//! Static STFT parameters.
//!
//! [`StftConfig`] is what callers write (and what can be loaded from JSON);
//! [`StftParams`] is the validated form an [`Stft`](super::Stft) is built
//! from. Options that depend on the element kind of the input
//! (`onesided`, `return_complex`) stay optional until a call is made.

use crate::error::{Result, StftError};
use crate::settings::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the signal is extended when `center` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    /// Mirror about the edge sample, excluding it: `c b | a b c d | c b`.
    #[default]
    Reflect,
    /// Zeros.
    Constant,
    /// Repeat the edge sample: `a a | a b c d | d d`.
    Replicate,
    /// Wrap around: `c d | a b c d | a b`.
    Circular,
}

impl PadMode {
    /// The largest padding this mode supports for a signal of `len` samples.
    pub fn max_padding(self, len: usize) -> usize {
        match self {
            Self::Reflect => len.saturating_sub(1),
            Self::Circular => len,
            Self::Constant | Self::Replicate => usize::MAX,
        }
    }
}

/// STFT configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StftConfig {
    /// FFT size.
    pub n_fft: usize,
    /// Samples between successive frames; defaults to `n_fft / 4`.
    #[serde(default)]
    pub hop_length: Option<usize>,
    /// Window length; defaults to `n_fft`.
    #[serde(default)]
    pub win_length: Option<usize>,
    /// Pad the signal by `n_fft / 2` on both sides before framing.
    #[serde(default = "default_center")]
    pub center: bool,
    /// Padding mode used when centering.
    #[serde(default)]
    pub pad_mode: PadMode,
    /// Scale every bin by `1 / sqrt(n_fft)`.
    #[serde(default)]
    pub normalized: bool,
    /// Keep only bins `0..=n_fft / 2`. Defaults to `true` for real input.
    #[serde(default)]
    pub onesided: Option<bool>,
    /// Return native complex values instead of a trailing `[re, im]` axis.
    /// Defaults to whether the input is complex.
    #[serde(default)]
    pub return_complex: Option<bool>,
}

const fn default_center() -> bool {
    DEFAULT_CENTER
}

impl StftConfig {
    /// A configuration with the given FFT size and every other option at its
    /// default.
    #[must_use]
    pub fn new(n_fft: usize) -> Self {
        Self {
            n_fft,
            hop_length: None,
            win_length: None,
            center: DEFAULT_CENTER,
            pad_mode: PadMode::default(),
            normalized: false,
            onesided: None,
            return_complex: None,
        }
    }

    /// Constructing method.
    #[must_use]
    pub fn with_hop_length(mut self, hop_length: usize) -> Self {
        self.hop_length = Some(hop_length);
        self
    }

    /// Constructing method.
    #[must_use]
    pub fn with_win_length(mut self, win_length: usize) -> Self {
        self.win_length = Some(win_length);
        self
    }

    /// Constructing method.
    #[must_use]
    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    /// Constructing method.
    #[must_use]
    pub fn with_pad_mode(mut self, pad_mode: PadMode) -> Self {
        self.pad_mode = pad_mode;
        self
    }

    /// Constructing method.
    #[must_use]
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Constructing method.
    #[must_use]
    pub fn with_onesided(mut self, onesided: bool) -> Self {
        self.onesided = Some(onesided);
        self
    }

    /// Constructing method.
    #[must_use]
    pub fn with_return_complex(mut self, return_complex: bool) -> Self {
        self.return_complex = Some(return_complex);
        self
    }

    /// Parses a configuration from JSON. Missing optional fields take their
    /// defaults; `n_fft` is required.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolves defaults and validates the static parameters.
    pub fn resolve(&self) -> Result<StftParams> {
        let n_fft = self.n_fft;
        if n_fft == 0 {
            return Err(StftError::invalid("n_fft", "must be positive, got 0"));
        }

        let hop_length = self
            .hop_length
            .unwrap_or((n_fft / DEFAULT_HOP_DIVISOR).max(1));
        if hop_length == 0 {
            return Err(StftError::invalid(
                "hop_length",
                "must be positive, got 0",
            ));
        }

        let win_length = self.win_length.unwrap_or(n_fft);
        if win_length == 0 {
            return Err(StftError::invalid(
                "win_length",
                "must be positive, got 0",
            ));
        }
        if win_length > n_fft {
            return Err(StftError::invalid(
                "win_length",
                format!("must be <= n_fft ({n_fft}), got {win_length}"),
            ));
        }

        Ok(StftParams {
            n_fft,
            hop_length,
            win_length,
            center: self.center,
            pad_mode: self.pad_mode,
            normalized: self.normalized,
            onesided: self.onesided,
            return_complex: self.return_complex,
        })
    }
}

/// Validated static parameters of an STFT operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StftParams {
    pub n_fft: usize,
    pub hop_length: usize,
    pub win_length: usize,
    pub center: bool,
    pub pad_mode: PadMode,
    pub normalized: bool,
    pub onesided: Option<bool>,
    pub return_complex: Option<bool>,
}

impl StftParams {
    /// Samples added to each side of the signal before framing.
    pub fn padding(&self) -> usize {
        if self.center { self.n_fft / 2 } else { 0 }
    }

    /// Resolves `(onesided, return_complex)` for an input whose signal and
    /// window have the given element kinds.
    ///
    /// One-sided output is only meaningful when the frame is real, so it is
    /// rejected if either the signal or the window is complex.
    pub fn output_format(
        &self,
        complex_signal: bool,
        complex_window: bool,
    ) -> Result<(bool, bool)> {
        let complex_frame = complex_signal || complex_window;

        let onesided = match self.onesided {
            Some(true) if complex_frame => {
                let which = if complex_signal { "signal" } else { "window" };
                return Err(StftError::invalid(
                    "onesided",
                    format!(
                        "one-sided output requires real input, but the {which} is complex"
                    ),
                ));
            }
            Some(onesided) => onesided,
            None => !complex_frame,
        };

        let return_complex = self.return_complex.unwrap_or(complex_signal);

        Ok((onesided, return_complex))
    }

    /// Number of frequency bins per frame.
    pub fn num_bins(&self, onesided: bool) -> usize {
        if onesided { self.n_fft / 2 + 1 } else { self.n_fft }
    }

    /// Scale applied to every bin.
    pub fn scale(&self) -> f64 {
        if self.normalized {
            (self.n_fft as f64).sqrt().recip()
        } else {
            1.0
        }
    }
}
