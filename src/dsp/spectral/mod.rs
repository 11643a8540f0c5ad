//! Module for spectral (frequency domain) processing.

pub mod stft;

pub use stft::{stft, Spectrogram, Stft, StftConfig};
