//! Digital signal processors and utilities.

pub mod spectral;

pub use spectral::stft::{
    stft, ElementKind, PadMode, Signal, Spectrogram, Stft, StftConfig,
    StftParams, Window,
};
