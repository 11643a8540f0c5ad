#![allow(
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::return_self_not_must_use
)]

//! A short-time Fourier transform operator for real and complex, batched
//! 1-D signals.
//!
//! ```ignore
//! use stftkit::prelude::*;
//!
//! let signal = Signal::real(vec![1.0; 6]);
//! let config = StftConfig::new(4).with_center(false);
//!
//! // [3 bins, 3 frames, re/im]
//! let out = stft(&signal, None, &config)?;
//! ```

// Signal processing
pub mod dsp;

// Error types
pub mod error;

// Owned n-dimensional buffers
pub mod tensor;

// General utilities
pub mod util;

// Some widely-used re-exports
pub mod prelude;

// Crate-wide defaults
pub mod settings;

pub use error::{Result, StftError};
