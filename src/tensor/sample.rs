//! Floating-point element types accepted by the STFT.

use bytemuck::Pod;
use rustfft::{num_traits::Float, FftNum};

/// A real floating-point sample type (`f32` or `f64`).
///
/// Complex samples are `Complex<T>` for some `T: Sample`.
pub trait Sample: FftNum + Float + Pod + Default {
    /// Converts an `f64` into this sample type, rounding if needed.
    fn of(value: f64) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn of(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    #[inline]
    fn of(value: f64) -> Self {
        value
    }
}
