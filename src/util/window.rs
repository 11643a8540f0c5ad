//! Window functions for use as STFT analysis windows.
//!
//! All windows here are *periodic* (DFT-even): a window of size `N` is the
//! first `N` points of a symmetric window of size `N + 1`. That is the
//! convention spectral analysis expects, and the one `Window::from_type`
//! hands to the STFT.
use std::f64::consts::{PI, TAU};

/// The available window shapes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum WindowType {
    /// All ones; the STFT default.
    #[default]
    Rectangular,
    Hann,
    Hamming,
    Nuttall,
    Blackman,
    BlackmanNuttall,
    BlackmanHarris,
    FlatTop,
    Sine,
    Welch,
}

impl WindowType {
    /// Generates a window of this type with `size` points.
    pub fn generate(self, size: usize) -> Vec<f64> {
        let mut vec = vec![0.0; size];
        self.generate_in_place(&mut vec);
        vec
    }

    /// Fills `slice` with a window of this type.
    pub fn generate_in_place(self, slice: &mut [f64]) {
        match self {
            Self::Rectangular => slice.fill(1.0),
            Self::Hann => hann_in_place(slice),
            Self::Hamming => hamming_in_place(slice),
            Self::Nuttall => nuttall_in_place(slice),
            Self::Blackman => blackman_in_place(slice),
            Self::BlackmanNuttall => blackman_nuttall_in_place(slice),
            Self::BlackmanHarris => blackman_harris_in_place(slice),
            Self::FlatTop => flat_top_in_place(slice),
            Self::Sine => sine_in_place(slice),
            Self::Welch => welch_in_place(slice),
        }
    }
}

/// A rectangular (boxcar) window.
pub fn rectangular(size: usize) -> Vec<f64> {
    vec![1.0; size]
}

/// A Welch window.
///
/// Simple computation, but sub-par side-lobe level.
pub fn welch(size: usize) -> Vec<f64> {
    WindowType::Welch.generate(size)
}

/// In-place variant of `welch()`.
pub fn welch_in_place(slice: &mut [f64]) {
    let half_size = slice.len() as f64 / 2.0;

    for (n, x) in slice.iter_mut().enumerate() {
        *x = 1.0 - ((n as f64 - half_size) / half_size).powi(2);
    }
}

/// A sine window.
///
/// Very fast to compute, and decent side-lobe level.
pub fn sine(size: usize) -> Vec<f64> {
    WindowType::Sine.generate(size)
}

/// In-place variant of `sine()`.
pub fn sine_in_place(slice: &mut [f64]) {
    let size = slice.len() as f64;

    for (n, x) in slice.iter_mut().enumerate() {
        *x = (PI * n as f64 / size).sin();
    }
}

/// Shared body of the "cosine sum" family:
///
/// `w[n] = a0 - a1 cos(τn/N) + a2 cos(2τn/N) - a3 cos(3τn/N) + ...`
fn cosine_sum(slice: &mut [f64], coeffs: &[f64]) {
    let size = slice.len() as f64;

    for (n, x) in slice.iter_mut().enumerate() {
        let phase = TAU * n as f64 / size;

        *x = coeffs
            .iter()
            .enumerate()
            .map(|(k, a)| {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                sign * a * (k as f64 * phase).cos()
            })
            .sum();
    }
}

/// A Hann (raised cosine) window.
pub fn hann(size: usize) -> Vec<f64> {
    WindowType::Hann.generate(size)
}

/// In-place variant of `hann()`.
pub fn hann_in_place(slice: &mut [f64]) {
    cosine_sum(slice, &[0.5, 0.5]);
}

/// A Hamming window, using the "exact" coefficients (25/46, 21/46).
pub fn hamming(size: usize) -> Vec<f64> {
    WindowType::Hamming.generate(size)
}

/// In-place variant of `hamming()`.
pub fn hamming_in_place(slice: &mut [f64]) {
    cosine_sum(slice, &[0.543_478_26, 0.456_521_74]);
}

pub fn nuttall(size: usize) -> Vec<f64> {
    WindowType::Nuttall.generate(size)
}

/// In-place variant of `nuttall()`.
pub fn nuttall_in_place(slice: &mut [f64]) {
    cosine_sum(slice, &[0.355_768, 0.487_396, 0.144_232, 0.012_604]);
}

/// A Blackman window with the truncated (0.42, 0.5, 0.08) coefficients.
pub fn blackman(size: usize) -> Vec<f64> {
    WindowType::Blackman.generate(size)
}

/// In-place variant of `blackman()`.
pub fn blackman_in_place(slice: &mut [f64]) {
    cosine_sum(slice, &[0.42, 0.5, 0.08]);
}

pub fn blackman_nuttall(size: usize) -> Vec<f64> {
    WindowType::BlackmanNuttall.generate(size)
}

/// In-place variant of `blackman_nuttall()`.
pub fn blackman_nuttall_in_place(slice: &mut [f64]) {
    cosine_sum(slice, &[0.363_581_9, 0.489_177_5, 0.136_599_5, 0.010_641_1]);
}

pub fn blackman_harris(size: usize) -> Vec<f64> {
    WindowType::BlackmanHarris.generate(size)
}

/// In-place variant of `blackman_harris()`.
pub fn blackman_harris_in_place(slice: &mut [f64]) {
    cosine_sum(slice, &[0.358_75, 0.488_29, 0.141_28, 0.011_68]);
}

/// A flat-top window. Poor frequency resolution, but very accurate
/// amplitudes.
pub fn flat_top(size: usize) -> Vec<f64> {
    WindowType::FlatTop.generate(size)
}

/// In-place variant of `flat_top()`.
pub fn flat_top_in_place(slice: &mut [f64]) {
    cosine_sum(
        slice,
        &[0.215_578_95, 0.416_631_58, 0.277_263_16, 0.083_578_947, 0.006_947_368],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::within_tolerance;

    #[test]
    fn hann_is_periodic() {
        let w = hann(8);
        assert!(within_tolerance(w[0], 0.0, 1e-12));
        assert!(within_tolerance(w[4], 1.0, 1e-12));
        // symmetric about the centre sample, not about the last one
        for n in 1..4 {
            assert!(within_tolerance(w[n], w[8 - n], 1e-12));
        }
    }

    #[test]
    fn cosine_sums_peak_at_centre() {
        for kind in [
            WindowType::Hamming,
            WindowType::Nuttall,
            WindowType::Blackman,
            WindowType::BlackmanNuttall,
            WindowType::BlackmanHarris,
            WindowType::FlatTop,
        ] {
            let w = kind.generate(64);
            let peak = w.iter().copied().fold(f64::MIN, f64::max);
            assert!(within_tolerance(w[32], peak, 1e-12), "{kind:?}");
            assert!(within_tolerance(peak, 1.0, 1e-3), "{kind:?}");
        }
    }

    #[test]
    fn rectangular_is_default() {
        assert_eq!(WindowType::default().generate(5), rectangular(5));
    }

    #[test]
    fn sine_and_welch_start_at_zero() {
        assert!(within_tolerance(sine(16)[0], 0.0, 1e-12));
        assert!(within_tolerance(welch(16)[0], 0.0, 1e-12));
        assert!(within_tolerance(welch(16)[8], 1.0, 1e-12));
    }
}
