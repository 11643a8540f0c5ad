//! Crate-wide defaults.

/// `hop_length` defaults to `n_fft / DEFAULT_HOP_DIVISOR` (a 75% overlap).
pub const DEFAULT_HOP_DIVISOR: usize = 4;

/// Whether frames are centered on their hop offsets by default.
pub const DEFAULT_CENTER: bool = true;

/// Relative tolerance used when comparing spectra, matching NumPy's
/// `allclose` default.
pub const DEFAULT_RTOL: f64 = 1e-5;

/// Absolute tolerance used when comparing spectra.
pub const DEFAULT_ATOL: f64 = 1e-8;
