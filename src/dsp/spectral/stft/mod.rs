//! STFT (short-time Fourier transform) operator and types.
//!
//! An [`Stft`] is built once from an [`StftConfig`] (which plans the FFTs)
//! and can then be applied to any number of signals. Applying it is a pure
//! function of the signal and window: the operator holds no mutable state and
//! is `Send + Sync`.
//!
//! # Algorithm
//!
//! ```text
//! stft(signal[..., time], window[win_length]):
//!
//! 1. If `center`, pad each row by n_fft / 2 on both sides using `pad_mode`.
//! 2. Zero-pad the window to n_fft, centered.
//! 3. For frame i while i * hop + n_fft <= padded_len:
//!      frame = padded[i * hop .. i * hop + n_fft] * window
//! 4. X_i = DFT(frame); if one-sided keep bins 0..=n_fft / 2.
//! 5. If `normalized`, X_i *= 1 / sqrt(n_fft).
//! 6. out[..., k, i] = X_i[k]
//! 7. Unless `return_complex`, split each bin into a trailing [re, im] axis.
//! ```
//!
//! Real frames go through a real-to-complex FFT; the upper half of a
//! two-sided real spectrum is filled in by conjugate symmetry. Complex
//! signals, or real signals with a complex window, go through a complex FFT.

pub mod batch;
pub mod config;
pub mod frame;
pub mod input;
pub mod output;

pub use config::{PadMode, StftConfig, StftParams};
pub use input::{ElementKind, Signal, Window};
pub use output::Spectrogram;

use crate::error::{Result, StftError};
use crate::tensor::{Sample, Tensor};
use frame::*;
use num_complex::Complex;
use rayon::prelude::*;
use realfft::{RealFftPlanner, RealToComplex};
use rustfft::{Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A short-time Fourier transform operator with fixed static parameters.
#[derive(Clone)]
pub struct Stft<T: Sample> {
    params: StftParams,

    /// forward plan for real frames
    real_fft: Arc<dyn RealToComplex<T>>,

    /// forward plan for complex frames
    complex_fft: Arc<dyn Fft<T>>,
}

/// Geometry of a single call, fixed once its inputs have been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    time: usize,
    padded_len: usize,
    num_frames: usize,
    num_bins: usize,
    onesided: bool,
    return_complex: bool,
}

impl Layout {
    /// Elements in one row of output: `num_bins * num_frames`.
    fn row_len(&self) -> usize {
        self.num_bins * self.num_frames
    }
}

impl<T: Sample> Stft<T> {
    /// Validates `config` and plans the FFTs for its `n_fft`.
    pub fn new(config: &StftConfig) -> Result<Self> {
        let params = config.resolve()?;

        let real_fft = RealFftPlanner::<T>::new().plan_fft_forward(params.n_fft);
        let complex_fft = FftPlanner::<T>::new().plan_fft_forward(params.n_fft);

        debug!(
            n_fft = params.n_fft,
            hop_length = params.hop_length,
            win_length = params.win_length,
            center = params.center,
            pad_mode = ?params.pad_mode,
            normalized = params.normalized,
            "planned STFT"
        );

        Ok(Self { params, real_fft, complex_fft })
    }

    /// The validated static parameters.
    pub fn params(&self) -> &StftParams {
        &self.params
    }

    /// Computes the STFT of `signal`, shape `[..., time]`.
    ///
    /// `window` must be 1-D with `win_length` samples; all-ones is used if it
    /// is `None`. Leading axes of `signal` are independent batch axes and
    /// share the window.
    ///
    /// All arguments are checked before any frame is transformed; an error
    /// never comes with partial output.
    pub fn process(
        &self,
        signal: &Signal<T>,
        window: Option<&Window<T>>,
    ) -> Result<Spectrogram<T>> {
        let layout = self.layout(signal, window)?;

        trace!(
            shape = ?signal.shape(),
            kind = ?signal.kind(),
            num_frames = layout.num_frames,
            num_bins = layout.num_bins,
            "computing STFT"
        );

        let spectra = self.transform(signal, window, &layout)?;

        Ok(Spectrogram::from_complex(spectra, layout.return_complex))
    }

    /// Validates the inputs of a call and works out its output geometry.
    pub(crate) fn layout(
        &self,
        signal: &Signal<T>,
        window: Option<&Window<T>>,
    ) -> Result<Layout> {
        let params = &self.params;

        signal.validate()?;
        if let Some(window) = window {
            window.validate(params.win_length)?;
        }

        let (onesided, return_complex) = params.output_format(
            signal.is_complex(),
            window.is_some_and(Window::is_complex),
        )?;

        let time = signal.num_samples();
        let padding = params.padding();
        check_padding(time, padding, params.pad_mode)?;

        let padded_len = time + 2 * padding;
        let num_frames = num_frames(padded_len, params.n_fft, params.hop_length)
            .ok_or_else(|| {
                StftError::invalid(
                    "signal",
                    format!(
                        "{padded_len} samples (after padding) is shorter than n_fft ({})",
                        params.n_fft
                    ),
                )
            })?;

        Ok(Layout {
            time,
            padded_len,
            num_frames,
            num_bins: params.num_bins(onesided),
            onesided,
            return_complex,
        })
    }

    /// Runs the transform for a validated call, returning complex spectra of
    /// shape `[..., num_bins, num_frames]`.
    fn transform(
        &self,
        signal: &Signal<T>,
        window: Option<&Window<T>>,
        layout: &Layout,
    ) -> Result<Tensor<Complex<T>>> {
        let n_fft = self.params.n_fft;
        let win_length = self.params.win_length;

        let spectra = match (signal, window) {
            (Signal::Real(samples), None) => {
                let window = pad_window(&vec![T::one(); win_length], n_fft);
                self.transform_real(samples, &window, layout)?
            }
            (Signal::Real(samples), Some(Window::Real(window))) => {
                let window = pad_window(window.data(), n_fft);
                self.transform_real(samples, &window, layout)?
            }
            _ => {
                let window = window.map_or_else(
                    || vec![Complex::new(T::one(), T::zero()); win_length],
                    |w| w.to_complex().into_data(),
                );
                let window = pad_window(&window, n_fft);
                self.transform_complex(&signal.to_complex(), &window, layout)?
            }
        };

        let signal_shape = signal.shape();
        let mut shape = signal_shape[..signal_shape.len() - 1].to_vec();
        shape.extend([layout.num_bins, layout.num_frames]);

        Tensor::from_vec(spectra, &shape)
    }

    /// Real frames: real-to-complex FFT, mirrored if two-sided output is
    /// requested.
    fn transform_real(
        &self,
        signal: &Tensor<T>,
        window: &[T],
        layout: &Layout,
    ) -> Result<Vec<Complex<T>>> {
        let params = &self.params;
        let fft = self.real_fft.as_ref();
        let scale = T::of(params.scale());
        let n_fft = params.n_fft;

        let num_rows = signal.len() / layout.time;
        let mut out = vec![Complex::default(); num_rows * layout.row_len()];

        out.par_chunks_mut(layout.row_len())
            .zip(signal.data().par_chunks(layout.time))
            .try_for_each_init(
                || RealScratch::new(fft, layout.padded_len),
                |scratch, (out_row, row)| -> Result<()> {
                    pad_signal_into(
                        row,
                        params.padding(),
                        params.pad_mode,
                        &mut scratch.padded,
                    );

                    for frame_idx in 0..layout.num_frames {
                        extract_windowed_frame(
                            &scratch.padded,
                            window,
                            frame_idx * params.hop_length,
                            &mut scratch.frame,
                        );

                        fft.process_with_scratch(
                            &mut scratch.frame,
                            &mut scratch.half,
                            &mut scratch.fft,
                        )?;

                        let half = &scratch.half;
                        let bins = (0..layout.num_bins).map(|k| {
                            if k < half.len() {
                                half[k]
                            } else {
                                // conjugate symmetry of real input
                                half[n_fft - k].conj()
                            }
                        });

                        write_frame(out_row, frame_idx, layout, bins, scale);
                    }

                    Ok(())
                },
            )?;

        Ok(out)
    }

    /// Complex frames: complex FFT, always two-sided.
    fn transform_complex(
        &self,
        signal: &Tensor<Complex<T>>,
        window: &[Complex<T>],
        layout: &Layout,
    ) -> Result<Vec<Complex<T>>> {
        debug_assert!(!layout.onesided);

        let params = &self.params;
        let fft = self.complex_fft.as_ref();
        let scale = T::of(params.scale());

        let num_rows = signal.len() / layout.time;
        let mut out = vec![Complex::default(); num_rows * layout.row_len()];

        out.par_chunks_mut(layout.row_len())
            .zip(signal.data().par_chunks(layout.time))
            .for_each_init(
                || ComplexScratch::new(fft, params.n_fft, layout.padded_len),
                |scratch, (out_row, row)| {
                    pad_signal_into(
                        row,
                        params.padding(),
                        params.pad_mode,
                        &mut scratch.padded,
                    );

                    for frame_idx in 0..layout.num_frames {
                        extract_windowed_frame(
                            &scratch.padded,
                            window,
                            frame_idx * params.hop_length,
                            &mut scratch.frame,
                        );

                        fft.process_with_scratch(&mut scratch.frame, &mut scratch.fft);

                        let bins = scratch.frame.iter().copied();
                        write_frame(out_row, frame_idx, layout, bins, scale);
                    }
                },
            );

        Ok(out)
    }
}

impl<T: Sample> fmt::Debug for Stft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stft").field("params", &self.params).finish()
    }
}

/// Writes the spectrum of frame `frame_idx` down its column of `out_row`,
/// which is laid out `[num_bins, num_frames]`.
#[inline]
fn write_frame<T: Sample>(
    out_row: &mut [Complex<T>],
    frame_idx: usize,
    layout: &Layout,
    bins: impl Iterator<Item = Complex<T>>,
    scale: T,
) {
    for (dst, bin) in out_row
        .iter_mut()
        .skip(frame_idx)
        .step_by(layout.num_frames)
        .zip(bins)
    {
        *dst = bin * scale;
    }
}

/// Per-worker buffers for the real path.
struct RealScratch<T: Sample> {
    padded: Vec<T>,
    frame: Vec<T>,
    half: Vec<Complex<T>>,
    fft: Vec<Complex<T>>,
}

impl<T: Sample> RealScratch<T> {
    fn new(fft: &dyn RealToComplex<T>, padded_len: usize) -> Self {
        Self {
            padded: Vec::with_capacity(padded_len),
            frame: fft.make_input_vec(),
            half: fft.make_output_vec(),
            fft: fft.make_scratch_vec(),
        }
    }
}

/// Per-worker buffers for the complex path.
struct ComplexScratch<T: Sample> {
    padded: Vec<Complex<T>>,
    frame: Vec<Complex<T>>,
    fft: Vec<Complex<T>>,
}

impl<T: Sample> ComplexScratch<T> {
    fn new(fft: &dyn Fft<T>, n_fft: usize, padded_len: usize) -> Self {
        Self {
            padded: Vec::with_capacity(padded_len),
            frame: vec![Complex::default(); n_fft],
            fft: vec![Complex::default(); fft.get_inplace_scratch_len()],
        }
    }
}

/// One-shot STFT: builds an [`Stft`] from `config` and applies it.
pub fn stft<T: Sample>(
    signal: &Signal<T>,
    window: Option<&Window<T>>,
    config: &StftConfig,
) -> Result<Spectrogram<T>> {
    Stft::new(config)?.process(signal, window)
}
