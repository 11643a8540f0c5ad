//! Batched STFT with per-element windows.
//!
//! [`Stft::process`] already treats leading axes as batch axes, but they all
//! share one window. [`Stft::process_batched`] pairs slice `b` of a signal
//! stack with window `b` of a window stack, and is defined to be exactly
//! equivalent to calling [`Stft::process`] on each pair and stacking the
//! results along a new leading axis.

use super::{Signal, Spectrogram, Stft, Window};
use crate::error::{Result, StftError};
use crate::tensor::Sample;
use rayon::prelude::*;
use tracing::trace;

impl<T: Sample> Stft<T> {
    /// Applies the STFT to every slice along the leading axis of `signals`
    /// and stacks the outputs.
    ///
    /// `signals` has shape `[batch, ..., time]` (at least 2-D). `windows`, if
    /// given, has shape `[batch, win_length]`. The output has shape
    /// `[batch, ..., freq_bins, num_frames]` (plus a trailing `2` when
    /// packed).
    ///
    /// Every slice is validated before any is transformed.
    pub fn process_batched(
        &self,
        signals: &Signal<T>,
        windows: Option<&Window<T>>,
    ) -> Result<Spectrogram<T>> {
        let shape = signals.shape();
        if shape.len() < 2 {
            return Err(StftError::invalid(
                "signals",
                format!("a batched signal must be at least 2-D, got shape {shape:?}"),
            ));
        }

        let batch = shape[0];
        if batch == 0 {
            return Err(StftError::invalid("signals", "batch is empty"));
        }

        if let Some(windows) = windows {
            let expected = [batch, self.params().win_length];
            if windows.shape() != expected.as_slice() {
                return Err(StftError::ShapeMismatch {
                    expected: expected.to_vec(),
                    actual: windows.shape().to_vec(),
                });
            }
        }

        let pairs = (0..batch)
            .map(|b| -> Result<_> {
                let signal = signals.index_leading(b)?;
                let window = windows.map(|w| w.index_leading(b)).transpose()?;
                Ok((signal, window))
            })
            .collect::<Result<Vec<_>>>()?;

        for (signal, window) in &pairs {
            self.layout(signal, window.as_ref())?;
        }

        trace!(batch, "computing batched STFT");

        let outputs = pairs
            .par_iter()
            .map(|(signal, window)| self.process(signal, window.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Spectrogram::stack(&outputs)
    }
}
