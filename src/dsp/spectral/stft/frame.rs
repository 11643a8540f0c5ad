//! Framing: centering pad, window padding and windowed frame extraction.

use super::config::PadMode;
use crate::error::{Result, StftError};
use std::ops::Mul;

/// Number of frames produced from `padded_len` samples, or `None` if the
/// signal is shorter than one frame.
///
/// # Panics
///
/// Panics if `hop_length == 0`.
#[inline]
pub fn num_frames(
    padded_len: usize,
    n_fft: usize,
    hop_length: usize,
) -> Option<usize> {
    assert_ne!(hop_length, 0);

    padded_len
        .checked_sub(n_fft)
        .map(|excess| excess / hop_length + 1)
}

/// Checks that a signal of `len` samples can be padded by `padding` with
/// `mode`.
pub fn check_padding(len: usize, padding: usize, mode: PadMode) -> Result<()> {
    if padding > mode.max_padding(len) {
        return Err(StftError::invalid(
            "pad_mode",
            format!(
                "{mode:?} padding of {padding} needs a longer signal than {len} samples"
            ),
        ));
    }

    Ok(())
}

/// Maps an index relative to the start of the unpadded signal onto a source
/// sample, or `None` for a zero.
///
/// `pos` must lie within the padding limits of `mode` (see
/// [`check_padding()`]).
#[inline]
fn source_index(pos: isize, len: usize, mode: PadMode) -> Option<usize> {
    let last = len as isize - 1;

    if (0..=last).contains(&pos) {
        return Some(pos as usize);
    }

    match mode {
        PadMode::Constant => None,
        PadMode::Replicate => Some(pos.clamp(0, last) as usize),
        PadMode::Reflect => {
            let reflected = if pos < 0 { -pos } else { 2 * last - pos };
            Some(reflected as usize)
        }
        PadMode::Circular => Some(pos.rem_euclid(len as isize) as usize),
    }
}

/// Writes `src` padded by `padding` samples on each side into `dst`,
/// replacing its contents.
pub fn pad_signal_into<T: Copy + Default>(
    src: &[T],
    padding: usize,
    mode: PadMode,
    dst: &mut Vec<T>,
) {
    dst.clear();

    if padding == 0 {
        dst.extend_from_slice(src);
        return;
    }

    let len = src.len();
    let padding = padding as isize;

    dst.extend((-padding..len as isize + padding).map(|pos| {
        source_index(pos, len, mode).map_or_else(T::default, |i| src[i])
    }));
}

/// Zero-pads `window` to `n_fft` samples, centered. The left side receives
/// `(n_fft - window.len()) / 2` zeros.
///
/// # Panics
///
/// Panics if `window.len() > n_fft`.
pub fn pad_window<T: Copy + Default>(window: &[T], n_fft: usize) -> Vec<T> {
    assert!(window.len() <= n_fft);

    let left = (n_fft - window.len()) / 2;
    let mut padded = vec![T::default(); n_fft];
    padded[left..left + window.len()].copy_from_slice(window);

    padded
}

/// Copies the frame starting at `frame_start` into `frame_out`, multiplying
/// by `window`. Samples past the end of `signal` read as zero.
///
/// `window` and `frame_out` must both be `n_fft` long.
#[inline]
pub fn extract_windowed_frame<T>(
    signal: &[T],
    window: &[T],
    frame_start: usize,
    frame_out: &mut [T],
) where
    T: Copy + Default + Mul<Output = T>,
{
    let start = frame_start.min(signal.len());
    let copied = (signal.len() - start).min(frame_out.len());

    for ((out, &sample), &win) in frame_out[..copied]
        .iter_mut()
        .zip(&signal[start..start + copied])
        .zip(window)
    {
        *out = sample * win;
    }

    frame_out[copied..].fill(T::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    fn padded(src: &[f64], padding: usize, mode: PadMode) -> Vec<f64> {
        let mut dst = Vec::new();
        pad_signal_into(src, padding, mode, &mut dst);
        dst
    }

    #[test]
    fn frame_count() {
        assert_eq!(num_frames(6, 4, 1), Some(3));
        assert_eq!(num_frames(100, 64, 16), Some(3));
        assert_eq!(num_frames(4, 4, 7), Some(1));
        assert_eq!(num_frames(3, 4, 1), None);
    }

    #[test]
    fn frame_count_matches_formula() {
        for len in 1..40 {
            for n_fft in 1..12 {
                for hop in 1..6 {
                    let expected =
                        (len >= n_fft).then(|| 1 + (len - n_fft) / hop);
                    assert_eq!(num_frames(len, n_fft, hop), expected);
                }
            }
        }
    }

    #[test]
    fn reflect_padding() {
        let src = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            padded(&src, 2, PadMode::Reflect),
            [3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0]
        );
        assert_eq!(
            padded(&src, 3, PadMode::Reflect),
            [4.0, 3.0, 2.0, 1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0]
        );
    }

    #[test]
    fn other_padding_modes() {
        let src = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            padded(&src, 2, PadMode::Constant),
            [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 0.0, 0.0]
        );
        assert_eq!(
            padded(&src, 2, PadMode::Replicate),
            [1.0, 1.0, 1.0, 2.0, 3.0, 4.0, 4.0, 4.0]
        );
        assert_eq!(
            padded(&src, 2, PadMode::Circular),
            [3.0, 4.0, 1.0, 2.0, 3.0, 4.0, 1.0, 2.0]
        );
        assert_eq!(padded(&src, 0, PadMode::Reflect), src);
    }

    #[test]
    fn padding_limits_are_checked() {
        assert!(check_padding(4, 3, PadMode::Reflect).is_ok());
        assert!(check_padding(4, 4, PadMode::Reflect).is_err());
        assert!(check_padding(4, 4, PadMode::Circular).is_ok());
        assert!(check_padding(4, 5, PadMode::Circular).is_err());
        assert!(check_padding(1, 100, PadMode::Replicate).is_ok());
    }

    #[test]
    fn window_is_centered() {
        assert_eq!(pad_window(&[1.0, 1.0], 6), [0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(pad_window(&[1.0, 1.0], 5), [0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(pad_window(&[2.0; 3], 3), [2.0; 3]);
    }

    #[test]
    fn windowed_frame() {
        let signal = [1.0, 2.0, 3.0, 4.0, 5.0];
        let window = [0.5, 1.0, 0.5];
        let mut frame = [0.0; 3];

        extract_windowed_frame(&signal, &window, 1, &mut frame);

        assert_eq!(frame, [1.0, 3.0, 2.0]);
    }

    #[test]
    fn windowed_frame_past_end_is_zero() {
        let signal = [1.0, 2.0, 3.0];
        let mut frame = [9.0; 4];

        extract_windowed_frame(&signal, &[1.0; 4], 1, &mut frame);
        assert_eq!(frame, [2.0, 3.0, 0.0, 0.0]);

        extract_windowed_frame(&signal, &[1.0; 4], 10, &mut frame);
        assert_eq!(frame, [0.0; 4]);
    }

    #[test]
    fn complex_window_multiplication() {
        let i = Complex::new(0.0, 1.0);
        let mut frame = [Complex::default(); 2];

        extract_windowed_frame(&[i, i], &[i, i], 0, &mut frame);

        assert_eq!(frame, [Complex::new(-1.0, 0.0); 2]);
    }
}
