//! STFT output representations.

use crate::error::{Result, StftError};
use crate::settings::{DEFAULT_ATOL, DEFAULT_RTOL};
use crate::tensor::{Sample, Tensor};
use crate::util::all_close;
use num_complex::Complex;

/// The result of an STFT.
///
/// `Complex` has shape `[..., freq_bins, num_frames]`. `Packed` has shape
/// `[..., freq_bins, num_frames, 2]`, with the real part at index `0` of the
/// trailing axis and the imaginary part at index `1`.
#[derive(Debug, Clone, PartialEq)]
pub enum Spectrogram<T: Sample> {
    Complex(Tensor<Complex<T>>),
    Packed(Tensor<T>),
}

impl<T: Sample> Spectrogram<T> {
    /// Wraps complex spectra, packing them unless `return_complex` is set.
    pub fn from_complex(spectra: Tensor<Complex<T>>, return_complex: bool) -> Self {
        if return_complex {
            Self::Complex(spectra)
        } else {
            Self::Packed(pack(&spectra))
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Complex(t) => t.shape(),
            Self::Packed(t) => t.shape(),
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// The `[..., freq_bins, num_frames]` shape, ignoring any packing axis.
    pub fn spectral_shape(&self) -> &[usize] {
        match self {
            Self::Complex(t) => t.shape(),
            Self::Packed(t) => t.batch_shape(),
        }
    }

    /// Number of frequency bins per frame.
    pub fn num_bins(&self) -> usize {
        let shape = self.spectral_shape();
        shape[shape.len() - 2]
    }

    /// Number of frames.
    pub fn num_frames(&self) -> usize {
        let shape = self.spectral_shape();
        shape[shape.len() - 1]
    }

    /// The output as complex values, unpacking if needed.
    pub fn to_complex(&self) -> Tensor<Complex<T>> {
        match self {
            Self::Complex(t) => t.clone(),
            Self::Packed(t) => unpack(t),
        }
    }

    /// The output with a trailing `[re, im]` axis, packing if needed.
    pub fn to_packed(&self) -> Tensor<T> {
        match self {
            Self::Complex(t) => pack(t),
            Self::Packed(t) => t.clone(),
        }
    }

    pub fn as_complex(&self) -> Option<&Tensor<Complex<T>>> {
        match self {
            Self::Complex(t) => Some(t),
            Self::Packed(_) => None,
        }
    }

    pub fn as_packed(&self) -> Option<&Tensor<T>> {
        match self {
            Self::Packed(t) => Some(t),
            Self::Complex(_) => None,
        }
    }

    /// Stacks spectrograms of identical shape and representation along a new
    /// leading axis.
    pub fn stack(items: &[Self]) -> Result<Self> {
        let Some(first) = items.first() else {
            return Err(StftError::invalid(
                "items",
                "cannot stack zero spectrograms",
            ));
        };

        if first.is_complex() {
            let parts: Option<Vec<_>> =
                items.iter().map(|s| s.as_complex().cloned()).collect();
            let parts = parts.ok_or_else(mixed_representations)?;
            Tensor::stack(&parts).map(Self::Complex)
        } else {
            let parts: Option<Vec<_>> =
                items.iter().map(|s| s.as_packed().cloned()).collect();
            let parts = parts.ok_or_else(mixed_representations)?;
            Tensor::stack(&parts).map(Self::Packed)
        }
    }

    /// Element-wise closeness of two spectrograms with the default
    /// tolerances (`rtol = 1e-5`, `atol = 1e-8`). Shapes must match exactly.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_with(other, DEFAULT_RTOL, DEFAULT_ATOL)
    }

    /// [`approx_eq()`](Self::approx_eq) with explicit tolerances.
    pub fn approx_eq_with(&self, other: &Self, rtol: f64, atol: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        let lhs = self.to_packed();
        let rhs = other.to_packed();
        let to_f64 = |t: &Tensor<T>| -> Vec<f64> {
            t.data().iter().map(|x| x.to_f64().unwrap_or(f64::NAN)).collect()
        };

        all_close(&to_f64(&lhs), &to_f64(&rhs), rtol, atol)
    }
}

fn mixed_representations() -> StftError {
    StftError::invalid(
        "items",
        "cannot stack complex and packed spectrograms together",
    )
}

/// Reinterprets complex spectra as interleaved `[re, im]` pairs.
fn pack<T: Sample>(spectra: &Tensor<Complex<T>>) -> Tensor<T> {
    let interleaved: &[T] = bytemuck::cast_slice(spectra.data());

    let mut shape = spectra.shape().to_vec();
    shape.push(2);

    Tensor::from_vec(interleaved.to_vec(), &shape)
        .unwrap_or_else(|_| unreachable!("packing doubles the element count"))
}

/// Inverse of [`pack()`]. The trailing axis must have size 2.
fn unpack<T: Sample>(packed: &Tensor<T>) -> Tensor<Complex<T>> {
    let data = packed
        .data()
        .chunks_exact(2)
        .map(|pair| Complex::new(pair[0], pair[1]))
        .collect();

    Tensor::from_vec(data, packed.batch_shape())
        .unwrap_or_else(|_| unreachable!("trailing axis has size 2"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectra() -> Tensor<Complex<f64>> {
        Tensor::from_vec(
            vec![
                Complex::new(1.0, 2.0),
                Complex::new(3.0, 4.0),
                Complex::new(5.0, 6.0),
                Complex::new(7.0, 8.0),
            ],
            &[2, 2],
        )
        .unwrap()
    }

    #[test]
    fn packing_interleaves_real_and_imaginary() {
        let packed = Spectrogram::from_complex(spectra(), false);
        let tensor = packed.as_packed().unwrap();

        assert_eq!(tensor.shape(), &[2, 2, 2]);
        assert_eq!(
            tensor.data(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
        );
        assert_eq!(packed.num_bins(), 2);
        assert_eq!(packed.num_frames(), 2);
        assert_eq!(packed.to_complex(), spectra());
    }

    #[test]
    fn complex_output_is_untouched() {
        let out = Spectrogram::from_complex(spectra(), true);
        assert!(out.is_complex());
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out.as_complex(), Some(&spectra()));
        assert!(out.as_packed().is_none());
    }

    #[test]
    fn approx_eq_requires_matching_shape() {
        let complex = Spectrogram::from_complex(spectra(), true);
        let packed = Spectrogram::from_complex(spectra(), false);

        assert!(complex.approx_eq(&complex.clone()));
        assert!(!complex.approx_eq(&packed));

        let mut nudged = spectra().into_data();
        nudged[0].re += 1e-12;
        let nudged = Spectrogram::from_complex(
            Tensor::from_vec(nudged, &[2, 2]).unwrap(),
            false,
        );
        assert!(packed.approx_eq(&nudged));
    }

    #[test]
    fn stacking() {
        let one = Spectrogram::from_complex(spectra(), false);
        let stacked = Spectrogram::stack(&[one.clone(), one.clone()]).unwrap();
        assert_eq!(stacked.shape(), &[2, 2, 2, 2]);

        let other = Spectrogram::from_complex(spectra(), true);
        assert!(Spectrogram::stack(&[one, other]).is_err());
        assert!(Spectrogram::<f64>::stack(&[]).is_err());
    }
}
