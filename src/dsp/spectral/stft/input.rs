//! Real or complex STFT inputs.

use crate::error::{Result, StftError};
use crate::tensor::{Sample, Tensor};
use crate::util::window::WindowType;
use num_complex::Complex;

/// Whether a buffer holds real or complex samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Real,
    Complex,
}

/// A signal of shape `[..., time]`, real or complex.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal<T: Sample> {
    Real(Tensor<T>),
    Complex(Tensor<Complex<T>>),
}

impl<T: Sample> Signal<T> {
    /// A 1-D real signal.
    pub fn real(samples: Vec<T>) -> Self {
        Self::Real(Tensor::from_1d(samples))
    }

    /// A 1-D complex signal.
    pub fn complex(samples: Vec<Complex<T>>) -> Self {
        Self::Complex(Tensor::from_1d(samples))
    }

    /// A real signal of arbitrary shape.
    pub fn real_with_shape(samples: Vec<T>, shape: &[usize]) -> Result<Self> {
        Tensor::from_vec(samples, shape).map(Self::Real)
    }

    /// A complex signal of arbitrary shape.
    pub fn complex_with_shape(
        samples: Vec<Complex<T>>,
        shape: &[usize],
    ) -> Result<Self> {
        Tensor::from_vec(samples, shape).map(Self::Complex)
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Real(_) => ElementKind::Real,
            Self::Complex(_) => ElementKind::Complex,
        }
    }

    pub fn is_complex(&self) -> bool {
        self.kind() == ElementKind::Complex
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Real(t) => t.shape(),
            Self::Complex(t) => t.shape(),
        }
    }

    /// Number of samples along the time (last) axis.
    pub fn num_samples(&self) -> usize {
        self.shape().last().copied().unwrap_or(0)
    }

    /// The sub-signal at `index` along the leading axis.
    pub fn index_leading(&self, index: usize) -> Result<Self> {
        match self {
            Self::Real(t) => t.index_leading(index).map(Self::Real),
            Self::Complex(t) => t.index_leading(index).map(Self::Complex),
        }
    }

    /// Promotes the signal to complex samples; complex signals are cloned.
    pub fn to_complex(&self) -> Tensor<Complex<T>> {
        match self {
            Self::Real(t) => t.map(|&re| Complex::new(re, T::zero())),
            Self::Complex(t) => t.clone(),
        }
    }

    /// Checks the signal is at least 1-D with a non-empty time axis.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.shape().is_empty() {
            return Err(StftError::invalid(
                "signal",
                "must be at least 1-D with time as the last axis",
            ));
        }
        if self.num_samples() == 0 {
            return Err(StftError::invalid("signal", "time axis is empty"));
        }

        Ok(())
    }
}

/// An analysis window, real or complex.
///
/// A window passed to a single STFT call is 1-D with `win_length` samples; a
/// window stack for a batched call is `[batch, win_length]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Window<T: Sample> {
    Real(Tensor<T>),
    Complex(Tensor<Complex<T>>),
}

impl<T: Sample> Window<T> {
    pub fn real(samples: Vec<T>) -> Self {
        Self::Real(Tensor::from_1d(samples))
    }

    pub fn complex(samples: Vec<Complex<T>>) -> Self {
        Self::Complex(Tensor::from_1d(samples))
    }

    /// An all-ones window; what the STFT uses when no window is given.
    pub fn ones(len: usize) -> Self {
        Self::real(vec![T::one(); len])
    }

    /// A generated window of the given shape.
    pub fn from_type(kind: WindowType, len: usize) -> Self {
        Self::real(kind.generate(len).into_iter().map(T::of).collect())
    }

    /// Stacks 1-D windows of equal length into a `[batch, win_length]`
    /// window stack. Mixed real and complex windows are promoted to complex.
    pub fn stack(windows: &[Self]) -> Result<Self> {
        if windows.iter().all(|w| matches!(w, Self::Real(_))) {
            let reals: Vec<Tensor<T>> = windows
                .iter()
                .filter_map(|w| match w {
                    Self::Real(t) => Some(t.clone()),
                    Self::Complex(_) => None,
                })
                .collect();
            return Tensor::stack(&reals).map(Self::Real);
        }

        let complexes: Vec<_> = windows.iter().map(Self::to_complex).collect();
        Tensor::stack(&complexes).map(Self::Complex)
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Real(_) => ElementKind::Real,
            Self::Complex(_) => ElementKind::Complex,
        }
    }

    pub fn is_complex(&self) -> bool {
        self.kind() == ElementKind::Complex
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Real(t) => t.shape(),
            Self::Complex(t) => t.shape(),
        }
    }

    /// The window at `index` along the leading axis of a window stack.
    pub fn index_leading(&self, index: usize) -> Result<Self> {
        match self {
            Self::Real(t) => t.index_leading(index).map(Self::Real),
            Self::Complex(t) => t.index_leading(index).map(Self::Complex),
        }
    }

    /// Promotes the window to complex samples.
    pub fn to_complex(&self) -> Tensor<Complex<T>> {
        match self {
            Self::Real(t) => t.map(|&re| Complex::new(re, T::zero())),
            Self::Complex(t) => t.clone(),
        }
    }

    /// Checks the window is 1-D with exactly `win_length` samples.
    pub(crate) fn validate(&self, win_length: usize) -> Result<()> {
        if self.shape() != [win_length].as_slice() {
            return Err(StftError::invalid(
                "window",
                format!(
                    "expected a 1-D window of length {win_length}, got shape {:?}",
                    self.shape()
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_validation() {
        assert!(Signal::<f64>::real(vec![1.0]).validate().is_ok());
        assert!(Signal::<f64>::real(vec![]).validate().is_err());
        assert!(Signal::real_with_shape(vec![1.0f32], &[])
            .unwrap()
            .validate()
            .is_err());
        assert!(Signal::<f32>::real_with_shape(vec![], &[3, 0])
            .unwrap()
            .validate()
            .is_err());
    }

    #[test]
    fn promotion_to_complex() {
        let signal = Signal::real(vec![1.0, -2.0]);
        assert_eq!(
            signal.to_complex().data(),
            &[Complex::new(1.0, 0.0), Complex::new(-2.0, 0.0)]
        );
        assert!(!signal.is_complex());
    }

    #[test]
    fn window_validation() {
        let window = Window::<f64>::ones(4);
        assert!(window.validate(4).is_ok());
        assert!(window.validate(3).is_err());

        let stacked = Window::stack(&[window.clone(), window]).unwrap();
        assert_eq!(stacked.shape(), &[2, 4]);
        assert!(stacked.validate(4).is_err());
    }

    #[test]
    fn mixed_window_stack_is_complex() {
        let i = Complex::new(0.0, 1.0);
        let stacked = Window::stack(&[
            Window::real(vec![1.0, 2.0]),
            Window::complex(vec![i, i]),
        ])
        .unwrap();

        assert!(stacked.is_complex());
        let Window::Complex(t) = stacked.index_leading(0).unwrap() else {
            panic!("expected a complex window");
        };
        assert_eq!(t.data(), &[Complex::new(1.0, 0.0), Complex::new(2.0, 0.0)]);
    }

    #[test]
    fn generated_window() {
        let Window::Real(t) = Window::<f32>::from_type(WindowType::Hann, 4)
        else {
            panic!("expected a real window");
        };
        assert_eq!(t.data(), &[0.0, 0.5, 1.0, 0.5]);
    }
}
