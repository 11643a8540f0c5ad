//! General-purpose utility functions.

use num_complex::Complex;

/// Returns whether the absolute difference between `value` and `target` is
/// at most `tolerance`. Useful for checking approximate equality.
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}

/// Mixed absolute/relative closeness, `|a - b| <= atol + rtol * |b|`, in the
/// manner of NumPy's `allclose`.
pub fn all_close(a: &[f64], b: &[f64], rtol: f64, atol: f64) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(&x, &y)| (x - y).abs() <= rtol.mul_add(y.abs(), atol))
}

/// [`within_tolerance()`] for complex values, on the modulus of the
/// difference.
pub fn complex_within_tolerance(
    value: Complex<f64>,
    target: Complex<f64>,
    tolerance: f64,
) -> bool {
    (value - target).norm() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_checks() {
        assert!(within_tolerance(1.0, 1.05, 0.1));
        assert!(!within_tolerance(1.0, 1.2, 0.1));
    }

    #[test]
    fn all_close_is_relative_to_target() {
        assert!(all_close(&[1000.0, 0.0], &[1000.001, 0.0], 1e-5, 1e-8));
        assert!(!all_close(&[1.0, 0.0], &[1.001, 0.0], 1e-5, 1e-8));
        assert!(!all_close(&[1.0], &[1.0, 2.0], 1e-5, 1e-8));
    }

    #[test]
    fn complex_tolerance_uses_modulus() {
        let a = Complex::new(3.0, 4.0);
        assert!(complex_within_tolerance(a, Complex::new(3.0, 4.0 + 1e-9), 1e-8));
        assert!(!complex_within_tolerance(a, Complex::new(0.0, 0.0), 4.9));
    }
}
