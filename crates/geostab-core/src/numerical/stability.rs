//! Numerical stability utilities for exp/log kernels.
//!
//! Closed-form expressions such as `sinh(r)/r` or `r/tanh(r)` are exact in
//! real arithmetic but lose precision, or divide by a value that rounds to
//! zero, as `r → 0`. Kernels switch to truncated Taylor series below a
//! threshold; this module evaluates those series and decides the branch.

use crate::types::Scalar;
use num_traits::Float;

/// Which formula a series-stabilized kernel used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Truncated Taylor series, argument below the threshold.
    Series,
    /// Direct closed-form evaluation.
    ClosedForm,
}

impl Branch {
    /// Selects the series branch when `x < threshold`.
    #[inline]
    pub fn select<T: Scalar>(x: T, threshold: T) -> Self {
        if x < threshold {
            Branch::Series
        } else {
            Branch::ClosedForm
        }
    }
}

/// Evaluates the polynomial `Σ coeffs[k]·x^k` with Horner's scheme.
///
/// Coefficients are exact rationals stored as `f64` and converted once per
/// term.
#[inline]
pub fn horner<T: Scalar>(coeffs: &[f64], x: T) -> T {
    coeffs
        .iter()
        .rev()
        .fold(T::zero(), |acc, &c| acc * x + <T as Scalar>::from_f64(c))
}

/// Evaluates an even power series `Σ coeffs[k]·x^{2k}`.
#[inline]
pub fn even_series<T: Scalar>(coeffs: &[f64], x: T) -> T {
    horner(coeffs, x * x)
}

/// Square root that clamps negative rounding residue to zero.
///
/// Used for norms computed from an indefinite bilinear form restricted to a
/// subspace where it is positive definite.
#[inline]
pub fn clamped_sqrt<T: Scalar>(x: T) -> T {
    <T as Float>::sqrt(<T as Float>::max(x, T::zero()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_horner() {
        // 1 + 2x + 3x^2 at x = 2
        assert_eq!(horner(&[1.0, 2.0, 3.0], 2.0_f64), 17.0);
        assert_eq!(horner::<f64>(&[], 5.0), 0.0);
    }

    #[test]
    fn test_even_series_matches_cosh() {
        let coeffs = [1.0, 1.0 / 2.0, 1.0 / 24.0, 1.0 / 720.0, 1.0 / 40320.0];
        for &x in &[0.0_f64, 1e-3, 0.1] {
            assert_relative_eq!(even_series(&coeffs, x), x.cosh(), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_clamped_sqrt() {
        assert_eq!(clamped_sqrt(4.0_f64), 2.0);
        assert_eq!(clamped_sqrt(0.0_f64), 0.0);
        assert_eq!(clamped_sqrt(-1e-16_f64), 0.0);
    }

    #[test]
    fn test_branch_selection() {
        assert_eq!(Branch::select(1e-7_f64, 1e-6), Branch::Series);
        assert_eq!(Branch::select(1e-6_f64, 1e-6), Branch::ClosedForm);
        assert_eq!(Branch::select(1.0_f64, 1e-6), Branch::ClosedForm);
    }
}
