//! # Minkowski embedding algebra
//!
//! Hyperbolic space is embedded in Minkowski space ℝ^{1,n}, the vector space
//! ℝⁿ⁺¹ equipped with the indefinite bilinear form of signature (−,+,…,+):
//!
//! ```text
//! ⟨a, b⟩_L = −a₀b₀ + a₁b₁ + … + aₙbₙ
//! ```
//!
//! It is computed as the Euclidean dot product corrected on the first
//! coordinate, `a·b − 2a₀b₀`. These are pure functions with no failure mode;
//! operands must have the same length.

use nalgebra::DVector;
use geostab_core::types::Scalar;

/// Minkowski inner product ⟨a, b⟩_L.
#[inline]
pub fn inner_product<T: Scalar>(a: &DVector<T>, b: &DVector<T>) -> T {
    debug_assert_eq!(a.len(), b.len(), "dimension mismatch in minkowski inner product");
    debug_assert!(!a.is_empty(), "minkowski vectors need a time coordinate");

    let two = <T as Scalar>::from_f64(2.0);
    a.dot(b) - two * a[0] * b[0]
}

/// Minkowski squared norm ⟨v, v⟩_L.
///
/// Negative for timelike vectors (hyperboloid points have −1), positive for
/// spacelike vectors (tangent vectors of the hyperboloid).
#[inline]
pub fn squared_norm<T: Scalar>(v: &DVector<T>) -> T {
    inner_product(v, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_signature() {
        let e0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let e1 = DVector::from_vec(vec![0.0, 1.0, 0.0]);
        assert_eq!(squared_norm(&e0), -1.0);
        assert_eq!(squared_norm(&e1), 1.0);
        assert_eq!(inner_product(&e0, &e1), 0.0);
    }

    #[test]
    fn test_inner_product_formula() {
        let a = DVector::from_vec(vec![2.0, 1.0, -1.0]);
        let b = DVector::from_vec(vec![3.0, 0.5, 4.0]);
        // -6 + 0.5 - 4
        assert_relative_eq!(inner_product(&a, &b), -9.5);
        assert_relative_eq!(inner_product(&a, &b), inner_product(&b, &a));
    }

    #[test]
    fn test_hyperboloid_point() {
        let x: f64 = 0.3;
        let y: f64 = -1.2;
        let p = DVector::from_vec(vec![(1.0 + x * x + y * y).sqrt(), x, y]);
        assert_relative_eq!(squared_norm(&p), -1.0, epsilon = 1e-14);
    }
}
