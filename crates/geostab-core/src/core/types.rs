//! Type definitions and aliases for manifold geometry.
//!
//! This module provides the scalar trait shared by every kernel, the
//! per-precision numerical constants, and the nalgebra aliases used for
//! points, tangent vectors and group elements.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in geometric computations (f32 or f64).
///
/// This trait combines the nalgebra and num-traits bounds required by the
/// hyperbolic and matrix-group kernels.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Tolerance for checking if a point is on the manifold.
    const MANIFOLD_TOLERANCE: Self;

    /// Norm or angle below which exp/log maps switch to truncated Taylor series.
    const SERIES_THRESHOLD: Self;

    /// Relative tolerance for iterative matrix functions.
    const ITERATION_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert to f64 (for tracing fields).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const MANIFOLD_TOLERANCE: Self = 1e-6;
    const SERIES_THRESHOLD: Self = 1e-3;
    const ITERATION_TOLERANCE: Self = 1e-6;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const MANIFOLD_TOLERANCE: Self = 1e-12;
    const SERIES_THRESHOLD: Self = 1e-6;
    const ITERATION_TOLERANCE: Self = 1e-13;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get manifold membership tolerance.
    pub fn manifold_tolerance<T: Scalar>() -> T {
        T::MANIFOLD_TOLERANCE
    }

    /// Get the Taylor-series switch threshold.
    pub fn series_threshold<T: Scalar>() -> T {
        T::SERIES_THRESHOLD
    }
}
