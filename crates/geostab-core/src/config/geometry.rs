//! Tunables of the geometry kernels.
//!
//! Only two numbers control the hyperbolic kernels:
//!
//! - `epsilon`: the norm or angle below which exp/log maps use truncated
//!   Taylor series instead of the closed-form hyperbolic identities.
//! - `tolerance`: the slack allowed in manifold membership checks.
//!
//! Spaces store a config as their default; every operation that depends on
//! one of these values also has a call-site override.

use crate::{
    error::{ManifoldError, Result},
    types::Scalar,
};
use num_traits::Float;

/// Configuration for series switching and membership checks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryConfig<T> {
    /// Threshold below which the Taylor-series branch is used
    pub epsilon: T,
    /// Tolerance of the membership test
    pub tolerance: T,
}

impl<T: Scalar> Default for GeometryConfig<T> {
    fn default() -> Self {
        Self {
            epsilon: T::SERIES_THRESHOLD,
            tolerance: T::MANIFOLD_TOLERANCE,
        }
    }
}

impl<T: Scalar> GeometryConfig<T> {
    /// Creates a configuration with the default constants for `T`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the series-switch threshold.
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the membership tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks that both values are finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        validate_positive("epsilon", self.epsilon)?;
        validate_positive("tolerance", self.tolerance)
    }
}

/// Checks that a tunable is finite and strictly positive.
pub fn validate_positive<T: Scalar>(name: &str, value: T) -> Result<()> {
    if !<T as Float>::is_finite(value) || value <= T::zero() {
        return Err(ManifoldError::invalid_parameter(format!(
            "{} must be finite and positive, got {}",
            name, value
        )));
    }
    Ok(())
}
