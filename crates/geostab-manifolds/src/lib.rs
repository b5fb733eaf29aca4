//! Geostab Manifolds - Concrete spaces built on `geostab-core`.
//!
//! This crate provides two geometry kernels:
//!
//! - [`HyperbolicSpace`] and [`HyperbolicMetric`]: hyperbolic space ℍⁿ in
//!   the hyperboloid model, with Taylor-stabilized exponential and
//!   logarithm maps
//! - [`GeneralLinear`]: the Lie group GL(n) of invertible matrices, with
//!   group exponential/logarithm at arbitrary base points and orbits

pub mod general_linear;
pub mod hyperbolic;
pub mod hyperbolic_metric;
pub mod minkowski;

// Re-export main spaces for convenience
pub use general_linear::{GeneralLinear, Orbit};
pub use hyperbolic::HyperbolicSpace;
pub use hyperbolic_metric::{Geodesic, HyperbolicMetric};
