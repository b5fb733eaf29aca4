//! Core traits, backend and numerical kernels for manifold geometry.
//!
//! This crate provides the abstractions the concrete spaces in
//! `geostab-manifolds` are built on. It defines the capability traits for
//! manifolds, metrics and matrix Lie groups, the injectable
//! linear-algebra backend, and the numerical helpers that keep exp/log maps
//! accurate near their singular regimes.
//!
//! # Key Concepts
//!
//! - **Manifolds**: spaces embedded in an ambient vector or matrix space,
//!   with a membership invariant and tangent-space projection
//! - **Metrics**: exponential map, logarithm map and geodesic distance
//! - **Matrix Lie groups**: identity, composition, inverse and the group
//!   exponential/logarithm
//! - **Series stabilization**: closed-form formulas away from zero,
//!   truncated Taylor series near it
//!
//! # Modules
//!
//! - [`error`]: Error types for manifold operations
//! - [`types`]: Scalar trait, type aliases and numerical constants
//! - [`manifold`]: Core manifold trait
//! - [`matrix_group`]: Matrix space and Lie group traits
//! - [`manifold_ops`]: Riemannian metric trait
//! - [`compute`]: Linear-algebra backend and batch execution
//! - [`config`]: Tunables and batch thresholds
//! - [`numerical`]: Taylor series helpers and matrix functions

pub mod compute;
pub mod config;
pub mod core;
pub mod manifold_ops;
pub mod numerical;

pub use crate::core::{error, manifold, matrix_group, types};

// Re-export commonly used items at the crate root
pub use error::{ManifoldError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use geostab_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compute::{LinalgBackend, NalgebraBackend};
    pub use crate::config::{BatchConfig, GeometryConfig};
    pub use crate::error::{ManifoldError, Result};
    pub use crate::manifold::Manifold;
    pub use crate::manifold_ops::RiemannianMetric;
    pub use crate::matrix_group::{LieGroup, LinearGroupOps, MatrixSpace};
    pub use crate::numerical::Branch;
    pub use crate::types::{constants, DMatrix, DVector, Scalar};
}
