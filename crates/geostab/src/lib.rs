//! # Geostab
//!
//! Numerically stable geometry kernels for two spaces:
//!
//! - **Hyperbolic space** ℍⁿ in the hyperboloid (Minkowski) model, with
//!   exponential and logarithm maps that switch to truncated Taylor series
//!   near zero
//! - **The general linear group** GL(n), with the group exponential and
//!   logarithm at arbitrary base points and one-parameter orbits
//!
//! This crate re-exports the public API of `geostab-core` and
//! `geostab-manifolds`; most users only need [`prelude`].
//!
//! ## Example
//!
//! ```rust
//! use geostab::prelude::*;
//!
//! let space = HyperbolicSpace::<f64>::new(2)?;
//! let metric = HyperbolicMetric::new(space.clone());
//!
//! let p = space.intrinsic_to_extrinsic(&DVector::from_vec(vec![0.0, 0.0]))?;
//! let q = space.intrinsic_to_extrinsic(&DVector::from_vec(vec![0.5, -0.2]))?;
//! let v = metric.log_map(&p, &q)?;
//! let back = metric.exp_map(&p, &v)?;
//! assert!((back - &q).norm() < 1e-12);
//!
//! let gl = GeneralLinear::<f64>::new(3)?;
//! assert!(gl.belongs(&gl.identity()));
//! # Ok::<(), ManifoldError>(())
//! ```

pub use geostab_core::{ManifoldError, Result};
pub use geostab_core::{compute, config, error, manifold, manifold_ops, matrix_group, numerical, types};
pub use geostab_manifolds::{
    general_linear, hyperbolic, hyperbolic_metric, minkowski, GeneralLinear, Geodesic,
    HyperbolicMetric, HyperbolicSpace, Orbit,
};

/// Everything needed to work with the spaces and their traits.
pub mod prelude {
    pub use geostab_core::prelude::*;
    pub use geostab_manifolds::{
        minkowski, GeneralLinear, Geodesic, HyperbolicMetric, HyperbolicSpace, Orbit,
    };
}
