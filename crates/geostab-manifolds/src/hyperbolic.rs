//! # Hyperbolic Space ℍⁿ (hyperboloid model)
//!
//! The hyperbolic space ℍⁿ is the complete, simply connected Riemannian
//! manifold of constant sectional curvature −1. This module represents it
//! through its embedding in Minkowski space ℝ^{1,n}.
//!
//! ## Mathematical Definition
//!
//! ```text
//! ℍⁿ = {x ∈ ℝⁿ⁺¹ : ⟨x,x⟩_L = −1}
//! ```
//!
//! with the Minkowski form ⟨x,y⟩_L = −x₀y₀ + x₁y₁ + … + xₙyₙ (see
//! [`crate::minkowski`]). Points are stored in *extrinsic* coordinates, a
//! vector of length n+1. The *intrinsic* chart drops the first coordinate:
//!
//! ```text
//! φ(x₁, …, xₙ) = (√(1 + ‖x‖²), x₁, …, xₙ)
//! ```
//!
//! ## Tangent Space
//!
//! ```text
//! T_p ℍⁿ = {v ∈ ℝⁿ⁺¹ : ⟨p,v⟩_L = 0}
//! ```
//!
//! An ambient vector is projected onto it by removing its component along
//! `p`, measured with the Minkowski form.
//!
//! ## Membership
//!
//! A vector belongs to the space when |⟨x,x⟩_L + 1| is below the configured
//! tolerance. Only the quadratic condition is tested: the sheet (sign of
//! x₀) is not. Operations that require points reject anything else with
//! [`ManifoldError::InvalidPoint`].
//!
//! The Riemannian operations (exp, log, distance) live on
//! [`HyperbolicMetric`](crate::hyperbolic_metric::HyperbolicMetric).
//!
//! ## Example Usage
//!
//! ```rust
//! use geostab_manifolds::HyperbolicSpace;
//! use nalgebra::DVector;
//!
//! let space = HyperbolicSpace::<f64>::new(2)?;
//! let p = space.intrinsic_to_extrinsic(&DVector::from_vec(vec![0.3, -0.4]))?;
//! assert!(space.belongs(&p).is_ok());
//!
//! let v = space.project_to_tangent_space(&p, &DVector::from_vec(vec![1.0, 2.0, 0.5]))?;
//! assert!(geostab_manifolds::minkowski::inner_product(&p, &v).abs() < 1e-12);
//! # Ok::<(), geostab_core::error::ManifoldError>(())
//! ```

use crate::minkowski;
use geostab_core::{
    compute::cpu::{broadcast_column, broadcast_len, map_indexed, stack_columns},
    config::{validate_positive, BatchConfig, GeometryConfig},
    error::{ManifoldError, Result},
    manifold::Manifold,
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use std::fmt::{self, Debug};
use tracing::debug;

/// Side length used by [`HyperbolicSpace::random_point`].
const DEFAULT_SAMPLING_NORM: f64 = 1.0;

/// Hyperbolic space ℍⁿ embedded as the hyperboloid in ℝ^{1,n}.
///
/// # Invariants
///
/// - `n ≥ 1`
/// - Points and tangent vectors are vectors of length `n + 1`
/// - The stored [`GeometryConfig`] has been validated
#[derive(Clone)]
pub struct HyperbolicSpace<T = f64> {
    /// Intrinsic dimension
    n: usize,
    config: GeometryConfig<T>,
    batch: BatchConfig,
}

impl<T: Scalar> Debug for HyperbolicSpace<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hyperbolic ℍ^{} (hyperboloid in ℝ^{{1,{}}})", self.n, self.n)
    }
}

impl<T: Scalar> HyperbolicSpace<T> {
    /// Creates ℍⁿ with the default tolerances for `T`.
    ///
    /// # Errors
    ///
    /// Returns `ManifoldError::InvalidParameter` if n = 0.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_config(n, GeometryConfig::default())
    }

    /// Creates ℍⁿ with explicit series threshold and membership tolerance.
    ///
    /// # Errors
    ///
    /// Returns `ManifoldError::InvalidParameter` if n = 0 or if either value
    /// of `config` is not finite and positive.
    pub fn with_config(n: usize, config: GeometryConfig<T>) -> Result<Self> {
        if n == 0 {
            return Err(ManifoldError::invalid_parameter(
                "Hyperbolic space requires dimension n ≥ 1",
            ));
        }
        config.validate()?;
        Ok(Self {
            n,
            config,
            batch: BatchConfig::default(),
        })
    }

    /// Replaces the batch scheduling configuration.
    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Intrinsic dimension n.
    #[inline]
    pub fn intrinsic_dim(&self) -> usize {
        self.n
    }

    /// Length of extrinsic vectors, n + 1.
    #[inline]
    pub fn ambient_dim(&self) -> usize {
        self.n + 1
    }

    #[inline]
    pub fn config(&self) -> &GeometryConfig<T> {
        &self.config
    }

    #[inline]
    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch
    }

    /// Checks that `point` lies on the hyperboloid within the configured
    /// tolerance.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch`: if `point.len() ≠ n + 1`
    /// - `InvalidPoint`: if |⟨x,x⟩_L + 1| ≥ tolerance (NaN entries included)
    pub fn belongs(&self, point: &DVector<T>) -> Result<()> {
        self.belongs_with_tolerance(point, self.config.tolerance)
    }

    /// Same as [`belongs`](Self::belongs) with a call-site tolerance.
    pub fn belongs_with_tolerance(&self, point: &DVector<T>, tolerance: T) -> Result<()> {
        self.check_length(point)?;

        let sq_norm = minkowski::squared_norm(point);
        let residual = <T as Float>::abs(sq_norm + T::one());
        // Written so that a NaN residual is rejected.
        if !(residual < tolerance) {
            debug!(
                squared_norm = <T as Scalar>::to_f64(sq_norm),
                tolerance = <T as Scalar>::to_f64(tolerance),
                "point rejected: not on the hyperboloid"
            );
            return Err(ManifoldError::invalid_point(format!(
                "Point not on hyperboloid: ⟨x,x⟩_L = {} (expected -1 ± {})",
                sq_norm, tolerance
            )));
        }
        Ok(())
    }

    /// Lifts intrinsic coordinates x ∈ ℝⁿ to the hyperboloid point
    /// (√(1 + ‖x‖²), x).
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `intrinsic.len() ≠ n`.
    pub fn intrinsic_to_extrinsic(&self, intrinsic: &DVector<T>) -> Result<DVector<T>> {
        if intrinsic.len() != self.n {
            return Err(ManifoldError::dimension_mismatch(self.n, intrinsic.len()));
        }
        Ok(self.lift_unchecked(intrinsic))
    }

    /// Drops the time coordinate of a hyperboloid point.
    ///
    /// # Errors
    ///
    /// Fails like [`belongs`](Self::belongs) if `point` is not on the space.
    pub fn extrinsic_to_intrinsic(&self, point: &DVector<T>) -> Result<DVector<T>> {
        self.belongs(point)?;
        Ok(point.rows(1, self.n).into_owned())
    }

    /// Projects an ambient vector onto the tangent space at `base`:
    ///
    /// ```text
    /// v − (⟨p,v⟩_L / ⟨p,p⟩_L) · p
    /// ```
    ///
    /// The divisor is the computed ⟨p,p⟩_L rather than the constant −1, so
    /// the result is Minkowski-orthogonal to `base` even when `base` carries
    /// rounding error.
    ///
    /// # Errors
    ///
    /// - `InvalidPoint`: if `base` is not on the space
    /// - `DimensionMismatch`: if `vector.len() ≠ n + 1`
    pub fn project_to_tangent_space(
        &self,
        base: &DVector<T>,
        vector: &DVector<T>,
    ) -> Result<DVector<T>> {
        self.belongs(base)?;
        self.check_length(vector)?;
        Ok(self.project_unchecked(base, vector))
    }

    /// Column-wise [`project_to_tangent_space`](Self::project_to_tangent_space).
    ///
    /// Either argument may hold a single column that is broadcast against
    /// the other.
    pub fn project_to_tangent_space_batch(
        &self,
        bases: &DMatrix<T>,
        vectors: &DMatrix<T>,
    ) -> Result<DMatrix<T>> {
        self.check_batch_rows(bases)?;
        self.check_batch_rows(vectors)?;
        let count = broadcast_len(bases.ncols(), vectors.ncols())?;

        let columns = map_indexed(count, &self.batch, |j| {
            self.project_to_tangent_space(
                &broadcast_column(bases, j),
                &broadcast_column(vectors, j),
            )
        })?;
        Ok(stack_columns(self.ambient_dim(), &columns))
    }

    /// Column-wise [`intrinsic_to_extrinsic`](Self::intrinsic_to_extrinsic);
    /// `intrinsic` is `n × k`, the result `(n+1) × k`.
    pub fn intrinsic_to_extrinsic_batch(&self, intrinsic: &DMatrix<T>) -> Result<DMatrix<T>> {
        if intrinsic.nrows() != self.n {
            return Err(ManifoldError::dimension_mismatch(
                format!("{} rows", self.n),
                format!("{} rows", intrinsic.nrows()),
            ));
        }
        let columns = map_indexed(intrinsic.ncols(), &self.batch, |j| {
            self.intrinsic_to_extrinsic(&intrinsic.column(j).into_owned())
        })?;
        Ok(stack_columns(self.ambient_dim(), &columns))
    }

    /// Samples a point whose intrinsic coordinates are uniform in
    /// `[-max_norm/2, max_norm/2)ⁿ`, lifted to the hyperboloid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `max_norm` is not finite and positive.
    pub fn random_uniform<R: Rng + ?Sized>(&self, max_norm: T, rng: &mut R) -> Result<DVector<T>> {
        validate_positive("max_norm", max_norm)?;
        Ok(self.sample_lifted(max_norm, rng))
    }

    /// Samples a point with [`random_uniform`](Self::random_uniform) on the
    /// thread-local generator.
    pub fn random_point(&self) -> DVector<T> {
        let side = <T as Scalar>::from_f64(DEFAULT_SAMPLING_NORM);
        self.sample_lifted(side, &mut rand::thread_rng())
    }

    /// Tangent projection without validating `base`.
    #[inline]
    pub(crate) fn project_unchecked(&self, base: &DVector<T>, vector: &DVector<T>) -> DVector<T> {
        let coef = minkowski::inner_product(base, vector) / minkowski::squared_norm(base);
        vector - base * coef
    }

    fn sample_lifted<R: Rng + ?Sized>(&self, side: T, rng: &mut R) -> DVector<T> {
        let unit = Uniform::new(-0.5_f64, 0.5);
        let intrinsic =
            DVector::from_fn(self.n, |_, _| <T as Scalar>::from_f64(unit.sample(&mut *rng)) * side);
        self.lift_unchecked(&intrinsic)
    }

    fn lift_unchecked(&self, intrinsic: &DVector<T>) -> DVector<T> {
        let mut point = DVector::zeros(self.n + 1);
        point[0] = <T as Float>::sqrt(T::one() + intrinsic.norm_squared());
        point.rows_mut(1, self.n).copy_from(intrinsic);
        point
    }

    #[inline]
    pub(crate) fn check_length(&self, v: &DVector<T>) -> Result<()> {
        if v.len() != self.n + 1 {
            return Err(ManifoldError::dimension_mismatch(self.n + 1, v.len()));
        }
        Ok(())
    }

    pub(crate) fn check_batch_rows(&self, batch: &DMatrix<T>) -> Result<()> {
        if batch.nrows() != self.n + 1 {
            return Err(ManifoldError::dimension_mismatch(
                format!("{} rows", self.n + 1),
                format!("{} rows", batch.nrows()),
            ));
        }
        Ok(())
    }
}

impl<T: Scalar> Manifold<T> for HyperbolicSpace<T> {
    type Point = DVector<T>;
    type TangentVector = DVector<T>;

    fn name(&self) -> &str {
        "Hyperbolic"
    }

    fn dimension(&self) -> usize {
        self.n
    }

    fn check_point(&self, point: &Self::Point) -> Result<()> {
        self.belongs(point)
    }

    fn is_point_on_manifold(&self, point: &Self::Point, tolerance: T) -> bool {
        self.belongs_with_tolerance(point, tolerance).is_ok()
    }

    fn project_tangent(
        &self,
        point: &Self::Point,
        vector: &Self::TangentVector,
    ) -> Result<Self::TangentVector> {
        self.project_to_tangent_space(point, vector)
    }
}
