//! # Riemannian metric of the hyperboloid
//!
//! The metric of ℍⁿ is the Minkowski form restricted to tangent spaces,
//! where it is positive definite. Geodesics are closed-form:
//!
//! ```text
//! exp_p(v) = cosh(‖v‖)·p + (sinh(‖v‖)/‖v‖)·v
//! log_p(q) = (θ/sinh θ)·q − (θ/tanh θ)·p,    θ = d(p, q)
//! d(p, q)  = arcosh(−⟨p,q⟩_L / √(⟨p,p⟩_L ⟨q,q⟩_L))
//! ```
//!
//! ## Series branch
//!
//! `sinh(r)/r`, `θ/sinh θ` and `θ/tanh θ` are 0/0 at the origin. Below the
//! threshold `epsilon` the coefficients are evaluated from truncated even
//! Taylor series (five terms, up to order 8). Above it, the closed forms are
//! used. At `epsilon = 1e-6` the first omitted term is ~1e-60, so both
//! branches agree to machine precision across the switch.
//!
//! Exp and log are mutual inverses on ℍⁿ; there is no cut locus.

use crate::{hyperbolic::HyperbolicSpace, minkowski};
use geostab_core::{
    compute::cpu::{broadcast_column, broadcast_len, map_indexed, stack_columns},
    config::validate_positive,
    error::Result,
    manifold::Manifold,
    manifold_ops::RiemannianMetric,
    numerical::{clamped_sqrt, even_series, Branch},
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;
use std::fmt::{self, Debug};
use tracing::trace;

/// cosh(r) = Σ r^{2k} / (2k)!
pub const COSH_TAYLOR_COEFFS: [f64; 5] = [
    1.0,
    1.0 / 2.0,
    1.0 / 24.0,
    1.0 / 720.0,
    1.0 / 40320.0,
];

/// sinh(r)/r = Σ r^{2k} / (2k+1)!
pub const SINH_OVER_R_TAYLOR_COEFFS: [f64; 5] = [
    1.0,
    1.0 / 6.0,
    1.0 / 120.0,
    1.0 / 5040.0,
    1.0 / 362880.0,
];

/// θ/sinh(θ)
pub const THETA_OVER_SINH_TAYLOR_COEFFS: [f64; 5] = [
    1.0,
    -1.0 / 6.0,
    7.0 / 360.0,
    -31.0 / 15120.0,
    127.0 / 604800.0,
];

/// θ/tanh(θ)
pub const THETA_OVER_TANH_TAYLOR_COEFFS: [f64; 5] = [
    1.0,
    1.0 / 3.0,
    -1.0 / 45.0,
    2.0 / 945.0,
    -1.0 / 4725.0,
];

/// Coefficients `(cosh r, sinh(r)/r)` of the exponential map.
pub fn exp_coefficients<T: Scalar>(r: T, epsilon: T) -> (T, T, Branch) {
    match Branch::select(r, epsilon) {
        Branch::Series => (
            even_series(&COSH_TAYLOR_COEFFS, r),
            even_series(&SINH_OVER_R_TAYLOR_COEFFS, r),
            Branch::Series,
        ),
        Branch::ClosedForm => (
            <T as Float>::cosh(r),
            <T as Float>::sinh(r) / r,
            Branch::ClosedForm,
        ),
    }
}

/// Coefficients `(θ/sinh θ, θ/tanh θ)` of the logarithm map.
pub fn log_coefficients<T: Scalar>(angle: T, epsilon: T) -> (T, T, Branch) {
    match Branch::select(angle, epsilon) {
        Branch::Series => (
            even_series(&THETA_OVER_SINH_TAYLOR_COEFFS, angle),
            even_series(&THETA_OVER_TANH_TAYLOR_COEFFS, angle),
            Branch::Series,
        ),
        Branch::ClosedForm => (
            angle / <T as Float>::sinh(angle),
            angle / <T as Float>::tanh(angle),
            Branch::ClosedForm,
        ),
    }
}

/// The hyperbolic metric on a [`HyperbolicSpace`].
///
/// Every operation validates its point arguments against the space and
/// fails with `InvalidPoint` otherwise. Tangent arguments are not checked
/// for tangency; [`exp_map`](Self::exp_map) projects its input first.
#[derive(Clone)]
pub struct HyperbolicMetric<T = f64> {
    space: HyperbolicSpace<T>,
}

impl<T: Scalar> Debug for HyperbolicMetric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HyperbolicMetric on {:?}", self.space)
    }
}

impl<T: Scalar> HyperbolicMetric<T> {
    pub fn new(space: HyperbolicSpace<T>) -> Self {
        Self { space }
    }

    #[inline]
    pub fn space(&self) -> &HyperbolicSpace<T> {
        &self.space
    }

    /// Inner product of two tangent vectors at `base`.
    pub fn inner_product(&self, base: &DVector<T>, u: &DVector<T>, v: &DVector<T>) -> Result<T> {
        self.space.belongs(base)?;
        self.space.check_length(u)?;
        self.space.check_length(v)?;
        Ok(minkowski::inner_product(u, v))
    }

    /// Norm of a tangent vector at `base`.
    pub fn norm(&self, base: &DVector<T>, v: &DVector<T>) -> Result<T> {
        self.inner_product(base, v, v).map(clamped_sqrt)
    }

    /// Exponential map at `base` with the configured series threshold.
    pub fn exp_map(&self, base: &DVector<T>, vector: &DVector<T>) -> Result<DVector<T>> {
        self.exp_map_with_epsilon(base, vector, self.space.config().epsilon)
    }

    /// Exponential map at `base`.
    ///
    /// `vector` is projected onto T_base ℍⁿ before use. Tangent vectors
    /// with norm below `epsilon` take the series branch.
    ///
    /// # Errors
    ///
    /// - `InvalidPoint`: if `base` is not on the space
    /// - `DimensionMismatch`: if `vector` has the wrong length
    /// - `InvalidParameter`: if `epsilon` is not finite and positive
    pub fn exp_map_with_epsilon(
        &self,
        base: &DVector<T>,
        vector: &DVector<T>,
        epsilon: T,
    ) -> Result<DVector<T>> {
        validate_positive("epsilon", epsilon)?;
        self.space.belongs(base)?;
        self.space.check_length(vector)?;

        let tangent = self.space.project_unchecked(base, vector);
        let norm = clamped_sqrt(minkowski::squared_norm(&tangent));

        let (cosh_coef, sinh_coef, branch) = exp_coefficients(norm, epsilon);
        if branch == Branch::Series {
            trace!(norm = <T as Scalar>::to_f64(norm), "exp map: series branch");
        }
        Ok(base * cosh_coef + tangent * sinh_coef)
    }

    /// Logarithm map at `base` with the configured series threshold.
    pub fn log_map(&self, base: &DVector<T>, point: &DVector<T>) -> Result<DVector<T>> {
        self.log_map_with_epsilon(base, point, self.space.config().epsilon)
    }

    /// Logarithm map at `base`: the tangent vector whose exponential is
    /// `point`.
    ///
    /// # Errors
    ///
    /// - `InvalidPoint`: if either argument is not on the space
    /// - `InvalidParameter`: if `epsilon` is not finite and positive
    pub fn log_map_with_epsilon(
        &self,
        base: &DVector<T>,
        point: &DVector<T>,
        epsilon: T,
    ) -> Result<DVector<T>> {
        validate_positive("epsilon", epsilon)?;
        let angle = self.distance(base, point)?;

        let (point_coef, base_coef, branch) = log_coefficients(angle, epsilon);
        if branch == Branch::Series {
            trace!(angle = <T as Scalar>::to_f64(angle), "log map: series branch");
        }
        Ok(point * point_coef - base * base_coef)
    }

    /// Geodesic distance between two points.
    ///
    /// A cosine at or below 1 (coincident points, or rounding just below)
    /// gives exactly 0.
    pub fn distance(&self, a: &DVector<T>, b: &DVector<T>) -> Result<T> {
        self.space.belongs(a)?;
        self.space.belongs(b)?;

        let sq_norm_a = minkowski::squared_norm(a);
        let sq_norm_b = minkowski::squared_norm(b);
        let cosh_angle =
            -minkowski::inner_product(a, b) / <T as Float>::sqrt(sq_norm_a * sq_norm_b);

        if cosh_angle <= T::one() {
            return Ok(T::zero());
        }
        Ok(<T as Float>::acosh(cosh_angle))
    }

    pub fn squared_distance(&self, a: &DVector<T>, b: &DVector<T>) -> Result<T> {
        let d = self.distance(a, b)?;
        Ok(d * d)
    }

    /// The geodesic leaving `base` with initial velocity `vector`.
    ///
    /// `vector` is projected onto the tangent space once, here.
    pub fn geodesic(&self, base: &DVector<T>, vector: &DVector<T>) -> Result<Geodesic<'_, T>> {
        let velocity = self.space.project_to_tangent_space(base, vector)?;
        Ok(Geodesic {
            metric: self,
            base: base.clone(),
            velocity,
        })
    }

    /// Column-wise [`exp_map`](Self::exp_map). A single-column argument is
    /// broadcast against the other.
    pub fn exp_map_batch(&self, bases: &DMatrix<T>, vectors: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.zip_columns(bases, vectors, |p, v| self.exp_map(p, v))
    }

    /// Column-wise [`log_map`](Self::log_map). A single-column argument is
    /// broadcast against the other.
    pub fn log_map_batch(&self, bases: &DMatrix<T>, points: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.zip_columns(bases, points, |p, q| self.log_map(p, q))
    }

    /// Column-wise [`distance`](Self::distance).
    pub fn distance_batch(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<DVector<T>> {
        self.space.check_batch_rows(a)?;
        self.space.check_batch_rows(b)?;
        let count = broadcast_len(a.ncols(), b.ncols())?;

        let distances = map_indexed(count, self.space.batch_config(), |j| {
            self.distance(&broadcast_column(a, j), &broadcast_column(b, j))
        })?;
        Ok(DVector::from_vec(distances))
    }

    fn zip_columns<F>(&self, left: &DMatrix<T>, right: &DMatrix<T>, f: F) -> Result<DMatrix<T>>
    where
        F: Fn(&DVector<T>, &DVector<T>) -> Result<DVector<T>> + Send + Sync,
    {
        self.space.check_batch_rows(left)?;
        self.space.check_batch_rows(right)?;
        let count = broadcast_len(left.ncols(), right.ncols())?;

        let columns = map_indexed(count, self.space.batch_config(), |j| {
            f(&broadcast_column(left, j), &broadcast_column(right, j))
        })?;
        Ok(stack_columns(self.space.ambient_dim(), &columns))
    }
}

impl<T: Scalar> RiemannianMetric<T> for HyperbolicMetric<T> {
    type Space = HyperbolicSpace<T>;

    fn space(&self) -> &Self::Space {
        &self.space
    }

    fn inner_product(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        u: &<Self::Space as Manifold<T>>::TangentVector,
        v: &<Self::Space as Manifold<T>>::TangentVector,
    ) -> Result<T> {
        HyperbolicMetric::inner_product(self, point, u, v)
    }

    fn exp_map(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        vector: &<Self::Space as Manifold<T>>::TangentVector,
    ) -> Result<<Self::Space as Manifold<T>>::Point> {
        HyperbolicMetric::exp_map(self, point, vector)
    }

    fn log_map(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        other: &<Self::Space as Manifold<T>>::Point,
    ) -> Result<<Self::Space as Manifold<T>>::TangentVector> {
        HyperbolicMetric::log_map(self, point, other)
    }

    fn distance(
        &self,
        a: &<Self::Space as Manifold<T>>::Point,
        b: &<Self::Space as Manifold<T>>::Point,
    ) -> Result<T> {
        HyperbolicMetric::distance(self, a, b)
    }
}

/// A geodesic `t ↦ exp_base(t·velocity)`.
#[derive(Debug, Clone)]
pub struct Geodesic<'a, T: Scalar> {
    metric: &'a HyperbolicMetric<T>,
    base: DVector<T>,
    velocity: DVector<T>,
}

impl<'a, T: Scalar> Geodesic<'a, T> {
    #[inline]
    pub fn base_point(&self) -> &DVector<T> {
        &self.base
    }

    #[inline]
    pub fn initial_velocity(&self) -> &DVector<T> {
        &self.velocity
    }

    /// Point reached at time `t`.
    pub fn at(&self, t: T) -> Result<DVector<T>> {
        self.metric.exp_map(&self.base, &(&self.velocity * t))
    }

    /// Points at each of `times`, as the columns of an `(n+1) × k` matrix.
    pub fn sample(&self, times: &[T]) -> Result<DMatrix<T>> {
        let columns = times
            .iter()
            .map(|&t| self.at(t))
            .collect::<Result<Vec<_>>>()?;
        Ok(stack_columns(self.metric.space.ambient_dim(), &columns))
    }
}
