//! Riemannian metric capability.
//!
//! A metric turns a manifold into a space with lengths and geodesics. The
//! three operations that matter for the kernels in this workspace are:
//!
//! - **Exponential map** exp_p: T_p ℳ → ℳ, following the geodesic from p
//!   with initial velocity v for unit time.
//! - **Logarithm map** log_p: ℳ → T_p ℳ, the local inverse of exp_p.
//! - **Geodesic distance** d(p, q) = ‖log_p(q)‖_p.
//!
//! # Inverse-pair contract
//!
//! Implementations guarantee exp_p(log_p(q)) ≈ q for every pair of valid
//! points, up to floating-point error.

use crate::{error::Result, manifold::Manifold, types::Scalar};
use num_traits::Float;

/// Trait for (pseudo-)Riemannian metrics over a [`Manifold`].
pub trait RiemannianMetric<T: Scalar>: Send + Sync {
    /// The space this metric is defined on.
    type Space: Manifold<T>;

    /// Returns the underlying space.
    fn space(&self) -> &Self::Space;

    /// Computes the metric inner product of two tangent vectors at `point`.
    fn inner_product(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        u: &<Self::Space as Manifold<T>>::TangentVector,
        v: &<Self::Space as Manifold<T>>::TangentVector,
    ) -> Result<T>;

    /// Computes the norm of a tangent vector.
    ///
    /// This is equivalent to sqrt(inner_product(point, v, v)), with small
    /// negative values from rounding clamped to zero.
    fn norm(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        vector: &<Self::Space as Manifold<T>>::TangentVector,
    ) -> Result<T> {
        self.inner_product(point, vector, vector)
            .map(|ip| <T as Float>::sqrt(<T as Float>::max(ip, T::zero())))
    }

    /// Computes the exponential map exp_point(vector).
    fn exp_map(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        vector: &<Self::Space as Manifold<T>>::TangentVector,
    ) -> Result<<Self::Space as Manifold<T>>::Point>;

    /// Computes the logarithm map log_point(other).
    fn log_map(
        &self,
        point: &<Self::Space as Manifold<T>>::Point,
        other: &<Self::Space as Manifold<T>>::Point,
    ) -> Result<<Self::Space as Manifold<T>>::TangentVector>;

    /// Computes the geodesic distance between two points.
    fn distance(
        &self,
        x: &<Self::Space as Manifold<T>>::Point,
        y: &<Self::Space as Manifold<T>>::Point,
    ) -> Result<T>;

    /// Computes the squared geodesic distance.
    fn squared_distance(
        &self,
        x: &<Self::Space as Manifold<T>>::Point,
        y: &<Self::Space as Manifold<T>>::Point,
    ) -> Result<T> {
        let d = self.distance(x, y)?;
        Ok(d * d)
    }
}
