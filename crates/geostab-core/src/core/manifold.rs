//! Core manifold trait.
//!
//! A manifold here is represented extrinsically, embedded in an ambient
//! vector or matrix space. The trait captures the minimal capability every
//! space offers: a membership test, and the projection of ambient vectors
//! onto the tangent space at a point.
//!
//! # Mathematical Background
//!
//! - **Membership**: a point p of the ambient space lies on ℳ when it
//!   satisfies the defining equation of ℳ within a tolerance.
//! - **Tangent space**: T_p ℳ is the linear approximation of ℳ at p. For
//!   embedded manifolds it is the kernel of the differential of the defining
//!   equation, and P_p projects ambient vectors onto it.

use crate::{error::Result, types::Scalar};
use std::fmt::Debug;

/// Trait for manifolds represented in an ambient space.
///
/// Membership is exposed two ways: [`Manifold::check_point`] enforces it as
/// a precondition and reports *why* a point was rejected, while
/// [`Manifold::is_point_on_manifold`] answers the boolean question.
///
/// # Implementation Notes
///
/// - Never mutate inputs; every operation returns a new value.
/// - `project_tangent` validates its base point and returns an error rather
///   than silently producing a meaningless projection.
pub trait Manifold<T: Scalar>: Debug + Send + Sync {
    /// Representation of a point.
    type Point;
    /// Representation of a tangent vector (same shape as a point).
    type TangentVector;

    /// Returns a human-readable name for the manifold.
    fn name(&self) -> &str;

    /// Returns the intrinsic dimension of the manifold.
    fn dimension(&self) -> usize;

    /// Validates that `point` lies on the manifold with the manifold's
    /// configured tolerance.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the point has the wrong shape
    /// - `InvalidPoint` if the membership invariant fails
    fn check_point(&self, point: &Self::Point) -> Result<()>;

    /// Checks if a point lies on the manifold within a given tolerance.
    fn is_point_on_manifold(&self, point: &Self::Point, tol: T) -> bool;

    /// Projects an ambient vector onto the tangent space at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if `point` is not on the manifold or the shapes of
    /// `point` and `vector` disagree.
    fn project_tangent(
        &self,
        point: &Self::Point,
        vector: &Self::TangentVector,
    ) -> Result<Self::TangentVector>;
}
