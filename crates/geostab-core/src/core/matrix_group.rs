//! Matrix space and Lie group capabilities.
//!
//! Matrix groups are modelled by composing two capabilities instead of a
//! class hierarchy:
//!
//! - [`MatrixSpace`]: shape, identity element and matrix products.
//! - [`LieGroup`]: membership, inversion and the group exponential and
//!   logarithm, optionally left-translated to a base point.
//!
//! Any type implementing both gets [`LinearGroupOps`] for free.
//!
//! # Base points
//!
//! `group_exp` and `group_log` take `base_point: Option<&DMatrix<T>>`.
//! `None` means the identity, where the maps reduce to the matrix
//! exponential and logarithm of a Lie algebra element. With a base point
//! `g`, a tangent vector `v ∈ T_g G` is converted to the Lie algebra vector
//! `g⁻¹ v` first, and results are left-translated back by `g`.

use crate::{
    error::{ManifoldError, Result},
    types::{DMatrix, Scalar},
};

/// Trait for spaces of fixed-shape matrices.
pub trait MatrixSpace<T: Scalar> {
    /// Get the dimensions of the matrix representation (rows, columns).
    fn matrix_dims(&self) -> (usize, usize);

    /// Returns the identity element of the space.
    fn identity(&self) -> DMatrix<T>;

    /// Returns the left-to-right product of `matrices`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `matrices` is empty
    /// - `DimensionMismatch` if two adjacent factors cannot be multiplied.
    ///   Group implementations may be stricter and reject any factor that is
    ///   not of shape [`matrix_dims`](Self::matrix_dims), even when the
    ///   product would be defined.
    fn compose(&self, matrices: &[&DMatrix<T>]) -> Result<DMatrix<T>>;

    /// Checks that `matrix` has the shape of this space.
    fn check_shape(&self, matrix: &DMatrix<T>) -> Result<()> {
        let (rows, cols) = self.matrix_dims();
        if matrix.nrows() != rows || matrix.ncols() != cols {
            return Err(ManifoldError::dimension_mismatch(
                format!("{}x{}", rows, cols),
                format!("{}x{}", matrix.nrows(), matrix.ncols()),
            ));
        }
        Ok(())
    }
}

/// Trait for matrix Lie groups.
pub trait LieGroup<T: Scalar>: MatrixSpace<T> {
    /// Reports whether `point` is an element of the group.
    ///
    /// This is a query, not a precondition: it never fails.
    fn belongs(&self, point: &DMatrix<T>) -> bool;

    /// Returns the group inverse of `point`.
    fn inverse(&self, point: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Exponentiates `tangent_vec` from `base_point` (identity if `None`).
    fn group_exp(
        &self,
        tangent_vec: &DMatrix<T>,
        base_point: Option<&DMatrix<T>>,
    ) -> Result<DMatrix<T>>;

    /// Returns the tangent vector at `base_point` (identity if `None`)
    /// whose group exponential is `point`.
    fn group_log(
        &self,
        point: &DMatrix<T>,
        base_point: Option<&DMatrix<T>>,
    ) -> Result<DMatrix<T>>;
}

/// Combined capability of a linear group: matrix space plus Lie group.
pub trait LinearGroupOps<T: Scalar>: MatrixSpace<T> + LieGroup<T> {}

impl<T: Scalar, G: MatrixSpace<T> + LieGroup<T>> LinearGroupOps<T> for G {}
