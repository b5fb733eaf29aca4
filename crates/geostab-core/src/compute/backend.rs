//! Linear-algebra backend abstraction.
//!
//! Group kernels never call matrix primitives directly. They receive a
//! [`LinalgBackend`] and compose its operations, so that a different
//! implementation (another precision, a mock for tests, an accelerated
//! library) can be substituted without touching the geometry.
//!
//! The backend owns the conventions for matrix functions: which branch of
//! the logarithm is returned and how inputs outside its domain fail.

use crate::{
    error::{ManifoldError, Result},
    numerical::matrix_functions,
    types::{DMatrix, Scalar},
};
use std::fmt::Debug;
use tracing::debug;

/// Trait for linear-algebra backends.
pub trait LinalgBackend<T: Scalar>: Debug + Send + Sync {
    /// Backend name for identification.
    fn name(&self) -> &str;

    /// Matrix product `a · b`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `a.ncols() != b.nrows()`.
    fn matmul(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Determinant of a square matrix.
    fn determinant(&self, a: &DMatrix<T>) -> Result<T>;

    /// Inverse of a square matrix.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` if `a` is not invertible.
    fn inverse(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Matrix exponential.
    fn expm(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Principal matrix logarithm.
    fn logm(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;
}

/// Default backend built on nalgebra.
///
/// - `expm`: nalgebra's Padé approximant with scaling and squaring.
/// - `logm`: inverse scaling and squaring, see
///   [`matrix_functions::logm`]. Matrices with eigenvalues on the closed
///   negative real axis are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NalgebraBackend;

impl NalgebraBackend {
    fn require_square<T: Scalar>(a: &DMatrix<T>, operation: &str) -> Result<()> {
        if a.nrows() != a.ncols() {
            return Err(ManifoldError::dimension_mismatch(
                format!("square matrix for {}", operation),
                format!("{}x{}", a.nrows(), a.ncols()),
            ));
        }
        Ok(())
    }
}

impl<T: Scalar> LinalgBackend<T> for NalgebraBackend {
    fn name(&self) -> &str {
        "nalgebra"
    }

    fn matmul(&self, a: &DMatrix<T>, b: &DMatrix<T>) -> Result<DMatrix<T>> {
        if a.ncols() != b.nrows() {
            return Err(ManifoldError::dimension_mismatch(
                format!("{} rows in right factor", a.ncols()),
                format!("{}x{}", b.nrows(), b.ncols()),
            ));
        }
        Ok(a * b)
    }

    fn determinant(&self, a: &DMatrix<T>) -> Result<T> {
        Self::require_square(a, "determinant")?;
        Ok(a.determinant())
    }

    fn inverse(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        Self::require_square(a, "inverse")?;
        a.clone().try_inverse().ok_or_else(|| {
            debug!(n = a.nrows(), "matrix inversion failed");
            ManifoldError::singular_matrix(format!(
                "{}x{} matrix is not invertible",
                a.nrows(),
                a.ncols()
            ))
        })
    }

    fn expm(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        Self::require_square(a, "expm")?;
        Ok(a.exp())
    }

    fn logm(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        matrix_functions::logm(a)
    }
}
