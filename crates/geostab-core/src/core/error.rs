//! Error types for manifold and Lie group operations.
//!
//! Every precondition failure is reported through [`ManifoldError`]. The
//! variants distinguish an input that violates a manifold invariant from a
//! shape problem and from a failure surfaced by the linear-algebra backend.

use thiserror::Error;

/// Errors that can occur during manifold operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManifoldError {
    /// Point is not on the manifold.
    ///
    /// Raised when a point fails the membership invariant of its space
    /// (for the hyperboloid, Minkowski squared norm equal to -1).
    #[error("Point is not on the manifold: {reason}")]
    InvalidPoint {
        /// Description of why the point is invalid
        reason: String,
    },

    /// Dimension mismatch between operands.
    ///
    /// Raised when vector lengths or matrix shapes are incompatible, for
    /// instance adjacent factors of a product or misaligned batches.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// A matrix that must be invertible is singular.
    #[error("Singular matrix: {reason}")]
    SingularMatrix {
        /// Description of the operation that required invertibility
        reason: String,
    },

    /// A construction or configuration parameter is out of range.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the rejected parameter
        reason: String,
    },

    /// Numerical failure inside the backend.
    ///
    /// Used when an iterative matrix function does not converge, which
    /// happens for inputs outside its domain (e.g. the principal logarithm
    /// of a matrix with negative real eigenvalues).
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl ManifoldError {
    /// Create an InvalidPoint error with a custom reason.
    pub fn invalid_point<S: Into<String>>(reason: S) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a SingularMatrix error with a custom reason.
    pub fn singular_matrix<S: Into<String>>(reason: S) -> Self {
        Self::SingularMatrix {
            reason: reason.into(),
        }
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter<S: Into<String>>(reason: S) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by the caller's input rather than
    /// by a backend failure.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::InvalidPoint { .. })
    }
}

/// Result type alias for operations that can produce ManifoldError.
pub type Result<T> = std::result::Result<T, ManifoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ManifoldError::invalid_point("squared norm is -0.5");
        assert!(matches!(err, ManifoldError::InvalidPoint { .. }));
        assert_eq!(
            err.to_string(),
            "Point is not on the manifold: squared norm is -0.5"
        );

        let err = ManifoldError::dimension_mismatch("(3, 3)", "(4, 4)");
        assert!(matches!(err, ManifoldError::DimensionMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected (3, 3), got (4, 4)"
        );

        let err = ManifoldError::singular_matrix("inverse of base point");
        assert_eq!(err.to_string(), "Singular matrix: inverse of base point");
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            ManifoldError::invalid_point("not on hyperboloid"),
            ManifoldError::dimension_mismatch("square matrix", "rectangular matrix"),
            ManifoldError::singular_matrix("zero determinant"),
            ManifoldError::invalid_parameter("epsilon must be positive"),
            ManifoldError::numerical_error("square root iteration did not converge"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_domain_classification() {
        assert!(ManifoldError::invalid_point("x").is_domain_error());
        assert!(!ManifoldError::singular_matrix("x").is_domain_error());
        assert!(!ManifoldError::dimension_mismatch(2, 3).is_domain_error());
    }
}
