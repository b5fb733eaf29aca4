//! Matrix square root and principal matrix logarithm.
//!
//! nalgebra ships a Padé matrix exponential but no logarithm for general
//! (non-symmetric) real matrices. The logarithm here uses inverse scaling
//! and squaring:
//!
//! ```text
//! log(A) = 2^k · log(A^{1/2^k})
//! ```
//!
//! Square roots are taken with the Denman–Beavers iteration until
//! ‖X − I‖_F < 1/4, then the Gregory series
//!
//! ```text
//! log(X) = 2 Σ_{j≥0} Z^{2j+1} / (2j+1),   Z = (X − I)(X + I)⁻¹
//! ```
//!
//! converges quickly since ‖Z‖ stays well below 1.
//!
//! # Domain
//!
//! Both functions return the principal branch. They are defined for real
//! matrices with no eigenvalues on the closed negative real axis. Only a
//! singular input is reported as `SingularMatrix`. An invertible input with
//! negative real eigenvalues makes the square-root iteration break down or
//! fail to converge and is reported as `NumericalError`.

use crate::{
    error::{ManifoldError, Result},
    types::{DMatrix, Scalar},
};
use tracing::{debug, trace};

/// Maximum number of Denman–Beavers iterations for one square root.
const MAX_SQRT_ITERATIONS: usize = 100;

/// Maximum number of square roots taken before the series applies.
const MAX_SQUARE_ROOTS: usize = 64;

/// Maximum number of Gregory series terms.
const MAX_SERIES_TERMS: usize = 60;

/// Frobenius distance to the identity below which the series is used.
const LOG_SERIES_RADIUS: f64 = 0.25;

fn check_square<T: Scalar>(a: &DMatrix<T>, operation: &str) -> Result<usize> {
    if a.nrows() != a.ncols() {
        return Err(ManifoldError::dimension_mismatch(
            format!("square matrix for {}", operation),
            format!("{}x{}", a.nrows(), a.ncols()),
        ));
    }
    Ok(a.nrows())
}

fn negative_axis_error() -> ManifoldError {
    debug!("matrix square root iterate became singular");
    ManifoldError::numerical_error(
        "matrix square root iterate is not invertible \
         (matrix has eigenvalues on the closed negative real axis)",
    )
}

/// Computes the principal square root of `a` by Denman–Beavers iteration.
///
/// # Errors
///
/// - `DimensionMismatch` if `a` is not square
/// - `SingularMatrix` if `a` itself is singular
/// - `NumericalError` if a later iterate is singular or the iteration does
///   not converge
pub fn sqrtm<T: Scalar>(a: &DMatrix<T>) -> Result<DMatrix<T>> {
    let n = check_square(a, "sqrtm")?;
    let half = <T as Scalar>::from_f64(0.5);
    let tol = T::ITERATION_TOLERANCE;
    let stall_tol = <T as num_traits::Float>::sqrt(tol);

    let mut y = a.clone();
    let mut z = DMatrix::<T>::identity(n, n);
    let mut previous_delta: Option<T> = None;

    // The first iterate is the input; later singular iterates come from
    // eigenvalues on the negative real axis, not from a singular input.
    let mut y_inv = a.clone().try_inverse().ok_or_else(|| {
        debug!(n, "matrix square root of a singular matrix");
        ManifoldError::singular_matrix("matrix is not invertible")
    })?;

    for iteration in 0..MAX_SQRT_ITERATIONS {
        let z_inv = z.clone().try_inverse().ok_or_else(negative_axis_error)?;

        let y_next = (&y + z_inv) * half;
        let z_next = (&z + y_inv) * half;

        let delta = (&y_next - &y).norm();
        let scale = y_next.norm();

        // Quadratic convergence ends at the rounding floor; stop once the
        // update no longer shrinks.
        let stalled = previous_delta
            .map(|prev| prev <= stall_tol * scale && delta >= prev)
            .unwrap_or(false);

        y = y_next;
        z = z_next;

        if delta <= tol * scale || stalled {
            trace!(iterations = iteration + 1, "matrix square root converged");
            return Ok(y);
        }
        previous_delta = Some(delta);
        y_inv = y.clone().try_inverse().ok_or_else(negative_axis_error)?;
    }

    debug!(n, "matrix square root did not converge");
    Err(ManifoldError::numerical_error(format!(
        "matrix square root did not converge after {} iterations \
         (matrix may have eigenvalues on the negative real axis)",
        MAX_SQRT_ITERATIONS
    )))
}

/// Computes the principal logarithm of `a` by inverse scaling and squaring.
///
/// # Errors
///
/// - `DimensionMismatch` if `a` is not square
/// - `SingularMatrix` if `a` is singular
/// - `NumericalError` if `a` is outside the principal-logarithm domain
pub fn logm<T: Scalar>(a: &DMatrix<T>) -> Result<DMatrix<T>> {
    let n = check_square(a, "logm")?;
    let identity = DMatrix::<T>::identity(n, n);
    let radius = <T as Scalar>::from_f64(LOG_SERIES_RADIUS);

    let mut x = a.clone();
    let mut square_roots = 0usize;
    while (&x - &identity).norm() > radius {
        if square_roots == MAX_SQUARE_ROOTS {
            return Err(ManifoldError::numerical_error(
                "matrix logarithm failed to approach the identity by repeated square roots",
            ));
        }
        x = sqrtm(&x)?;
        square_roots += 1;
    }
    trace!(square_roots, "matrix logarithm reduced to series radius");

    let denominator = (&x + &identity).try_inverse().ok_or_else(|| {
        ManifoldError::numerical_error(
            "X + I is not invertible in matrix logarithm (eigenvalue -1)",
        )
    })?;
    let z = (&x - &identity) * denominator;
    let z_squared = &z * &z;

    let mut power = z.clone();
    let mut sum = z;
    for k in 1..MAX_SERIES_TERMS {
        power = &power * &z_squared;
        let term = &power / <T as Scalar>::from_f64((2 * k + 1) as f64);
        let term_norm = term.norm();
        sum += &term;
        if term_norm <= T::EPSILON * sum.norm() {
            break;
        }
    }

    let scale = <T as Scalar>::from_f64(2f64.powi(square_roots as i32 + 1));
    Ok(sum * scale)
}
