//! # General Linear Group GL(n)
//!
//! The general linear group is the group of invertible real n×n matrices
//! under multiplication:
//!
//! ```text
//! GL(n) = {A ∈ ℝⁿˣⁿ : det(A) ≠ 0}
//! ```
//!
//! It is an open subset of ℝⁿˣⁿ, so every n×n matrix is a tangent vector
//! and the Lie algebra 𝔤𝔩(n) is the whole matrix space.
//!
//! ## Group exponential and logarithm
//!
//! At the identity these are the matrix exponential and the principal
//! matrix logarithm. At a base point `g` they are left-translated:
//!
//! ```text
//! exp_g(v) = g · expm(g⁻¹ v)
//! log_g(p) = g · logm(g⁻¹ p)
//! ```
//!
//! The logarithm only exists for matrices without eigenvalues on the
//! closed negative real axis; other inputs fail through the backend.
//!
//! ## Orbits
//!
//! [`GeneralLinear::orbit`] returns the one-parameter path
//! `t ↦ exp_g(t · log_g(p))`, which passes through `g` at t = 0 and `p` at
//! t = 1.
//!
//! ## Backend
//!
//! All matrix primitives go through a [`LinalgBackend`], by default
//! [`NalgebraBackend`].
//!
//! ## Example Usage
//!
//! ```rust
//! use geostab_core::prelude::*;
//! use geostab_manifolds::GeneralLinear;
//! use nalgebra::DMatrix;
//!
//! let gl = GeneralLinear::<f64>::new(2)?;
//! assert!(!gl.belongs(&DMatrix::zeros(2, 2)));
//!
//! let exp = gl.group_exp(&DMatrix::zeros(2, 2), None)?;
//! assert!((exp - gl.identity()).norm() < 1e-14);
//! # Ok::<(), geostab_core::error::ManifoldError>(())
//! ```

use geostab_core::{
    compute::{cpu::map_indexed, LinalgBackend, NalgebraBackend},
    config::BatchConfig,
    error::{ManifoldError, Result},
    matrix_group::{LieGroup, MatrixSpace},
    types::{DMatrix, Scalar},
};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// The general linear group GL(n).
///
/// # Type Parameters
///
/// * `T` - Scalar type (f32 or f64)
/// * `B` - Linear-algebra backend
#[derive(Clone)]
pub struct GeneralLinear<T = f64, B = NalgebraBackend> {
    n: usize,
    backend: B,
    batch: BatchConfig,
    _phantom: PhantomData<T>,
}

impl<T: Scalar, B: LinalgBackend<T>> Debug for GeneralLinear<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GL({}) [{}]", self.n, self.backend.name())
    }
}

impl<T: Scalar> GeneralLinear<T, NalgebraBackend> {
    /// Creates GL(n) on the default backend.
    ///
    /// # Errors
    ///
    /// Returns `ManifoldError::InvalidParameter` if n = 0.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_backend(n, NalgebraBackend)
    }
}

impl<T: Scalar, B: LinalgBackend<T>> GeneralLinear<T, B> {
    /// Creates GL(n) on an explicit backend.
    pub fn with_backend(n: usize, backend: B) -> Result<Self> {
        if n == 0 {
            return Err(ManifoldError::invalid_parameter(
                "General linear group requires n ≥ 1",
            ));
        }
        Ok(Self {
            n,
            backend,
            batch: BatchConfig::default(),
            _phantom: PhantomData,
        })
    }

    /// Replaces the batch scheduling configuration.
    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Matrix size n.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Dimension of the group as a manifold, n².
    #[inline]
    pub fn dimension(&self) -> usize {
        self.n * self.n
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// [`belongs`](LieGroup::belongs) applied to each matrix.
    pub fn belongs_batch(&self, points: &[DMatrix<T>]) -> Vec<bool> {
        points.iter().map(|p| LieGroup::belongs(self, p)).collect()
    }

    /// [`group_exp`](LieGroup::group_exp) of each tangent vector from a
    /// shared base point.
    pub fn group_exp_batch(
        &self,
        tangent_vecs: &[DMatrix<T>],
        base_point: Option<&DMatrix<T>>,
    ) -> Result<Vec<DMatrix<T>>> {
        map_indexed(tangent_vecs.len(), &self.batch, |i| {
            self.group_exp(&tangent_vecs[i], base_point)
        })
    }

    /// [`group_log`](LieGroup::group_log) of each point from a shared base
    /// point.
    pub fn group_log_batch(
        &self,
        points: &[DMatrix<T>],
        base_point: Option<&DMatrix<T>>,
    ) -> Result<Vec<DMatrix<T>>> {
        map_indexed(points.len(), &self.batch, |i| {
            self.group_log(&points[i], base_point)
        })
    }

    /// One-parameter path from `base_point` (identity if `None`) through
    /// `point`.
    ///
    /// # Errors
    ///
    /// Fails like [`group_log`](LieGroup::group_log).
    pub fn orbit(
        &self,
        point: &DMatrix<T>,
        base_point: Option<&DMatrix<T>>,
    ) -> Result<Orbit<'_, T, B>> {
        let tangent_vec = self.group_log(point, base_point)?;
        Ok(Orbit {
            group: self,
            tangent_vec,
            base_point: base_point.cloned(),
        })
    }

    /// Draws a matrix with independent standard normal entries, resampling
    /// until it is invertible.
    pub fn random_point_with<R: Rng + ?Sized>(&self, rng: &mut R) -> DMatrix<T> {
        loop {
            let candidate = DMatrix::from_fn(self.n, self.n, |_, _| {
                let value: f64 = StandardNormal.sample(&mut *rng);
                <T as Scalar>::from_f64(value)
            });
            if LieGroup::belongs(self, &candidate) {
                return candidate;
            }
            trace!(n = self.n, "rejected singular sample");
        }
    }

    /// [`random_point_with`](Self::random_point_with) on the thread-local
    /// generator.
    pub fn random_point(&self) -> DMatrix<T> {
        self.random_point_with(&mut rand::thread_rng())
    }

    /// Returns `g⁻¹ · m`, the Lie algebra representative of `m` at `g`.
    fn translate_to_identity(&self, base: &DMatrix<T>, m: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.check_shape(base)?;
        let base_inv = self.backend.inverse(base)?;
        self.backend.matmul(&base_inv, m)
    }
}

impl<T: Scalar, B: LinalgBackend<T>> MatrixSpace<T> for GeneralLinear<T, B> {
    fn matrix_dims(&self) -> (usize, usize) {
        (self.n, self.n)
    }

    fn identity(&self) -> DMatrix<T> {
        DMatrix::identity(self.n, self.n)
    }

    /// Every factor must be `n×n`; a product that leaves the group is
    /// rejected with `DimensionMismatch`.
    fn compose(&self, matrices: &[&DMatrix<T>]) -> Result<DMatrix<T>> {
        let (first, rest) = matrices.split_first().ok_or_else(|| {
            ManifoldError::invalid_parameter("compose requires at least one matrix")
        })?;
        self.check_shape(first)?;

        let mut product = (*first).clone();
        for factor in rest {
            self.check_shape(factor)?;
            product = self.backend.matmul(&product, factor)?;
        }
        Ok(product)
    }
}

impl<T: Scalar, B: LinalgBackend<T>> LieGroup<T> for GeneralLinear<T, B> {
    /// Exact test `det(point) ≠ 0`. Matrices of another shape do not
    /// belong.
    fn belongs(&self, point: &DMatrix<T>) -> bool {
        if point.nrows() != self.n || point.ncols() != self.n {
            return false;
        }
        match self.backend.determinant(point) {
            Ok(det) => det != T::zero(),
            Err(_) => false,
        }
    }

    fn inverse(&self, point: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.check_shape(point)?;
        self.backend.inverse(point)
    }

    fn group_exp(
        &self,
        tangent_vec: &DMatrix<T>,
        base_point: Option<&DMatrix<T>>,
    ) -> Result<DMatrix<T>> {
        self.check_shape(tangent_vec)?;
        match base_point {
            None => self.backend.expm(tangent_vec),
            Some(base) => {
                let algebra_vec = self.translate_to_identity(base, tangent_vec)?;
                let exp = self.backend.expm(&algebra_vec)?;
                self.backend.matmul(base, &exp)
            }
        }
    }

    fn group_log(
        &self,
        point: &DMatrix<T>,
        base_point: Option<&DMatrix<T>>,
    ) -> Result<DMatrix<T>> {
        self.check_shape(point)?;
        let result = match base_point {
            None => self.backend.logm(point),
            Some(base) => {
                let relative = self.translate_to_identity(base, point)?;
                let log = self.backend.logm(&relative)?;
                self.backend.matmul(base, &log)
            }
        };
        if let Err(err) = &result {
            debug!(n = self.n, error = %err, "group logarithm failed");
        }
        result
    }
}

/// The path `t ↦ group_exp(t · tangent_vec, base_point)`.
#[derive(Debug, Clone)]
pub struct Orbit<'a, T: Scalar, B: LinalgBackend<T> = NalgebraBackend> {
    group: &'a GeneralLinear<T, B>,
    tangent_vec: DMatrix<T>,
    base_point: Option<DMatrix<T>>,
}

impl<'a, T: Scalar, B: LinalgBackend<T>> Orbit<'a, T, B> {
    /// Point of the path at time `t`.
    pub fn at(&self, t: T) -> Result<DMatrix<T>> {
        self.group
            .group_exp(&(&self.tangent_vec * t), self.base_point.as_ref())
    }

    /// Points of the path at each of `times`.
    pub fn sample(&self, times: &[T]) -> Result<Vec<DMatrix<T>>> {
        times.iter().map(|&t| self.at(t)).collect()
    }

    /// Initial velocity, `group_log(point, base_point)`.
    #[inline]
    pub fn tangent_vector(&self) -> &DMatrix<T> {
        &self.tangent_vec
    }

    /// `None` when the orbit starts at the identity.
    #[inline]
    pub fn base_point(&self) -> Option<&DMatrix<T>> {
        self.base_point.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn gl(n: usize) -> GeneralLinear<f64> {
        GeneralLinear::new(n).unwrap()
    }

    #[test]
    fn test_creation() {
        let group = gl(3);
        assert_eq!(group.n(), 3);
        assert_eq!(group.dimension(), 9);
        assert_eq!(group.matrix_dims(), (3, 3));
        assert!(GeneralLinear::<f64>::new(0).is_err());
        assert_eq!(format!("{:?}", group), "GL(3) [nalgebra]");
    }

    #[test]
    fn test_belongs() {
        let group = gl(2);
        assert!(!group.belongs(&DMatrix::zeros(2, 2)));
        assert!(group.belongs(&DMatrix::identity(2, 2)));
        assert!(group.belongs(&DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0])));
        assert!(!group.belongs(&DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0])));

        // Wrong shapes never belong
        assert!(!group.belongs(&DMatrix::identity(3, 3)));
        assert!(!group.belongs(&DMatrix::from_element(2, 3, 1.0)));
    }

    #[test]
    fn test_belongs_batch() {
        let group = gl(2);
        let points = vec![
            DMatrix::identity(2, 2),
            DMatrix::zeros(2, 2),
            DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]),
        ];
        assert_eq!(group.belongs_batch(&points), vec![true, false, true]);
    }

    #[test]
    fn test_compose() {
        let group = gl(2);
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 1.0]);
        let b = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);

        assert_eq!(group.compose(&[&a]).unwrap(), a);
        assert_eq!(group.compose(&[&a, &b]).unwrap(), &a * &b);
        assert_eq!(group.compose(&[&a, &b, &a]).unwrap(), &a * &b * &a);

        assert!(matches!(
            group.compose(&[]),
            Err(ManifoldError::InvalidParameter { .. })
        ));
        let wrong = DMatrix::identity(3, 3);
        assert!(matches!(
            group.compose(&[&a, &wrong]),
            Err(ManifoldError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_inverse() {
        let group = gl(3);
        let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 0.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0]);
        let inv = group.inverse(&a).unwrap();
        assert_relative_eq!(group.compose(&[&a, &inv]).unwrap(), group.identity(), epsilon = 1e-14);

        assert!(matches!(
            group.inverse(&DMatrix::zeros(3, 3)),
            Err(ManifoldError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_exp_of_zero_is_identity() {
        let group = gl(2);
        let exp = group.group_exp(&DMatrix::zeros(2, 2), None).unwrap();
        assert_relative_eq!(exp, DMatrix::identity(2, 2), epsilon = 1e-15);
    }

    #[test]
    fn test_exp_log_at_identity() {
        let group = gl(2);
        let v = DMatrix::from_row_slice(2, 2, &[0.1, 0.4, -0.3, 0.2]);
        let p = group.group_exp(&v, None).unwrap();
        assert!(group.belongs(&p));
        assert_relative_eq!(group.group_log(&p, None).unwrap(), v, epsilon = 1e-10);
    }

    #[test]
    fn test_exp_log_at_base_point() {
        let group = gl(2);
        let base = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 0.5, 1.0]);
        let v = DMatrix::from_row_slice(2, 2, &[0.2, -0.1, 0.3, 0.05]);

        let p = group.group_exp(&v, Some(&base)).unwrap();
        let log = group.group_log(&p, Some(&base)).unwrap();
        assert_relative_eq!(log, v, epsilon = 1e-10);

        // Zero tangent vector stays at the base point
        let at_base = group.group_exp(&DMatrix::zeros(2, 2), Some(&base)).unwrap();
        assert_relative_eq!(at_base, base, epsilon = 1e-14);
    }

    #[test]
    fn test_identity_base_matches_none() {
        let group = gl(2);
        let v = DMatrix::from_row_slice(2, 2, &[0.3, 0.1, 0.0, -0.2]);
        let id = group.identity();
        assert_relative_eq!(
            group.group_exp(&v, Some(&id)).unwrap(),
            group.group_exp(&v, None).unwrap(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_singular_base_point() {
        let group = gl(2);
        let singular = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let v = DMatrix::identity(2, 2);
        assert!(matches!(
            group.group_exp(&v, Some(&singular)),
            Err(ManifoldError::SingularMatrix { .. })
        ));
        assert!(matches!(
            group.group_log(&v, Some(&singular)),
            Err(ManifoldError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_log_of_singular_point_fails() {
        let group = gl(2);
        assert!(matches!(
            group.group_log(&DMatrix::zeros(2, 2), None),
            Err(ManifoldError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_log_outside_principal_domain() {
        let group = gl(2);
        let reflection = DMatrix::from_row_slice(2, 2, &[-1.0, 0.0, 0.0, 2.0]);
        assert!(group.belongs(&reflection));
        assert!(matches!(
            group.group_log(&reflection, None),
            Err(ManifoldError::NumericalError { .. })
        ));
    }

    #[test]
    fn test_orbit_endpoints() {
        let group = gl(2);
        let base = DMatrix::from_row_slice(2, 2, &[1.5, 0.2, -0.1, 0.8]);
        let point = DMatrix::from_row_slice(2, 2, &[1.2, 0.5, 0.1, 1.1]);

        let orbit = group.orbit(&point, Some(&base)).unwrap();
        assert_relative_eq!(orbit.at(0.0).unwrap(), base, epsilon = 1e-12);
        assert_relative_eq!(orbit.at(1.0).unwrap(), point, epsilon = 1e-10);
        assert_eq!(orbit.base_point(), Some(&base));

        let path = orbit.sample(&[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(path.len(), 3);
        assert!(path.iter().all(|m| group.belongs(m)));
    }

    #[test]
    fn test_orbit_from_identity() {
        let group = gl(2);
        let point = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 0.5]);
        let orbit = group.orbit(&point, None).unwrap();

        assert!(orbit.base_point().is_none());
        assert_relative_eq!(
            *orbit.tangent_vector(),
            DMatrix::from_row_slice(2, 2, &[2.0_f64.ln(), 0.0, 0.0, 0.5_f64.ln()]),
            epsilon = 1e-12
        );
        // Half way is the principal square root
        let half = orbit.at(0.5).unwrap();
        assert_relative_eq!(&half * &half, point, epsilon = 1e-10);
    }

    #[test]
    fn test_batches_match_single() {
        let group = gl(2).with_batch_config(BatchConfig::default().with_parallel_threshold(1));
        let vectors = vec![
            DMatrix::zeros(2, 2),
            DMatrix::from_row_slice(2, 2, &[0.1, 0.2, 0.3, 0.4]),
        ];
        let exps = group.group_exp_batch(&vectors, None).unwrap();
        for (v, e) in vectors.iter().zip(&exps) {
            assert_eq!(e, &group.group_exp(v, None).unwrap());
        }

        let logs = group.group_log_batch(&exps, None).unwrap();
        for (v, l) in vectors.iter().zip(&logs) {
            assert_relative_eq!(*l, *v, epsilon = 1e-10);
        }

        let with_singular = vec![DMatrix::identity(2, 2), DMatrix::zeros(2, 2)];
        assert!(group.group_log_batch(&with_singular, None).is_err());
    }

    #[test]
    fn test_random_point() {
        let group = gl(4);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let point = group.random_point_with(&mut rng);
            assert_eq!(point.shape(), (4, 4));
            assert!(group.belongs(&point));
        }
        assert!(group.belongs(&group.random_point()));
    }
}
