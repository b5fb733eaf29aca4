//! Checks that the umbrella crate exposes a usable API surface.

use approx::assert_relative_eq;
use geostab::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_hyperbolic_through_prelude() {
    let space = HyperbolicSpace::<f64>::new(2).unwrap();
    let metric = HyperbolicMetric::new(space.clone());

    let origin = space.intrinsic_to_extrinsic(&DVector::zeros(2)).unwrap();
    assert_eq!(origin, DVector::from_vec(vec![1.0, 0.0, 0.0]));
    assert_eq!(minkowski::squared_norm(&origin), -1.0);
    assert_eq!(space.dimension(), 2);

    let p = space.random_point();
    assert_eq!(metric.distance(&p, &p).unwrap(), 0.0);
    assert_relative_eq!(
        RiemannianMetric::distance(&metric, &origin, &p).unwrap(),
        metric.distance(&p, &origin).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_general_linear_through_prelude() {
    let gl = GeneralLinear::<f64>::new(2).unwrap();
    assert!(!gl.belongs(&DMatrix::zeros(2, 2)));

    let exp = gl.group_exp(&DMatrix::zeros(2, 2), None).unwrap();
    assert_relative_eq!(exp, gl.identity(), epsilon = 1e-15);

    let err = gl.inverse(&DMatrix::zeros(2, 2)).unwrap_err();
    assert!(matches!(err, ManifoldError::SingularMatrix { .. }));
}

#[test]
fn test_configs_are_reexported() {
    let config = GeometryConfig::<f64>::default();
    assert_eq!(config.epsilon, constants::series_threshold::<f64>());
    assert!(!BatchConfig::sequential().should_parallelize(1 << 20));
}
