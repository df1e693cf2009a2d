use super::*;
use assert_float_eq::*;

#[test]
fn descent_sqrt() {
    let config = DescentConfig {
        init_step: 0.1,
        min_step: 1e-5,
        max_sweeps: 1_000,
        acceptable_residual: f64::NEG_INFINITY,
    };
    let mut values = [0.0];
    let outcome = coordinate_descent(&config, &mut values, &[0.0..=f64::MAX], |values| {
        (49.0 - values[0].powi(2)).powi(2)
    });
    assert!(outcome.converged);
    assert_float_absolute_eq!(7.0, values[0], 1e-3);
    assert_float_absolute_eq!(0.0, outcome.optimal_residual, 1e-6);
}

#[test]
fn descent_multivariate_quadratic() {
    let config = DescentConfig::default();
    let mut values = [0.0, 0.0, 0.0];
    let bounds = [-10.0..=10.0, -10.0..=10.0, -10.0..=10.0];
    let outcome = coordinate_descent(&config, &mut values, &bounds, |values| {
        (values[0] - 2.0).powi(2) + (values[1] + 4.0).powi(2) + (values[2] - 0.5).powi(2)
    });
    assert!(outcome.converged);
    assert_float_absolute_eq!(2.0, values[0], 1e-3);
    assert_float_absolute_eq!(-4.0, values[1], 1e-3);
    assert_float_absolute_eq!(0.5, values[2], 1e-3);
}

#[test]
fn descent_respects_bounds() {
    let config = DescentConfig::default();
    let mut values = [5.0];
    let outcome = coordinate_descent(&config, &mut values, &[1.0..=10.0], |values| {
        (values[0] + 3.0).powi(2)
    });
    // the unconstrained minimum at -3 lies outside the box
    assert!(outcome.converged);
    assert_eq!(1.0, values[0]);
    assert_float_absolute_eq!(16.0, outcome.optimal_residual);
}

#[test]
fn descent_accepts_early_exit_residual() {
    let config = DescentConfig {
        acceptable_residual: 1e-3,
        ..DescentConfig::default()
    };
    let mut values = [0.0];
    let outcome = coordinate_descent(&config, &mut values, &[-10.0..=10.0], |values| {
        (values[0] - 1.0).powi(2)
    });
    assert!(outcome.converged);
    assert!(outcome.optimal_residual <= 1e-3);
}

#[test]
fn descent_flags_exhaustion() {
    let config = DescentConfig {
        max_sweeps: 2,
        ..DescentConfig::default()
    };
    let mut values = [0.0, 0.0];
    let bounds = [-100.0..=100.0, -100.0..=100.0];
    let outcome = coordinate_descent(&config, &mut values, &bounds, |values| {
        (values[0] - 50.0).powi(2) + (values[1] - 50.0).powi(2)
    });
    assert!(!outcome.converged);
    assert_eq!(2, outcome.sweeps);
}

#[test]
fn descent_starting_point_clamped() {
    let config = DescentConfig::default();
    let mut values = [-5.0];
    coordinate_descent(&config, &mut values, &[0.5..=2.0], |values| values[0].powi(2));
    assert_eq!(0.5, values[0]);
}

#[test]
#[should_panic(expected = "min step must be positive")]
fn invalid_config_panics() {
    let config = DescentConfig {
        min_step: 0.0,
        ..DescentConfig::default()
    };
    let mut values = [0.0];
    coordinate_descent(&config, &mut values, &[-1.0..=1.0], |values| values[0]);
}
