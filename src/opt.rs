//! Derivative-free minimization.

use std::ops::RangeInclusive;

use anyhow::bail;

#[derive(Clone, Debug)]
pub struct DescentConfig {
    pub init_step: f64,
    pub min_step: f64,
    pub max_sweeps: u64,
    pub acceptable_residual: f64,
}
impl DescentConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.init_step <= 0.0 {
            bail!("initial step must be positive")
        }
        if self.min_step <= 0.0 {
            bail!("min step must be positive")
        }
        if self.min_step > self.init_step {
            bail!("min step cannot exceed the initial step")
        }
        if self.max_sweeps == 0 {
            bail!("at least one sweep must be allowed")
        }
        Ok(())
    }
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            init_step: 0.1,
            min_step: 1e-5,
            max_sweeps: 1_000,
            acceptable_residual: f64::NEG_INFINITY,
        }
    }
}

#[derive(Debug)]
pub struct DescentOutcome {
    pub sweeps: u64,
    pub evaluations: u64,
    pub optimal_residual: f64,
    pub converged: bool,
}

/// Multivariate, derivative-free search over a bounded box.
///
/// Cyclic coordinate descent with per-dimension step halving: each sweep takes every
/// dimension in turn and walks it in whichever direction improves, one step at a time,
/// until no further improvement; a dimension that cannot improve at all has its step
/// halved. The search has converged once every step has shrunk below `min_step`;
/// exhausting `max_sweeps` beforehand leaves the outcome unconverged. `values` is
/// updated in place and always holds the best vector found.
pub fn coordinate_descent(
    config: &DescentConfig,
    values: &mut [f64],
    bounds: &[RangeInclusive<f64>],
    mut loss_f: impl FnMut(&[f64]) -> f64,
) -> DescentOutcome {
    config.validate().unwrap();
    assert_eq!(
        values.len(),
        bounds.len(),
        "{} starting values against {} bounds",
        values.len(),
        bounds.len()
    );
    for (dimension, bound) in bounds.iter().enumerate() {
        values[dimension] = clamp(values[dimension], bound);
    }

    let mut steps = vec![config.init_step; values.len()];
    let mut residual = loss_f(values);
    let mut evaluations = 1;
    let mut sweeps = 0;
    let mut converged = residual <= config.acceptable_residual;

    while !converged && sweeps < config.max_sweeps {
        sweeps += 1;
        let mut live_dimensions = 0;
        for dimension in 0..values.len() {
            let step = steps[dimension];
            if step < config.min_step {
                continue;
            }
            live_dimensions += 1;

            let bound = &bounds[dimension];
            let mut improved = false;
            'direction: for direction in [step, -step] {
                loop {
                    let current = values[dimension];
                    let candidate = clamp(current + direction, bound);
                    if candidate == current {
                        continue 'direction;
                    }
                    values[dimension] = candidate;
                    let candidate_residual = loss_f(values);
                    evaluations += 1;
                    if candidate_residual < residual {
                        residual = candidate_residual;
                        improved = true;
                    } else {
                        values[dimension] = current;
                        if improved {
                            break 'direction;
                        }
                        continue 'direction;
                    }
                }
            }
            if !improved {
                steps[dimension] = step * 0.5;
            }
        }

        if residual <= config.acceptable_residual || live_dimensions == 0 {
            converged = true;
        }
    }

    DescentOutcome {
        sweeps,
        evaluations,
        optimal_residual: residual,
        converged,
    }
}

#[inline]
fn clamp(value: f64, bound: &RangeInclusive<f64>) -> f64 {
    value.max(*bound.start()).min(*bound.end())
}

#[cfg(test)]
mod tests;
