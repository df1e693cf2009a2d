//! Jointly fitted Dixon-Coles scoreline model.
//!
//! Every team's attack and defense coefficient, the home-advantage multiplier and the
//! low-score dependence coefficient rho are estimated together by penalized maximum
//! likelihood over the full history, with older matches down-weighted by exponential
//! time decay.

use std::ops::RangeInclusive;
use std::sync::Arc;

use anyhow::bail;
use tracing::{debug, warn};

use crate::data::{decay_weights, Match};
use crate::model::{FitError, PredictionError, ScoreModel};
use crate::names::{self, Aliases, TeamLookup};
use crate::opt::{coordinate_descent, DescentConfig};
use crate::poisson::{self, LnFactorial};
use crate::scoregrid::{low_score_tau, ScoreGrid, DEFAULT_MAX_GOALS};

/// Lower bound on attack, defense and home-advantage coefficients; the likelihood is
/// undefined at zero.
const PARAM_FLOOR: f64 = 1e-4;

/// Additive floor applied to each per-match likelihood term before taking its log.
const LIKELIHOOD_FLOOR: f64 = 1e-9;

#[derive(Clone, Debug)]
pub struct Config {
    /// Exponential decay per day of match age.
    pub time_decay_alpha: f64,
    /// L2 penalty strength pulling the parameter vector toward neutral.
    pub regularization_lambda: f64,
    pub max_goals: u8,
    pub descent: DescentConfig,
}
impl Config {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.time_decay_alpha < 0.0 {
            bail!("time decay alpha cannot be negative")
        }
        if self.regularization_lambda < 0.0 {
            bail!("regularization lambda cannot be negative")
        }
        if self.max_goals == 0 {
            bail!("max goals must be at least 1")
        }
        self.descent.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_decay_alpha: 0.001,
            regularization_lambda: 0.01,
            max_goals: DEFAULT_MAX_GOALS,
            descent: DescentConfig {
                init_step: 0.1,
                min_step: 1e-5,
                max_sweeps: 5_000,
                acceptable_residual: f64::NEG_INFINITY,
            },
        }
    }
}

/// View over the fitted parameter set. The attack coefficients sum to the team count;
/// that pins the scale split between attack and defense, which the bilinear rate
/// formula otherwise leaves free.
#[derive(Debug)]
pub struct FittedParameters<'a> {
    pub teams: &'a TeamLookup,
    pub attack: &'a [f64],
    pub defense: &'a [f64],
    pub home_advantage: f64,
    pub rho: f64,
}

struct Params {
    teams: TeamLookup,
    attack: Vec<f64>,
    defense: Vec<f64>,
    home_advantage: f64,
    rho: f64,
}

pub struct DixonColesModel {
    config: Config,
    aliases: Arc<Aliases>,
    params: Option<Params>,
}
impl DixonColesModel {
    pub fn try_new(config: Config, aliases: Arc<Aliases>) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            aliases,
            params: None,
        })
    }

    pub fn fitted_parameters(&self) -> Option<FittedParameters<'_>> {
        self.params.as_ref().map(|params| FittedParameters {
            teams: &params.teams,
            attack: &params.attack,
            defense: &params.defense,
            home_advantage: params.home_advantage,
            rho: params.rho,
        })
    }

    fn rates(&self, home_team: &str, away_team: &str) -> Result<(f64, f64, f64), PredictionError> {
        let params = self.params.as_ref().ok_or(PredictionError::Unfitted)?;
        let home = names::resolve_index(home_team, &self.aliases, &params.teams)?;
        let away = names::resolve_index(away_team, &self.aliases, &params.teams)?;
        let home_rate = params.attack[home] * params.defense[away] * params.home_advantage;
        let away_rate = params.attack[away] * params.defense[home];
        Ok((home_rate, away_rate, params.rho))
    }
}

impl ScoreModel for DixonColesModel {
    fn fit(&mut self, matches: &[Match]) -> Result<(), FitError> {
        self.params = None;
        if matches.is_empty() {
            return Err(FitError::EmptyHistory);
        }

        let teams = TeamLookup::from_names(
            matches
                .iter()
                .flat_map(|record| [record.home_team.clone(), record.away_team.clone()]),
        );
        let team_count = teams.len();

        // per-match fixtures resolved to dense indices once, ahead of the many
        // objective evaluations
        let index_of = |name: &str| {
            teams
                .index_of(name)
                .unwrap_or_else(|| panic!("unindexed team {name}"))
        };
        let home_indices: Vec<usize> = matches
            .iter()
            .map(|record| index_of(&record.home_team))
            .collect();
        let away_indices: Vec<usize> = matches
            .iter()
            .map(|record| index_of(&record.away_team))
            .collect();
        let weights = decay_weights(matches, self.config.time_decay_alpha);
        let ln_factorial = LnFactorial::default();

        // layout: attack per team, defense per team, home advantage, rho
        let dimensions = 2 * team_count + 2;
        let mut values = vec![1.0; dimensions];
        values[dimensions - 1] = 0.0;
        let mut bounds: Vec<RangeInclusive<f64>> =
            vec![PARAM_FLOOR..=f64::MAX; dimensions - 1];
        bounds.push(f64::MIN..=f64::MAX);

        let regularization_lambda = self.config.regularization_lambda;
        let objective = |x: &[f64]| {
            let (attack, rest) = x.split_at(team_count);
            let (defense, tail) = rest.split_at(team_count);
            let (home_advantage, rho) = (tail[0], tail[1]);

            // project the attack block onto its identifiability constraint: the sum of
            // attack coefficients equals the team count
            let attack_scale = team_count as f64 / attack.iter().sum::<f64>();

            let mut log_likelihood = 0.0;
            for (index, record) in matches.iter().enumerate() {
                let home_rate = attack[home_indices[index]] * attack_scale
                    * defense[away_indices[index]]
                    * home_advantage;
                let away_rate =
                    attack[away_indices[index]] * attack_scale * defense[home_indices[index]];
                let tau = low_score_tau(
                    record.home_goals,
                    record.away_goals,
                    home_rate,
                    away_rate,
                    rho,
                );
                let prob = tau
                    * poisson::pmf(record.home_goals, home_rate, &ln_factorial)
                    * poisson::pmf(record.away_goals, away_rate, &ln_factorial);
                log_likelihood += weights[index] * (prob + LIKELIHOOD_FLOOR).ln();
            }

            let mut l2_penalty = 0.0;
            for coefficient in attack {
                l2_penalty += (coefficient * attack_scale).powi(2);
            }
            for coefficient in defense {
                l2_penalty += coefficient.powi(2);
            }
            l2_penalty += home_advantage.powi(2) + rho.powi(2);

            -log_likelihood + regularization_lambda * l2_penalty
        };

        let outcome = coordinate_descent(&self.config.descent, &mut values, &bounds, objective);
        if !outcome.converged {
            warn!(
                "discarding fit over {} matches: no convergence after {} sweeps",
                matches.len(),
                outcome.sweeps
            );
            return Err(FitError::Unconverged {
                sweeps: outcome.sweeps,
                residual: outcome.optimal_residual,
            });
        }

        let attack_scale = team_count as f64 / values[..team_count].iter().sum::<f64>();
        let attack: Vec<f64> = values[..team_count]
            .iter()
            .map(|coefficient| coefficient * attack_scale)
            .collect();
        let defense = values[team_count..2 * team_count].to_vec();
        let home_advantage = values[dimensions - 2];
        let rho = values[dimensions - 1];
        debug!(
            "fitted {team_count} teams over {} matches in {} sweeps ({} evaluations): \
             home advantage {home_advantage:.3}, rho {rho:.3}, residual {:.3}",
            matches.len(),
            outcome.sweeps,
            outcome.evaluations,
            outcome.optimal_residual
        );

        self.params = Some(Params {
            teams,
            attack,
            defense,
            home_advantage,
            rho,
        });
        Ok(())
    }

    fn scoregrid(&self, home_team: &str, away_team: &str) -> Result<ScoreGrid, PredictionError> {
        let (home_rate, away_rate, rho) = self.rates(home_team, away_team)?;
        Ok(ScoreGrid::from_correlated_poisson(
            home_rate,
            away_rate,
            rho,
            self.config.max_goals,
        ))
    }
}
