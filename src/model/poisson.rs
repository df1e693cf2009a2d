//! Attack and defense strength ratings derived by shrinkage of venue-specific scoring
//! rates, predicting through a pair of independent Poisson distributions.

use std::sync::Arc;

use anyhow::bail;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::data::{decay_weights, Match};
use crate::model::{FitError, PredictionError, ScoreModel};
use crate::names::{self, Aliases, TeamLookup};
use crate::scoregrid::{ScoreGrid, DEFAULT_MAX_GOALS};

const RATE_FLOOR: f64 = 1e-6;

#[derive(Clone, Debug)]
pub struct Config {
    /// Pseudo-game count pulling each venue-specific rate toward the team's overall
    /// rate. Higher values shrink harder; around 1 to 1.5 works well for a single
    /// season of history.
    pub shrinkage_k: f64,
    /// Exponential decay per day of match age; `None` weights all matches equally.
    pub time_decay_alpha: Option<f64>,
    pub max_goals: u8,
}
impl Config {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.shrinkage_k <= 0.0 {
            bail!("shrinkage constant must be positive")
        }
        if let Some(alpha) = self.time_decay_alpha {
            if alpha < 0.0 {
                bail!("time decay alpha cannot be negative")
            }
        }
        if self.max_goals == 0 {
            bail!("max goals must be at least 1")
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shrinkage_k: 1.5,
            time_decay_alpha: None,
            max_goals: DEFAULT_MAX_GOALS,
        }
    }
}

/// League-relative ratings for one team; 1.0 is league average. Attack above 1 scores
/// more than the average side, defense above 1 concedes less.
#[derive(Clone, Debug, PartialEq)]
pub struct Strengths {
    pub attack_home: f64,
    pub attack_away: f64,
    pub defense_home: f64,
    pub defense_away: f64,
}

#[derive(Default)]
struct Totals {
    home_games: f64,
    home_goals_for: f64,
    home_goals_against: f64,
    away_games: f64,
    away_goals_for: f64,
    away_goals_against: f64,
}

struct Fitted {
    teams: TeamLookup,
    strengths: Vec<Strengths>,
    avg_home_goals: f64,
    avg_away_goals: f64,
}

pub struct PoissonModel {
    config: Config,
    aliases: Arc<Aliases>,
    fitted: Option<Fitted>,
}
impl PoissonModel {
    pub fn try_new(config: Config, aliases: Arc<Aliases>) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            aliases,
            fitted: None,
        })
    }

    pub fn strength_table(&self) -> Option<(&TeamLookup, &[Strengths])> {
        self.fitted
            .as_ref()
            .map(|fitted| (&fitted.teams, fitted.strengths.as_slice()))
    }

    fn rates(&self, home_team: &str, away_team: &str) -> Result<(f64, f64), PredictionError> {
        let fitted = self.fitted.as_ref().ok_or(PredictionError::Unfitted)?;
        let home = names::resolve_index(home_team, &self.aliases, &fitted.teams)?;
        let away = names::resolve_index(away_team, &self.aliases, &fitted.teams)?;
        let home_strengths = &fitted.strengths[home];
        let away_strengths = &fitted.strengths[away];
        let home_rate =
            home_strengths.attack_home * (1.0 / away_strengths.defense_away) * fitted.avg_home_goals;
        let away_rate =
            away_strengths.attack_away * (1.0 / home_strengths.defense_home) * fitted.avg_away_goals;
        Ok((home_rate, away_rate))
    }
}

impl ScoreModel for PoissonModel {
    fn fit(&mut self, matches: &[Match]) -> Result<(), FitError> {
        self.fitted = None;
        if matches.is_empty() {
            return Err(FitError::EmptyHistory);
        }

        let weights = match self.config.time_decay_alpha {
            Some(alpha) => decay_weights(matches, alpha),
            None => vec![1.0; matches.len()],
        };

        let mut totals: FxHashMap<&str, Totals> = FxHashMap::default();
        let (mut weight_sum, mut home_goal_sum, mut away_goal_sum) = (0.0, 0.0, 0.0);
        for (record, &weight) in matches.iter().zip(&weights) {
            weight_sum += weight;
            home_goal_sum += weight * record.home_goals as f64;
            away_goal_sum += weight * record.away_goals as f64;

            let home = totals.entry(record.home_team.as_str()).or_default();
            home.home_games += weight;
            home.home_goals_for += weight * record.home_goals as f64;
            home.home_goals_against += weight * record.away_goals as f64;

            let away = totals.entry(record.away_team.as_str()).or_default();
            away.away_games += weight;
            away.away_goals_for += weight * record.away_goals as f64;
            away.away_goals_against += weight * record.home_goals as f64;
        }

        let avg_home_goals = home_goal_sum / weight_sum;
        let avg_away_goals = away_goal_sum / weight_sum;
        let teams = TeamLookup::from_names(totals.keys().map(|name| name.to_string()));

        let k = self.config.shrinkage_k;
        let strengths = teams
            .names()
            .iter()
            .map(|name| {
                let team = &totals[name.as_str()];
                let games = team.home_games + team.away_games;
                let overall_scored = (team.home_goals_for + team.away_goals_for) / games;
                let overall_conceded =
                    (team.home_goals_against + team.away_goals_against) / games;

                // the venue term of the blend is the venue goal total, so a team yet to
                // play at a venue degrades to its overall rate
                let attack_home = (team.home_goals_for + k * overall_scored) / (team.home_games + k);
                let attack_away = (team.away_goals_for + k * overall_scored) / (team.away_games + k);
                let defense_home =
                    (team.home_goals_against + k * overall_conceded) / (team.home_games + k);
                let defense_away =
                    (team.away_goals_against + k * overall_conceded) / (team.away_games + k);

                Strengths {
                    attack_home: attack_home / avg_home_goals,
                    attack_away: attack_away / avg_away_goals,
                    defense_home: avg_away_goals / f64::max(RATE_FLOOR, defense_home),
                    defense_away: avg_home_goals / f64::max(RATE_FLOOR, defense_away),
                }
            })
            .collect();

        debug!(
            "fitted strengths for {} teams (league averages {avg_home_goals:.3}/{avg_away_goals:.3})",
            teams.len()
        );
        self.fitted = Some(Fitted {
            teams,
            strengths,
            avg_home_goals,
            avg_away_goals,
        });
        Ok(())
    }

    fn scoregrid(&self, home_team: &str, away_team: &str) -> Result<ScoreGrid, PredictionError> {
        let (home_rate, away_rate) = self.rates(home_team, away_team)?;
        Ok(ScoreGrid::from_univariate_poisson(
            home_rate,
            away_rate,
            self.config.max_goals,
        ))
    }
}
