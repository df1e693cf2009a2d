//! Contract shared by the prediction model variants.

use std::sync::Arc;

use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::data::Match;
use crate::names::{Aliases, UnknownTeam};
use crate::scoregrid::{Score, ScoreGrid};

pub mod dixon_coles;
pub mod poisson;

#[derive(Debug, Error)]
pub enum FitError {
    #[error("no matches to fit on")]
    EmptyHistory,

    #[error("solver did not converge after {sweeps} sweeps (residual {residual})")]
    Unconverged { sweeps: u64, residual: f64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("{0}")]
    UnknownTeam(#[from] UnknownTeam),

    #[error("model has not been fitted")]
    Unfitted,
}

/// A scoreline prediction for one fixture. The team names are kept exactly as supplied
/// by the caller, so entries can be matched back against the fixture list they came
/// from.
#[derive(Debug)]
pub struct Prediction {
    pub home_team: String,
    pub away_team: String,
    pub outcome: Result<Score, PredictionError>,
}

/// A model that converts historical results into fitted team parameters and predicts
/// scorelines for future fixtures.
///
/// `fit` recomputes all fitted state from scratch; prior state is discarded, and a
/// failed fit leaves the model unfitted. Prediction is a pure read against the fitted
/// state.
pub trait ScoreModel {
    fn fit(&mut self, matches: &[Match]) -> Result<(), FitError>;

    /// Full scoreline distribution for a single fixture.
    fn scoregrid(&self, home_team: &str, away_team: &str) -> Result<ScoreGrid, PredictionError>;

    /// Most probable scoreline for a single fixture.
    fn predict(&self, home_team: &str, away_team: &str) -> Result<Score, PredictionError> {
        Ok(self.scoregrid(home_team, away_team)?.most_likely())
    }

    /// Predicts a batch of fixtures, one entry per fixture in input order. A fixture
    /// that cannot be resolved yields an error-tagged entry without aborting the rest.
    fn predict_matches(&self, fixtures: &[(String, String)]) -> Vec<Prediction> {
        fixtures
            .iter()
            .map(|(home_team, away_team)| Prediction {
                home_team: home_team.clone(),
                away_team: away_team.clone(),
                outcome: self.predict(home_team, away_team),
            })
            .collect()
    }
}

impl<M: ScoreModel + ?Sized> ScoreModel for Box<M> {
    fn fit(&mut self, matches: &[Match]) -> Result<(), FitError> {
        (**self).fit(matches)
    }

    fn scoregrid(&self, home_team: &str, away_team: &str) -> Result<ScoreGrid, PredictionError> {
        (**self).scoregrid(home_team, away_team)
    }
}

#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum ModelKind {
    Poisson,
    DixonColes,
}
impl ModelKind {
    /// A model of this kind with default configuration, sharing the given alias table.
    pub fn create(&self, aliases: &Arc<Aliases>) -> anyhow::Result<Box<dyn ScoreModel>> {
        Ok(match self {
            ModelKind::Poisson => Box::new(poisson::PoissonModel::try_new(
                poisson::Config::default(),
                Arc::clone(aliases),
            )?),
            ModelKind::DixonColes => Box::new(dixon_coles::DixonColesModel::try_new(
                dixon_coles::Config::default(),
                Arc::clone(aliases),
            )?),
        })
    }
}
