//! Chronological replay of a prediction strategy over played seasons.

use chrono::NaiveDate;
use tracing::debug;

use crate::data::Match;
use crate::model::ScoreModel;
use crate::scoregrid::Score;
use crate::scoring;

pub const DEFAULT_MIN_TRAIN_SIZE: usize = 45;

#[derive(Clone, Debug)]
pub struct TippedMatch {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub predicted: Score,
    pub actual: Score,
    pub points: u8,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub tipped: Vec<TippedMatch>,
    /// Fixtures whose teams could not be resolved against the training window, such as
    /// a promoted side's first appearance.
    pub skipped: usize,
    pub fit_failures: usize,
}
impl Summary {
    pub fn total_points(&self) -> u32 {
        self.tipped.iter().map(|tip| tip.points as u32).sum()
    }

    pub fn mean_points(&self) -> f64 {
        if self.tipped.is_empty() {
            0.0
        } else {
            self.total_points() as f64 / self.tipped.len() as f64
        }
    }

    /// Count of tips per points value, indexed 0 to 4.
    pub fn points_distribution(&self) -> [usize; 5] {
        let mut distribution = [0; 5];
        for tip in &self.tipped {
            distribution[tip.points as usize] += 1;
        }
        distribution
    }
}

/// Expanding-window replay: every match from `min_train_size` onwards is predicted by a
/// model fitted afresh on everything played before it, then scored against the actual
/// result.
pub fn run<M: ScoreModel>(
    matches: &[Match],
    min_train_size: usize,
    mut model_factory: impl FnMut() -> M,
) -> Summary {
    let mut matches = matches.to_vec();
    matches.sort_by(|a, b| a.date.cmp(&b.date));

    let mut summary = Summary::default();
    for index in min_train_size..matches.len() {
        let mut model = model_factory();
        if let Err(error) = model.fit(&matches[..index]) {
            debug!("skipping match {index}: {error}");
            summary.fit_failures += 1;
            continue;
        }
        let subject = &matches[index];
        match model.predict(&subject.home_team, &subject.away_team) {
            Ok(predicted) => {
                let actual = Score::new(subject.home_goals, subject.away_goals);
                let points = scoring::points(&predicted, &actual);
                summary.tipped.push(TippedMatch {
                    date: subject.date,
                    home_team: subject.home_team.clone(),
                    away_team: subject.away_team.clone(),
                    predicted,
                    actual,
                    points,
                });
            }
            Err(error) => {
                debug!(
                    "no tip for {} vs {}: {error}",
                    subject.home_team, subject.away_team
                );
                summary.skipped += 1;
            }
        }
    }
    summary
}
