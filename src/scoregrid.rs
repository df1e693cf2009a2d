//! Joint scoreline probabilities over a bounded grid of goal counts.

use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::poisson::{self, LnFactorial};

pub const DEFAULT_MAX_GOALS: u8 = 12;

const TAU_FLOOR: f64 = 1e-9;

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    /// Goal difference from the home side's perspective.
    pub fn difference(&self) -> i16 {
        self.home as i16 - self.away as i16
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Square matrix of scoreline probabilities; cell `(h, a)` holds the probability of the
/// home side scoring `h` goals and the away side scoring `a`.
pub struct ScoreGrid {
    cells: Vec<f64>,
    dim: usize,
}
impl ScoreGrid {
    pub fn allocate(max_goals: u8) -> Self {
        let dim = max_goals as usize + 1;
        Self {
            cells: vec![0.0; dim * dim],
            dim,
        }
    }

    pub fn max_goals(&self) -> u8 {
        (self.dim - 1) as u8
    }

    /// Fills the grid from two independent Poisson distributions.
    pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, max_goals: u8) -> Self {
        let ln_factorial = LnFactorial::default();
        let mut scoregrid = Self::allocate(max_goals);
        for home_goals in 0..scoregrid.dim {
            let home_prob = poisson::pmf(home_goals as u8, home_rate, &ln_factorial);
            for away_goals in 0..scoregrid.dim {
                let away_prob = poisson::pmf(away_goals as u8, away_rate, &ln_factorial);
                scoregrid[(home_goals, away_goals)] = home_prob * away_prob;
            }
        }
        scoregrid
    }

    /// Fills the grid from a pair of Poisson distributions with the Dixon-Coles
    /// low-score adjustment applied cell-wise.
    pub fn from_correlated_poisson(
        home_rate: f64,
        away_rate: f64,
        rho: f64,
        max_goals: u8,
    ) -> Self {
        let ln_factorial = LnFactorial::default();
        let mut scoregrid = Self::allocate(max_goals);
        for home_goals in 0..scoregrid.dim {
            let home_prob = poisson::pmf(home_goals as u8, home_rate, &ln_factorial);
            for away_goals in 0..scoregrid.dim {
                let away_prob = poisson::pmf(away_goals as u8, away_rate, &ln_factorial);
                let tau = low_score_tau(
                    home_goals as u8,
                    away_goals as u8,
                    home_rate,
                    away_rate,
                    rho,
                );
                scoregrid[(home_goals, away_goals)] = tau * home_prob * away_prob;
            }
        }
        scoregrid
    }

    /// Highest-probability scoreline. Cells are scanned row-major with a strict
    /// comparison, so the lowest-goal pair among equal maxima wins.
    pub fn most_likely(&self) -> Score {
        let mut best = Score::new(0, 0);
        let mut best_prob = 0.0;
        for home_goals in 0..self.dim {
            for away_goals in 0..self.dim {
                let prob = self[(home_goals, away_goals)];
                if prob > best_prob {
                    best_prob = prob;
                    best = Score::new(home_goals as u8, away_goals as u8);
                }
            }
        }
        best
    }

    pub fn home_away_expectations(&self) -> (f64, f64) {
        let (mut home_expectation, mut away_expectation) = (0.0, 0.0);
        for home_goals in 0..self.dim {
            for away_goals in 0..self.dim {
                let prob = self[(home_goals, away_goals)];
                home_expectation += home_goals as f64 * prob;
                away_expectation += away_goals as f64 * prob;
            }
        }
        (home_expectation, away_expectation)
    }

    /// Probability mass captured by the grid; short of 1 by whatever mass lies beyond
    /// `max_goals`.
    pub fn total_mass(&self) -> f64 {
        self.cells.iter().sum()
    }
}

impl Index<(usize, usize)> for ScoreGrid {
    type Output = f64;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (home_goals, away_goals) = index;
        &self.cells[home_goals * self.dim + away_goals]
    }
}

impl IndexMut<(usize, usize)> for ScoreGrid {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let (home_goals, away_goals) = index;
        &mut self.cells[home_goals * self.dim + away_goals]
    }
}

/// The Dixon-Coles correction τ(i, j, λ, μ, ρ), perturbing the four low-score cells.
/// Floored at a small positive value to keep likelihood terms positive in the face of
/// numerical noise.
#[inline]
pub fn low_score_tau(
    home_goals: u8,
    away_goals: u8,
    home_rate: f64,
    away_rate: f64,
    rho: f64,
) -> f64 {
    let tau = match (home_goals, away_goals) {
        (0, 0) => 1.0 - home_rate * away_rate * rho,
        (1, 0) => 1.0 + away_rate * rho,
        (0, 1) => 1.0 + home_rate * rho,
        (1, 1) => 1.0 - rho,
        _ => 1.0,
    };
    f64::max(TAU_FLOOR, tau)
}

/// A market outcome whose probability can be gathered from a scoregrid.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
    GoalsOver(u8),
    GoalsUnder(u8),
    Exact(Score),
}
impl Outcome {
    pub fn gather(&self, scoregrid: &ScoreGrid) -> f64 {
        match self {
            Outcome::Win(side) => Self::gather_win(side, scoregrid),
            Outcome::Draw => Self::gather_draw(scoregrid),
            Outcome::GoalsOver(goals) => Self::gather_goals_over(*goals, scoregrid),
            Outcome::GoalsUnder(goals) => Self::gather_goals_under(*goals, scoregrid),
            Outcome::Exact(score) => Self::gather_exact(score, scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &ScoreGrid) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.dim {
                    for col in 0..row {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.dim {
                    for row in 0..col {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &ScoreGrid) -> f64 {
        let mut prob = 0.0;
        for index in 0..scoregrid.dim {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_goals_over(goals: u8, scoregrid: &ScoreGrid) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.dim {
            for col in 0..scoregrid.dim {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u8, scoregrid: &ScoreGrid) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.dim {
            for col in 0..scoregrid.dim {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_exact(score: &Score, scoregrid: &ScoreGrid) -> f64 {
        if (score.home as usize) < scoregrid.dim && (score.away as usize) < scoregrid.dim {
            scoregrid[(score.home as usize, score.away as usize)]
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests;
