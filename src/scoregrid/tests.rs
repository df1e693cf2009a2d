use super::*;
use assert_float_eq::*;

fn populate(rows: &[[f64; 4]; 4]) -> ScoreGrid {
    let mut scoregrid = ScoreGrid::allocate(3);
    for (home_goals, row) in rows.iter().enumerate() {
        for (away_goals, &prob) in row.iter().enumerate() {
            scoregrid[(home_goals, away_goals)] = prob;
        }
    }
    scoregrid
}

fn sample_scoregrid() -> ScoreGrid {
    populate(&[
        [0.05, 0.04, 0.02, 0.01],
        [0.10, 0.12, 0.05, 0.02],
        [0.12, 0.10, 0.06, 0.03],
        [0.10, 0.08, 0.06, 0.04],
    ])
}

#[test]
fn univariate_mass_factorises() {
    let (home_rate, away_rate) = (1.8, 1.3);
    let scoregrid = ScoreGrid::from_univariate_poisson(home_rate, away_rate, DEFAULT_MAX_GOALS);

    let ln_factorial = LnFactorial::default();
    let home_marginal: f64 = (0..=DEFAULT_MAX_GOALS)
        .map(|k| poisson::pmf(k, home_rate, &ln_factorial))
        .sum();
    let away_marginal: f64 = (0..=DEFAULT_MAX_GOALS)
        .map(|k| poisson::pmf(k, away_rate, &ln_factorial))
        .sum();

    assert_float_relative_eq!(home_marginal * away_marginal, scoregrid.total_mass());
    assert!(scoregrid.total_mass() > 0.9999);
    assert!(scoregrid.total_mass() <= 1.0);
}

#[test]
fn most_likely_is_modal_cell() {
    let scoregrid = sample_scoregrid();
    assert_eq!(Score::new(1, 1), scoregrid.most_likely());
}

#[test]
fn most_likely_tie_break_prefers_fewest_goals() {
    let mut scoregrid = ScoreGrid::allocate(2);
    scoregrid[(0, 0)] = 0.3;
    scoregrid[(1, 1)] = 0.3;
    scoregrid[(2, 1)] = 0.2;
    assert_eq!(Score::new(0, 0), scoregrid.most_likely());
}

#[test]
fn correlated_with_zero_rho_is_univariate() {
    let independent = ScoreGrid::from_univariate_poisson(1.6, 1.1, 6);
    let correlated = ScoreGrid::from_correlated_poisson(1.6, 1.1, 0.0, 6);
    for home_goals in 0..=6usize {
        for away_goals in 0..=6usize {
            assert_float_relative_eq!(
                independent[(home_goals, away_goals)],
                correlated[(home_goals, away_goals)]
            );
        }
    }
}

#[test]
fn negative_rho_inflates_the_draws_diagonal_corners() {
    let (home_rate, away_rate, rho) = (1.6, 1.1, -0.08);
    let independent = ScoreGrid::from_univariate_poisson(home_rate, away_rate, 6);
    let correlated = ScoreGrid::from_correlated_poisson(home_rate, away_rate, rho, 6);

    assert!(correlated[(0, 0)] > independent[(0, 0)]);
    assert!(correlated[(1, 1)] > independent[(1, 1)]);
    assert!(correlated[(1, 0)] < independent[(1, 0)]);
    assert!(correlated[(0, 1)] < independent[(0, 1)]);
    assert_float_relative_eq!(independent[(2, 2)], correlated[(2, 2)]);
}

#[test]
fn tau_low_score_cells() {
    let (home_rate, away_rate, rho) = (2.0, 1.5, 0.1);
    assert_float_relative_eq!(
        1.0 - home_rate * away_rate * rho,
        low_score_tau(0, 0, home_rate, away_rate, rho)
    );
    assert_float_relative_eq!(
        1.0 + away_rate * rho,
        low_score_tau(1, 0, home_rate, away_rate, rho)
    );
    assert_float_relative_eq!(
        1.0 + home_rate * rho,
        low_score_tau(0, 1, home_rate, away_rate, rho)
    );
    assert_float_relative_eq!(1.0 - rho, low_score_tau(1, 1, home_rate, away_rate, rho));
    assert_eq!(1.0, low_score_tau(2, 1, home_rate, away_rate, rho));
    assert_eq!(1.0, low_score_tau(4, 4, home_rate, away_rate, rho));
}

#[test]
fn tau_is_floored() {
    // a rho large enough to drive the 0:0 adjustment negative
    assert_eq!(1e-9, low_score_tau(0, 0, 3.0, 3.0, 0.5));
}

#[test]
fn gather_win() {
    let scoregrid = sample_scoregrid();
    assert_float_relative_eq!(0.56, Outcome::Win(Side::Home).gather(&scoregrid));
    assert_float_relative_eq!(0.17, Outcome::Win(Side::Away).gather(&scoregrid));
}

#[test]
fn gather_draw() {
    let scoregrid = sample_scoregrid();
    assert_float_relative_eq!(0.27, Outcome::Draw.gather(&scoregrid));
}

#[test]
fn gather_goals_over_under() {
    let scoregrid = sample_scoregrid();
    assert_float_relative_eq!(0.45, Outcome::GoalsUnder(3).gather(&scoregrid));
    assert_float_relative_eq!(0.55, Outcome::GoalsOver(2).gather(&scoregrid));
}

#[test]
fn gather_exact() {
    let scoregrid = sample_scoregrid();
    assert_float_relative_eq!(0.05, Outcome::Exact(Score::new(0, 0)).gather(&scoregrid));
    assert_float_relative_eq!(0.06, Outcome::Exact(Score::new(3, 2)).gather(&scoregrid));
    assert_eq!(0.0, Outcome::Exact(Score::new(9, 9)).gather(&scoregrid));
}

#[test]
fn expectations_track_rates() {
    let scoregrid = ScoreGrid::from_univariate_poisson(1.8, 1.3, DEFAULT_MAX_GOALS);
    let (home_expectation, away_expectation) = scoregrid.home_away_expectations();
    assert_float_absolute_eq!(1.8, home_expectation, 1e-3);
    assert_float_absolute_eq!(1.3, away_expectation, 1e-3);
}

#[test]
fn score_difference_and_display() {
    assert_eq!(2, Score::new(3, 1).difference());
    assert_eq!(-1, Score::new(0, 1).difference());
    assert_eq!("2:1", Score::new(2, 1).to_string());
}
