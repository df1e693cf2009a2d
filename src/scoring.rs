//! Points awarded for a tipped scoreline under four-tier rules.

use std::cmp::Ordering;

use crate::scoregrid::Score;

/// Points for a tip against the actual result: 4 for the exact score, 3 for the right
/// goal difference, 2 for the right outcome, otherwise 0.
pub fn points(predicted: &Score, actual: &Score) -> u8 {
    if predicted == actual {
        return 4;
    }
    if predicted.difference() == actual.difference() {
        return 3;
    }
    if outcome(predicted) == outcome(actual) {
        return 2;
    }
    0
}

fn outcome(score: &Score) -> Ordering {
    score.home.cmp(&score.away)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(home: u8, away: u8) -> Score {
        Score::new(home, away)
    }

    #[test]
    fn exact_score() {
        assert_eq!(4, points(&score(2, 1), &score(2, 1)));
        assert_eq!(4, points(&score(0, 0), &score(0, 0)));
    }

    #[test]
    fn correct_difference() {
        assert_eq!(3, points(&score(3, 1), &score(2, 0)));
        assert_eq!(3, points(&score(0, 2), &score(1, 3)));
        // a non-exact draw shares the zero difference
        assert_eq!(3, points(&score(1, 1), &score(2, 2)));
    }

    #[test]
    fn correct_outcome() {
        assert_eq!(2, points(&score(1, 0), &score(2, 0)));
        assert_eq!(2, points(&score(0, 1), &score(1, 4)));
    }

    #[test]
    fn incorrect() {
        assert_eq!(0, points(&score(0, 0), &score(1, 2)));
        assert_eq!(0, points(&score(2, 0), &score(0, 2)));
        assert_eq!(0, points(&score(1, 1), &score(2, 1)));
    }
}
