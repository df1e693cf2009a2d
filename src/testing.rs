//! Synthetic fixtures for model tests.

use chrono::{Duration, NaiveDate};

use crate::data::Match;

pub(crate) fn result(
    date: NaiveDate,
    home_team: &str,
    away_team: &str,
    home_goals: u8,
    away_goals: u8,
) -> Match {
    Match {
        date,
        home_team: home_team.to_owned(),
        away_team: away_team.to_owned(),
        home_goals,
        away_goals,
    }
}

pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Three-team league with a strict pecking order: Aachen always wins, 2:0 at home and
/// 1:0 away; Bochum always loses; Cottbus takes points off Bochum only. Six double
/// round robins played weekly.
pub(crate) fn one_sided_league() -> Vec<Match> {
    let kickoff = day(2024, 8, 3);
    let mut matches = vec![];
    for cycle in 0..6 {
        let round = |offset: i64| kickoff + Duration::weeks(cycle * 6 + offset);
        matches.push(result(round(0), "Aachen", "Bochum", 2, 0));
        matches.push(result(round(1), "Aachen", "Cottbus", 2, 0));
        matches.push(result(round(2), "Cottbus", "Bochum", 2, 1));
        matches.push(result(round(3), "Bochum", "Aachen", 0, 1));
        matches.push(result(round(4), "Cottbus", "Aachen", 0, 1));
        matches.push(result(round(5), "Bochum", "Cottbus", 0, 1));
    }
    matches
}
