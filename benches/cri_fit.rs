use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};

use scorecast::data::Match;
use scorecast::model::dixon_coles::{Config, DixonColesModel};
use scorecast::model::ScoreModel;
use scorecast::names::Aliases;

fn synthetic_season() -> Vec<Match> {
    let teams = [
        "Aachen", "Bochum", "Cottbus", "Dessau", "Erfurt", "Fulda", "Gera", "Halle",
    ];
    let kickoff = NaiveDate::from_ymd_opt(2024, 8, 3).unwrap();
    let mut matches = vec![];
    let mut week = 0;
    for (home_index, home_team) in teams.iter().enumerate() {
        for (away_index, away_team) in teams.iter().enumerate() {
            if home_index == away_index {
                continue;
            }
            // stronger teams sit earlier in the list
            let home_goals = ((3 + away_index as i32 - home_index as i32).max(0) / 2) as u8;
            let away_goals = ((2 + home_index as i32 - away_index as i32).max(0) / 3) as u8;
            matches.push(Match {
                date: kickoff + Duration::weeks(week),
                home_team: home_team.to_string(),
                away_team: away_team.to_string(),
                home_goals,
                away_goals,
            });
            week += 1;
        }
    }
    matches
}

fn criterion_benchmark(c: &mut Criterion) {
    let matches = synthetic_season();

    // sanity check
    {
        let mut model =
            DixonColesModel::try_new(Config::default(), Arc::new(Aliases::default())).unwrap();
        model.fit(&matches).unwrap();
        assert!(model.predict("Aachen", "Halle").is_ok());
    }

    c.bench_function("cri_fit_dixon_coles_8_teams", |b| {
        b.iter(|| {
            let mut model =
                DixonColesModel::try_new(Config::default(), Arc::new(Aliases::default())).unwrap();
            model.fit(&matches).unwrap();
        });
    });
}
criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
