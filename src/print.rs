//! Console tables.

use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::backtest::Summary;
use crate::model::{Prediction, ScoreModel};
use crate::model::poisson::Strengths;
use crate::names::TeamLookup;
use crate::scoregrid::{Outcome, Side};

pub fn tabulate_predictions(model: &dyn ScoreModel, predictions: &[Prediction]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Home".into(),
                "Away".into(),
                "Tip".into(),
                "P(home)".into(),
                "P(draw)".into(),
                "P(away)".into(),
                "".into(),
            ],
        ));
    for prediction in predictions {
        let row = match &prediction.outcome {
            Ok(score) => {
                let note = String::new();
                match model.scoregrid(&prediction.home_team, &prediction.away_team) {
                    Ok(scoregrid) => vec![
                        prediction.home_team.clone().into(),
                        prediction.away_team.clone().into(),
                        score.to_string().into(),
                        format!("{:.3}", Outcome::Win(Side::Home).gather(&scoregrid)).into(),
                        format!("{:.3}", Outcome::Draw.gather(&scoregrid)).into(),
                        format!("{:.3}", Outcome::Win(Side::Away).gather(&scoregrid)).into(),
                        note.into(),
                    ],
                    Err(error) => vec![
                        prediction.home_team.clone().into(),
                        prediction.away_team.clone().into(),
                        score.to_string().into(),
                        "".into(),
                        "".into(),
                        "".into(),
                        error.to_string().into(),
                    ],
                }
            }
            Err(error) => vec![
                prediction.home_team.clone().into(),
                prediction.away_team.clone().into(),
                "-".into(),
                "".into(),
                "".into(),
                "".into(),
                error.to_string().into(),
            ],
        };
        table.push_row(Row::new(Styles::default(), row));
    }
    table
}

pub fn tabulate_strengths(teams: &TeamLookup, strengths: &[Strengths]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Team".into(),
                "Atk (H)".into(),
                "Atk (A)".into(),
                "Def (H)".into(),
                "Def (A)".into(),
            ],
        ));
    for (index, team) in teams.names().iter().enumerate() {
        let team_strengths = &strengths[index];
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.clone().into(),
                format!("{:.3}", team_strengths.attack_home).into(),
                format!("{:.3}", team_strengths.attack_away).into(),
                format!("{:.3}", team_strengths.defense_home).into(),
                format!("{:.3}", team_strengths.defense_away).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_backtest(summary: &Summary) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Measure".into(), "Value".into()],
        ));
    table.push_row(Row::new(
        Styles::default(),
        vec!["Matches tipped".into(), summary.tipped.len().to_string().into()],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec!["Skipped".into(), summary.skipped.to_string().into()],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec!["Fit failures".into(), summary.fit_failures.to_string().into()],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec!["Total points".into(), summary.total_points().to_string().into()],
    ));
    table.push_row(Row::new(
        Styles::default(),
        vec![
            "Points per match".into(),
            format!("{:.2}", summary.mean_points()).into(),
        ],
    ));
    let distribution = summary.points_distribution();
    for points in [4usize, 3, 2, 0] {
        let share = if summary.tipped.is_empty() {
            0.0
        } else {
            distribution[points] as f64 / summary.tipped.len() as f64
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{points} pointers").into(),
                format!("{} ({:.1}%)", distribution[points], share * 100.0).into(),
            ],
        ));
    }
    table
}
