//! Historical match records and their ingestion from results files.

use std::path::Path;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use tracing::debug;

use crate::csv::{CsvReader, Header};

/// One completed fixture, an immutable historical fact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u8,
    pub away_goals: u8,
}

const DATE_FORMATS: [&str; 2] = ["%d/%m/%y", "%d/%m/%Y"];

fn parse_date(field: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(field, format).ok())
}

/// Reads one football-data.co.uk results file. Only the `Date`, `HomeTeam`, `AwayTeam`,
/// `FTHG` and `FTAG` columns are consumed; rows whose date or goal counts do not parse
/// are dropped.
pub fn read_matches_from_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<Match>> {
    let path = path.as_ref();
    let mut reader =
        CsvReader::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let header = Header::new(
        &reader
            .read()
            .ok_or_else(|| anyhow!("{} is empty", path.display()))??,
    );
    let date_col = header.column("Date")?;
    let home_col = header.column("HomeTeam")?;
    let away_col = header.column("AwayTeam")?;
    let home_goals_col = header.column("FTHG")?;
    let away_goals_col = header.column("FTAG")?;
    let last_col = [date_col, home_col, away_col, home_goals_col, away_goals_col]
        .into_iter()
        .max()
        .unwrap();

    let mut matches = vec![];
    for record in reader {
        let record = record?;
        if record.len() <= last_col || record.iter().all(String::is_empty) {
            continue;
        }
        let Some(date) = parse_date(&record[date_col]) else {
            debug!("dropping record with unparseable date {:?}", record[date_col]);
            continue;
        };
        let (Ok(home_goals), Ok(away_goals)) = (
            record[home_goals_col].parse::<u8>(),
            record[away_goals_col].parse::<u8>(),
        ) else {
            debug!(
                "dropping {} vs {} on {date}: no full-time score",
                record[home_col], record[away_col]
            );
            continue;
        };
        matches.push(Match {
            date,
            home_team: record[home_col].clone(),
            away_team: record[away_col].clone(),
            home_goals,
            away_goals,
        });
    }
    Ok(matches)
}

/// Concatenates several season files and orders the result chronologically.
pub fn read_matches_from_files(
    paths: impl IntoIterator<Item = impl AsRef<Path>>,
) -> anyhow::Result<Vec<Match>> {
    let mut matches = vec![];
    for path in paths {
        matches.extend(read_matches_from_file(path)?);
    }
    matches.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(matches)
}

/// Reads an upcoming fixture list: one `home,away` pair per record, with an optional
/// `HomeTeam,AwayTeam` header.
pub fn read_fixtures_from_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<(String, String)>> {
    let path = path.as_ref();
    let reader =
        CsvReader::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut fixtures = vec![];
    for record in reader {
        let record = record?;
        if record.iter().all(String::is_empty) {
            continue;
        }
        if record.len() < 2 {
            return Err(anyhow!("malformed fixture record {record:?}"));
        }
        if record[0] == "HomeTeam" {
            continue;
        }
        fixtures.push((record[0].clone(), record[1].clone()));
    }
    Ok(fixtures)
}

/// Per-match exponential decay weights `exp(-alpha * age_in_days)`, with age measured
/// from the most recent match in the set. The newest match carries weight 1.
pub fn decay_weights(matches: &[Match], alpha: f64) -> Vec<f64> {
    let Some(newest) = matches.iter().map(|record| record.date).max() else {
        return vec![];
    };
    matches
        .iter()
        .map(|record| {
            let age_in_days = (newest - record.date).num_days() as f64;
            f64::exp(-alpha * age_in_days)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn read_results_file() {
        let path = write_temp(
            "scorecast_data_read_results.csv",
            "Div,Date,Time,HomeTeam,AwayTeam,FTHG,FTAG,FTR\r\n\
             D1,23/08/25,15:30,Dortmund,Mainz,2,0,H\r\n\
             D1,24/08/2025,17:30,St Pauli,Heidenheim,1,1,D\r\n\
             D1,,15:30,Freiburg,Augsburg,,\r\n\
             ,,,,,,,\r\n",
        );
        let matches = read_matches_from_file(&path).unwrap();
        assert_eq!(2, matches.len());
        assert_eq!(
            Match {
                date: NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(),
                home_team: "Dortmund".to_owned(),
                away_team: "Mainz".to_owned(),
                home_goals: 2,
                away_goals: 0,
            },
            matches[0]
        );
        assert_eq!("St Pauli", matches[1].home_team);
        assert_eq!(NaiveDate::from_ymd_opt(2025, 8, 24).unwrap(), matches[1].date);
    }

    #[test]
    fn read_results_missing_column() {
        let path = write_temp(
            "scorecast_data_missing_column.csv",
            "Date,HomeTeam,AwayTeam,FTHG\n01/08/25,A,B,1\n",
        );
        let error = read_matches_from_file(&path).unwrap_err();
        assert_eq!("missing column FTAG", error.to_string());
    }

    #[test]
    fn concatenated_files_are_sorted() {
        let newer = write_temp(
            "scorecast_data_newer.csv",
            "Date,HomeTeam,AwayTeam,FTHG,FTAG\n09/08/25,C,D,0,3\n",
        );
        let older = write_temp(
            "scorecast_data_older.csv",
            "Date,HomeTeam,AwayTeam,FTHG,FTAG\n02/08/25,A,B,1,1\n",
        );
        let matches = read_matches_from_files([&newer, &older]).unwrap();
        assert_eq!(2, matches.len());
        assert_eq!("A", matches[0].home_team);
        assert_eq!("C", matches[1].home_team);
    }

    #[test]
    fn read_fixtures() {
        let path = write_temp(
            "scorecast_data_fixtures.csv",
            "HomeTeam,AwayTeam\nFC Bayern München,VfB Stuttgart\nSC Freiburg,Hamburger SV\n",
        );
        let fixtures = read_fixtures_from_file(&path).unwrap();
        assert_eq!(
            vec![
                ("FC Bayern München".to_owned(), "VfB Stuttgart".to_owned()),
                ("SC Freiburg".to_owned(), "Hamburger SV".to_owned()),
            ],
            fixtures
        );
    }

    #[test]
    fn decay_weights_relative_to_newest() {
        let date = |day| NaiveDate::from_ymd_opt(2025, 8, day).unwrap();
        let record = |day| Match {
            date: date(day),
            home_team: "A".to_owned(),
            away_team: "B".to_owned(),
            home_goals: 0,
            away_goals: 0,
        };
        let matches = vec![record(1), record(11), record(21)];
        let weights = decay_weights(&matches, 0.001);
        assert_eq!(3, weights.len());
        assert_float_relative_eq!(f64::exp(-0.02), weights[0]);
        assert_float_relative_eq!(f64::exp(-0.01), weights[1]);
        assert_eq!(1.0, weights[2]);
        assert!(decay_weights(&[], 0.001).is_empty());
    }
}
