//! Line-level reading of flat results files.

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::bail;
use rustc_hash::FxHashMap;

pub struct CsvReader {
    lines: Lines<BufReader<File>>,
}
impl CsvReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        let lines = BufReader::new(file).lines();
        Ok(Self { lines })
    }

    pub fn read(&mut self) -> Option<Result<Vec<String>, io::Error>> {
        self.lines.next().map(|line| {
            line.map(|line| {
                line.trim_end_matches('\r')
                    .split(',')
                    .map(ToString::to_string)
                    .collect()
            })
        })
    }
}

impl Iterator for CsvReader {
    type Item = Result<Vec<String>, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

/// Column name to position mapping taken from the first record of a file.
#[derive(Debug)]
pub struct Header {
    columns: FxHashMap<String, usize>,
}
impl Header {
    pub fn new(record: &[String]) -> Self {
        let columns = record
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        Self { columns }
    }

    pub fn column(&self, name: &str) -> anyhow::Result<usize> {
        match self.columns.get(name) {
            Some(&index) => Ok(index),
            None => bail!("missing column {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn read_records() {
        let path = write_temp(
            "scorecast_csv_read_records.csv",
            "Date,HomeTeam,AwayTeam\r\n01/08/25,Mainz,FC Koln\r\n",
        );
        let mut reader = CsvReader::open(&path).unwrap();
        assert_eq!(
            vec!["Date", "HomeTeam", "AwayTeam"],
            reader.read().unwrap().unwrap()
        );
        assert_eq!(
            vec!["01/08/25", "Mainz", "FC Koln"],
            reader.read().unwrap().unwrap()
        );
        assert!(reader.read().is_none());
    }

    #[test]
    fn header_columns() {
        let record: Vec<String> = ["Div", "Date", "HomeTeam", "FTHG"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let header = Header::new(&record);
        assert_eq!(1, header.column("Date").unwrap());
        assert_eq!(3, header.column("FTHG").unwrap());
        assert_eq!(
            "missing column FTAG",
            header.column("FTAG").unwrap_err().to_string()
        );
    }
}
