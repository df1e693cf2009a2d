//! Reconciliation of team names across data sources.
//!
//! The tipping site and the historical results provider spell team names differently
//! ("FC Bayern München" on one side, "Bayern Munich" on the other). Resolution consults
//! a static alias table for the known irregular cases, then falls back to a mechanical
//! fold that strips diacritics and punctuation.

use std::fs::File;
use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("team not found: {external} -> {candidate}")]
pub struct UnknownTeam {
    pub external: String,
    pub candidate: String,
}

/// Read-only table mapping externally sourced team names onto the naming convention of
/// the historical dataset. One instance is shared by every model.
#[derive(Clone, Debug)]
pub struct Aliases {
    entries: FxHashMap<String, String>,
}
impl Aliases {
    /// Loads a replacement table from a JSON object of `external: canonical` pairs.
    pub fn read_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = File::open(path)?;
        let entries: FxHashMap<String, String> = serde_json::from_reader(file)?;
        Ok(Self { entries })
    }

    /// The aliased name if one is on record, otherwise the name unchanged.
    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }
}

impl Default for Aliases {
    /// Kicktipp spellings of the Bundesliga clubs against their football-data.co.uk
    /// counterparts.
    fn default() -> Self {
        let entries = [
            ("FC Bayern München", "Bayern Munich"),
            ("FSV Mainz 05", "Mainz"),
            ("Bor. Mönchengladbach", "M'gladbach"),
            ("1. FC Köln", "FC Koln"),
            ("Eintracht Frankfurt", "Ein Frankfurt"),
            ("VfB Stuttgart", "Stuttgart"),
            ("Werder Bremen", "Werder Bremen"),
            ("SC Freiburg", "Freiburg"),
            ("RB Leipzig", "RB Leipzig"),
            ("Hamburger SV", "Hamburg"),
            ("Bayer 04 Leverkusen", "Leverkusen"),
            ("1. FC Union Berlin", "Union Berlin"),
            ("VfL Wolfsburg", "Wolfsburg"),
            ("FC St. Pauli", "St Pauli"),
            ("1. FC Heidenheim 1846", "Heidenheim"),
            ("1899 Hoffenheim", "Hoffenheim"),
            ("Borussia Dortmund", "Dortmund"),
            ("FC Augsburg", "Augsburg"),
        ]
        .into_iter()
        .map(|(external, canonical)| (external.to_owned(), canonical.to_owned()))
        .collect();
        Self { entries }
    }
}

/// Bidirectional team name to index table. Indices are dense, assigned in lexicographic
/// name order and stable for the life of a fit.
#[derive(Clone, Debug, Default)]
pub struct TeamLookup {
    name_to_index: FxHashMap<String, usize>,
    index_to_name: Vec<String>,
}
impl TeamLookup {
    /// Builds the table from an arbitrary stream of names, deduplicated and sorted.
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut index_to_name: Vec<String> = names.into_iter().collect();
        index_to_name.sort();
        index_to_name.dedup();
        let name_to_index = index_to_name
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        Self {
            name_to_index,
            index_to_name,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn name_at(&self, index: usize) -> &str {
        &self.index_to_name[index]
    }

    pub fn names(&self) -> &[String] {
        &self.index_to_name
    }

    pub fn len(&self) -> usize {
        self.index_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_name.is_empty()
    }
}

/// Resolves an externally sourced team name to one known to the historical dataset.
///
/// The alias table is consulted first; failing that, the candidate is folded to plain
/// ASCII. Both the original and the alias-mapped name are reported on failure.
pub fn resolve(
    external: &str,
    aliases: &Aliases,
    known: &TeamLookup,
) -> Result<String, UnknownTeam> {
    resolve_index(external, aliases, known).map(|index| known.name_at(index).to_owned())
}

/// As [`resolve`], yielding the index of the canonical name within `known`.
pub fn resolve_index(
    external: &str,
    aliases: &Aliases,
    known: &TeamLookup,
) -> Result<usize, UnknownTeam> {
    let candidate = aliases.apply(external);
    if let Some(index) = known.index_of(candidate) {
        return Ok(index);
    }
    if let Some(index) = known.index_of(&fold_name(candidate)) {
        return Ok(index);
    }
    Err(UnknownTeam {
        external: external.to_owned(),
        candidate: candidate.to_owned(),
    })
}

/// Reduces a name to plain ASCII: diacritics are stripped to their base letter,
/// non-foldable characters are dropped, as are literal `.` and `'`; the result is
/// whitespace-trimmed.
pub fn fold_name(name: &str) -> String {
    let mut folded = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '.' | '\'' => {}
            _ => {
                if let Some(base) = fold_char(ch) {
                    folded.push(base);
                }
            }
        }
    }
    folded.trim().to_owned()
}

fn fold_char(ch: char) -> Option<char> {
    if ch.is_ascii() {
        return Some(ch);
    }
    let base = match ch {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'À'..='Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'č' => 'c',
        'Ç' | 'Ć' | 'Č' => 'C',
        'đ' | 'ď' => 'd',
        'Đ' | 'Ď' => 'D',
        'è'..='ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'È'..='Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ğ' => 'g',
        'Ğ' => 'G',
        'ì'..='ï' | 'ī' | 'ı' => 'i',
        'Ì'..='Ï' | 'Ī' | 'İ' => 'I',
        'ł' => 'l',
        'Ł' => 'L',
        'ñ' | 'ń' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ň' => 'N',
        'ò'..='ö' | 'ō' | 'ő' => 'o',
        'Ò'..='Ö' | 'Ō' | 'Ő' => 'O',
        'ř' => 'r',
        'Ř' => 'R',
        'ş' | 'ś' | 'š' => 's',
        'Ş' | 'Ś' | 'Š' => 'S',
        'ť' | 'ţ' => 't',
        'Ť' | 'Ţ' => 'T',
        'ù'..='ü' | 'ū' | 'ű' => 'u',
        'Ù'..='Ü' | 'Ū' | 'Ű' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ž' | 'ź' | 'ż' => 'z',
        'Ž' | 'Ź' | 'Ż' => 'Z',
        _ => return None,
    };
    Some(base)
}
