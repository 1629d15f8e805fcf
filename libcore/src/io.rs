//! Batch test files
//!
//! Line format, one record per line:
//!
//! ```text
//! # comment
//! ∞ ≡ ∞ → ∞       // expected equivalent, also `==`
//! ♂∞ ≢ ∞          // expected not equivalent, also `!=`
//! (()+()) ≡ ♂∞♀   // notation is detected per side
//! ```
//!
//! Yaml format, a list of records:
//!
//! ```yaml
//! - name: merger
//!   left: ♂∞ → ∞♀
//!   right: ∞
//!   expected: equivalent
//!   notation: symbolic
//! ```

use crate::error::{BatchError, ParseError};
use crate::parser::{parse_formula, parse_with, Notation};
use crate::term::Term;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Expectation {
    Equivalent,
    NotEquivalent,
}

impl Expectation {
    /// Whether a verdict meets the expectation
    pub fn is_met(self, proved: bool) -> bool {
        match self {
            Expectation::Equivalent => proved,
            Expectation::NotEquivalent => !proved,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    /// 1-based line in a line file, 1-based index in a yaml file
    pub line: usize,
    pub left: Term,
    pub right: Term,
    pub expected: Expectation,
}

#[derive(Deserialize)]
struct RecordEntry {
    name: Option<String>,
    left: String,
    right: String,
    expected: Expectation,
    notation: Option<Notation>,
}

const RELATIONS: [(&str, Expectation); 4] = [
    ("≢", Expectation::NotEquivalent),
    ("!=", Expectation::NotEquivalent),
    ("≡", Expectation::Equivalent),
    ("==", Expectation::Equivalent),
];

fn strip_comment(line: &str) -> &str {
    let end = [line.find('#'), line.find("//")]
        .iter()
        .filter_map(|i| *i)
        .min()
        .unwrap_or_else(|| line.len());
    line[..end].trim()
}

/// Parses a single line of the line format.
/// Blank and comment lines yield `None`.
pub fn parse_record_line(line: usize, text: &str) -> Result<Option<Record>, BatchError> {
    let code = strip_comment(text);
    if code.is_empty() {
        return Ok(None);
    }
    let (relation, expected) = match RELATIONS.iter().find(|(rel, _)| code.contains(rel)) {
        Some(relation) => *relation,
        None => {
            return Err(BatchError::MissingRelation {
                line,
                text: String::from(code),
            })
        }
    };
    let mut parts = code.splitn(2, relation);
    let left = parts.next().unwrap_or_default();
    let right = parts.next().unwrap_or_default();
    let record_error = |source: ParseError| BatchError::Record { line, source };

    Ok(Some(Record {
        name: String::from(code),
        line,
        left: parse_formula(left.trim()).map_err(record_error)?,
        right: parse_formula(right.trim()).map_err(record_error)?,
        expected,
    }))
}

pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, BatchError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(record) = parse_record_line(i + 1, &line?)? {
            records.push(record);
        }
    }
    Ok(records)
}

pub fn read_records_yaml<R: Read>(reader: R) -> Result<Vec<Record>, BatchError> {
    let entries: Vec<RecordEntry> = serde_yaml::from_reader(reader)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let line = i + 1;
            let parse = |code: &str| match entry.notation {
                Some(notation) => parse_with(code, notation),
                None => parse_formula(code),
            };
            let record_error = |source: ParseError| BatchError::Record { line, source };
            let relation = match entry.expected {
                Expectation::Equivalent => "≡",
                Expectation::NotEquivalent => "≢",
            };
            Ok(Record {
                name: entry
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{} {} {}", entry.left, relation, entry.right)),
                line,
                left: parse(&entry.left).map_err(record_error)?,
                right: parse(&entry.right).map_err(record_error)?,
                expected: entry.expected,
            })
        })
        .collect()
}

/// Picks the format by the file extension: `.yaml` and `.yml` are yaml, everything else lines.
pub fn load_records<P: AsRef<Path>>(filename: P) -> Result<Vec<Record>, BatchError> {
    let path = filename.as_ref();
    let file = File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => read_records_yaml(file),
        _ => read_records(BufReader::new(file)),
    }
}
