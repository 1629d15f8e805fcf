use crate::batch::{passed_count, RecordOutcome};
use anum_core::solver::Statistics;
use anum_core::trace::DenseProof;
use itertools::Itertools;
use std::io::Write;

#[derive(Serialize)]
pub struct RecordReport {
    pub line: usize,
    pub name: String,
    pub passed: bool,
    pub proof: DenseProof,
    pub statistics: Statistics,
}

#[derive(Serialize)]
pub struct BatchReport {
    pub passed: usize,
    pub total: usize,
    pub records: Vec<RecordReport>,
}

impl BatchReport {
    pub fn new(outcomes: &[RecordOutcome]) -> BatchReport {
        BatchReport {
            passed: passed_count(outcomes),
            total: outcomes.len(),
            records: outcomes
                .iter()
                .map(|outcome| RecordReport {
                    line: outcome.record.line,
                    name: outcome.record.name.clone(),
                    passed: outcome.passed,
                    proof: DenseProof::from_state(
                        &outcome.record.left,
                        &outcome.record.right,
                        &outcome.state,
                    ),
                    statistics: outcome.statistics,
                })
                .collect(),
        }
    }

    pub fn write_yaml<W: Write>(&self, writer: W) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(writer, self)
    }
}

pub fn print_header() {
    println!(
        "  {0: <6} | {1: <36} | {2: <28} | {3: <6}",
        "line", "record", "verdict", "result"
    );
    println!("  {}", "-".repeat(86));
}

pub fn print_outcome(outcome: &RecordOutcome) {
    let verdict = format!("{}", outcome.state);
    println!(
        "  {0: <6} | {1: <36} | {2: <28} | {3: <6}",
        outcome.record.line,
        outcome.record.name,
        verdict,
        if outcome.passed { "ok" } else { "FAILED" }
    );
}

pub fn summary_line(outcomes: &[RecordOutcome]) -> String {
    let passed = passed_count(outcomes);
    let total = outcomes.len();
    let ratio = if total == 0 {
        100.0
    } else {
        100.0 * passed as f64 / total as f64
    };
    let summary = format!("Results: {}/{} passed ({:.1}%)", passed, total, ratio);
    if passed == total {
        summary
    } else {
        let failed = outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| outcome.record.line)
            .join(", ");
        format!("{}, failed lines: {}", summary, failed)
    }
}
