use anum_core::io::Record;
use anum_core::solver::Statistics;
use anum_core::{Budget, Prover, ProverState, RuleSet, TermError};
use rayon::prelude::*;
use tracing::{debug, info};

pub struct RecordOutcome<'a> {
    pub record: &'a Record,
    pub state: ProverState<'a>,
    pub statistics: Statistics,
    pub passed: bool,
}

fn evaluate_record<'a>(
    prover: &Prover<'a>,
    record: &'a Record,
) -> Result<RecordOutcome<'a>, TermError> {
    let result = prover.prove(&record.left, &record.right)?;
    let passed = record.expected.is_met(result.state.is_proved());
    debug!(
        "Line {}: {} -> {} ({})",
        record.line,
        record.name,
        result.state,
        if passed { "passed" } else { "failed" }
    );
    Ok(RecordOutcome {
        record,
        state: result.state,
        statistics: result.statistics,
        passed,
    })
}

/// Proves all records in parallel, the order of the records is kept.
pub fn evaluate<'a>(
    rules: &'a RuleSet,
    budget: Budget,
    records: &'a [Record],
) -> Result<Vec<RecordOutcome<'a>>, TermError> {
    info!("Evaluating {} records", records.len());
    let prover = Prover::new(rules, budget);
    records
        .par_iter()
        .map(|record| evaluate_record(&prover, record))
        .collect()
}

pub fn passed_count(outcomes: &[RecordOutcome]) -> usize {
    outcomes.iter().filter(|outcome| outcome.passed).count()
}
