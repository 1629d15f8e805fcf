use crate::apply::{first_rewrite, ApplyInfo};
use crate::axioms::RuleSet;
use crate::error::TermError;
use crate::term::Term;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct NormalizeResult<'a> {
    pub term: Term,
    pub steps_used: usize,
    /// No directional rule applies to `term`
    pub reached_fixpoint: bool,
    pub steps: Vec<ApplyInfo<'a>>,
}

/// Rewrites with the directional rules until none applies or `max_steps` are spent.
/// Always takes the outermost, leftmost rewrite of the earliest declared rule.
pub fn normalize<'a>(
    rules: &'a RuleSet,
    term: &Term,
    max_steps: usize,
) -> Result<NormalizeResult<'a>, TermError> {
    term.ensure_concrete()?;
    let mut current = term.clone();
    let mut steps: Vec<ApplyInfo<'a>> = vec![];

    while steps.len() < max_steps {
        match first_rewrite(rules, &current)? {
            None => {
                return Ok(NormalizeResult {
                    term: current,
                    steps_used: steps.len(),
                    reached_fixpoint: true,
                    steps,
                })
            }
            Some(info) => {
                trace!(
                    "{} => {} ({} at {:?})",
                    info.initial,
                    info.deduced,
                    info.rule.name,
                    info.path
                );
                current = info.deduced.clone();
                steps.push(info);
            }
        }
    }

    let reached_fixpoint = first_rewrite(rules, &current)?.is_none();
    Ok(NormalizeResult {
        term: current,
        steps_used: steps.len(),
        reached_fixpoint,
        steps,
    })
}
