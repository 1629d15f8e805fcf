use crate::axioms::RuleSet;
use crate::error::TermError;
use crate::fit::{fit, fit_root, FitMap};
use crate::rule::{Direction, Rule};
use crate::term::Term;

fn deep_replace(path: &[usize], orig: &Term, new: Term) -> Result<Term, TermError> {
    orig.replace_at(path, new)
        .ok_or_else(|| TermError::InvalidTerm(format!("No node at {:?} in {}", path, orig)))
}

/// Applies the mapping on a term in order to generate a new term
/// * `prev` - The term which should be transformed
/// * `conclusion` - The replacement schema, instantiated with the mapping
pub fn apply(mapping: &FitMap, prev: &Term, conclusion: &Term) -> Result<Term, TermError> {
    let FitMap { path, variable } = mapping;
    let adjusted = conclusion.substitute(variable)?;
    deep_replace(path, prev, adjusted)
}

/// One rewrite step
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyInfo<'a> {
    pub rule: &'a Rule,
    pub direction: Direction,
    pub path: Vec<usize>,
    pub initial: Term,
    pub deduced: Term,
}

impl<'a> ApplyInfo<'a> {
    pub fn print_header() {
        println!(
            "  {0: <24} | {1: <24} | {2: <18} | {3: <8}",
            "new", "initial", "rule", "path"
        );
        println!("  {}", "-".repeat(84));
    }

    pub fn print(&self) {
        let ded_str = format!("{}", self.deduced);
        let ini_str = format!("{}", self.initial);
        let rule = format!("{} {}", self.rule.name, self.direction);
        let path = format!("{:?}", self.path);
        println!(
            "  {0: <24} | {1: <24} | {2: <18} | {3: <8}",
            ded_str, ini_str, rule, path
        );
    }
}

/// All rewrites of `term` with a single rule in a single direction.
/// Empty when the rule may not be applied that way.
pub fn apply_once_with<'a>(
    rule: &'a Rule,
    direction: Direction,
    term: &Term,
) -> Result<Vec<ApplyInfo<'a>>, TermError> {
    if !rule.applicable(direction) {
        return Ok(vec![]);
    }
    let (pattern, replacement) = rule.sides(direction);
    fit(term, pattern)
        .iter()
        .map(|mapping| {
            Ok(ApplyInfo {
                rule,
                direction,
                path: mapping.path.clone(),
                initial: term.clone(),
                deduced: apply(mapping, term, replacement)?,
            })
        })
        .collect()
}

fn rewrites_at<'a>(
    rules: &'a RuleSet,
    term: &Term,
    path: &[usize],
    part: &Term,
) -> Result<Vec<ApplyInfo<'a>>, TermError> {
    let mut infos = vec![];
    for rule in rules.directional() {
        if let Some(FitMap { variable, .. }) = fit_root(part, &rule.condition) {
            let mapping = FitMap {
                variable,
                path: path.to_vec(),
            };
            infos.push(ApplyInfo {
                rule,
                direction: Direction::Forward,
                path: path.to_vec(),
                initial: term.clone(),
                deduced: apply(&mapping, term, &rule.conclusion)?,
            });
        }
    }
    Ok(infos)
}

/// All single step rewrites with the directional rules.
/// Positions are visited outside-in, at each position the rules in declared order.
pub fn apply_once<'a>(rules: &'a RuleSet, term: &Term) -> Result<Vec<ApplyInfo<'a>>, TermError> {
    let mut infos = vec![];
    for (path, part) in term.parts_with_path() {
        infos.extend(rewrites_at(rules, term, &path, part)?);
    }
    Ok(infos)
}

/// The first rewrite `apply_once` would yield
pub fn first_rewrite<'a>(
    rules: &'a RuleSet,
    term: &Term,
) -> Result<Option<ApplyInfo<'a>>, TermError> {
    for (path, part) in term.parts_with_path() {
        if let Some(info) = rewrites_at(rules, term, &path, part)?.into_iter().next() {
            return Ok(Some(info));
        }
    }
    Ok(None)
}
