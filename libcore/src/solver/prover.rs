use crate::apply::apply_once_with;
use crate::axioms::RuleSet;
use crate::error::TermError;
use crate::rule::Direction;
use crate::solver::normalize::normalize;
use crate::solver::proof::{Proof, ProofStep, Side};
use crate::solver::statistics::Statistics;
use crate::term::Term;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Resource limits of a single proof search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Rewrites spent in normalization plus pairs expanded by the search
    pub max_steps: usize,
    /// Combined node count of both sides of a candidate pair
    pub max_nodes: usize,
    /// Number of bidirectional rewrites along one search path
    pub max_depth: usize,
    pub timeout: Option<Duration>,
}

impl Default for Budget {
    fn default() -> Budget {
        Budget {
            max_steps: 5000,
            max_nodes: 48,
            max_depth: 8,
            timeout: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DisproofReason {
    /// The sides contain different atoms, which no axiom can change
    AtomMismatch,
    /// Every reachable pair was explored without any pruning
    SearchExhausted,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InconclusiveReason {
    StepLimit,
    Timeout,
    /// Candidates were dropped by the node or depth bound
    SearchBound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProverState<'a> {
    /// Initial state of a search, `Prover::prove` never returns it
    Searching,
    Proved(Proof<'a>),
    Disproved(DisproofReason),
    Inconclusive(InconclusiveReason),
}

impl<'a> ProverState<'a> {
    pub fn is_proved(&self) -> bool {
        matches!(self, ProverState::Proved(_))
    }

    pub fn proof(&self) -> Option<&Proof<'a>> {
        match self {
            ProverState::Proved(proof) => Some(proof),
            _ => None,
        }
    }
}

impl fmt::Display for DisproofReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisproofReason::AtomMismatch => write!(f, "atom mismatch"),
            DisproofReason::SearchExhausted => write!(f, "search exhausted"),
        }
    }
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InconclusiveReason::StepLimit => write!(f, "step limit"),
            InconclusiveReason::Timeout => write!(f, "timeout"),
            InconclusiveReason::SearchBound => write!(f, "search bound"),
        }
    }
}

impl<'a> fmt::Display for ProverState<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProverState::Searching => write!(f, "searching"),
            ProverState::Proved(proof) => write!(f, "proved ({} steps)", proof.len()),
            ProverState::Disproved(reason) => write!(f, "disproved ({})", reason),
            ProverState::Inconclusive(reason) => write!(f, "inconclusive ({})", reason),
        }
    }
}

pub struct SolveResult<'a> {
    pub state: ProverState<'a>,
    pub statistics: Statistics,
}

/// Bookkeeping of one search, never shared between searches
struct Search<'a> {
    rules: &'a RuleSet,
    budget: Budget,
    started: Instant,
    /// Normalized pairs expanded in the current deepening round
    visited: HashSet<(Term, Term)>,
    statistics: Statistics,
    steps: usize,
    pruned: bool,
    aborted: Option<InconclusiveReason>,
}

type Trace<'a> = Vec<ProofStep<'a>>;

impl<'a> Search<'a> {
    fn new(rules: &'a RuleSet, budget: Budget) -> Search<'a> {
        Search {
            rules,
            budget,
            started: Instant::now(),
            visited: HashSet::new(),
            statistics: Statistics::new(),
            steps: 0,
            pruned: false,
            aborted: None,
        }
    }

    fn timed_out(&self) -> bool {
        match self.budget.timeout {
            Some(timeout) => self.started.elapsed() > timeout,
            None => false,
        }
    }

    fn remaining_steps(&self) -> usize {
        self.budget.max_steps.saturating_sub(self.steps)
    }

    /// Iterative deepening over the depth first search.
    fn run(&mut self, left: &Term, right: &Term) -> Result<ProverState<'a>, TermError> {
        for limit in 0..=self.budget.max_depth {
            self.visited.clear();
            self.pruned = false;
            trace!("Deepening to {}", limit);
            if let Some(steps) = self.explore(left, right, 0, limit)? {
                return Ok(ProverState::Proved(Proof::new(steps)));
            }
            if let Some(reason) = self.aborted {
                return Ok(ProverState::Inconclusive(reason));
            }
            if !self.pruned {
                return Ok(ProverState::Disproved(DisproofReason::SearchExhausted));
            }
        }
        Ok(ProverState::Inconclusive(InconclusiveReason::SearchBound))
    }

    fn explore(
        &mut self,
        left: &Term,
        right: &Term,
        depth: usize,
        limit: usize,
    ) -> Result<Option<Trace<'a>>, TermError> {
        if self.timed_out() {
            self.aborted = Some(InconclusiveReason::Timeout);
            return Ok(None);
        }

        let left = normalize(self.rules, left, self.remaining_steps())?;
        self.steps += left.steps_used;
        let right = normalize(self.rules, right, self.remaining_steps())?;
        self.steps += right.steps_used;
        self.statistics.normalize_steps += left.steps_used + right.steps_used;

        let left_term = left.term;
        let right_term = right.term;
        let mut trace: Trace<'a> = left
            .steps
            .into_iter()
            .map(|info| ProofStep::from_apply_info(Side::Left, info))
            .chain(
                right
                    .steps
                    .into_iter()
                    .map(|info| ProofStep::from_apply_info(Side::Right, info)),
            )
            .collect();

        if left_term.structural_equals(&right_term) {
            return Ok(Some(trace));
        }
        if !left.reached_fixpoint || !right.reached_fixpoint {
            self.aborted = Some(InconclusiveReason::StepLimit);
            return Ok(None);
        }
        if depth >= limit {
            self.pruned = true;
            self.statistics.pruned_pairs += 1;
            return Ok(None);
        }
        if !self
            .visited
            .insert((left_term.clone(), right_term.clone()))
        {
            return Ok(None);
        }
        self.statistics.expanded_pairs += 1;
        trace!("Expanding {} ≡ {} at depth {}", left_term, right_term, depth);

        let rules = self.rules;
        for rule in rules.bidirectional() {
            for direction in [Direction::Forward, Direction::Backward].iter() {
                for side in [Side::Left, Side::Right].iter() {
                    let current = match side {
                        Side::Left => &left_term,
                        Side::Right => &right_term,
                    };
                    self.statistics.fit_calls_count += 1;
                    let rewrites = apply_once_with(rule, *direction, current)?;
                    self.statistics.applies_count += rewrites.len();

                    for info in rewrites.into_iter() {
                        let (l, r) = match side {
                            Side::Left => (&info.deduced, &right_term),
                            Side::Right => (&left_term, &info.deduced),
                        };
                        if l.size() + r.size() > self.budget.max_nodes {
                            self.pruned = true;
                            self.statistics.pruned_pairs += 1;
                            continue;
                        }
                        if self.visited.contains(&(l.clone(), r.clone())) {
                            continue;
                        }
                        if self.steps >= self.budget.max_steps {
                            self.aborted = Some(InconclusiveReason::StepLimit);
                            return Ok(None);
                        }
                        self.steps += 1;

                        if let Some(rest) = self.explore(l, r, depth + 1, limit)? {
                            trace.push(ProofStep::from_apply_info(*side, info));
                            trace.extend(rest);
                            return Ok(Some(trace));
                        }
                        if self.aborted.is_some() {
                            return Ok(None);
                        }
                    }
                }
            }
        }
        Ok(None)
    }
}

/// Searches for a chain of axiom applications connecting two concrete terms
pub struct Prover<'a> {
    rules: &'a RuleSet,
    budget: Budget,
}

impl<'a> Prover<'a> {
    pub fn new(rules: &'a RuleSet, budget: Budget) -> Prover<'a> {
        Prover { rules, budget }
    }

    /// Budget exhaustion is reported as `Inconclusive`, never as an error.
    /// Fails only for terms containing pattern variables.
    pub fn prove(&self, left: &Term, right: &Term) -> Result<SolveResult<'a>, TermError> {
        left.ensure_concrete()?;
        right.ensure_concrete()?;

        if left.structural_equals(right) {
            return Ok(SolveResult {
                state: ProverState::Proved(Proof::default()),
                statistics: Statistics::new(),
            });
        }
        if left.atoms() != right.atoms() {
            debug!("{} ≢ {}: atoms differ", left, right);
            return Ok(SolveResult {
                state: ProverState::Disproved(DisproofReason::AtomMismatch),
                statistics: Statistics::new(),
            });
        }

        let mut search = Search::new(self.rules, self.budget);
        let state = search.run(left, right)?;
        debug!("{} ≡ {}: {} ({})", left, right, state, search.statistics);
        Ok(SolveResult {
            state,
            statistics: search.statistics,
        })
    }
}

pub fn prove_equivalent<'a>(
    rules: &'a RuleSet,
    left: &Term,
    right: &Term,
    max_steps: usize,
    max_nodes: usize,
) -> Result<ProverState<'a>, TermError> {
    let budget = Budget {
        max_steps,
        max_nodes,
        ..Budget::default()
    };
    Ok(Prover::new(rules, budget).prove(left, right)?.state)
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::{parse_formula, parse_schema};

    fn new_term(code: &str) -> Term {
        parse_formula(code).unwrap()
    }

    fn prove(left: &str, right: &str) -> (ProverState<'static>, Statistics) {
        // Leaking keeps the rules alive for the returned proof
        let rules: &'static RuleSet = Box::leak(Box::new(RuleSet::standard()));
        let result = Prover::new(rules, Budget::default())
            .prove(&new_term(left), &new_term(right))
            .unwrap();
        if let ProverState::Proved(proof) = &result.state {
            assert!(
                proof.verify(rules, &new_term(left), &new_term(right)),
                "Proof of {} ≡ {} does not replay",
                left,
                right
            );
        }
        (result.state, result.statistics)
    }

    #[test]
    fn reflexive_with_empty_trace() {
        let (state, _) = prove("∞ → ∞", "∞ → ∞");
        assert_eq!(state, ProverState::Proved(Proof::default()));
    }

    #[test]
    fn self_closure() {
        let (state, _) = prove("∞", "∞ → ∞");
        let proof = state.proof().expect("Proved");
        assert_eq!(proof.len(), 1);
        assert_eq!(proof.steps[0].side, Side::Right);
        assert_eq!(proof.steps[0].rule.id, 5);
    }

    #[test]
    fn self_closure_chain() {
        let (state, _) = prove("∞", "∞ → ∞ → ∞ → ∞");
        assert!(state.is_proved());
    }

    #[test]
    fn merger_of_self_closures() {
        let (state, statistics) = prove("♂∞ → ∞♀", "∞");
        assert!(state.is_proved());
        assert_eq!(statistics.normalize_steps, 2);
    }

    #[test]
    fn reflected_merger() {
        let (state, _) = prove("-(∞♀ → ♂∞)", "∞");
        assert!(state.is_proved());
        assert!(!prove("-♂∞", "♂∞").0.is_proved());
        assert_eq!(prove("-♂∞", "∞♀").0, ProverState::Proved(Proof::default()));
    }

    #[test]
    fn abit_root() {
        let (state, _) = prove("()", "∞");
        assert_eq!(state, ProverState::Proved(Proof::default()));
    }

    #[test]
    fn abit_merger() {
        let (state, _) = prove("(♂∞ → ∞) → (∞ → ∞♀)", "∞");
        assert!(state.is_proved());
    }

    #[test]
    fn head_recursion() {
        let (state, statistics) = prove("♂∞", "♂∞ → ∞");
        let proof = state.proof().expect("Proved");
        assert_eq!(proof.len(), 1);
        assert_eq!(proof.steps[0].rule.name, "head-recursion");
        assert_eq!(proof.steps[0].direction, Direction::Forward);
        assert!(statistics.expanded_pairs >= 1);
    }

    #[test]
    fn tail_recursion_with_atoms() {
        let (state, _) = prove("a♀", "a → a♀");
        assert!(state.is_proved());
    }

    #[test]
    fn tail_recursion_of_closed_root() {
        let (state, _) = prove("♂∞♀", "♂∞ → ♂∞♀");
        assert!(state.is_proved());
    }

    #[test]
    fn mixed_notations() {
        let (state, _) = prove("(()+())", "♂∞♀");
        assert!(state.is_proved());
    }

    #[test]
    fn atom_mismatch() {
        let (state, statistics) = prove("a", "b");
        assert_eq!(state, ProverState::Disproved(DisproofReason::AtomMismatch));
        assert_eq!(statistics, Statistics::new());
    }

    #[test]
    fn no_rule_connects() {
        let (state, _) = prove("a → b", "b → a");
        assert_eq!(
            state,
            ProverState::Disproved(DisproofReason::SearchExhausted)
        );
    }

    #[test]
    fn head_closed_root_is_not_root() {
        let (state, _) = prove("♂∞", "∞");
        assert!(!state.is_proved());
        assert!(matches!(state, ProverState::Inconclusive(_)));
    }

    #[test]
    fn closed_roots_are_not_root() {
        assert!(!prove("∞♀", "∞").0.is_proved());
        assert!(!prove("♂∞♀", "∞").0.is_proved());
    }

    #[test]
    fn tiny_step_budget() {
        let rules = RuleSet::standard();
        let state = prove_equivalent(&rules, &new_term("♂∞"), &new_term("∞"), 3, 48).unwrap();
        assert_eq!(state, ProverState::Inconclusive(InconclusiveReason::StepLimit));
    }

    #[test]
    fn tiny_node_budget() {
        let rules = RuleSet::standard();
        let state = prove_equivalent(&rules, &new_term("♂∞"), &new_term("♂∞ → ∞"), 5000, 4)
            .unwrap();
        assert_eq!(state, ProverState::Inconclusive(InconclusiveReason::SearchBound));
    }

    #[test]
    fn zero_timeout() {
        let rules = RuleSet::standard();
        let budget = Budget {
            timeout: Some(Duration::from_secs(0)),
            ..Budget::default()
        };
        let result = Prover::new(&rules, budget)
            .prove(&new_term("♂∞"), &new_term("∞"))
            .unwrap();
        assert!(!result.state.is_proved());
    }

    #[test]
    fn pattern_variables_rejected() {
        let rules = RuleSet::standard();
        let schema = parse_schema("♂v").unwrap();
        let result = Prover::new(&rules, Budget::default()).prove(&schema, &Term::root());
        assert!(matches!(result, Err(TermError::InvalidTerm(_))));
    }

    #[test]
    fn symmetric() {
        let forward = prove("♂∞", "♂∞ → ∞").0.is_proved();
        let backward = prove("♂∞ → ∞", "♂∞").0.is_proved();
        assert_eq!(forward, backward);
    }
}
