use crate::apply::{apply_once_with, ApplyInfo};
use crate::axioms::RuleSet;
use crate::rule::{Direction, Rule};
use crate::term::Term;
use std::fmt;

/// Which side of the equation a step rewrites
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProofStep<'a> {
    pub rule: &'a Rule,
    pub direction: Direction,
    pub side: Side,
    /// Position of the rewrite inside the side
    pub path: Vec<usize>,
    /// The whole side before the rewrite
    pub before: Term,
    /// The whole side after the rewrite
    pub after: Term,
}

impl<'a> ProofStep<'a> {
    pub fn from_apply_info(side: Side, info: ApplyInfo<'a>) -> ProofStep<'a> {
        ProofStep {
            rule: info.rule,
            direction: info.direction,
            side,
            path: info.path,
            before: info.initial,
            after: info.deduced,
        }
    }

    pub fn print_header() {
        println!(
            "  {0: <5} | {1: <24} | {2: <24} | {3: <20} | {4: <8}",
            "side", "before", "after", "rule", "path"
        );
        println!("  {}", "-".repeat(93));
    }

    pub fn print(&self) {
        let before = format!("{}", self.before);
        let after = format!("{}", self.after);
        let rule = format!("{} {} {}", self.rule.id, self.rule.name, self.direction);
        let path = format!("{:?}", self.path);
        println!(
            "  {0: <5} | {1: <24} | {2: <24} | {3: <20} | {4: <8}",
            self.side, before, after, rule, path
        );
    }
}

/// A replayable chain of rewrites connecting two terms
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Proof<'a> {
    pub steps: Vec<ProofStep<'a>>,
}

impl<'a> Proof<'a> {
    pub fn new(steps: Vec<ProofStep<'a>>) -> Proof<'a> {
        Proof { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Replays every step against `rules`, independent of the search which produced it.
    ///
    /// A step is valid if its rule belongs to the rule set and may be used in the
    /// recorded direction, its `before` is the current side, and one rewrite of that
    /// rule at the recorded path yields `after`. Both sides have to coincide at the end.
    pub fn verify(&self, rules: &RuleSet, left: &Term, right: &Term) -> bool {
        let mut left = left.clone();
        let mut right = right.clone();
        for step in self.steps.iter() {
            let rule = match rules.get(step.rule.id) {
                Some(rule) if rule == step.rule => rule,
                _ => return false,
            };
            let current = match step.side {
                Side::Left => &mut left,
                Side::Right => &mut right,
            };
            if *current != step.before {
                return false;
            }
            let rewrites = match apply_once_with(rule, step.direction, current) {
                Ok(rewrites) => rewrites,
                Err(_) => return false,
            };
            if !rewrites
                .iter()
                .any(|info| info.path == step.path && info.deduced == step.after)
            {
                return false;
            }
            *current = step.after.clone();
        }
        left == right
    }

    pub fn print(&self) {
        ProofStep::print_header();
        for step in self.steps.iter() {
            step.print();
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::parse_symbolic;

    fn new_term(code: &str) -> Term {
        parse_symbolic(code).unwrap()
    }

    fn head_recursion_proof(rules: &RuleSet) -> Proof {
        Proof::new(vec![ProofStep {
            rule: rules.get(2).unwrap(),
            direction: Direction::Forward,
            side: Side::Left,
            path: vec![],
            before: new_term("♂∞"),
            after: new_term("♂∞ → ∞"),
        }])
    }

    #[test]
    fn valid_proof() {
        let rules = RuleSet::standard();
        let proof = head_recursion_proof(&rules);
        assert!(proof.verify(&rules, &new_term("♂∞"), &new_term("♂∞ → ∞")));
    }

    #[test]
    fn empty_proof_needs_equal_sides() {
        let rules = RuleSet::standard();
        let proof = Proof::default();
        assert!(proof.verify(&rules, &new_term("a"), &new_term("a")));
        assert!(!proof.verify(&rules, &new_term("a"), &new_term("b")));
    }

    #[test]
    fn sides_must_coincide() {
        let rules = RuleSet::standard();
        let proof = head_recursion_proof(&rules);
        assert!(!proof.verify(&rules, &new_term("♂∞"), &new_term("♂∞")));
    }

    #[test]
    fn wrong_before() {
        let rules = RuleSet::standard();
        let proof = head_recursion_proof(&rules);
        assert!(!proof.verify(&rules, &new_term("♂a"), &new_term("♂∞ → ∞")));
    }

    #[test]
    fn forged_after() {
        let rules = RuleSet::standard();
        let mut proof = head_recursion_proof(&rules);
        proof.steps[0].after = new_term("∞");
        assert!(!proof.verify(&rules, &new_term("♂∞"), &new_term("∞")));
    }

    #[test]
    fn wrong_path() {
        let rules = RuleSet::standard();
        let mut proof = head_recursion_proof(&rules);
        proof.steps[0].path = vec![0];
        assert!(!proof.verify(&rules, &new_term("♂∞"), &new_term("♂∞ → ∞")));
    }

    #[test]
    fn directional_rule_backward() {
        let rules = RuleSet::standard();
        let proof = Proof::new(vec![ProofStep {
            rule: rules.get(5).unwrap(),
            direction: Direction::Backward,
            side: Side::Left,
            path: vec![],
            before: new_term("∞"),
            after: new_term("∞ → ∞"),
        }]);
        assert!(!proof.verify(&rules, &new_term("∞"), &new_term("∞ → ∞")));
    }

    #[test]
    fn foreign_rule() {
        let rules = RuleSet::standard();
        let foreign = Rule::new(
            2,
            "head-recursion",
            new_term("∞"),
            new_term("a"),
            crate::rule::Orientation::Bidirectional,
        );
        let proof = Proof::new(vec![ProofStep {
            rule: &foreign,
            direction: Direction::Forward,
            side: Side::Right,
            path: vec![],
            before: new_term("∞"),
            after: new_term("a"),
        }]);
        assert!(!proof.verify(&rules, &new_term("a"), &new_term("∞")));
    }
}
