//! The nine axiom schemas of the link algebra
//!
//! | # | name               | schema                          |               |
//! |---|--------------------|---------------------------------|---------------|
//! | 1 | existence          | `r v ≡ r → v`                   | structural    |
//! | 2 | head-recursion     | `♂v ≡ ♂v → v`                   | bidirectional |
//! | 3 | tail-recursion     | `r♀ ≡ r → r♀`                   | bidirectional |
//! | 4 | link-definition    | `♂r → r♀ ⇒ r → r`               | directional   |
//! | 5 | self-closure       | `∞ → ∞ ⇒ ∞`                     | directional   |
//! | 6 | self-closure-chain | `∞ ≡ ∞ → ∞`                     | bidirectional |
//! | 7 | composition        | `a b c ≡ (a → b) → c`           | structural    |
//! | 8 | merger             | `♂∞ → ∞♀ ⇒ ∞`                   | directional   |
//! | 9 | abit-merger        | `(♂∞ → ∞) → (∞ → ∞♀) ⇒ ∞`       | directional   |
//!
//! Every directional schema strictly shrinks the term it rewrites.

use crate::rule::{Orientation, Rule};
use crate::term::Term;

/// The fixed, ordered collection of axioms
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

fn root() -> Term {
    Term::root()
}

fn head(t: Term) -> Term {
    Term::head_closed(t)
}

fn tail(t: Term) -> Term {
    Term::tail_closed(t)
}

fn link(l: Term, r: Term) -> Term {
    Term::link(l, r)
}

impl RuleSet {
    pub fn standard() -> RuleSet {
        let r = || Term::var("r");
        let v = || Term::var("v");
        let a = || Term::var("a");
        let b = || Term::var("b");
        let c = || Term::var("c");

        let rules = vec![
            Rule::new(
                1,
                "existence",
                link(r(), v()),
                link(r(), v()),
                Orientation::Structural,
            ),
            Rule::new(
                2,
                "head-recursion",
                head(v()),
                link(head(v()), v()),
                Orientation::Bidirectional,
            ),
            Rule::new(
                3,
                "tail-recursion",
                tail(r()),
                link(r(), tail(r())),
                Orientation::Bidirectional,
            ),
            Rule::new(
                4,
                "link-definition",
                link(head(r()), tail(r())),
                link(r(), r()),
                Orientation::Directional,
            ),
            Rule::new(
                5,
                "self-closure",
                link(root(), root()),
                root(),
                Orientation::Directional,
            ),
            Rule::new(
                6,
                "self-closure-chain",
                root(),
                link(root(), root()),
                Orientation::Bidirectional,
            ),
            Rule::new(
                7,
                "composition",
                link(link(a(), b()), c()),
                link(link(a(), b()), c()),
                Orientation::Structural,
            ),
            Rule::new(
                8,
                "merger",
                link(head(root()), tail(root())),
                root(),
                Orientation::Directional,
            ),
            Rule::new(
                9,
                "abit-merger",
                link(link(head(root()), root()), link(root(), tail(root()))),
                root(),
                Orientation::Directional,
            ),
        ];
        RuleSet { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Rules used by normalization, in declared order
    pub fn directional(&self) -> impl Iterator<Item = &Rule> {
        self.iter()
            .filter(|rule| rule.orientation == Orientation::Directional)
    }

    /// Rules used by the proof search, in declared order
    pub fn bidirectional(&self) -> impl Iterator<Item = &Rule> {
        self.iter()
            .filter(|rule| rule.orientation == Orientation::Bidirectional)
    }

    pub fn get(&self, id: usize) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> RuleSet {
        RuleSet::standard()
    }
}
