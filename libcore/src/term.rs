use crate::error::TermError;
use std::collections::{BTreeSet, HashMap};

/// Pattern variable name -> bound sub term
pub type Bindings<'a> = HashMap<&'a str, &'a Term>;

/// A formula of the link algebra.
///
/// Children are owned exclusively, a term is a plain tree.
/// Equality is syntactic: two terms are equal iff variant and children are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// The fully self-closed fixed point `∞`
    Root,
    /// Self-closed start `♂x`
    HeadClosed(Box<Term>),
    /// Self-closed end `x♀`
    TailClosed(Box<Term>),
    /// Non self-closing link `l → r`
    Link(Box<Term>, Box<Term>),
    /// Opaque named constant, equal only to itself
    Atom(String),
    /// Only allowed inside axiom schemas
    PatternVar(String),
}

pub struct TermIter<'a> {
    stack: Vec<&'a Term>,
}

impl<'a> TermIter<'a> {
    pub fn new(parent: &'a Term) -> TermIter<'a> {
        TermIter {
            stack: vec![parent],
        }
    }
}

impl<'a> Iterator for TermIter<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        for child in current.childs().into_iter().rev() {
            self.stack.push(child);
        }
        Some(current)
    }
}

/// Pre-order traversal yielding the path to each node.
/// A node comes before its children, left children before right ones.
pub struct TermAndPathIter<'a> {
    stack: Vec<(Vec<usize>, &'a Term)>,
}

impl<'a> TermAndPathIter<'a> {
    pub fn new(parent: &'a Term) -> TermAndPathIter<'a> {
        TermAndPathIter {
            stack: vec![(vec![], parent)],
        }
    }
}

impl<'a> Iterator for TermAndPathIter<'a> {
    type Item = (Vec<usize>, &'a Term);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, term) = self.stack.pop()?;
        for (i, child) in term.childs().into_iter().enumerate().rev() {
            self.stack.push(([&path[..], &[i]].concat(), child));
        }
        Some((path, term))
    }
}

impl Term {
    // Term creation
    pub fn root() -> Term {
        Term::Root
    }

    pub fn head_closed(inner: Term) -> Term {
        Term::HeadClosed(Box::new(inner))
    }

    pub fn tail_closed(inner: Term) -> Term {
        Term::TailClosed(Box::new(inner))
    }

    pub fn link(left: Term, right: Term) -> Term {
        Term::Link(Box::new(left), Box::new(right))
    }

    pub fn atom(name: &str) -> Term {
        Term::Atom(String::from(name))
    }

    pub fn var(name: &str) -> Term {
        Term::PatternVar(String::from(name))
    }

    pub fn childs(&self) -> Vec<&Term> {
        match self {
            Term::Root | Term::Atom(_) | Term::PatternVar(_) => vec![],
            Term::HeadClosed(inner) | Term::TailClosed(inner) => vec![&**inner],
            Term::Link(left, right) => vec![&**left, &**right],
        }
    }

    /// Number of nodes
    pub fn size(&self) -> usize {
        self.childs().iter().map(|c| c.size()).sum::<usize>() + 1
    }

    #[inline]
    pub fn structural_equals(&self, other: &Term) -> bool {
        self == other
    }

    /// Traverse depth first order
    pub fn parts(&self) -> TermIter<'_> {
        TermIter::new(self)
    }

    pub fn parts_with_path(&self) -> TermAndPathIter<'_> {
        TermAndPathIter::new(self)
    }

    /// Returns a copy of this term where the node at `path` is swapped with `new`.
    pub fn replace_at(&self, path: &[usize], new: Term) -> Option<Term> {
        match path.split_first() {
            None => Some(new),
            Some((&i, rest)) => match (self, i) {
                (Term::HeadClosed(inner), 0) => Some(Term::head_closed(inner.replace_at(rest, new)?)),
                (Term::TailClosed(inner), 0) => Some(Term::tail_closed(inner.replace_at(rest, new)?)),
                (Term::Link(left, right), 0) => {
                    Some(Term::link(left.replace_at(rest, new)?, (**right).clone()))
                }
                (Term::Link(left, right), 1) => {
                    Some(Term::link((**left).clone(), right.replace_at(rest, new)?))
                }
                _ => None,
            },
        }
    }

    pub fn is_concrete(&self) -> bool {
        self.parts().all(|t| !matches!(t, Term::PatternVar(_)))
    }

    /// Fails with `InvalidTerm` when a schema variable leaked into this term.
    pub fn ensure_concrete(&self) -> Result<(), TermError> {
        match self.parts().find(|t| matches!(t, Term::PatternVar(_))) {
            None => Ok(()),
            Some(Term::PatternVar(name)) => Err(TermError::InvalidTerm(format!(
                "pattern variable '{}' inside concrete term {}",
                name, self
            ))),
            Some(_) => Ok(()),
        }
    }

    pub fn pattern_vars(&self) -> BTreeSet<&str> {
        self.parts()
            .filter_map(|t| match t {
                Term::PatternVar(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of all atoms. Every axiom preserves this set.
    pub fn atoms(&self) -> BTreeSet<&str> {
        self.parts()
            .filter_map(|t| match t {
                Term::Atom(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replaces every pattern variable with its binding.
    pub fn substitute(&self, bindings: &Bindings) -> Result<Term, TermError> {
        Ok(match self {
            Term::PatternVar(name) => match bindings.get(name.as_str()) {
                Some(bound) => (*bound).clone(),
                None => return Err(TermError::UnboundVariable(name.clone())),
            },
            Term::Root => Term::Root,
            Term::Atom(name) => Term::Atom(name.clone()),
            Term::HeadClosed(inner) => Term::head_closed(inner.substitute(bindings)?),
            Term::TailClosed(inner) => Term::tail_closed(inner.substitute(bindings)?),
            Term::Link(left, right) => {
                Term::link(left.substitute(bindings)?, right.substitute(bindings)?)
            }
        })
    }

    /// Mirrors the outermost constructor: `l → r` becomes `r → l`,
    /// `♂x` becomes `x♀` and the other way round. Roots and atoms are
    /// their own reflection, a pattern variable has none.
    pub fn reflect(self) -> Option<Term> {
        match self {
            Term::Root | Term::Atom(_) => Some(self),
            Term::HeadClosed(inner) => Some(Term::TailClosed(inner)),
            Term::TailClosed(inner) => Some(Term::HeadClosed(inner)),
            Term::Link(left, right) => Some(Term::Link(right, left)),
            Term::PatternVar(_) => None,
        }
    }
}
