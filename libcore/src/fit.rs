use crate::term::{Bindings, Term};

/// One occurrence of a pattern inside a term
#[derive(Debug, Clone, PartialEq)]
pub struct FitMap<'a> {
    /// pattern variable is key, bound sub term is value
    pub variable: Bindings<'a>,
    /// Path to the node
    /// Each item represents the index of the next child
    pub path: Vec<usize>,
}

/// Extends the bindings such that `pattern` equals `term` after substitution.
/// Repeated variables have to bind structurally equal sub terms.
fn fit_impl<'a>(term: &'a Term, pattern: &'a Term, bindings: &mut Bindings<'a>) -> bool {
    match (pattern, term) {
        (Term::PatternVar(name), _) => match bindings.get(name.as_str()) {
            Some(bound) => *bound == term,
            None => {
                bindings.insert(name.as_str(), term);
                true
            }
        },
        (Term::Root, Term::Root) => true,
        (Term::Atom(expected), Term::Atom(actual)) => expected == actual,
        (Term::HeadClosed(inner_pattern), Term::HeadClosed(inner))
        | (Term::TailClosed(inner_pattern), Term::TailClosed(inner)) => {
            fit_impl(inner, inner_pattern, bindings)
        }
        (Term::Link(left_pattern, right_pattern), Term::Link(left, right)) => {
            fit_impl(left, left_pattern, bindings) && fit_impl(right, right_pattern, bindings)
        }
        _ => false,
    }
}

/// Tries to match the pattern against the whole term
pub fn fit_root<'a>(term: &'a Term, pattern: &'a Term) -> Option<FitMap<'a>> {
    let mut variable = Bindings::new();
    if fit_impl(term, pattern, &mut variable) {
        Some(FitMap {
            variable,
            path: vec![],
        })
    } else {
        None
    }
}

/// Tries to match the pattern at every position of the term.
/// The result is ordered outside-in, left sub trees before right ones.
pub fn fit<'a>(term: &'a Term, pattern: &'a Term) -> Vec<FitMap<'a>> {
    term.parts_with_path()
        .filter_map(|(path, part)| {
            let mut variable = Bindings::new();
            if fit_impl(part, pattern, &mut variable) {
                Some(FitMap { variable, path })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod specs {
    use super::*;
    use crate::parser::{parse_schema, parse_symbolic};

    fn new_term(code: &str) -> Term {
        parse_symbolic(code).unwrap()
    }

    fn new_pattern(code: &str) -> Term {
        parse_schema(code).unwrap()
    }

    #[test]
    fn variable_only() {
        let term = new_term("♂∞");
        let pattern = new_pattern("a");

        let actual = fit_root(&term, &pattern).unwrap();
        assert_eq!(actual.variable, hashmap! {"a" => &term});
        assert!(actual.path.is_empty());
    }

    #[test]
    fn operator_with_variables() {
        let term = new_term("♂∞ → ∞♀");
        let pattern = new_pattern("♂r → v♀");

        let actual = fit_root(&term, &pattern).unwrap();
        let root = Term::root();
        assert_eq!(actual.variable, hashmap! {"r" => &root, "v" => &root});
    }

    #[test]
    fn repeated_variable_must_agree() {
        let pattern = new_pattern("♂v → v");

        let term = new_term("♂∞ → ∞");
        assert!(fit_root(&term, &pattern).is_some());

        let term = new_term("♂∞ → ∞♀");
        assert!(fit_root(&term, &pattern).is_none());
    }

    #[test]
    fn closures_do_not_match_each_other() {
        let term = new_term("∞♀");
        let pattern = new_pattern("♂v");
        assert_eq!(fit_root(&term, &pattern), None);
    }

    #[test]
    fn atoms_are_constants() {
        let pattern = new_term("a → b");
        assert!(fit_root(&new_term("a → b"), &pattern).is_some());
        assert!(fit_root(&new_term("a → c"), &pattern).is_none());
    }

    #[test]
    fn fit_at_every_position() {
        let term = new_term("(∞ → ∞) → ♂(∞ → ∞)");
        let pattern = new_term("∞ → ∞");

        let actual: Vec<_> = fit(&term, &pattern).into_iter().map(|m| m.path).collect();
        assert_eq!(actual, vec![vec![0], vec![1, 0]]);
    }

    #[test]
    fn fit_outside_in() {
        let term = new_term("a → b → c");
        let pattern = new_pattern("x → y");

        let actual = fit(&term, &pattern);
        assert_eq!(actual.len(), 2);

        let a = Term::atom("a");
        let b = Term::atom("b");
        let c = Term::atom("c");
        let ab = Term::link(a.clone(), b.clone());
        assert_eq!(actual[0].path, Vec::<usize>::new());
        assert_eq!(actual[0].variable, hashmap! {"x" => &ab, "y" => &c});
        assert_eq!(actual[1].path, vec![0]);
        assert_eq!(actual[1].variable, hashmap! {"x" => &a, "y" => &b});
    }
}
