use crate::term::Term;

fn dump_atomic(term: &Term, bracket: bool, string: &mut String) {
    if bracket {
        string.push('(');
        dump_impl(term, string);
        string.push(')');
    } else {
        dump_impl(term, string);
    }
}

fn dump_impl(term: &Term, string: &mut String) {
    match term {
        Term::Root => string.push('∞'),
        Term::Atom(name) | Term::PatternVar(name) => string.push_str(name),
        Term::HeadClosed(inner) => {
            string.push('♂');
            let bracket = matches!(**inner, Term::Link(..) | Term::TailClosed(_));
            dump_atomic(inner, bracket, string);
        }
        Term::TailClosed(inner) => {
            dump_atomic(inner, matches!(**inner, Term::Link(..)), string);
            string.push('♀');
        }
        Term::Link(left, right) => {
            // Left associative
            dump_atomic(left, false, string);
            string.push_str(" → ");
            dump_atomic(right, matches!(**right, Term::Link(..)), string);
        }
    }
}

/// Prints the symbolic notation with the minimal parentheses
/// such that parsing the output yields the same term.
pub fn print_symbolic(term: &Term) -> String {
    let mut string = String::new();
    dump_impl(term, &mut string);
    string
}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn closures() {
        let term = Term::tail_closed(Term::head_closed(Term::root()));
        assert_eq!(print_symbolic(&term), "♂∞♀");

        let term = Term::head_closed(Term::tail_closed(Term::root()));
        assert_eq!(print_symbolic(&term), "♂(∞♀)");
    }

    #[test]
    fn left_nested_links_without_brackets() {
        let term = Term::link(
            Term::link(Term::atom("a"), Term::atom("b")),
            Term::atom("c"),
        );
        assert_eq!(print_symbolic(&term), "a → b → c");
    }

    #[test]
    fn right_nested_links_with_brackets() {
        let term = Term::link(
            Term::atom("a"),
            Term::link(Term::atom("b"), Term::atom("c")),
        );
        assert_eq!(print_symbolic(&term), "a → (b → c)");
    }

    #[test]
    fn closed_links() {
        let link = Term::link(Term::root(), Term::root());
        assert_eq!(
            print_symbolic(&Term::head_closed(link.clone())),
            "♂(∞ → ∞)"
        );
        assert_eq!(print_symbolic(&Term::tail_closed(link)), "(∞ → ∞)♀");
    }

    #[test]
    fn variables_print_by_name() {
        let term = Term::link(Term::head_closed(Term::var("v")), Term::var("v"));
        assert_eq!(print_symbolic(&term), "♂v → v");
    }
}
