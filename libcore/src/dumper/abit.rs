use crate::error::TermError;
use crate::term::Term;

/// `∞` or a head closure of a unit
pub fn is_unit(term: &Term) -> bool {
    match term {
        Term::Root => true,
        Term::HeadClosed(inner) => is_unit(inner),
        _ => false,
    }
}

fn dump_impl(term: &Term, string: &mut String) -> Result<(), TermError> {
    match term {
        Term::Root => string.push_str("()"),
        Term::HeadClosed(inner) if is_unit(inner) => {
            string.push('(');
            dump_impl(inner, string)?;
        }
        Term::TailClosed(inner) => {
            dump_impl(inner, string)?;
            string.push(')');
        }
        Term::Link(left, right) if is_unit(right) => {
            dump_impl(left, string)?;
            string.push('+');
            dump_impl(right, string)?;
        }
        Term::Link(left, right) if is_unit(left) => {
            dump_impl(right, string)?;
            string.push('-');
            dump_impl(left, string)?;
        }
        _ => return Err(TermError::NotAbitEncodable(term.to_string())),
    }
    Ok(())
}

/// Encodes a term as abits.
///
/// Only terms built from units can be encoded: atoms, head closures of non units
/// and links between two non units have no abit representation.
pub fn print_abit(term: &Term) -> Result<String, TermError> {
    let mut string = String::new();
    dump_impl(term, &mut string)?;
    Ok(string)
}
