use crate::term::Term;
use std::fmt;

pub mod abit;
pub mod symbolic;

pub use abit::print_abit;
pub use symbolic::print_symbolic;

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", print_symbolic(self))
    }
}
