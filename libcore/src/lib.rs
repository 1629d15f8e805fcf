//! Equivalence prover for the link algebra
//!
//! Terms are built from the root `∞`, the self closures `♂x` and `x♀`
//! and the left associative link `l → r`.
//!
//! # Example
//!
//! ```
//! use anum_core::*;
//!
//! let rules = RuleSet::standard();
//! let left = parse_formula("♂∞ → ∞♀").unwrap();
//! let right = parse_formula("()").unwrap();
//!
//! let state = prove_equivalent(&rules, &left, &right, 5000, 48).unwrap();
//! assert!(state.is_proved());
//! ```

#[macro_use]
extern crate serde_derive;
#[cfg(test)]
#[macro_use]
extern crate maplit;

pub mod apply;
pub mod axioms;
pub mod dumper;
pub mod error;
pub mod fit;
pub mod io;
pub mod parser;
pub mod rule;
pub mod solver;
pub mod term;
pub mod trace;

pub use axioms::RuleSet;
pub use dumper::{print_abit, print_symbolic};
pub use error::{BatchError, ParseError, TermError};
pub use parser::{detect_notation, parse_abit, parse_formula, parse_schema, parse_symbolic, Notation};
pub use rule::{Direction, Orientation, Rule};
pub use solver::{
    normalize, prove_equivalent, Budget, NormalizeResult, Proof, ProofStep, Prover, ProverState,
    SolveResult,
};
pub use term::Term;
