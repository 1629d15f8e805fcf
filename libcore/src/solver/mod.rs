pub mod normalize;
pub mod proof;
pub mod prover;
pub mod statistics;

pub use normalize::{normalize, NormalizeResult};
pub use proof::{Proof, ProofStep, Side};
pub use prover::{
    prove_equivalent, Budget, DisproofReason, InconclusiveReason, Prover, ProverState,
    SolveResult,
};
pub use statistics::Statistics;
