use crate::rule::Direction;
use crate::solver::{ProofStep, ProverState, Side};
use crate::term::Term;

/// Self contained copy of a proof step, terms are stored in symbolic notation
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DenseProofStep {
    pub rule: usize,
    pub name: String,
    pub direction: Direction,
    pub side: Side,
    pub path: Vec<usize>,
    pub before: String,
    pub after: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DenseProof {
    pub left: String,
    pub right: String,
    pub verdict: String,
    pub steps: Vec<DenseProofStep>,
}

impl DenseProof {
    fn from_proof_step(step: &ProofStep) -> DenseProofStep {
        DenseProofStep {
            rule: step.rule.id,
            name: step.rule.name.clone(),
            direction: step.direction,
            side: step.side,
            path: step.path.clone(),
            before: step.before.to_string(),
            after: step.after.to_string(),
        }
    }

    pub fn from_state(left: &Term, right: &Term, state: &ProverState) -> DenseProof {
        DenseProof {
            left: left.to_string(),
            right: right.to_string(),
            verdict: state.to_string(),
            steps: state
                .proof()
                .map(|proof| proof.steps.iter().map(DenseProof::from_proof_step).collect())
                .unwrap_or_default(),
        }
    }

    pub fn write_yaml<W>(&self, writer: W) -> Result<(), serde_yaml::Error>
    where
        W: std::io::Write,
    {
        serde_yaml::to_writer(writer, self)
    }

    pub fn read_yaml<R>(reader: R) -> Result<DenseProof, serde_yaml::Error>
    where
        R: std::io::Read,
    {
        serde_yaml::from_reader(reader)
    }
}
