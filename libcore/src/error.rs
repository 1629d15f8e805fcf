use thiserror::Error;

/// Malformed surface syntax in either notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Parse error at {position}: expected {expected}, found {found}")]
    Unexpected {
        /// Character offset into the input
        position: usize,
        expected: String,
        found: String,
    },
    #[error("Malformed abit sequence at {position}: {reason}")]
    MalformedAbitSequence { position: usize, reason: String },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::Unexpected { position, .. } => *position,
            ParseError::MalformedAbitSequence { position, .. } => *position,
        }
    }
}

/// Contract violations while building or rewriting terms.
/// These signal a bug in the caller, never a property of the theory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    #[error("Invalid term: {0}")]
    InvalidTerm(String),
    #[error("Pattern variable '{0}' has no binding")]
    UnboundVariable(String),
    #[error("Term {0} has no abit encoding")]
    NotAbitEncodable(String),
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Reading batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decoding yaml batch file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Record in line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: ParseError,
    },
    #[error("Record in line {line} has no relation (≡ or ≢): {text}")]
    MissingRelation { line: usize, text: String },
}
