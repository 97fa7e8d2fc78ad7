use thiserror::Error;

/// Snapshot ingestion failures.
///
/// All of these are fatal preconditions: a turn with malformed input cannot
/// be evaluated, and the caller is expected to stop rather than guess.
/// "No valid target" and "insufficient resource" conditions inside a turn
/// are ordinary control flow in the rule cascades, never errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("unexpected end of input while reading {context}")]
    MissingLine { context: &'static str },

    #[error("wrong field count for {context}: expected {expected}, found {found}")]
    FieldCount {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("non-numeric field {field} in {context}: {value:?}")]
    NonNumeric {
        context: &'static str,
        field: usize,
        value: String,
    },

    #[error("unknown entity kind code: {0}")]
    UnknownKind(i32),

    #[error("unknown threat code: {0}")]
    UnknownThreat(i32),

    #[error("snapshot lists {found} own agents, expected {expected}")]
    AgentCountMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
