//! Error types for the dicelock protocol.

use thiserror::Error;

/// Errors from dice validation and protocol operations.
///
/// Malformed peer input during a running session never surfaces here: the
/// session re-prompts within the current state instead.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("at least {min} dice are required, got {got}")]
    TooFewDice { got: usize, min: usize },

    #[error("a die needs at least one face")]
    EmptyDie,

    #[error("invalid face value {token:?} in die {spec:?}: faces must be integers")]
    InvalidFace { spec: String, token: String },

    #[error("commitment range must be at least 1")]
    EmptyRange,

    #[error("peer contribution {got} is outside [0, {range})")]
    ContributionOutOfRange { got: u64, range: u64 },

    #[error("unknown tie policy {0:?}, expected host, user or draw")]
    UnknownTiePolicy(String),

    #[error("interaction channel closed: {0}")]
    InteractionClosed(String),
}
