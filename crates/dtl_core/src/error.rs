use crate::store::StoreError;
use thiserror::Error;

/// Failures raised by the round state machine.
///
/// `RoundNotComplete` is the one precondition violation; everything else is
/// invalid input. Callers can tell the two apart with [`ScoringError::is_precondition`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("shot index out of range: {index}")]
    InvalidShotIndex { index: usize },

    #[error("round is already completed")]
    RoundAlreadyCompleted,

    #[error("round is not complete: {scored}/25 shots scored")]
    RoundNotComplete { scored: usize },
}

impl ScoringError {
    /// True for "not ready yet" failures, false for plain bad input.
    pub fn is_precondition(&self) -> bool {
        matches!(self, ScoringError::RoundNotComplete { .. })
    }
}

pub type ScoringResult<T> = Result<T, ScoringError>;

/// Failures raised by a [`crate::session::RoundSession`].
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no active round")]
    NoActiveRound,

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type SessionResult<T> = Result<T, SessionError>;
