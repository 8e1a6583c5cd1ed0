//! Error types for the action execution pipeline.

use crate::action::{
    ActionError, ActionTransition, GiveItemAction, MoveAction, TakeItemAction,
    UseInterfaceAction, UseToolAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    /// Facing and moving share [`MoveError`](crate::action::MoveError).
    #[error("move action failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("use interface action failed: {0}")]
    UseInterface(PhaseError<UseInterfaceAction>),

    #[error("take item action failed: {0}")]
    TakeItem(PhaseError<TakeItemAction>),

    #[error("give item action failed: {0}")]
    GiveItem(PhaseError<GiveItemAction>),

    #[error("use tool action failed: {0}")]
    UseTool(PhaseError<UseToolAction>),

    #[error(transparent)]
    Dispatch(#[from] ActionError),
}

impl ExecuteError {
    /// Phase that failed, or `None` when the action never reached the
    /// pipeline.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(e) => Some(e.phase),
            Self::UseInterface(e) => Some(e.phase),
            Self::TakeItem(e) => Some(e.phase),
            Self::GiveItem(e) => Some(e.phase),
            Self::UseTool(e) => Some(e.phase),
            Self::Dispatch(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(e) => e.error.severity(),
            Self::UseInterface(e) => e.error.severity(),
            Self::TakeItem(e) | Self::GiveItem(e) => e.error.severity(),
            Self::UseTool(e) => e.error.severity(),
            Self::Dispatch(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(e) => e.error.error_code(),
            Self::UseInterface(e) => e.error.error_code(),
            Self::TakeItem(e) | Self::GiveItem(e) => e.error.error_code(),
            Self::UseTool(e) => e.error.error_code(),
            Self::Dispatch(e) => e.error_code(),
        }
    }
}
