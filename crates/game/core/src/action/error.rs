//! Action dispatch errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors raised while resolving a key against a character's action table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Character not found in the world.
    #[error("character {0} not found")]
    ActorNotFound(EntityId),

    /// The key is not bound in the current action table. Refresh the table
    /// before retrying.
    #[error("there is no action defined for key {key}")]
    UnknownKey { key: u32 },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Validation,
            Self::UnknownKey { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            Self::UnknownKey { .. } => "ACTION_UNKNOWN_KEY",
        }
    }
}
