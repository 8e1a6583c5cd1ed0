//! Action domain.
//!
//! Every player-turn operation is a concrete action type implementing
//! [`ActionTransition`]. The engine drives each one through
//! `pre_validate → apply → post_validate`, so a rejected action never leaves
//! the world half-mutated.
//!
//! # Module Structure
//!
//! - `table`: keyed action table derived from what a character perceives
//! - `error`: dispatch errors (`ActionError`)
//! - `movement`: facing and moving (`FaceAction`, `MoveAction`)
//! - `interact`: using interfaces (`UseInterfaceAction`)
//! - `inventory`: taking and giving items
//! - `tool`: the tool-on-device activation protocol (`UseToolAction`)

mod error;
mod interact;
mod inventory;
mod movement;
mod table;
mod tool;

pub use error::ActionError;
pub use interact::{InteractError, InterfaceOutcome, UseInterfaceAction};
pub use inventory::{GiveItemAction, ItemSource, TakeItemAction};
pub use movement::{FaceAction, MoveAction, MoveError};
pub(crate) use movement::enterable_cell;
pub use table::{ActionKind, ActionRecord, ActionTable};
pub use tool::{ToolError, UseToolAction, operate_device, use_tool};

use crate::config::GameConfig;
use crate::state::{DeviceEffect, EntityId, ItemState, WorldState};

/// Defines how a concrete action mutates world state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the character performing this action.
    fn actor(&self) -> EntityId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the world directly. Implementations may
    /// assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        world: &mut WorldState,
        config: &GameConfig,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Any player-turn action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Face(FaceAction),
    Move(MoveAction),
    UseInterface(UseInterfaceAction),
    TakeItem(TakeItemAction),
    GiveItem(GiveItemAction),
    UseTool(UseToolAction),
}

impl Action {
    pub fn actor(&self) -> EntityId {
        match self {
            Action::Face(action) => action.actor(),
            Action::Move(action) => action.actor(),
            Action::UseInterface(action) => action.actor(),
            Action::TakeItem(action) => action.actor(),
            Action::GiveItem(action) => action.actor(),
            Action::UseTool(action) => action.actor(),
        }
    }

    /// Builds the action an action-table entry stands for.
    pub fn from_record(actor: EntityId, record: ActionRecord) -> Self {
        match record.kind {
            ActionKind::UseInterface => {
                Action::UseInterface(UseInterfaceAction::new(actor, record.target))
            }
            ActionKind::TakeItem => {
                Action::TakeItem(TakeItemAction::new(actor, record.target, ItemSource::Map))
            }
        }
    }
}

/// Action-specific outcome returned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    Face,
    Move,
    UseInterface(InterfaceOutcome),
    TakeItem,
    GiveItem(ItemState),
    UseTool(DeviceEffect),
}
