//! Deterministic perception and interaction rules for a grid exploration game.
//!
//! `delve-core` defines what a character can see in the four cardinal
//! directions, which of those objects it can interact with, how player input
//! keys map to interactions, when a move is legal, and how tools activate
//! devices. All state mutation flows through [`engine::GameEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod perception;
pub mod state;

pub use action::{
    Action, ActionError, ActionKind, ActionRecord, ActionResult, ActionTable, ActionTransition,
    FaceAction, GiveItemAction, InteractError, InterfaceOutcome, ItemSource, MoveAction,
    MoveError, TakeItemAction, ToolError, UseInterfaceAction, UseToolAction, use_tool,
};
pub use config::{ActionNumbering, GameConfig};
pub use engine::{ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{Cell, MapOracle};
pub use error::{ErrorSeverity, GameError};
pub use perception::{ObjectRef, Perception, build_object_report_text};
pub use state::{
    ActivationGuard, CharacterState, D4, DeviceEffect, DeviceError, DeviceKind, DeviceState,
    EntityId, GameObject, GridMap, Inventory, InventoryError, InterfaceState, ItemKind, ItemState,
    ObjectBase, ObjectFlags, Orientation, Position, ToolKind, WorldState,
};
