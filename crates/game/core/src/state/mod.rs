//! Authoritative world state representation.
//!
//! This module owns the data structures that describe the grid, the objects
//! placed on it, and the characters walking it. Callers query this state
//! freely but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    ActivationGuard, CharacterState, D4, DeviceEffect, DeviceError, DeviceKind, DeviceState,
    EntityId, GameObject, GridMap, Inventory, InventoryError, InterfaceState, ItemKind, ItemState,
    ObjectBase, ObjectFlags, Orientation, Position, ToolKind, WorldState,
};
