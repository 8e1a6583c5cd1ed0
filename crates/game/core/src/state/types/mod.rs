pub mod character;
pub mod common;
pub mod d4;
pub mod device;
pub mod interface;
pub mod item;
pub mod object;
pub mod orientation;
pub mod world;

// Re-export character types
pub use character::{CharacterState, Inventory, InventoryError};

// Re-export common types
pub use common::{EntityId, Position};

// Re-export directional containers
pub use d4::D4;
pub use orientation::Orientation;

// Re-export object types
pub use device::{ActivationGuard, DeviceEffect, DeviceError, DeviceKind, DeviceState};
pub use interface::InterfaceState;
pub use item::{ItemKind, ItemState, ToolKind};
pub use object::{GameObject, ObjectBase, ObjectFlags};

// Re-export world types
pub use world::{GridMap, WorldState};
