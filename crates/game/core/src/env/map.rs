use crate::state::{D4, DeviceState, InterfaceState, ItemState, Position};

/// Read-only view over grid cells, path membership, and per-direction object
/// registries.
///
/// The `d4_*` registries return the raw candidates for each direction in
/// map-defined order, looking at most `range` cells away; no visibility
/// filtering happens here.
pub trait MapOracle {
    fn cell(&self, position: Position) -> Option<Cell>;

    /// Returns true when the cell at `position` belongs to the walkable path.
    fn path_contains(&self, position: Position) -> bool;

    fn d4_tools(&self, origin: Position, range: u32) -> D4<&ItemState>;
    fn d4_artifacts(&self, origin: Position, range: u32) -> D4<&ItemState>;
    fn d4_interfaces(&self, origin: Position, range: u32) -> D4<&InterfaceState>;
    fn d4_devices(&self, origin: Position, range: u32) -> D4<&DeviceState>;
}

/// Single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub position: Position,
    pub on_path: bool,
    pub blocked: bool,
}

impl Cell {
    pub const fn new(position: Position, on_path: bool, blocked: bool) -> Self {
        Self {
            position,
            on_path,
            blocked,
        }
    }

    /// Open path cell.
    pub const fn path(position: Position) -> Self {
        Self::new(position, true, false)
    }

    /// A character may only stand on unblocked path cells.
    pub const fn is_enterable(&self) -> bool {
        self.on_path && !self.blocked
    }
}
