//! Traits describing the map collaborator.
//!
//! The perception engine only ever reads the map through [`MapOracle`], so a
//! different storage or pathfinding backend can be dropped in without touching
//! the visibility rules.
mod map;

pub use map::{Cell, MapOracle};
