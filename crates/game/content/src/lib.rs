//! Data-driven content definitions and loaders.
//!
//! This crate builds playable levels from data files:
//! - Named tools (`"wrench"`, `"prybar"`) via [`ToolFactory`]
//! - Levels: cells, placed objects, and characters (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! All loaders use delve-core types directly with serde for RON/TOML deserialization.

pub mod tools;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tools::{FactoryError, ToolFactory};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, MapLoader};
