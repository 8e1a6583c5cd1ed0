//! Attributes shared by every placed or carried game object.

use std::fmt;

use bitflags::bitflags;

use super::{EntityId, Position};

bitflags! {
    /// Perception and interaction flags carried by every object.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ObjectFlags: u8 {
        const VISIBLE = 1 << 0;
        const INTERACTIVE = 1 << 1;
        const BLOCKING = 1 << 2;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}

/// Identity, flags, and location common to items, interfaces, and devices.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectBase {
    id: EntityId,
    pub name: String,
    pub description: String,
    pub flags: ObjectFlags,
    /// Authoritative while the object sits on the map; mirrors the holder's
    /// position while carried.
    pub position: Position,
}

impl ObjectBase {
    pub const DEFAULT_DESCRIPTION: &'static str = "game object";

    pub fn new(id: EntityId, position: Position) -> Self {
        Self {
            id,
            name: String::new(),
            description: Self::DEFAULT_DESCRIPTION.to_owned(),
            flags: ObjectFlags::default(),
            position,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(ObjectFlags::VISIBLE)
    }

    pub fn is_interactive(&self) -> bool {
        self.flags.contains(ObjectFlags::INTERACTIVE)
    }

    pub fn is_blocking(&self) -> bool {
        self.flags.contains(ObjectFlags::BLOCKING)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.flags.set(ObjectFlags::VISIBLE, visible);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.flags.set(ObjectFlags::INTERACTIVE, interactive);
    }
}

impl fmt::Display for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Anything that carries an [`ObjectBase`].
pub trait GameObject {
    fn base(&self) -> &ObjectBase;

    fn id(&self) -> EntityId {
        self.base().id()
    }

    fn location(&self) -> Position {
        self.base().position
    }
}
