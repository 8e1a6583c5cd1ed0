//! Characters and the inventories they carry.
//!
//! # Invariants
//!
//! - `position` is an enterable map cell; the cell itself is read from the
//!   map through [`super::WorldState::cell_of`]
//! - every carried item's location equals `position`
//! - `actions` is the table derived for the current position, replaced
//!   wholesale on every recomputation

use arrayvec::ArrayVec;

use super::{DeviceState, EntityId, GameObject, ItemState, Orientation, Position};
use crate::action::ActionTable;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("character {0} not found")]
    ActorNotFound(EntityId),

    #[error("item {item} not found")]
    ItemNotFound { item: EntityId },

    #[error("inventory is full ({capacity} slots)")]
    Full { capacity: usize },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Validation,
            Self::ItemNotFound { .. } | Self::Full { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "INVENTORY_ACTOR_NOT_FOUND",
            Self::ItemNotFound { .. } => "INVENTORY_ITEM_NOT_FOUND",
            Self::Full { .. } => "INVENTORY_FULL",
        }
    }
}

/// Ordered, bounded item container owned by a character.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: ArrayVec<ItemState, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self {
            items: ArrayVec::new(),
        }
    }

    pub const fn capacity(&self) -> usize {
        GameConfig::MAX_INVENTORY_SLOTS
    }

    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    pub fn get(&self, item: EntityId) -> Option<&ItemState> {
        self.items.iter().find(|held| held.id() == item)
    }

    pub fn contains(&self, item: EntityId) -> bool {
        self.get(item).is_some()
    }

    /// First carried tool, in pickup order, that can activate `device`.
    pub fn first_tool_for(&self, device: &DeviceState) -> Option<&ItemState> {
        self.items.iter().find(|held| held.can_activate(device))
    }

    pub fn add(&mut self, item: ItemState) -> Result<(), InventoryError> {
        let capacity = self.capacity();
        self.items
            .try_push(item)
            .map_err(|_| InventoryError::Full { capacity })
    }

    pub fn remove(&mut self, item: EntityId) -> Option<ItemState> {
        let index = self.items.iter().position(|held| held.id() == item)?;
        Some(self.items.remove(index))
    }

    fn relocate(&mut self, position: Position) {
        for item in &mut self.items {
            item.base.position = position;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    id: EntityId,
    pub name: String,
    position: Position,
    orientation: Orientation,
    inventory: Inventory,
    actions: ActionTable,
}

impl CharacterState {
    /// Creates a character facing up with an empty inventory. The action
    /// table is filled in when the character is spawned into a world.
    pub fn new(id: EntityId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            orientation: Orientation::Up,
            inventory: Inventory::empty(),
            actions: ActionTable::default(),
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Adds a starting item, moving it to the character's position.
    pub fn with_item(mut self, item: ItemState) -> Result<Self, InventoryError> {
        self.pick_up(item)?;
        Ok(self)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// `(x, y)` pair of the current position.
    pub fn location(&self) -> (i32, i32) {
        (self.position.x, self.position.y)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Cached action table for the current position.
    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    pub(crate) fn face(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Moves to `position`, carrying every held item along.
    pub(crate) fn relocate(&mut self, position: Position) {
        self.position = position;
        self.inventory.relocate(position);
    }

    pub(crate) fn set_actions(&mut self, actions: ActionTable) {
        self.actions = actions;
    }

    /// Stores `item`, which from now on mirrors this character's position.
    pub(crate) fn pick_up(&mut self, mut item: ItemState) -> Result<(), InventoryError> {
        item.base.position = self.position;
        self.inventory.add(item)
    }

    pub(crate) fn hand_over(&mut self, item: EntityId) -> Option<ItemState> {
        self.inventory.remove(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ObjectBase, ToolKind};

    fn wrench(id: u32, position: Position) -> ItemState {
        ItemState::tool(ObjectBase::new(EntityId(id), position), ToolKind::Wrench)
    }

    #[test]
    fn new_character_faces_up_with_empty_inventory() {
        let character = CharacterState::new(EntityId::PLAYER, "player", Position::new(4, 2));

        assert_eq!(character.orientation(), Orientation::Up);
        assert_eq!(character.location(), (4, 2));
        assert!(character.inventory().is_empty());
        assert!(character.actions().is_empty());
    }

    #[test]
    fn picked_up_items_take_the_holder_position() {
        let character = CharacterState::new(EntityId::PLAYER, "player", Position::new(1, 1))
            .with_item(wrench(5, Position::new(9, 9)))
            .unwrap();

        let held = character.inventory().get(EntityId(5)).unwrap();
        assert_eq!(held.location(), Position::new(1, 1));
    }

    #[test]
    fn relocate_moves_every_carried_item() {
        let mut character = CharacterState::new(EntityId::PLAYER, "player", Position::ORIGIN)
            .with_item(wrench(5, Position::ORIGIN))
            .unwrap()
            .with_item(wrench(6, Position::ORIGIN))
            .unwrap();

        character.relocate(Position::new(3, 0));

        assert_eq!(character.position(), Position::new(3, 0));
        assert!(
            character
                .inventory()
                .items()
                .iter()
                .all(|item| item.location() == Position::new(3, 0))
        );
    }

    #[test]
    fn inventory_rejects_items_past_capacity() {
        let mut inventory = Inventory::empty();
        for id in 0..GameConfig::MAX_INVENTORY_SLOTS as u32 {
            inventory.add(wrench(id, Position::ORIGIN)).unwrap();
        }

        let overflow = inventory.add(wrench(99, Position::ORIGIN));

        assert_eq!(
            overflow,
            Err(InventoryError::Full {
                capacity: GameConfig::MAX_INVENTORY_SLOTS
            })
        );
        assert!(!inventory.contains(EntityId(99)));
    }

    #[test]
    fn remove_preserves_pickup_order() {
        let mut inventory = Inventory::empty();
        for id in 1..=3 {
            inventory.add(wrench(id, Position::ORIGIN)).unwrap();
        }

        let removed = inventory.remove(EntityId(2)).map(|item| item.id());

        assert_eq!(removed, Some(EntityId(2)));
        let remaining: Vec<_> = inventory.items().iter().map(GameObject::id).collect();
        assert_eq!(remaining, vec![EntityId(1), EntityId(3)]);
    }
}
