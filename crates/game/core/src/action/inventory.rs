//! Moving items between the map and inventories.

use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::state::{EntityId, GameObject, InventoryError, ItemState, WorldState};

/// Where a taken item comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSource {
    /// Lying on the map.
    Map,
    /// Carried by another character.
    Character(EntityId),
}

/// Moves an item into the actor's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TakeItemAction {
    pub actor: EntityId,
    pub item: EntityId,
    pub source: ItemSource,
}

impl TakeItemAction {
    pub fn new(actor: EntityId, item: EntityId, source: ItemSource) -> Self {
        Self {
            actor,
            item,
            source,
        }
    }

    fn ensure_room(&self, world: &WorldState) -> Result<(), InventoryError> {
        let inventory = world
            .character(self.actor)
            .ok_or(InventoryError::ActorNotFound(self.actor))?
            .inventory();
        if inventory.is_full() {
            return Err(InventoryError::Full {
                capacity: inventory.capacity(),
            });
        }
        Ok(())
    }

    fn take_from_source(&self, world: &mut WorldState) -> Result<ItemState, InventoryError> {
        let missing = InventoryError::ItemNotFound { item: self.item };
        match self.source {
            ItemSource::Map => world.map.remove_item(self.item).ok_or(missing),
            ItemSource::Character(holder) => world
                .character_mut(holder)
                .ok_or(InventoryError::ActorNotFound(holder))?
                .hand_over(self.item)
                .ok_or(missing),
        }
    }
}

impl ActionTransition for TakeItemAction {
    type Error = InventoryError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        self.ensure_room(world)?;

        let present = match self.source {
            ItemSource::Map => world.map.item(self.item).is_some(),
            ItemSource::Character(holder) => world
                .character(holder)
                .ok_or(InventoryError::ActorNotFound(holder))?
                .inventory()
                .contains(self.item),
        };
        if !present {
            return Err(InventoryError::ItemNotFound { item: self.item });
        }

        Ok(())
    }

    fn apply(&self, world: &mut WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        // Checked again so a failed pickup can never drop the item on the floor.
        self.ensure_room(world)?;

        let item = self.take_from_source(world)?;
        world
            .character_mut(self.actor)
            .ok_or(InventoryError::ActorNotFound(self.actor))?
            .pick_up(item)?;

        tracing::debug!(
            "character {} took item {} from {:?}",
            self.actor,
            self.item,
            self.source
        );
        Ok(())
    }

    fn post_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        let character = world
            .character(self.actor)
            .ok_or(InventoryError::ActorNotFound(self.actor))?;
        let held = character
            .inventory()
            .get(self.item)
            .ok_or(InventoryError::ItemNotFound { item: self.item })?;
        debug_assert_eq!(held.location(), character.position());
        Ok(())
    }
}

/// Removes an item from the actor's inventory and hands it back to the
/// caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GiveItemAction {
    pub actor: EntityId,
    pub item: EntityId,
}

impl GiveItemAction {
    pub fn new(actor: EntityId, item: EntityId) -> Self {
        Self { actor, item }
    }
}

impl ActionTransition for GiveItemAction {
    type Error = InventoryError;
    type Result = ItemState;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        let character = world
            .character(self.actor)
            .ok_or(InventoryError::ActorNotFound(self.actor))?;
        if !character.inventory().contains(self.item) {
            return Err(InventoryError::ItemNotFound { item: self.item });
        }
        Ok(())
    }

    fn apply(&self, world: &mut WorldState, _config: &GameConfig) -> Result<ItemState, Self::Error> {
        world
            .character_mut(self.actor)
            .ok_or(InventoryError::ActorNotFound(self.actor))?
            .hand_over(self.item)
            .ok_or(InventoryError::ItemNotFound { item: self.item })
    }
}
