//! Keyed action table.
//!
//! The table maps a dense integer key to an [`ActionRecord`] naming the target
//! object and what to do with it. Records are plain data; the engine resolves
//! them against the world only when a key is dispatched.

use std::collections::BTreeMap;

use crate::config::ActionNumbering;
use crate::env::MapOracle;
use crate::perception::Perception;
use crate::state::{EntityId, GameObject};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Operate the interface (and whatever device it controls).
    UseInterface,
    /// Pick the item up off the map.
    TakeItem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub target: EntityId,
    pub kind: ActionKind,
}

impl ActionRecord {
    pub const fn new(target: EntityId, kind: ActionKind) -> Self {
        Self { target, kind }
    }
}

/// Snapshot of the actions available from one position.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTable {
    entries: BTreeMap<u32, ActionRecord>,
}

impl ActionTable {
    /// Derives the table from what `perception` sees.
    ///
    /// Interactive interfaces and interactive items are flattened separately
    /// (Up → Right → Down → Left, map order within a direction) and each list
    /// is numbered from 1. Under [`ActionNumbering::Overlapping`] the item
    /// entry replaces the interface entry sharing its key; under
    /// [`ActionNumbering::Sequential`] item keys continue after the last
    /// interface key.
    pub fn resolve<M>(perception: &Perception<'_, M>, numbering: ActionNumbering) -> Self
    where
        M: MapOracle + ?Sized,
    {
        let interfaces = perception.interactive_interfaces();
        let items = perception.interactive_items();

        let item_offset = match numbering {
            ActionNumbering::Overlapping => 0,
            ActionNumbering::Sequential => interfaces.len() as u32,
        };

        let mut entries = BTreeMap::new();
        for (index, interface) in interfaces.iter().enumerate() {
            entries.insert(
                index as u32 + 1,
                ActionRecord::new(interface.id(), ActionKind::UseInterface),
            );
        }
        for (index, item) in items.iter().enumerate() {
            entries.insert(
                item_offset + index as u32 + 1,
                ActionRecord::new(item.id(), ActionKind::TakeItem),
            );
        }

        Self { entries }
    }

    pub fn get(&self, key: u32) -> Option<ActionRecord> {
        self.entries.get(&key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, ActionRecord)> + '_ {
        self.entries.iter().map(|(key, record)| (*key, *record))
    }

    /// Key bound to `target`, if any.
    pub fn key_for(&self, target: EntityId) -> Option<u32> {
        self.iter()
            .find(|(_, record)| record.target == target)
            .map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Cell;
    use crate::state::{
        GridMap, InterfaceState, ItemState, ObjectBase, ObjectFlags, Orientation, Position,
        ToolKind,
    };

    const CENTER: Position = Position { x: 1, y: 1 };

    fn grid() -> GridMap {
        let mut map = GridMap::new();
        for y in 0..3 {
            for x in 0..3 {
                map.insert_cell(Cell::path(Position::new(x, y)));
            }
        }
        map
    }

    fn interface(map: &mut GridMap, id: u32, position: Position, facing: Orientation) {
        map.place_interface(InterfaceState::new(
            ObjectBase::new(EntityId(id), position),
            facing,
        ));
    }

    fn item(map: &mut GridMap, id: u32, position: Position) {
        map.place_item(ItemState::tool(
            ObjectBase::new(EntityId(id), position),
            ToolKind::Generic,
        ));
    }

    fn resolve(map: &GridMap, numbering: ActionNumbering) -> ActionTable {
        ActionTable::resolve(&Perception::new(map, CENTER), numbering)
    }

    #[test]
    fn keys_are_dense_and_follow_direction_order() {
        let mut map = grid();
        interface(&mut map, 10, Position::new(0, 1), Orientation::Right);
        interface(&mut map, 11, Position::new(1, 0), Orientation::Down);
        interface(&mut map, 12, Position::new(1, 2), Orientation::Up);

        let table = resolve(&map, ActionNumbering::Overlapping);

        assert_eq!(table.keys().collect::<Vec<_>>(), vec![1, 2, 3]);
        // Up, then Down, then Left
        assert_eq!(table.get(1).map(|r| r.target), Some(EntityId(11)));
        assert_eq!(table.get(2).map(|r| r.target), Some(EntityId(12)));
        assert_eq!(table.get(3).map(|r| r.target), Some(EntityId(10)));
    }

    #[test]
    fn items_overwrite_interfaces_sharing_a_key() {
        let mut map = grid();
        interface(&mut map, 10, Position::new(1, 0), Orientation::Down);
        item(&mut map, 20, Position::new(2, 1));

        let table = resolve(&map, ActionNumbering::Overlapping);

        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(1),
            Some(ActionRecord::new(EntityId(20), ActionKind::TakeItem))
        );
        assert_eq!(table.key_for(EntityId(10)), None);
    }

    #[test]
    fn overlapping_keeps_interface_keys_past_the_item_count() {
        let mut map = grid();
        interface(&mut map, 10, Position::new(1, 0), Orientation::Down);
        interface(&mut map, 11, Position::new(2, 1), Orientation::Left);
        item(&mut map, 20, Position::new(1, 2));

        let table = resolve(&map, ActionNumbering::Overlapping);

        assert_eq!(table.keys().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(table.get(1).map(|r| r.kind), Some(ActionKind::TakeItem));
        assert_eq!(
            table.get(2),
            Some(ActionRecord::new(EntityId(11), ActionKind::UseInterface))
        );
    }

    #[test]
    fn sequential_numbering_keeps_every_object_reachable() {
        let mut map = grid();
        interface(&mut map, 10, Position::new(1, 0), Orientation::Down);
        item(&mut map, 20, Position::new(2, 1));
        item(&mut map, 21, Position::new(0, 1));

        let table = resolve(&map, ActionNumbering::Sequential);

        assert_eq!(table.keys().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(table.key_for(EntityId(10)), Some(1));
        assert_eq!(table.key_for(EntityId(20)), Some(2));
        assert_eq!(table.key_for(EntityId(21)), Some(3));
    }

    #[test]
    fn non_interactive_and_unseen_objects_get_no_key() {
        let mut map = grid();
        // faces away from the observer
        interface(&mut map, 10, Position::new(1, 0), Orientation::Up);
        map.place_item(ItemState::artifact(
            ObjectBase::new(EntityId(20), Position::new(2, 1)).with_flags(ObjectFlags::VISIBLE),
        ));

        let table = resolve(&map, ActionNumbering::Overlapping);

        assert!(table.is_empty());
    }

    #[test]
    fn visible_interface_without_interactive_flag_gets_no_key() {
        let mut map = grid();
        map.place_interface(InterfaceState::new(
            ObjectBase::new(EntityId(10), Position::new(1, 0)).with_flags(ObjectFlags::VISIBLE),
            Orientation::Down,
        ));
        interface(&mut map, 11, Position::new(2, 1), Orientation::Left);

        let perception = Perception::new(&map, CENTER);
        let table = ActionTable::resolve(&perception, ActionNumbering::Sequential);

        assert_eq!(perception.visible_interfaces()[Orientation::Up].len(), 1);
        assert_eq!(table.key_for(EntityId(10)), None);
        assert_eq!(
            table.get(1),
            Some(ActionRecord::new(EntityId(11), ActionKind::UseInterface))
        );
        assert_eq!(table.len(), 1);
    }
}
