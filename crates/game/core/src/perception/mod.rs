//! Four-directional visibility queries.
//!
//! Each query starts from the raw per-direction candidates the map reports and
//! applies the rule for its category:
//!
//! - tools and artifacts: visible flag only
//! - interfaces: visible, and facing back toward the observer
//! - devices: visible, and standing on a path cell
//!
//! Composite queries concatenate the filtered categories direction by
//! direction, so the result is always a [`D4`] and keeps the order in which
//! action keys are later assigned.
mod report;

pub use report::build_object_report_text;

use std::fmt;

use crate::config::GameConfig;
use crate::env::MapOracle;
use crate::state::{
    D4, DeviceState, EntityId, GameObject, InterfaceState, ItemState, ObjectBase, Position,
};

/// Borrowed reference to any perceivable object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectRef<'a> {
    Item(&'a ItemState),
    Interface(&'a InterfaceState),
    Device(&'a DeviceState),
}

impl ObjectRef<'_> {
    pub fn base(&self) -> &ObjectBase {
        match self {
            ObjectRef::Item(item) => &item.base,
            ObjectRef::Interface(interface) => &interface.base,
            ObjectRef::Device(device) => &device.base,
        }
    }

    pub fn id(&self) -> EntityId {
        self.base().id()
    }
}

impl fmt::Display for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.base(), f)
    }
}

/// What can be perceived from a single coordinate.
#[derive(Debug)]
pub struct Perception<'a, M: MapOracle + ?Sized> {
    map: &'a M,
    origin: Position,
    sight_range: u32,
}

impl<M: MapOracle + ?Sized> Clone for Perception<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: MapOracle + ?Sized> Copy for Perception<'_, M> {}

impl<'a, M: MapOracle + ?Sized> Perception<'a, M> {
    /// Looks [`GameConfig::DEFAULT_SIGHT_RANGE`] cells in each direction.
    pub fn new(map: &'a M, origin: Position) -> Self {
        Self {
            map,
            origin,
            sight_range: GameConfig::DEFAULT_SIGHT_RANGE,
        }
    }

    /// Perception using the configured sight range.
    pub fn configured(map: &'a M, origin: Position, config: &GameConfig) -> Self {
        Self::new(map, origin).with_sight_range(config.sight_range)
    }

    #[must_use]
    pub fn with_sight_range(mut self, sight_range: u32) -> Self {
        self.sight_range = sight_range;
        self
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn sight_range(&self) -> u32 {
        self.sight_range
    }

    pub fn visible_tools(&self) -> D4<&'a ItemState> {
        self.map
            .d4_tools(self.origin, self.sight_range)
            .filter(|_, tool| tool.base.is_visible())
    }

    pub fn visible_artifacts(&self) -> D4<&'a ItemState> {
        self.map
            .d4_artifacts(self.origin, self.sight_range)
            .filter(|_, artifact| artifact.base.is_visible())
    }

    /// Tools followed by artifacts, per direction.
    pub fn visible_items(&self) -> D4<&'a ItemState> {
        self.visible_tools().concat(self.visible_artifacts())
    }

    /// Interfaces whose face points back along the direction being queried.
    pub fn visible_interfaces(&self) -> D4<&'a InterfaceState> {
        self.map
            .d4_interfaces(self.origin, self.sight_range)
            .filter(|direction, interface| interface.base.is_visible() && interface.faces(direction))
    }

    /// Devices standing on path cells. The device's own cell decides, not
    /// the observer's.
    pub fn visible_devices(&self) -> D4<&'a DeviceState> {
        let map = self.map;
        map.d4_devices(self.origin, self.sight_range).filter(|_, device| {
            device.base.is_visible() && map.path_contains(device.location())
        })
    }

    /// Interfaces followed by devices, per direction.
    pub fn visible_components(&self) -> D4<ObjectRef<'a>> {
        self.visible_interfaces()
            .map(ObjectRef::Interface)
            .concat(self.visible_devices().map(ObjectRef::Device))
    }

    /// Components followed by items, per direction.
    pub fn visible_objects(&self) -> D4<ObjectRef<'a>> {
        self.visible_components()
            .concat(self.visible_items().map(ObjectRef::Item))
    }

    pub fn interactive_objects(&self) -> D4<ObjectRef<'a>> {
        self.visible_objects()
            .filter(|_, object| object.base().is_interactive())
    }

    /// Visible interactive interfaces, flattened Up → Right → Down → Left.
    pub fn interactive_interfaces(&self) -> Vec<&'a InterfaceState> {
        self.visible_interfaces()
            .flatten()
            .into_iter()
            .filter(|interface| interface.base.is_interactive())
            .collect()
    }

    /// Visible interactive items, flattened Up → Right → Down → Left.
    pub fn interactive_items(&self) -> Vec<&'a ItemState> {
        self.visible_items()
            .flatten()
            .into_iter()
            .filter(|item| item.base.is_interactive())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Cell;
    use crate::state::{DeviceKind, GridMap, ObjectFlags, Orientation, ToolKind};

    const CENTER: Position = Position { x: 2, y: 2 };

    /// 5x5 open grid, every cell on the path.
    fn open_grid() -> GridMap {
        let mut map = GridMap::new();
        for y in 0..5 {
            for x in 0..5 {
                map.insert_cell(Cell::path(Position::new(x, y)));
            }
        }
        map
    }

    fn ids<T: GameObject>(list: &[&T]) -> Vec<EntityId> {
        list.iter().map(|object| object.id()).collect()
    }

    #[test]
    fn returns_exactly_four_directions_for_every_category() {
        let map = open_grid();
        let perception = Perception::new(&map, CENTER);

        assert_eq!(perception.visible_tools().into_inner().len(), 4);
        assert_eq!(perception.visible_devices().into_inner().len(), 4);
        assert!(perception.visible_objects().is_empty());
    }

    #[test]
    fn hidden_items_are_filtered_out() {
        let mut map = open_grid();
        map.place_item(ItemState::tool(
            ObjectBase::new(EntityId(1), Position::new(2, 1)),
            ToolKind::Wrench,
        ));
        map.place_item(ItemState::tool(
            ObjectBase::new(EntityId(2), Position::new(2, 1)).with_flags(ObjectFlags::INTERACTIVE),
            ToolKind::PryBar,
        ));

        let tools = Perception::new(&map, CENTER).visible_tools();

        assert_eq!(ids(&tools[Orientation::Up]), vec![EntityId(1)]);
    }

    #[test]
    fn interface_is_visible_from_exactly_the_side_it_faces() {
        let neighbours = [
            (Orientation::Up, Position::new(2, 1)),
            (Orientation::Right, Position::new(3, 2)),
            (Orientation::Down, Position::new(2, 3)),
            (Orientation::Left, Position::new(1, 2)),
        ];

        for facing in Orientation::ALL {
            let mut map = open_grid();
            for (index, (_, position)) in neighbours.iter().enumerate() {
                map.place_interface(InterfaceState::new(
                    ObjectBase::new(EntityId(index as u32), *position),
                    facing,
                ));
            }

            let visible = Perception::new(&map, CENTER).visible_interfaces();

            for (direction, list) in visible.iter() {
                if direction == facing.inverse() {
                    assert_eq!(list.len(), 1, "facing {facing} seen from {direction}");
                } else {
                    assert!(list.is_empty(), "facing {facing} seen from {direction}");
                }
            }
        }
    }

    #[test]
    fn device_off_path_disappears_regardless_of_visible_flag() {
        let mut map = open_grid();
        map.place_device(DeviceState::new(
            ObjectBase::new(EntityId(7), Position::new(3, 2)),
            DeviceKind::Valve,
        ));
        assert_eq!(
            ids(&Perception::new(&map, CENTER).visible_devices()[Orientation::Right]),
            vec![EntityId(7)]
        );

        map.set_on_path(Position::new(3, 2), false);

        let perception = Perception::new(&map, CENTER);
        assert!(perception.visible_devices().is_empty());
        assert!(perception.visible_components().is_empty());
        assert!(perception.visible_objects().is_empty());
    }

    #[test]
    fn device_path_check_uses_device_cell_not_observer_cell() {
        let mut map = open_grid();
        map.set_on_path(CENTER, false);
        map.place_device(DeviceState::new(
            ObjectBase::new(EntityId(7), Position::new(2, 3)),
            DeviceKind::Door,
        ));

        let devices = Perception::new(&map, CENTER).visible_devices();

        assert_eq!(ids(&devices[Orientation::Down]), vec![EntityId(7)]);
    }

    #[test]
    fn composites_concatenate_per_direction_in_category_order() {
        let mut map = open_grid();
        let up = Position::new(2, 1);
        map.place_item(ItemState::artifact(ObjectBase::new(EntityId(1), up)));
        map.place_item(ItemState::tool(ObjectBase::new(EntityId(2), up), ToolKind::Generic));
        map.place_device(DeviceState::new(
            ObjectBase::new(EntityId(3), up),
            DeviceKind::Generic,
        ));
        map.place_interface(InterfaceState::new(
            ObjectBase::new(EntityId(4), up),
            Orientation::Down,
        ));

        let objects: Vec<_> = Perception::new(&map, CENTER).visible_objects()[Orientation::Up]
            .iter()
            .map(ObjectRef::id)
            .collect();

        // interfaces, devices, tools, artifacts
        assert_eq!(
            objects,
            vec![EntityId(4), EntityId(3), EntityId(2), EntityId(1)]
        );
    }

    #[test]
    fn sight_range_decides_how_far_each_direction_reaches() {
        let mut map = open_grid();
        map.place_item(ItemState::artifact(ObjectBase::new(
            EntityId(1),
            Position::new(2, 0),
        )));

        let near = Perception::new(&map, CENTER);
        let far = Perception::configured(&map, CENTER, &GameConfig::new().with_sight_range(2));

        assert!(near.visible_items().is_empty());
        assert_eq!(ids(&far.visible_items()[Orientation::Up]), vec![EntityId(1)]);
    }

    #[test]
    fn interactive_objects_drop_non_interactive_entries() {
        let mut map = open_grid();
        map.place_item(ItemState::artifact(
            ObjectBase::new(EntityId(1), Position::new(1, 2)).with_flags(ObjectFlags::VISIBLE),
        ));
        map.place_item(ItemState::artifact(ObjectBase::new(
            EntityId(2),
            Position::new(1, 2),
        )));

        let perception = Perception::new(&map, CENTER);

        assert_eq!(perception.visible_objects()[Orientation::Left].len(), 2);
        let interactive: Vec<_> = perception.interactive_objects()[Orientation::Left]
            .iter()
            .map(ObjectRef::id)
            .collect();
        assert_eq!(interactive, vec![EntityId(2)]);
    }
}
