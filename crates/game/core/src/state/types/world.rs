use std::collections::BTreeMap;

use super::{
    CharacterState, D4, DeviceState, EntityId, GameObject, InterfaceState, ItemState, Orientation,
    Position,
};
use crate::action::{ActionTable, MoveError, enterable_cell};
use crate::config::GameConfig;
use crate::env::{Cell, MapOracle};
use crate::perception::Perception;

/// Everything that exists in a level: the grid with its placed objects, and
/// the characters walking it.
///
/// Characters refer to the world only through their [`EntityId`]; the world
/// owns both the map and the characters.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub map: GridMap,
    characters: Vec<CharacterState>,
}

impl WorldState {
    pub fn new(map: GridMap) -> Self {
        Self {
            map,
            characters: Vec::new(),
        }
    }

    /// Places a character and derives its first action table from what it
    /// can see at the start position.
    ///
    /// The start position must be a cell a character could move onto.
    pub fn spawn(
        &mut self,
        mut character: CharacterState,
        config: &GameConfig,
    ) -> Result<(), MoveError> {
        let position = character.position();
        enterable_cell(&self.map, position)?;
        character.set_actions(ActionTable::resolve(
            &Perception::configured(&self.map, position, config),
            config.action_numbering,
        ));

        tracing::debug!(
            "spawned character {} at {} with {} actions",
            character.id(),
            position,
            character.actions().len()
        );

        match self.characters.iter_mut().find(|c| c.id() == character.id()) {
            Some(existing) => *existing = character,
            None => self.characters.push(character),
        }
        Ok(())
    }

    pub fn character(&self, id: EntityId) -> Option<&CharacterState> {
        self.characters.iter().find(|character| character.id() == id)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut CharacterState> {
        self.characters
            .iter_mut()
            .find(|character| character.id() == id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterState> {
        self.characters.iter()
    }

    /// The map cell under a character, read from the map as it is now.
    pub fn cell_of(&self, id: EntityId) -> Option<Cell> {
        self.map.cell(self.character(id)?.position())
    }

    /// Re-derives one character's action table from what it sees now.
    pub fn refresh_actions(&mut self, id: EntityId, config: &GameConfig) -> Option<&ActionTable> {
        let position = self.character(id)?.position();
        let actions = ActionTable::resolve(
            &Perception::configured(&self.map, position, config),
            config.action_numbering,
        );
        tracing::debug!("character {} has {} actions", id, actions.len());

        let character = self.character_mut(id)?;
        character.set_actions(actions);
        Some(character.actions())
    }

    /// Re-derives every character's action table, e.g. after the map changed.
    pub fn refresh_all_actions(&mut self, config: &GameConfig) {
        let ids: Vec<EntityId> = self.characters.iter().map(CharacterState::id).collect();
        for id in ids {
            self.refresh_actions(id, config);
        }
    }

    /// Perception rooted at the character's current position.
    pub fn perception(
        &self,
        id: EntityId,
        config: &GameConfig,
    ) -> Option<Perception<'_, GridMap>> {
        let character = self.character(id)?;
        Some(Perception::configured(&self.map, character.position(), config))
    }
}

/// Grid of cells plus the objects placed on them.
///
/// Object registries keep placement order, which is the order candidates are
/// reported in for each direction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    cells: BTreeMap<Position, Cell>,
    items: Vec<ItemState>,
    interfaces: Vec<InterfaceState>,
    devices: Vec<DeviceState>,
}

impl Default for GridMap {
    fn default() -> Self {
        Self::new()
    }
}

impl GridMap {
    pub fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
            items: Vec::new(),
            interfaces: Vec::new(),
            devices: Vec::new(),
        }
    }

    pub fn insert_cell(&mut self, cell: Cell) {
        self.cells.insert(cell.position, cell);
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Returns false when there is no cell at `position`.
    pub fn set_blocked(&mut self, position: Position, blocked: bool) -> bool {
        match self.cells.get_mut(&position) {
            Some(cell) => {
                cell.blocked = blocked;
                true
            }
            None => false,
        }
    }

    /// Returns false when there is no cell at `position`.
    pub fn set_on_path(&mut self, position: Position, on_path: bool) -> bool {
        match self.cells.get_mut(&position) {
            Some(cell) => {
                cell.on_path = on_path;
                true
            }
            None => false,
        }
    }

    pub fn place_item(&mut self, item: ItemState) {
        self.items.push(item);
    }

    pub fn place_interface(&mut self, interface: InterfaceState) {
        self.interfaces.push(interface);
    }

    pub fn place_device(&mut self, device: DeviceState) {
        self.devices.push(device);
    }

    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn interfaces(&self) -> &[InterfaceState] {
        &self.interfaces
    }

    pub fn devices(&self) -> &[DeviceState] {
        &self.devices
    }

    pub fn item(&self, id: EntityId) -> Option<&ItemState> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn interface(&self, id: EntityId) -> Option<&InterfaceState> {
        self.interfaces.iter().find(|interface| interface.id() == id)
    }

    pub fn device(&self, id: EntityId) -> Option<&DeviceState> {
        self.devices.iter().find(|device| device.id() == id)
    }

    pub fn device_mut(&mut self, id: EntityId) -> Option<&mut DeviceState> {
        self.devices.iter_mut().find(|device| device.id() == id)
    }

    /// Takes an item off the map, keeping the order of the remaining ones.
    pub fn remove_item(&mut self, id: EntityId) -> Option<ItemState> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Positions seen from `origin` looking up to `range` cells along
    /// `direction`, nearest first.
    ///
    /// The walk stops at the first missing cell and after the first blocked
    /// one: a blocked cell can be seen but not seen past. It also ends at the
    /// edge of the coordinate space.
    pub fn sight_line(
        &self,
        origin: Position,
        direction: Orientation,
        range: u32,
    ) -> Vec<Position> {
        let range = i32::try_from(range).unwrap_or(i32::MAX);
        let mut line = Vec::new();
        for distance in 1..=range {
            let Some(position) = origin.step(direction, distance) else {
                break;
            };
            let Some(cell) = self.cells.get(&position) else {
                break;
            };
            line.push(position);
            if cell.blocked {
                break;
            }
        }
        line
    }

    fn d4_from<'a, T, I>(&self, origin: Position, range: u32, objects: I) -> D4<&'a T>
    where
        T: GameObject + 'a,
        I: Iterator<Item = &'a T> + Clone,
    {
        D4::from_fn(|direction| {
            self.sight_line(origin, direction, range)
                .into_iter()
                .flat_map(|position| {
                    objects
                        .clone()
                        .filter(move |object| object.location() == position)
                })
                .collect()
        })
    }
}

impl MapOracle for GridMap {
    fn cell(&self, position: Position) -> Option<Cell> {
        self.cells.get(&position).copied()
    }

    fn path_contains(&self, position: Position) -> bool {
        self.cells.get(&position).is_some_and(|cell| cell.on_path)
    }

    fn d4_tools(&self, origin: Position, range: u32) -> D4<&ItemState> {
        self.d4_from(origin, range, self.items.iter().filter(|item| item.is_tool()))
    }

    fn d4_artifacts(&self, origin: Position, range: u32) -> D4<&ItemState> {
        self.d4_from(
            origin,
            range,
            self.items.iter().filter(|item| item.is_artifact()),
        )
    }

    fn d4_interfaces(&self, origin: Position, range: u32) -> D4<&InterfaceState> {
        self.d4_from(origin, range, self.interfaces.iter())
    }

    fn d4_devices(&self, origin: Position, range: u32) -> D4<&DeviceState> {
        self.d4_from(origin, range, self.devices.iter())
    }
}
