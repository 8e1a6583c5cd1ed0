//! Level loader.
//!
//! A level file lists the grid cells and everything placed on them:
//!
//! ```ron
//! (
//!     cells: [(2, 2, true, false), (2, 1, true, false)],
//!     items: [(id: 30, x: 2, y: 1, description: "a wrench", kind: Tool("wrench"))],
//!     interfaces: [(id: 10, x: 2, y: 1, facing: down, controls: Some(20))],
//!     devices: [(id: 20, x: 2, y: 1, kind: valve)],
//!     characters: [(id: 0, name: "player", x: 2, y: 2)],
//! )
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use delve_core::{
    CharacterState, Cell, DeviceKind, DeviceState, EntityId, GameConfig, GridMap, InterfaceState,
    ItemState, ObjectBase, ObjectFlags, Orientation, Position, ToolKind, WorldState,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::tools::ToolFactory;

/// Level structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    cells: Vec<(i32, i32, bool, bool)>, // (x, y, on_path, blocked)
    #[serde(default)]
    items: Vec<ItemSpec>,
    #[serde(default)]
    interfaces: Vec<InterfaceSpec>,
    #[serde(default)]
    devices: Vec<DeviceSpec>,
    #[serde(default)]
    characters: Vec<CharacterSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum ItemKindSpec {
    /// Specialised tool, built through [`ToolFactory`].
    Tool(String),
    GenericTool,
    Artifact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemSpec {
    id: u32,
    #[serde(default)]
    x: i32,
    #[serde(default)]
    y: i32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    inert: bool,
    kind: ItemKindSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InterfaceSpec {
    id: u32,
    x: i32,
    y: i32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    inert: bool,
    facing: Orientation,
    #[serde(default)]
    controls: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeviceSpec {
    id: u32,
    x: i32,
    y: i32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    inert: bool,
    kind: DeviceKind,
    #[serde(default)]
    facing: Option<Orientation>,
    #[serde(default)]
    active: bool,
    #[serde(default)]
    jammed: bool,
    /// A blocking device also blocks the cell it stands on.
    #[serde(default)]
    blocking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CharacterSpec {
    id: u32,
    name: String,
    x: i32,
    y: i32,
    #[serde(default)]
    facing: Option<Orientation>,
    #[serde(default)]
    items: Vec<ItemSpec>,
}

fn object_base(
    id: u32,
    position: Position,
    name: &str,
    description: &str,
    hidden: bool,
    inert: bool,
) -> ObjectBase {
    let mut base = ObjectBase::new(EntityId(id), position).with_name(name);
    if !description.is_empty() {
        base = base.with_description(description);
    }
    base.set_visible(!hidden);
    base.set_interactive(!inert);
    base
}

impl ItemSpec {
    fn build(&self) -> LoadResult<ItemState> {
        let base = object_base(
            self.id,
            Position::new(self.x, self.y),
            &self.name,
            &self.description,
            self.hidden,
            self.inert,
        );
        let item = match &self.kind {
            ItemKindSpec::Tool(kind) => ToolFactory::make_tool(kind, base)
                .map_err(|e| anyhow::anyhow!("Item {}: {}", self.id, e))?,
            ItemKindSpec::GenericTool => ItemState::tool(base, ToolKind::Generic),
            ItemKindSpec::Artifact => ItemState::artifact(base),
        };
        Ok(item)
    }
}

impl InterfaceSpec {
    fn build(&self) -> InterfaceState {
        let base = object_base(
            self.id,
            Position::new(self.x, self.y),
            &self.name,
            &self.description,
            self.hidden,
            self.inert,
        );
        let mut interface = InterfaceState::new(base, self.facing);
        interface.controls = self.controls.map(EntityId);
        interface
    }
}

impl DeviceSpec {
    fn build(&self) -> DeviceState {
        let mut base = object_base(
            self.id,
            Position::new(self.x, self.y),
            &self.name,
            &self.description,
            self.hidden,
            self.inert,
        );
        base.flags.set(ObjectFlags::BLOCKING, self.blocking);

        let mut device = DeviceState::new(base, self.kind)
            .with_active(self.active)
            .with_jammed(self.jammed);
        if let Some(facing) = self.facing {
            device = device.with_orientation(facing);
        }
        device
    }
}

/// Loader for levels from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a level from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON level file
    /// * `config` - Sight range and action numbering for the first action tables
    ///
    /// # Returns
    ///
    /// Returns a world with every character spawned and its first action table
    /// resolved.
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<WorldState> {
        let content = read_file(path)?;
        Self::parse(&content, config)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    /// Build a level from RON source.
    pub fn parse(source: &str, config: &GameConfig) -> LoadResult<WorldState> {
        let data: MapDataRon = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        Self::check_ids(&data)?;

        let mut map = GridMap::new();
        for &(x, y, on_path, blocked) in &data.cells {
            map.insert_cell(Cell::new(Position::new(x, y), on_path, blocked));
        }

        for spec in &data.items {
            map.place_item(spec.build()?);
        }

        for spec in &data.devices {
            let device = spec.build();
            if device.base.is_blocking() {
                let position = device.base.position;
                anyhow::ensure!(
                    map.set_blocked(position, true),
                    "Device {} stands on missing cell {}",
                    spec.id,
                    position
                );
            }
            map.place_device(device);
        }

        for spec in &data.interfaces {
            if let Some(device) = spec.controls {
                anyhow::ensure!(
                    data.devices.iter().any(|d| d.id == device),
                    "Interface {} controls unknown device {}",
                    spec.id,
                    device
                );
            }
            map.place_interface(spec.build());
        }

        let mut world = WorldState::new(map);
        for spec in &data.characters {
            let position = Position::new(spec.x, spec.y);
            let mut character = CharacterState::new(EntityId(spec.id), spec.name.as_str(), position);
            if let Some(facing) = spec.facing {
                character = character.with_orientation(facing);
            }
            for item in &spec.items {
                character = character.with_item(item.build()?)?;
            }
            world.spawn(character, config).map_err(|e| {
                anyhow::anyhow!("Character {} cannot start at {}: {}", spec.id, position, e)
            })?;
        }

        tracing::info!(
            "loaded map: {} cells, {} items, {} interfaces, {} devices, {} characters",
            data.cells.len(),
            data.items.len(),
            data.interfaces.len(),
            data.devices.len(),
            data.characters.len()
        );

        Ok(world)
    }

    /// Objects and characters share one id space.
    fn check_ids(data: &MapDataRon) -> LoadResult<()> {
        let carried = data.characters.iter().flat_map(|c| c.items.iter().map(|i| i.id));
        let ids = data
            .items
            .iter()
            .map(|i| i.id)
            .chain(data.interfaces.iter().map(|i| i.id))
            .chain(data.devices.iter().map(|d| d.id))
            .chain(data.characters.iter().map(|c| c.id))
            .chain(carried);

        let mut seen = BTreeSet::new();
        for id in ids {
            anyhow::ensure!(seen.insert(id), "Duplicate object id {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{
        ActionKind, ActionResult, DeviceEffect, GameEngine, GameObject, InterfaceOutcome, MapOracle,
    };
    use tempfile::TempDir;

    const LEVEL: &str = r#"(
        cells: [
            (2, 2, true, false),
            (2, 1, true, false),
            (3, 2, true, false),
            (1, 2, false, false),
        ],
        items: [
            (id: 30, x: 3, y: 2, description: "a rusty wrench", kind: Tool("Wrench")),
            (id: 31, x: 3, y: 2, kind: Artifact, hidden: true),
        ],
        interfaces: [
            (id: 10, x: 2, y: 1, facing: down, description: "a valve panel", controls: Some(20)),
        ],
        devices: [
            (id: 20, x: 2, y: 1, kind: valve, description: "a valve"),
            (id: 21, x: 1, y: 2, kind: door, blocking: true),
        ],
        characters: [
            (id: 0, name: "player", x: 2, y: 2, items: [(id: 40, kind: Tool("pry_bar"))]),
        ],
    )"#;

    #[test]
    fn parses_a_level() {
        let world = MapLoader::parse(LEVEL, &GameConfig::default()).unwrap();

        assert_eq!(world.map.cells().count(), 4);
        assert_eq!(
            world.map.item(EntityId(30)).and_then(ItemState::tool_kind),
            Some(ToolKind::Wrench)
        );
        assert!(!world.map.item(EntityId(31)).unwrap().base.is_visible());
        assert_eq!(
            world.map.interface(EntityId(10)).unwrap().controls,
            Some(EntityId(20))
        );
        assert_eq!(world.map.cell(Position::new(1, 2)).map(|c| c.blocked), Some(true));

        let player = world.character(EntityId::PLAYER).unwrap();
        assert_eq!(player.orientation(), Orientation::Up);
        assert_eq!(
            player.inventory().get(EntityId(40)).map(|item| item.location()),
            Some(Position::new(2, 2))
        );
        // the wrench shadows the panel under overlapping numbering
        assert_eq!(player.actions().len(), 1);
        assert_eq!(player.actions().get(1).map(|r| r.kind), Some(ActionKind::TakeItem));
    }

    #[test]
    fn loaded_level_is_playable() {
        let config = GameConfig::default();
        let mut world = MapLoader::parse(LEVEL, &config).unwrap();
        let mut engine = GameEngine::new(&mut world, &config);

        engine.do_action(EntityId::PLAYER, 1).unwrap();
        let key = engine
            .actions(EntityId::PLAYER)
            .unwrap()
            .key_for(EntityId(10))
            .unwrap();
        let result = engine.do_action(EntityId::PLAYER, key).unwrap();

        assert_eq!(
            result,
            ActionResult::UseInterface(InterfaceOutcome::Operated {
                device: EntityId(20),
                tool: ToolKind::Wrench,
                effect: DeviceEffect::Turned,
            })
        );
    }

    #[test]
    fn load_reads_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("level.ron");
        std::fs::write(&path, LEVEL).unwrap();

        let world = MapLoader::load(&path, &GameConfig::default()).unwrap();

        assert_eq!(world.characters().count(), 1);
    }

    #[test]
    fn character_on_an_unwalkable_cell_fails() {
        let source = r#"(
            cells: [(0, 0, false, false)],
            characters: [(id: 0, name: "player", x: 0, y: 0)],
        )"#;

        let error = MapLoader::parse(source, &GameConfig::default()).unwrap_err();

        assert!(error.to_string().contains("Character 0 cannot start"));
    }

    #[test]
    fn first_action_tables_use_the_configured_sight_range() {
        let source = r#"(
            cells: [(0, 0, true, false), (0, -1, true, false), (0, -2, true, false)],
            items: [(id: 1, x: 0, y: -2, kind: Artifact)],
            characters: [(id: 0, name: "player", x: 0, y: 0)],
        )"#;

        let near = MapLoader::parse(source, &GameConfig::default()).unwrap();
        let far = MapLoader::parse(source, &GameConfig::default().with_sight_range(2)).unwrap();

        assert!(near.character(EntityId::PLAYER).unwrap().actions().is_empty());
        assert_eq!(far.character(EntityId::PLAYER).unwrap().actions().len(), 1);
    }

    #[test]
    fn unknown_tool_type_fails() {
        let source = r#"(cells: [], items: [(id: 1, kind: Tool("hammer"))])"#;

        let error = MapLoader::parse(source, &GameConfig::default()).unwrap_err();

        assert!(error.to_string().contains("hammer"));
    }

    #[test]
    fn duplicate_ids_fail() {
        let source = r#"(
            cells: [(0, 0, true, false)],
            items: [(id: 5, kind: Artifact)],
            devices: [(id: 5, x: 0, y: 0, kind: generic)],
        )"#;

        let error = MapLoader::parse(source, &GameConfig::default()).unwrap_err();

        assert!(error.to_string().contains("Duplicate object id 5"));
    }

    #[test]
    fn dangling_control_fails() {
        let source = r#"(
            cells: [(0, 0, true, false)],
            interfaces: [(id: 1, x: 0, y: 0, facing: up, controls: Some(9))],
        )"#;

        assert!(MapLoader::parse(source, &GameConfig::default()).is_err());
    }

    #[test]
    fn missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = MapLoader::load(&temp_dir.path().join("nope.ron"), &GameConfig::default());

        assert!(result.is_err());
    }

    #[test]
    fn carried_items_ignore_their_listed_position() {
        let source = r#"(
            cells: [(4, 4, true, false)],
            characters: [(id: 2, name: "npc", x: 4, y: 4, facing: Some(left),
                items: [(id: 3, x: 9, y: 9, kind: GenericTool)])],
        )"#;

        let world = MapLoader::parse(source, &GameConfig::default()).unwrap();

        let npc = world.character(EntityId(2)).unwrap();
        assert_eq!(npc.orientation(), Orientation::Left);
        assert_eq!(npc.inventory().items()[0].location(), Position::new(4, 4));
        assert_eq!(npc.inventory().items()[0].id(), EntityId(3));
    }
}
