use crate::action::{ActionTable, ActionTransition};
use crate::config::GameConfig;
use crate::env::{Cell, MapOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::perception::Perception;
use crate::state::{EntityId, GameObject, Orientation, Position, WorldState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("character {0} not found")]
    ActorNotFound(EntityId),

    #[error("there's no cell at {destination}")]
    NoCell { destination: Position },

    #[error("no coordinate lies {direction} of {origin}")]
    OffGrid {
        origin: Position,
        direction: Orientation,
    },

    #[error("cell {destination} is not on the path")]
    NotOnPath { destination: Position },

    #[error("cell {destination} is blocked")]
    Blocked { destination: Position },

    #[error("character {actor} is not standing on a path cell at {position}")]
    Stranded { actor: EntityId, position: Position },

    #[error("item {item} carried by {actor} is not at {position}")]
    InventoryDesync {
        actor: EntityId,
        item: EntityId,
        position: Position,
    },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) => ErrorSeverity::Validation,
            Self::NoCell { .. }
            | Self::OffGrid { .. }
            | Self::NotOnPath { .. }
            | Self::Blocked { .. } => ErrorSeverity::Recoverable,
            Self::Stranded { .. } | Self::InventoryDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "MOVE_ACTOR_NOT_FOUND",
            Self::NoCell { .. } => "MOVE_NO_CELL",
            Self::OffGrid { .. } => "MOVE_OFF_GRID",
            Self::NotOnPath { .. } => "MOVE_NOT_ON_PATH",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::Stranded { .. } => "MOVE_STRANDED",
            Self::InventoryDesync { .. } => "MOVE_INVENTORY_DESYNC",
        }
    }
}

/// Cell at `destination`, provided a character may stand on it.
///
/// Checks run in order: the cell exists, is on the path, is not blocked.
pub(crate) fn enterable_cell<M: MapOracle + ?Sized>(
    map: &M,
    destination: Position,
) -> Result<Cell, MoveError> {
    let cell = map
        .cell(destination)
        .ok_or(MoveError::NoCell { destination })?;

    if !cell.on_path {
        return Err(MoveError::NotOnPath { destination });
    }
    if cell.blocked {
        return Err(MoveError::Blocked { destination });
    }

    Ok(cell)
}

/// Turns a character to face `orientation`. Always succeeds for a known
/// character; directional moves run it before the move itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceAction {
    pub actor: EntityId,
    pub orientation: Orientation,
}

impl FaceAction {
    pub fn new(actor: EntityId, orientation: Orientation) -> Self {
        Self { actor, orientation }
    }
}

impl ActionTransition for FaceAction {
    type Error = MoveError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn apply(&self, world: &mut WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        world
            .character_mut(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?
            .face(self.orientation);
        Ok(())
    }
}

/// Moves a character to an arbitrary cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub actor: EntityId,
    pub destination: Position,
}

impl MoveAction {
    pub fn new(actor: EntityId, destination: Position) -> Self {
        Self { actor, destination }
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = ();

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        world
            .character(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;

        enterable_cell(&world.map, self.destination)?;
        Ok(())
    }

    fn apply(&self, world: &mut WorldState, config: &GameConfig) -> Result<(), Self::Error> {
        let destination = enterable_cell(&world.map, self.destination)?.position;
        let actions = ActionTable::resolve(
            &Perception::configured(&world.map, destination, config),
            config.action_numbering,
        );

        let character = world
            .character_mut(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        character.relocate(destination);
        character.set_actions(actions);

        Ok(())
    }

    fn post_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        let character = world
            .character(self.actor)
            .ok_or(MoveError::ActorNotFound(self.actor))?;
        let position = character.position();

        if !world.map.cell(position).is_some_and(|cell| cell.is_enterable()) {
            return Err(MoveError::Stranded {
                actor: self.actor,
                position,
            });
        }

        if let Some(stray) = character
            .inventory()
            .items()
            .iter()
            .find(|item| item.location() != position)
        {
            return Err(MoveError::InventoryDesync {
                actor: self.actor,
                item: stray.id(),
                position,
            });
        }

        Ok(())
    }
}
