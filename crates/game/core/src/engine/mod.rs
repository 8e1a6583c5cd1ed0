//! Action execution pipeline.
//!
//! The [`GameEngine`] is the only way gameplay mutates a [`WorldState`]. Every
//! action runs `pre_validate → apply → post_validate`, and the engine keeps
//! cached action tables current once the map changes underneath them.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{
    Action, ActionError, ActionResult, ActionTable, FaceAction, GiveItemAction, ItemSource,
    MoveAction, MoveError, TakeItemAction, UseInterfaceAction, UseToolAction,
};
use crate::config::GameConfig;
use crate::perception::{Perception, build_object_report_text};
use crate::state::{
    D4, DeviceEffect, EntityId, GridMap, ItemState, Orientation, Position, WorldState,
};

/// Game engine bound to one world and its configuration.
pub struct GameEngine<'a> {
    world: &'a mut WorldState,
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(world: &'a mut WorldState, config: &'a GameConfig) -> Self {
        Self { world, config }
    }

    pub fn world(&self) -> &WorldState {
        self.world
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Executes an action by routing it through its transition pipeline.
    ///
    /// Actions that change what is on the map (taking an item off it,
    /// operating a device) re-derive every character's action table before
    /// returning.
    pub fn execute(&mut self, action: &Action) -> Result<ActionResult, ExecuteError> {
        let result = transition::execute_transition(action, self.world, self.config);

        match &result {
            Ok(outcome) => tracing::debug!("{:?} -> {:?}", action, outcome),
            Err(error) => tracing::debug!("{:?} rejected: {}", action, error),
        }
        let result = result?;

        let map_changed = match action {
            Action::TakeItem(take) => take.source == ItemSource::Map,
            Action::UseInterface(_) | Action::UseTool(_) => true,
            Action::Face(_) | Action::Move(_) | Action::GiveItem(_) => false,
        };
        if map_changed {
            self.world.refresh_all_actions(self.config);
        }

        Ok(result)
    }

    /// Moves `actor` to an arbitrary cell without changing its facing.
    pub fn move_to(&mut self, actor: EntityId, destination: Position) -> Result<(), ExecuteError> {
        self.execute(&Action::Move(MoveAction::new(actor, destination)))?;
        Ok(())
    }

    /// Turns `actor` toward `direction`, then tries to step one cell that way.
    ///
    /// The turn always sticks, even when the step is rejected.
    pub fn step(&mut self, actor: EntityId, direction: Orientation) -> Result<(), ExecuteError> {
        self.execute(&Action::Face(FaceAction::new(actor, direction)))?;

        let origin = self
            .world
            .character(actor)
            .ok_or(ActionError::ActorNotFound(actor))?
            .position();
        let Some(destination) = origin.step(direction, 1) else {
            tracing::debug!("character {} cannot step {} of {}", actor, direction, origin);
            return Err(ExecuteError::Move(TransitionPhaseError::new(
                TransitionPhase::PreValidate,
                MoveError::OffGrid { origin, direction },
            )));
        };
        self.move_to(actor, destination)
    }

    pub fn move_up(&mut self, actor: EntityId) -> Result<(), ExecuteError> {
        self.step(actor, Orientation::Up)
    }

    pub fn move_right(&mut self, actor: EntityId) -> Result<(), ExecuteError> {
        self.step(actor, Orientation::Right)
    }

    pub fn move_down(&mut self, actor: EntityId) -> Result<(), ExecuteError> {
        self.step(actor, Orientation::Down)
    }

    pub fn move_left(&mut self, actor: EntityId) -> Result<(), ExecuteError> {
        self.step(actor, Orientation::Left)
    }

    /// Cached action table of `actor`.
    pub fn actions(&self, actor: EntityId) -> Result<&ActionTable, ActionError> {
        self.world
            .character(actor)
            .map(|character| character.actions())
            .ok_or(ActionError::ActorNotFound(actor))
    }

    /// Rebuilds the action table of `actor` from what it sees now.
    pub fn update_actions(&mut self, actor: EntityId) -> Result<&ActionTable, ActionError> {
        self.world
            .refresh_actions(actor, self.config)
            .ok_or(ActionError::ActorNotFound(actor))
    }

    /// Dispatches the action bound to `key` in the actor's cached table.
    pub fn do_action(&mut self, actor: EntityId, key: u32) -> Result<ActionResult, ExecuteError> {
        let record = self.actions(actor)?.get(key).ok_or_else(|| {
            tracing::debug!("character {} has no action for key {}", actor, key);
            ActionError::UnknownKey { key }
        })?;

        self.execute(&Action::from_record(actor, record))
    }

    pub fn use_interface(
        &mut self,
        actor: EntityId,
        interface: EntityId,
    ) -> Result<ActionResult, ExecuteError> {
        self.execute(&Action::UseInterface(UseInterfaceAction::new(
            actor, interface,
        )))
    }

    pub fn take_item(
        &mut self,
        actor: EntityId,
        item: EntityId,
        source: ItemSource,
    ) -> Result<(), ExecuteError> {
        self.execute(&Action::TakeItem(TakeItemAction::new(actor, item, source)))?;
        Ok(())
    }

    /// Removes `item` from the actor's inventory and returns it.
    pub fn give_item(&mut self, actor: EntityId, item: EntityId) -> Result<ItemState, ExecuteError> {
        let given =
            transition::drive_transition(&GiveItemAction::new(actor, item), self.world, self.config)
                .map_err(ExecuteError::GiveItem)?;
        tracing::debug!("character {} gave away item {}", actor, item);
        Ok(given)
    }

    /// Uses a carried tool directly on a device, bypassing any interface.
    pub fn use_tool(
        &mut self,
        actor: EntityId,
        tool: EntityId,
        device: EntityId,
    ) -> Result<DeviceEffect, ExecuteError> {
        let effect = transition::drive_transition(
            &UseToolAction::new(actor, tool, device),
            self.world,
            self.config,
        )
        .map_err(ExecuteError::UseTool)?;
        self.world.refresh_all_actions(self.config);
        Ok(effect)
    }

    pub fn report_visible_tools(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_tools())
    }

    pub fn report_visible_artifacts(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_artifacts())
    }

    pub fn report_visible_items(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_items())
    }

    pub fn report_visible_interfaces(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_interfaces())
    }

    pub fn report_visible_devices(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_devices())
    }

    pub fn report_visible_components(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_components())
    }

    pub fn report_visible_objects(&self, actor: EntityId) -> Result<String, ActionError> {
        self.report(actor, |perception| perception.visible_objects())
    }

    fn report<'w, T, F>(&'w self, actor: EntityId, query: F) -> Result<String, ActionError>
    where
        T: std::fmt::Display,
        F: FnOnce(Perception<'w, GridMap>) -> D4<T>,
    {
        let character = self
            .world
            .character(actor)
            .ok_or(ActionError::ActorNotFound(actor))?;
        let perception = self
            .world
            .perception(actor, self.config)
            .ok_or(ActionError::ActorNotFound(actor))?;
        Ok(build_object_report_text(
            character.orientation(),
            &query(perception),
        ))
    }
}
