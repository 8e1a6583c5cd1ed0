//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::config::GameConfig;
use crate::state::WorldState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the world and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    world: &mut WorldState,
    config: &GameConfig,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(world, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(world, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(world, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action to its transition and wraps the result in
/// [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    world: &mut WorldState,
    config: &GameConfig,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Face(transition) => {
            drive_transition(transition, world, config).map_err(ExecuteError::Move)?;
            Ok(ActionResult::Face)
        }
        Action::Move(transition) => {
            drive_transition(transition, world, config).map_err(ExecuteError::Move)?;
            Ok(ActionResult::Move)
        }
        Action::UseInterface(transition) => {
            let outcome =
                drive_transition(transition, world, config).map_err(ExecuteError::UseInterface)?;
            Ok(ActionResult::UseInterface(outcome))
        }
        Action::TakeItem(transition) => {
            drive_transition(transition, world, config).map_err(ExecuteError::TakeItem)?;
            Ok(ActionResult::TakeItem)
        }
        Action::GiveItem(transition) => {
            let item =
                drive_transition(transition, world, config).map_err(ExecuteError::GiveItem)?;
            Ok(ActionResult::GiveItem(item))
        }
        Action::UseTool(transition) => {
            let effect =
                drive_transition(transition, world, config).map_err(ExecuteError::UseTool)?;
            Ok(ActionResult::UseTool(effect))
        }
    }
}
