use crate::action::{ActionTransition, ToolError, operate_device};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{DeviceEffect, EntityId, ToolKind, WorldState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractError {
    #[error("character {0} not found")]
    ActorNotFound(EntityId),

    #[error("interface {0} not found")]
    InterfaceNotFound(EntityId),

    #[error("interface {interface} controls missing device {device}")]
    DeviceNotFound { interface: EntityId, device: EntityId },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl GameError for InteractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) | Self::InterfaceNotFound(_) => ErrorSeverity::Validation,
            Self::DeviceNotFound { .. } => ErrorSeverity::Internal,
            Self::Tool(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "INTERACT_ACTOR_NOT_FOUND",
            Self::InterfaceNotFound(_) => "INTERACT_INTERFACE_NOT_FOUND",
            Self::DeviceNotFound { .. } => "INTERACT_DEVICE_NOT_FOUND",
            Self::Tool(error) => error.error_code(),
        }
    }
}

/// What using an interface did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterfaceOutcome {
    /// The interface controls nothing; the character only looked at it.
    Inspected,
    /// The controlled device ran its effect.
    Operated {
        device: EntityId,
        tool: ToolKind,
        effect: DeviceEffect,
    },
}

/// Uses an interface. When it controls a device, the first carried tool that
/// can activate the device is used on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseInterfaceAction {
    pub actor: EntityId,
    pub interface: EntityId,
}

impl UseInterfaceAction {
    pub fn new(actor: EntityId, interface: EntityId) -> Self {
        Self { actor, interface }
    }

    /// Device to operate and the tool kind to operate it with, or `None` when
    /// the interface controls nothing.
    fn plan(&self, world: &WorldState) -> Result<Option<(EntityId, ToolKind)>, InteractError> {
        let character = world
            .character(self.actor)
            .ok_or(InteractError::ActorNotFound(self.actor))?;
        let interface = world
            .map
            .interface(self.interface)
            .ok_or(InteractError::InterfaceNotFound(self.interface))?;

        let Some(device_id) = interface.controls else {
            return Ok(None);
        };
        let device = world
            .map
            .device(device_id)
            .ok_or(InteractError::DeviceNotFound {
                interface: self.interface,
                device: device_id,
            })?;

        let tool = character
            .inventory()
            .first_tool_for(device)
            .and_then(|item| item.tool_kind())
            .ok_or(ToolError::NoUsableTool { device: device_id })?;

        Ok(Some((device_id, tool)))
    }
}

impl ActionTransition for UseInterfaceAction {
    type Error = InteractError;
    type Result = InterfaceOutcome;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        self.plan(world).map(|_| ())
    }

    fn apply(
        &self,
        world: &mut WorldState,
        _config: &GameConfig,
    ) -> Result<InterfaceOutcome, Self::Error> {
        let Some((device, tool)) = self.plan(world)? else {
            tracing::debug!("interface {} inspected by {}", self.interface, self.actor);
            return Ok(InterfaceOutcome::Inspected);
        };

        let effect = operate_device(&mut world.map, device, tool)?;
        Ok(InterfaceOutcome::Operated {
            device,
            tool,
            effect,
        })
    }
}
