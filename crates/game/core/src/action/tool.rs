//! Tool-on-device activation protocol.
//!
//! 1. the tool must be able to activate the device, otherwise nothing changes
//! 2. the device is enabled for the duration of the use
//! 3. the device runs its effect
//! 4. the device is disabled again, whether or not the effect succeeded

use crate::action::ActionTransition;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    ActivationGuard, DeviceEffect, DeviceError, DeviceKind, DeviceState, EntityId, GameObject,
    GridMap, ToolKind, WorldState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolError {
    #[error("character {0} not found")]
    ActorNotFound(EntityId),

    #[error("tool {tool} is not in the inventory")]
    ToolNotFound { tool: EntityId },

    #[error("item {item} is not a tool")]
    NotATool { item: EntityId },

    #[error("device {device} not found")]
    DeviceNotFound { device: EntityId },

    #[error("the {tool} can't be used on a {device}")]
    Incompatible { tool: ToolKind, device: DeviceKind },

    #[error("no carried tool can activate device {device}")]
    NoUsableTool { device: EntityId },

    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl GameError for ToolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActorNotFound(_) | Self::ToolNotFound { .. } | Self::NotATool { .. } => {
                ErrorSeverity::Validation
            }
            Self::DeviceNotFound { .. } => ErrorSeverity::Validation,
            Self::Incompatible { .. } | Self::NoUsableTool { .. } | Self::Device(_) => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorNotFound(_) => "TOOL_ACTOR_NOT_FOUND",
            Self::ToolNotFound { .. } => "TOOL_NOT_FOUND",
            Self::NotATool { .. } => "TOOL_NOT_A_TOOL",
            Self::DeviceNotFound { .. } => "TOOL_DEVICE_NOT_FOUND",
            Self::Incompatible { .. } => "TOOL_INCOMPATIBLE",
            Self::NoUsableTool { .. } => "TOOL_NO_USABLE_TOOL",
            Self::Device(DeviceError::NotEnabled { .. }) => "TOOL_DEVICE_NOT_ENABLED",
            Self::Device(DeviceError::Jammed { .. }) => "TOOL_DEVICE_JAMMED",
        }
    }
}

/// Runs the activation protocol of `tool` against `device`.
pub fn use_tool(tool: ToolKind, device: &mut DeviceState) -> Result<DeviceEffect, ToolError> {
    if !tool.can_activate(device.kind, device.is_active()) {
        return Err(ToolError::Incompatible {
            tool,
            device: device.kind,
        });
    }

    let mut guard = ActivationGuard::engage(device);
    let effect = guard.operate()?;
    Ok(effect)
}

/// Runs the activation protocol on a placed device and applies its effect to
/// the map: an opened door unblocks its cell.
pub fn operate_device(
    map: &mut GridMap,
    device: EntityId,
    tool: ToolKind,
) -> Result<DeviceEffect, ToolError> {
    let state = map
        .device_mut(device)
        .ok_or(ToolError::DeviceNotFound { device })?;
    let effect = use_tool(tool, state)?;
    let position = state.location();

    if effect == DeviceEffect::Opened {
        map.set_blocked(position, false);
    }

    tracing::debug!("{} used on device {}: {:?}", tool, device, effect);
    Ok(effect)
}

/// Uses a carried tool on a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseToolAction {
    pub actor: EntityId,
    pub tool: EntityId,
    pub device: EntityId,
}

impl UseToolAction {
    pub fn new(actor: EntityId, tool: EntityId, device: EntityId) -> Self {
        Self {
            actor,
            tool,
            device,
        }
    }

    fn tool_kind(&self, world: &WorldState) -> Result<ToolKind, ToolError> {
        let character = world
            .character(self.actor)
            .ok_or(ToolError::ActorNotFound(self.actor))?;
        let item = character
            .inventory()
            .get(self.tool)
            .ok_or(ToolError::ToolNotFound { tool: self.tool })?;
        item.tool_kind()
            .ok_or(ToolError::NotATool { item: self.tool })
    }
}

impl ActionTransition for UseToolAction {
    type Error = ToolError;
    type Result = DeviceEffect;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        let tool = self.tool_kind(world)?;
        let device = world
            .map
            .device(self.device)
            .ok_or(ToolError::DeviceNotFound {
                device: self.device,
            })?;

        if !tool.can_activate(device.kind, device.is_active()) {
            return Err(ToolError::Incompatible {
                tool,
                device: device.kind,
            });
        }

        Ok(())
    }

    fn apply(
        &self,
        world: &mut WorldState,
        _config: &GameConfig,
    ) -> Result<DeviceEffect, Self::Error> {
        let tool = self.tool_kind(world)?;
        operate_device(&mut world.map, self.device, tool)
    }

    fn post_validate(&self, world: &WorldState, _config: &GameConfig) -> Result<(), Self::Error> {
        let device = world
            .map
            .device(self.device)
            .ok_or(ToolError::DeviceNotFound {
                device: self.device,
            })?;
        debug_assert!(
            !device.is_enabled(),
            "device {} must be disabled once the use completes",
            self.device
        );
        Ok(())
    }
}
