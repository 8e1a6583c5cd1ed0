//! Devices and the activation interlock.
//!
//! A device only ever runs its effect while an [`ActivationGuard`] holds it.
//! The guard raises `enabled` when engaged and lowers it again on drop, so the
//! flag reads `false` before and after every use, including uses whose effect
//! fails.

use std::fmt;
use std::ops::Deref;

use super::{EntityId, GameObject, ObjectBase, ObjectFlags, Orientation};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DeviceKind {
    Door,
    Valve,
    Generic,
}

/// Observable outcome of a device running its effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceEffect {
    /// A door swung open; its cell no longer blocks movement.
    Opened,
    /// A valve was turned.
    Turned,
    /// A generic device fired.
    Triggered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceError {
    #[error("device {device} is not enabled")]
    NotEnabled { device: EntityId },

    #[error("device {device} is jammed")]
    Jammed { device: EntityId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceState {
    pub base: ObjectBase,
    pub kind: DeviceKind,
    pub orientation: Orientation,
    /// Set once the device has been triggered.
    active: bool,
    /// True only while a use is in progress.
    #[cfg_attr(feature = "serde", serde(skip))]
    enabled: bool,
    /// A jammed device refuses to run its effect.
    pub jammed: bool,
}

impl DeviceState {
    pub fn new(base: ObjectBase, kind: DeviceKind) -> Self {
        Self {
            base,
            kind,
            orientation: Orientation::default(),
            active: false,
            enabled: false,
            jammed: false,
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_jammed(mut self, jammed: bool) -> Self {
        self.jammed = jammed;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs the device effect. Only callable through an engaged guard.
    fn operate(&mut self) -> Result<DeviceEffect, DeviceError> {
        let device = self.base.id();
        if !self.enabled {
            return Err(DeviceError::NotEnabled { device });
        }
        if self.jammed {
            return Err(DeviceError::Jammed { device });
        }

        self.active = true;
        let effect = match self.kind {
            DeviceKind::Door => {
                self.base.flags.remove(ObjectFlags::BLOCKING);
                DeviceEffect::Opened
            }
            DeviceKind::Valve => DeviceEffect::Turned,
            DeviceKind::Generic => DeviceEffect::Triggered,
        };
        Ok(effect)
    }
}

impl GameObject for DeviceState {
    fn base(&self) -> &ObjectBase {
        &self.base
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

/// Scoped "use in progress" marker for a device.
///
/// `enabled` is true exactly for the guard's lifetime.
#[derive(Debug)]
pub struct ActivationGuard<'a> {
    device: &'a mut DeviceState,
}

impl<'a> ActivationGuard<'a> {
    pub fn engage(device: &'a mut DeviceState) -> Self {
        device.enabled = true;
        Self { device }
    }

    pub fn operate(&mut self) -> Result<DeviceEffect, DeviceError> {
        self.device.operate()
    }
}

impl Deref for ActivationGuard<'_> {
    type Target = DeviceState;

    fn deref(&self) -> &Self::Target {
        &*self.device
    }
}

impl Drop for ActivationGuard<'_> {
    fn drop(&mut self) {
        self.device.enabled = false;
    }
}
