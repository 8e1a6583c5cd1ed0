//! Carryable objects: tools and artifacts.

use std::fmt;

use super::{DeviceKind, DeviceState, GameObject, ObjectBase};

/// Tool category, which alone decides device compatibility.
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
pub enum ToolKind {
    /// Works on any device that has not been triggered yet.
    Generic,
    /// Turns valves, whatever their state.
    Wrench,
    /// Forces doors, whatever their state.
    PryBar,
}

impl ToolKind {
    /// Pure compatibility table between tool and device categories.
    pub const fn can_activate(self, device: DeviceKind, device_active: bool) -> bool {
        match (self, device) {
            (ToolKind::Generic, _) => !device_active,
            (ToolKind::Wrench, DeviceKind::Valve) => true,
            (ToolKind::PryBar, DeviceKind::Door) => true,
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Tool(ToolKind),
    Artifact,
}

/// An item, either lying on the map or held in an inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub base: ObjectBase,
    pub kind: ItemKind,
}

impl ItemState {
    pub fn new(base: ObjectBase, kind: ItemKind) -> Self {
        Self { base, kind }
    }

    pub fn tool(base: ObjectBase, tool: ToolKind) -> Self {
        Self::new(base, ItemKind::Tool(tool))
    }

    pub fn artifact(base: ObjectBase) -> Self {
        Self::new(base, ItemKind::Artifact)
    }

    pub fn tool_kind(&self) -> Option<ToolKind> {
        match self.kind {
            ItemKind::Tool(tool) => Some(tool),
            ItemKind::Artifact => None,
        }
    }

    pub fn is_tool(&self) -> bool {
        self.tool_kind().is_some()
    }

    pub fn is_artifact(&self) -> bool {
        matches!(self.kind, ItemKind::Artifact)
    }

    /// Returns true when this item is a tool able to activate `device` right now.
    pub fn can_activate(&self, device: &DeviceState) -> bool {
        self.tool_kind()
            .is_some_and(|tool| tool.can_activate(device.kind, device.is_active()))
    }

    /// Menu text for using this tool on `device`.
    pub fn use_action_text(&self, device: &DeviceState) -> String {
        format!("Use the {} on the {}", self, device)
    }
}

impl GameObject for ItemState {
    fn base(&self) -> &ObjectBase {
        &self.base
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EntityId;

    #[test]
    fn wrench_only_turns_valves() {
        assert!(ToolKind::Wrench.can_activate(DeviceKind::Valve, false));
        assert!(ToolKind::Wrench.can_activate(DeviceKind::Valve, true));
        assert!(!ToolKind::Wrench.can_activate(DeviceKind::Door, false));
        assert!(!ToolKind::Wrench.can_activate(DeviceKind::Generic, false));
    }

    #[test]
    fn pry_bar_only_forces_doors() {
        assert!(ToolKind::PryBar.can_activate(DeviceKind::Door, false));
        assert!(ToolKind::PryBar.can_activate(DeviceKind::Door, true));
        assert!(!ToolKind::PryBar.can_activate(DeviceKind::Valve, false));
    }

    #[test]
    fn generic_tool_requires_inactive_device() {
        for device in [DeviceKind::Door, DeviceKind::Valve, DeviceKind::Generic] {
            assert!(ToolKind::Generic.can_activate(device, false));
            assert!(!ToolKind::Generic.can_activate(device, true));
        }
    }

    #[test]
    fn artifacts_never_activate_devices() {
        let artifact = ItemState::artifact(ObjectBase::new(EntityId(7), Default::default()));
        let valve = DeviceState::new(
            ObjectBase::new(EntityId(8), Default::default()),
            DeviceKind::Valve,
        );

        assert!(!artifact.can_activate(&valve));
    }

    #[test]
    fn use_action_text_names_both_objects() {
        let wrench = ItemState::tool(
            ObjectBase::new(EntityId(1), Default::default()).with_description("rusty wrench"),
            ToolKind::Wrench,
        );
        let valve = DeviceState::new(
            ObjectBase::new(EntityId(2), Default::default()).with_description("steam valve"),
            DeviceKind::Valve,
        );

        assert_eq!(wrench.use_action_text(&valve), "Use the rusty wrench on the steam valve");
    }
}
