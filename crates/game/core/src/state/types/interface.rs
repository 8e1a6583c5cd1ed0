use std::fmt;

use super::{EntityId, GameObject, ObjectBase, Orientation};

/// A wall-mounted panel, lever, or terminal.
///
/// Interfaces face one way and can only be perceived from the side they face.
/// An interface may control a device elsewhere on the map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceState {
    pub base: ObjectBase,
    pub orientation: Orientation,
    pub controls: Option<EntityId>,
}

impl InterfaceState {
    pub fn new(base: ObjectBase, orientation: Orientation) -> Self {
        Self {
            base,
            orientation,
            controls: None,
        }
    }

    #[must_use]
    pub fn with_controls(mut self, device: EntityId) -> Self {
        self.controls = Some(device);
        self
    }

    /// Returns true when an observer looking in `direction` sees the face of
    /// this interface, i.e. the interface points back along `direction`.
    pub fn faces(&self, direction: Orientation) -> bool {
        self.orientation.inverse() == direction
    }
}

impl GameObject for InterfaceState {
    fn base(&self) -> &ObjectBase {
        &self.base
    }
}

impl fmt::Display for InterfaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Position;

    #[test]
    fn each_orientation_faces_exactly_one_direction() {
        for orientation in Orientation::ALL {
            let interface =
                InterfaceState::new(ObjectBase::new(EntityId(1), Position::ORIGIN), orientation);

            let facing: Vec<_> = Orientation::ALL
                .into_iter()
                .filter(|direction| interface.faces(*direction))
                .collect();

            assert_eq!(facing, vec![orientation.inverse()]);
        }
    }
}
