//! Cardinal facing used for characters, interfaces, and devices.

/// One of the four cardinal directions, indexed clockwise from `Up`.
///
/// The discriminant doubles as the index into every [`super::D4`] container.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Orientation {
    /// Query order for every directional scan.
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wraps any index into the cycle, so `from_index(5) == Right`.
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Orientation::Up,
            1 => Orientation::Right,
            2 => Orientation::Down,
            _ => Orientation::Left,
        }
    }

    /// The opposite direction: `(o + 2) mod 4`.
    pub const fn inverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Unit step in cell coordinates.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
        }
    }

    /// Expresses `self` relative to someone facing `facing`: `Up` means
    /// straight ahead, `Right` to their right, and so on.
    pub const fn relative_to(self, facing: Orientation) -> Self {
        Self::from_index(self.index() + 4 - facing.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_an_involution() {
        for direction in Orientation::ALL {
            assert_eq!(direction.inverse().inverse(), direction);
            assert_ne!(direction.inverse(), direction);
        }
    }

    #[test]
    fn inverse_matches_index_arithmetic() {
        for direction in Orientation::ALL {
            assert_eq!(direction.inverse().index(), (direction.index() + 2) % 4);
        }
    }

    #[test]
    fn relative_to_rotates_into_the_viewer_frame() {
        assert_eq!(Orientation::Left.relative_to(Orientation::Left), Orientation::Up);
        assert_eq!(Orientation::Up.relative_to(Orientation::Left), Orientation::Right);
        assert_eq!(Orientation::Right.relative_to(Orientation::Left), Orientation::Down);
        assert_eq!(Orientation::Down.relative_to(Orientation::Right), Orientation::Right);
    }

    #[test]
    fn parses_case_insensitive_names() {
        assert_eq!("UP".parse::<Orientation>(), Ok(Orientation::Up));
        assert_eq!("left".parse::<Orientation>(), Ok(Orientation::Left));
        assert!("north".parse::<Orientation>().is_err());
    }
}
