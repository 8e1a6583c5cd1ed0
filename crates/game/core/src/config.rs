/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of cells walked in each cardinal direction when collecting
    /// perceivable objects.
    pub sight_range: u32,

    /// How keys are assigned when interfaces and items are both actionable.
    pub action_numbering: ActionNumbering,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SIGHT_RANGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            sight_range: Self::DEFAULT_SIGHT_RANGE,
            action_numbering: ActionNumbering::default(),
        }
    }

    pub fn with_action_numbering(mut self, action_numbering: ActionNumbering) -> Self {
        self.action_numbering = action_numbering;
        self
    }

    pub fn with_sight_range(mut self, sight_range: u32) -> Self {
        self.sight_range = sight_range;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Key assignment strategy for the action table.
///
/// Interfaces and items are numbered as two separate lists. With
/// [`ActionNumbering::Overlapping`] both lists start at 1 and an item entry
/// replaces the interface entry that shares its key. [`ActionNumbering::Sequential`]
/// continues item keys after the last interface key so that every interactive
/// object stays reachable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionNumbering {
    #[default]
    Overlapping,
    Sequential,
}
