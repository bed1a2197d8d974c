use serde::{Deserialize, Serialize};

/// A cell of the mine layout, fixed for the whole game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiddenCell {
    Mine,
    /// Clear cell with the number of mines in its Moore neighborhood.
    Clear(u8),
}

impl HiddenCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Clear(0))
    }
}

/// What a revealed cell shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Adjacent mine count, 1 to 8.
    Number(u8),
    /// No adjacent mines.
    Blank,
    /// Blank cell swept by a flood while flagged, still drawn as a flag.
    FlagCovered,
    /// Mine the player never flagged, shown after a loss.
    MineExposed,
    /// Flagged mine, shown after a loss.
    MineDisarmed,
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Flagged,
    Revealed(Label),
}

impl VisibleCell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

impl Default for VisibleCell {
    fn default() -> Self {
        Self::Hidden
    }
}
