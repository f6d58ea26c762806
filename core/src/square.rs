use serde::{Deserialize, Serialize};

/// Contents of one cell once mines are placed: a mine, or the count of
/// adjacent mines.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Square {
    Mine,
    Clue(u8),
}

impl Square {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for Square {
    fn default() -> Self {
        Self::Clue(0)
    }
}

/// Player-visible state of one cell in the display snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SquareView {
    Hidden,
    Flagged,
    Open(u8),
    Mine,
}

impl SquareView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for SquareView {
    fn default() -> Self {
        Self::Hidden
    }
}
