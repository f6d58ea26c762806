use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use square::*;
pub use types::*;

mod board;
mod error;
mod placement;
mod square;
mod types;

/// Validated board shape: dimensions and how many mines to bury in them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    width: Axis,
    height: Axis,
    mines: Area,
}

impl BoardConfig {
    /// Checks the shape up front: both dimensions positive, at least one
    /// mine, and at least one square left clear so the first reveal always
    /// has somewhere safe to land.
    pub fn new(width: Axis, height: Axis, mines: Area) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidDimensions);
        }
        if mines == 0 {
            return Err(BoardError::NoMines);
        }
        if mines >= area(width, height) {
            return Err(BoardError::TooManyMines);
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    pub const fn width(&self) -> Axis {
        self.width
    }

    pub const fn height(&self) -> Axis {
        self.height
    }

    pub const fn mines(&self) -> Area {
        self.mines
    }

    pub const fn size(&self) -> Pos {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> Area {
        area(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> Area {
        self.total_cells() - self.mines
    }

    pub(crate) const fn validate(&self, pos: Pos) -> Result<Pos> {
        if pos.0 < self.width && pos.1 < self.height {
            Ok(pos)
        } else {
            Err(BoardError::OutOfBounds)
        }
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flagged => true,
            Self::Unflagged => true,
        }
    }
}

/// Outcome of revealing a square.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_shapes() {
        let err = Err(BoardError::InvalidDimensions);
        assert_eq!(BoardConfig::new(0, 5, 1), err);
        assert_eq!(BoardConfig::new(5, 0, 1), err);
        assert_eq!(BoardConfig::new(0, 0, 1), err);
    }

    #[test]
    fn config_requires_at_least_one_mine() {
        assert_eq!(BoardConfig::new(3, 3, 0), Err(BoardError::NoMines));
    }

    #[test]
    fn config_keeps_one_square_clear() {
        assert_eq!(BoardConfig::new(5, 5, 25), Err(BoardError::TooManyMines));
        assert_eq!(BoardConfig::new(5, 5, 26), Err(BoardError::TooManyMines));

        let config = BoardConfig::new(5, 5, 24).unwrap();
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn config_reports_derived_counts() {
        let config = BoardConfig::new(10, 10, 20).unwrap();
        assert_eq!(config.size(), (10, 10));
        assert_eq!(config.total_cells(), 100);
        assert_eq!(config.safe_cells(), 80);
        assert_eq!(config.mines(), 20);
    }
}
