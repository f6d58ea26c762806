use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board dimensions must be positive")]
    InvalidDimensions,
    #[error("At least one mine is required")]
    NoMines,
    #[error("Too many mines for the board size")]
    TooManyMines,
    #[error("Coordinates outside the board")]
    OutOfBounds,
}

pub type Result<T> = std::result::Result<T, BoardError>;
