use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must both be non-zero")]
    InvalidDimensions,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Cell index is outside the board")]
    IndexOutOfRange,
    #[error("Board shape does not match its contents")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
