use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least one cell must stay clear")]
    TooManyMines,
    #[error("Board needs at least one row and one column")]
    InvalidSize,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a line of text could not be turned into a [`Move`](crate::Move).
///
/// The messages are meant to be shown to the player as-is.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeError {
    #[error("You must enter a move in the form 'row, col, [flag]'")]
    InvalidFormat,
    #[error("Row index must be a number between 1 and 18.")]
    RowOutOfRange,
    #[error("Col index must be a letter between A and Y.")]
    ColOutOfRange,
    #[error("Exit requested")]
    ExitRequested,
}
