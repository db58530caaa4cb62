use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Input rejected while a turn is in flight")]
    Locked,
    #[error("Game already over, no new moves are accepted")]
    GameFinished,
    #[error("No ball is selected")]
    NoSelection,
    #[error("Cell holds no ball")]
    NoBall,
    #[error("Cell is already occupied")]
    Occupied,
}

pub type Result<T> = core::result::Result<T, GameError>;
