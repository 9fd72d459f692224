use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot place {hazards} hazards on {free} free tiles")]
    Configuration { hazards: CellCount, free: CellCount },
    #[error("coordinates out of bounds")]
    OutOfBounds,
}

pub type Result<T> = core::result::Result<T, GameError>;
