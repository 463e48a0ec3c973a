use thiserror::Error;

use crate::BoardInt;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnakeError {
    #[error("invalid option {0:?}, please type 1, 2 or 3")]
    InvalidSelection(String),

    #[error("terminal is too small ({width}x{height}), need at least {min_width}x{min_height}")]
    BoardTooSmall {
        height: BoardInt,
        width: BoardInt,
        min_height: BoardInt,
        min_width: BoardInt,
    },

    #[error("standard input closed before a difficulty was selected")]
    InputClosed,
}
