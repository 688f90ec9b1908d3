// Errors raised while turning a turn payload into a decision.
// None of these reach the arena: the adapter answers a default direction instead.

use thiserror::Error;

use crate::types::Coord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("snake '{0}' is not on the board")]
    SnakeNotFound(String),
    #[error("snake '{0}' has no body coordinates")]
    EmptyBody(String),
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("target {target:?} is not adjacent to head {head:?}")]
    NonAdjacentTarget { head: Coord, target: Coord },
}
