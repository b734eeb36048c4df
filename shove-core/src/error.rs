//! Error types.
//!
//! `MoveError` is a rejected request and leaves the state untouched.
//! `EngineFault` is a broken invariant: the state it was raised from must be
//! discarded and the previous snapshot restored by the host.

use thiserror::Error;

use crate::{Player, Pos, Size};

/// A placement rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game already finished")]
    Finished,
    #[error("target {0} is off the board")]
    OutOfBounds(Pos),
    #[error("target {0} is occupied")]
    Occupied(Pos),
    #[error("{player} has no {size:?} piece in reserve")]
    NoReserve { player: Player, size: Size },
}

/// An internal invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    #[error("cell {0} was expected to be empty")]
    CellOccupied(Pos),
    #[error("cell {0} was expected to hold a piece")]
    MissingPiece(Pos),
    #[error("position {0} is outside the grid")]
    OffGrid(Pos),
    #[error("{player} reserve has no {size:?} piece")]
    ReserveExhausted { player: Player, size: Size },
    #[error("piece count drifted: expected {expected}, found {found}")]
    Conservation { expected: usize, found: usize },
    #[error("grouping holds {found} pieces for a pile of {expected}")]
    GroupingMismatch { expected: usize, found: usize },
    #[error("pile holds {found} wildcards, optimizer limit is {limit}")]
    TooManyWildcards { found: usize, limit: usize },
    #[error("unknown seat {0}")]
    UnknownPlayer(Player),
}

/// Failure of `GameState::apply`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    Move(#[from] MoveError),
    #[error("engine fault: {0}")]
    Fault(#[from] EngineFault),
}

/// Invalid `GameConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {0} is outside 3..=26")]
    BoardSize(u8),
    #[error("player count {0} is outside 2..=4")]
    Players(u8),
    #[error("each player needs at least one trio")]
    NoTrios,
    #[error("{wilds} wildcards per size exceed the {pieces} pieces of that size")]
    WildsExceedPieces { wilds: usize, pieces: usize },
    #[error("{0} wildcards in play exceed the optimizer limit")]
    TooManyWilds(usize),
}

/// A snapshot that does not describe a reachable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("board entry {0} is off the board")]
    OffBoard(Pos),
    #[error("board entry {0} appears twice")]
    Duplicate(Pos),
    #[error("expected {expected} seats, found {found}")]
    SeatCount { expected: usize, found: usize },
    #[error("seat {0} is not in play")]
    UnknownPlayer(Player),
    #[error("reserve of {holder} holds a piece owned by {owner}")]
    ForeignReserve { holder: Player, owner: Player },
    #[error("capture pile of {0} holds one of its own pieces")]
    OwnCapture(Player),
    #[error("snapshot holds {found} pieces, config deals {expected}")]
    Conservation { expected: usize, found: usize },
    #[error("{player} owns {found} {size:?} pieces, config deals {expected}")]
    Composition { player: Player, size: Size, expected: usize, found: usize },
    #[error("{found} {size:?} wildcards in play, config deals {expected}")]
    WildcardCount { size: Size, expected: usize, found: usize },
}

/// Malformed notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("empty input")]
    Empty,
    #[error("unknown size '{0}'")]
    Size(String),
    #[error("bad square '{0}'")]
    Square(String),
    #[error("expected SIZE@SQUARE, got '{0}'")]
    Placement(String),
}
