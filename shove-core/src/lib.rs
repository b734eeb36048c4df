//! Shove game logic.
//!
//! Players take turns placing pyramids of three sizes on a square board.
//! Every placement shoves each contiguous run of pieces radiating from the new
//! piece one cell outward. A piece shoved off the edge returns to the mover's
//! reserve if the mover owns it, otherwise it joins the mover's capture pile.
//! When the reserves run dry the capture piles are packed into scoring groups.
//!
//! # Board Layout
//!
//! ```text
//!   row 2   a3 b3 c3      N  = row + 1
//!   row 1   a2 b2 c2      E  = col + 1
//!   row 0   a1 b1 c1
//! ```
//!
//! # Scoring
//!
//! ```text
//! Mono trio   (S+M+L, one color)      7
//! Mixed trio  (S+M+L, several colors) 5
//! Anything else                       1 per piece
//! ```
//!
//! # Modules
//!
//! - [`grid`]: the board surface.
//! - [`cascade`]: the chain-reaction push after a placement.
//! - [`pack`]: greedy partition of a capture pile into scoring groups.
//! - [`optimize`]: wildcard color assignment on top of the packer.
//! - [`game`]: reserves, turns, validation and end of game.
//! - [`snapshot`]: serializable state.

pub mod cascade;
pub mod error;
pub mod game;
pub mod grid;
pub mod notation;
pub mod optimize;
pub mod pack;
pub mod snapshot;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};

pub use cascade::{resolve_placement, Resolution};
pub use error::{ConfigError, EngineFault, GameError, MoveError, NotationError, SnapshotError};
pub use game::{GameConfig, GameState, Pile, Reserve, Standing};
pub use grid::Grid;
pub use optimize::{optimize, Scored, MAX_WILDCARDS};
pub use pack::{pack, GroupKind, Grouping};
pub use snapshot::Snapshot;

/// Seat index, zero-based. Displayed one-based (`P1`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Player(pub u8);

impl Player {
    /// The seat after this one in a game of `players` seats.
    #[inline]
    pub fn next(self, players: u8) -> Player {
        Player((self.0 + 1) % players)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Seat from its displayed number (`1` is `P1`). Zero has no seat.
    #[inline]
    pub fn from_number(number: u8) -> Option<Player> {
        number.checked_sub(1).map(Player)
    }

    /// Iterate over the seats of a game of `players` seats.
    pub fn all(players: u8) -> impl Iterator<Item = Player> {
        (0..players).map(Player)
    }
}

/// Piece size.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Size {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl Size {
    /// Size level, also the immediate capture value (1, 2, 3).
    #[inline]
    pub fn points(self) -> u32 {
        self as u32 + 1
    }

    /// Index into `[small, medium, large]` arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert from index (0, 1, 2) to Size.
    #[inline]
    pub fn from_index(idx: usize) -> Option<Size> {
        match idx {
            0 => Some(Size::Small),
            1 => Some(Size::Medium),
            2 => Some(Size::Large),
            _ => None,
        }
    }

    /// Get all sizes as an iterator.
    pub fn all() -> impl Iterator<Item = Size> {
        [Size::Small, Size::Medium, Size::Large].into_iter()
    }
}

/// Color tag, assigned at setup and independent of the owner.
///
/// Only matters once a piece has been captured.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    /// Counts as any real color when scoring.
    Wild,
}

impl Color {
    /// The real colors, in canonical order.
    pub const REAL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    #[inline]
    pub fn is_wild(self) -> bool {
        self == Color::Wild
    }
}

/// A pyramid. `owner` decides reclaim vs capture on the board, `color`
/// decides grouping in a capture pile.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub size: Size,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub fn new(owner: Player, size: Size, color: Color) -> Piece {
        Piece { owner, size, color }
    }
}

/// Cell coordinate. Bounds are checked against a [`Grid`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }

    /// The neighbour in `dir`, if it lies on a board of `size` x `size`.
    #[inline]
    pub fn step(self, dir: Direction, size: u8) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 || row >= size as i16 || col >= size as i16 {
            return None;
        }
        Some(Pos::new(row as u8, col as u8))
    }
}

/// Compass direction. `N` increases the row, `E` increases the column.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// Canonical resolution order.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// (row delta, col delta).
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::N => (1, 0),
            Direction::NE => (1, 1),
            Direction::E => (0, 1),
            Direction::SE => (-1, 1),
            Direction::S => (-1, 0),
            Direction::SW => (-1, -1),
            Direction::W => (0, -1),
            Direction::NW => (1, -1),
        }
    }
}

/// A placement request: put a piece of `size` from the mover's reserve on `to`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub size: Size,
    pub to: Pos,
}

/// Something that happened while applying a placement, in order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    /// A piece left the mover's reserve for `at`.
    Place { player: Player, at: Pos, size: Size },
    /// A piece was shoved one cell.
    Move { from: Pos, to: Pos, size: Size },
    /// The mover's own piece left the board and went back to its reserve.
    Reclaim { player: Player, from: Pos, size: Size },
    /// Another seat's piece left the board into the mover's pile.
    Capture { player: Player, victim: Player, from: Pos, size: Size },
    /// Display counter bump for a capture.
    Score { player: Player, delta: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_next_wraps() {
        assert_eq!(Player(0).next(2), Player(1));
        assert_eq!(Player(1).next(2), Player(0));
        assert_eq!(Player(2).next(4), Player(3));
        assert_eq!(Player(3).next(4), Player(0));
    }

    #[test]
    fn test_player_from_number() {
        assert_eq!(Player::from_number(1), Some(Player(0)));
        assert_eq!(Player::from_number(4), Some(Player(3)));
        assert_eq!(Player::from_number(0), None);
    }

    #[test]
    fn test_size_points() {
        assert_eq!(Size::Small.points(), 1);
        assert_eq!(Size::Medium.points(), 2);
        assert_eq!(Size::Large.points(), 3);
    }

    #[test]
    fn test_size_index_roundtrip() {
        for size in Size::all() {
            assert_eq!(Size::from_index(size.index()), Some(size));
        }
        assert_eq!(Size::from_index(3), None);
    }

    #[test]
    fn test_real_colors_exclude_wild() {
        assert!(Color::REAL.iter().all(|c| !c.is_wild()));
        assert!(Color::Wild.is_wild());
    }

    #[test]
    fn test_step_inside_board() {
        let center = Pos::new(1, 1);
        assert_eq!(center.step(Direction::N, 3), Some(Pos::new(2, 1)));
        assert_eq!(center.step(Direction::SW, 3), Some(Pos::new(0, 0)));
        assert_eq!(center.step(Direction::E, 3), Some(Pos::new(1, 2)));
    }

    #[test]
    fn test_step_off_board() {
        assert_eq!(Pos::new(0, 0).step(Direction::S, 3), None);
        assert_eq!(Pos::new(0, 0).step(Direction::W, 3), None);
        assert_eq!(Pos::new(2, 2).step(Direction::NE, 3), None);
        assert_eq!(Pos::new(2, 0).step(Direction::NW, 3), None);
    }

    #[test]
    fn test_directions_are_distinct_and_opposed() {
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            assert!(dr != 0 || dc != 0);
            let opposite = Direction::ALL
                .iter()
                .filter(|d| d.delta() == (-dr, -dc))
                .count();
            assert_eq!(opposite, 1, "{:?} has no opposite", dir);
        }
    }
}
