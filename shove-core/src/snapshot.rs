//! Serializable game state.
//!
//! The board is stored as a list of occupied cells, sorted row-major; an
//! entry exists iff the cell holds a piece. `GameState::restore` checks the
//! snapshot describes a consistent game before handing it back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::game::{GameConfig, GameState, Pile, Reserve};
use crate::grid::Grid;
use crate::{Piece, Player, Pos, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub pos: Pos,
    pub piece: Piece,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: GameConfig,
    pub current: Player,
    pub moves_played: u32,
    pub board: Vec<BoardEntry>,
    pub reserves: Vec<Reserve>,
    pub piles: Vec<Pile>,
    pub capture_points: Vec<u32>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config,
            current: self.current,
            moves_played: self.moves_played,
            board: self
                .grid
                .occupied()
                .map(|(pos, piece)| BoardEntry { pos, piece })
                .collect(),
            reserves: self.reserves.clone(),
            piles: self.piles.clone(),
            capture_points: self.capture_points.clone(),
        }
    }

    /// Rebuild a game from a snapshot, rejecting anything inconsistent.
    pub fn restore(snapshot: &Snapshot) -> Result<GameState, SnapshotError> {
        let config = snapshot.config;
        config.validate()?;
        let players = config.players as usize;
        let seat = |player: Player| {
            if player.index() < players {
                Ok(player)
            } else {
                Err(SnapshotError::UnknownPlayer(player))
            }
        };

        for found in [
            snapshot.reserves.len(),
            snapshot.piles.len(),
            snapshot.capture_points.len(),
        ] {
            if found != players {
                return Err(SnapshotError::SeatCount { expected: players, found });
            }
        }
        seat(snapshot.current)?;

        let mut grid = Grid::new(config.board_size);
        let mut seen = HashSet::new();
        for entry in &snapshot.board {
            if !grid.contains(entry.pos) {
                return Err(SnapshotError::OffBoard(entry.pos));
            }
            if !seen.insert(entry.pos) {
                return Err(SnapshotError::Duplicate(entry.pos));
            }
            seat(entry.piece.owner)?;
            grid.place(entry.pos, entry.piece)
                .map_err(|_| SnapshotError::Duplicate(entry.pos))?;
        }

        let mut reserves = Vec::with_capacity(players);
        for (holder, stored) in Player::all(config.players).zip(&snapshot.reserves) {
            let mut reserve = Reserve::default();
            for &piece in stored.pieces() {
                if piece.owner != holder {
                    return Err(SnapshotError::ForeignReserve { holder, owner: piece.owner });
                }
                reserve.put(piece);
            }
            reserves.push(reserve);
        }
        for (holder, pile) in Player::all(config.players).zip(&snapshot.piles) {
            for piece in pile.pieces() {
                if seat(piece.owner)? == holder {
                    return Err(SnapshotError::OwnCapture(holder));
                }
            }
        }

        let state = GameState {
            config,
            grid,
            reserves,
            piles: snapshot.piles.clone(),
            capture_points: snapshot.capture_points.clone(),
            current: snapshot.current,
            moves_played: snapshot.moves_played,
        };
        let expected = config.total_pieces();
        let found = state.piece_count();
        if found != expected {
            return Err(SnapshotError::Conservation { expected, found });
        }
        state.verify_composition()?;
        Ok(state)
    }

    /// Every seat owns `trios_per_player` pieces of each size, and each size
    /// has `wilds_per_size` wildcards, wherever the pieces now sit.
    fn verify_composition(&self) -> Result<(), SnapshotError> {
        let players = self.config.players as usize;
        let mut owned = vec![[0usize; 3]; players];
        let mut wilds = [0usize; 3];
        let pieces = self
            .grid
            .occupied()
            .map(|(_, piece)| piece)
            .chain(self.reserves.iter().flat_map(Reserve::pieces).copied())
            .chain(self.piles.iter().flat_map(|p| p.pieces().iter().copied()));
        for piece in pieces {
            let counts = owned
                .get_mut(piece.owner.index())
                .ok_or(SnapshotError::UnknownPlayer(piece.owner))?;
            counts[piece.size.index()] += 1;
            if piece.color.is_wild() {
                wilds[piece.size.index()] += 1;
            }
        }

        let expected = self.config.trios_per_player as usize;
        for (player, counts) in Player::all(self.config.players).zip(&owned) {
            for size in Size::all() {
                let found = counts[size.index()];
                if found != expected {
                    return Err(SnapshotError::Composition { player, size, expected, found });
                }
            }
        }
        let expected = self.config.wilds_per_size as usize;
        for size in Size::all() {
            let found = wilds[size.index()];
            if found != expected {
                return Err(SnapshotError::WildcardCount { size, expected, found });
            }
        }
        Ok(())
    }
}
