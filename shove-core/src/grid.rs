//! Square board surface.
//!
//! Cells are stored row-major; a cell holds at most one piece.

use crate::error::EngineFault;
use crate::{Direction, Piece, Pos};

/// `size` x `size` board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    size: u8,
    cells: Vec<Option<Piece>>,
}

impl Grid {
    /// Create an empty board.
    pub fn new(size: u8) -> Grid {
        Grid {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.row as usize * self.size as usize + pos.col as usize
    }

    /// The piece at `pos`, or None if empty or off the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        if !self.contains(pos) {
            return None;
        }
        self.cells[self.index(pos)]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// The neighbour of `pos` in `dir`, if on the board.
    #[inline]
    pub fn step(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        pos.step(dir, self.size)
    }

    /// Put a piece on an empty cell.
    pub fn place(&mut self, pos: Pos, piece: Piece) -> Result<(), EngineFault> {
        if !self.contains(pos) {
            return Err(EngineFault::OffGrid(pos));
        }
        let idx = self.index(pos);
        if self.cells[idx].is_some() {
            return Err(EngineFault::CellOccupied(pos));
        }
        self.cells[idx] = Some(piece);
        Ok(())
    }

    /// Lift the piece off a cell. Returns None if it was empty.
    pub fn take(&mut self, pos: Pos) -> Option<Piece> {
        if !self.contains(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Iterate over all cells, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Pos::new(row, col)))
    }

    /// Occupied cells with their pieces, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.positions().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Empty cells, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|&pos| self.is_empty(pos))
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}
