//! Chain-reaction push after a placement.
//!
//! For each of the eight directions around the new piece, the contiguous run
//! of pieces starting at the neighbour is shoved one cell along the ray. If
//! the run ends at an empty cell, the last piece moves into it. If the run
//! reaches the edge, the last piece leaves the board:
//!
//! ```text
//!   placed  run . . . . . . . . .  beyond
//!     X  ->  a  b  c  .        =>  X  .  a  b  c
//!     X  ->  a  b  c |edge      =>  X  .  a  b |c exits
//! ```
//!
//! The run is collected first and then written back from the far end, so the
//! destination of every shift has already been vacated. Rays never share
//! cells, so resolving them one after another in [`Direction::ALL`] order is
//! the same as resolving them independently.

use crate::error::EngineFault;
use crate::grid::Grid;
use crate::{Direction, Event, Piece, Player, Pos};

/// Outcome of resolving one placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Moves, reclaims, captures and score bumps, in resolution order.
    pub events: Vec<Event>,
    /// The mover's own pieces that left the board.
    pub reclaimed: Vec<Piece>,
    /// Other seats' pieces that left the board.
    pub captured: Vec<Piece>,
}

/// Shove every run radiating from `placed_at` by one cell.
///
/// `placed_at` must already hold the mover's new piece. Exiting pieces are
/// returned in the [`Resolution`]; moving them into a reserve or pile is the
/// caller's job.
pub fn resolve_placement(
    grid: &mut Grid,
    placed_at: Pos,
    mover: Player,
) -> Result<Resolution, EngineFault> {
    if grid.get(placed_at).is_none() {
        return Err(EngineFault::MissingPiece(placed_at));
    }

    let mut resolution = Resolution::default();
    for dir in Direction::ALL {
        if let Some(start) = grid.step(placed_at, dir) {
            push_line(grid, start, dir, mover, &mut resolution)?;
        }
    }
    Ok(resolution)
}

/// Shove the run starting at `start` one cell in `dir`.
fn push_line(
    grid: &mut Grid,
    start: Pos,
    dir: Direction,
    mover: Player,
    out: &mut Resolution,
) -> Result<(), EngineFault> {
    // Collect the run; `beyond` is the empty cell after it, or None at the edge.
    let mut run = Vec::new();
    let mut beyond = Some(start);
    while let Some(pos) = beyond {
        if grid.is_empty(pos) {
            break;
        }
        run.push(pos);
        beyond = grid.step(pos, dir);
    }

    let mut dest = beyond;
    for &from in run.iter().rev() {
        let piece = grid.take(from).ok_or(EngineFault::MissingPiece(from))?;
        match dest {
            Some(to) => {
                grid.place(to, piece)?;
                out.events.push(Event::Move { from, to, size: piece.size });
            }
            None => exit(piece, from, mover, out),
        }
        dest = Some(from);
    }
    Ok(())
}

fn exit(piece: Piece, from: Pos, mover: Player, out: &mut Resolution) {
    if piece.owner == mover {
        out.events.push(Event::Reclaim { player: mover, from, size: piece.size });
        out.reclaimed.push(piece);
    } else {
        out.events.push(Event::Capture {
            player: mover,
            victim: piece.owner,
            from,
            size: piece.size,
        });
        out.events.push(Event::Score { player: mover, delta: piece.size.points() });
        out.captured.push(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Size};

    const P1: Player = Player(0);
    const P2: Player = Player(1);

    fn put(grid: &mut Grid, row: u8, col: u8, owner: Player, size: Size) {
        grid.place(Pos::new(row, col), Piece::new(owner, size, Color::Red))
            .unwrap();
    }

    fn moves(res: &Resolution) -> usize {
        res.events.iter().filter(|e| matches!(e, Event::Move { .. })).count()
    }

    #[test]
    fn test_lonely_placement_is_noop() {
        let mut grid = Grid::new(5);
        put(&mut grid, 2, 2, P1, Size::Small);
        let before = grid.clone();

        let res = resolve_placement(&mut grid, Pos::new(2, 2), P1).unwrap();
        assert!(res.events.is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_single_neighbour_moves_one_cell() {
        let mut grid = Grid::new(5);
        put(&mut grid, 2, 3, P2, Size::Large);
        put(&mut grid, 2, 2, P1, Size::Small);

        let res = resolve_placement(&mut grid, Pos::new(2, 2), P1).unwrap();
        assert_eq!(
            res.events,
            vec![Event::Move { from: Pos::new(2, 3), to: Pos::new(2, 4), size: Size::Large }]
        );
        assert!(grid.is_empty(Pos::new(2, 3)));
        assert_eq!(grid.get(Pos::new(2, 4)).map(|p| p.owner), Some(P2));
    }

    #[test]
    fn test_run_shifts_into_gap() {
        // Run of 2 heading north with an empty cell beyond it.
        let mut grid = Grid::new(6);
        put(&mut grid, 1, 0, P2, Size::Small);
        put(&mut grid, 2, 0, P2, Size::Medium);
        put(&mut grid, 0, 0, P1, Size::Large);

        let res = resolve_placement(&mut grid, Pos::new(0, 0), P1).unwrap();
        assert_eq!(
            res.events,
            vec![
                Event::Move { from: Pos::new(2, 0), to: Pos::new(3, 0), size: Size::Medium },
                Event::Move { from: Pos::new(1, 0), to: Pos::new(2, 0), size: Size::Small },
            ]
        );
        assert!(grid.is_empty(Pos::new(1, 0)));
        assert_eq!(grid.get(Pos::new(3, 0)).map(|p| p.size), Some(Size::Medium));
        assert!(res.captured.is_empty() && res.reclaimed.is_empty());
    }

    #[test]
    fn test_gap_stops_the_chain() {
        let mut grid = Grid::new(6);
        put(&mut grid, 0, 1, P2, Size::Small);
        // (0, 2) empty
        put(&mut grid, 0, 3, P2, Size::Small);
        put(&mut grid, 0, 0, P1, Size::Small);

        let res = resolve_placement(&mut grid, Pos::new(0, 0), P1).unwrap();
        assert_eq!(moves(&res), 1);
        assert!(grid.get(Pos::new(0, 2)).is_some());
        assert!(grid.get(Pos::new(0, 3)).is_some());
        assert!(grid.is_empty(Pos::new(0, 4)));
    }

    #[test]
    fn test_edge_capture() {
        let mut grid = Grid::new(3);
        put(&mut grid, 1, 2, P2, Size::Medium);
        put(&mut grid, 1, 1, P1, Size::Small);

        let res = resolve_placement(&mut grid, Pos::new(1, 1), P1).unwrap();
        assert_eq!(
            res.events,
            vec![
                Event::Capture { player: P1, victim: P2, from: Pos::new(1, 2), size: Size::Medium },
                Event::Score { player: P1, delta: 2 },
            ]
        );
        assert_eq!(res.captured.len(), 1);
        assert!(grid.is_empty(Pos::new(1, 2)));
    }

    #[test]
    fn test_edge_reclaim() {
        let mut grid = Grid::new(3);
        put(&mut grid, 0, 0, P1, Size::Large);
        put(&mut grid, 1, 1, P1, Size::Small);

        let res = resolve_placement(&mut grid, Pos::new(1, 1), P1).unwrap();
        assert_eq!(
            res.events,
            vec![Event::Reclaim { player: P1, from: Pos::new(0, 0), size: Size::Large }]
        );
        assert_eq!(res.reclaimed.len(), 1);
        assert!(res.captured.is_empty());
    }

    #[test]
    fn test_full_run_ejects_outermost_only() {
        // Three pieces east of the placement, run touching the edge.
        let mut grid = Grid::new(4);
        put(&mut grid, 0, 1, P2, Size::Small);
        put(&mut grid, 0, 2, P1, Size::Medium);
        put(&mut grid, 0, 3, P2, Size::Large);
        put(&mut grid, 0, 0, P1, Size::Small);

        let res = resolve_placement(&mut grid, Pos::new(0, 0), P1).unwrap();
        assert_eq!(moves(&res), 2);
        assert_eq!(res.captured.len(), 1);
        assert_eq!(res.captured[0].size, Size::Large);
        assert!(grid.is_empty(Pos::new(0, 1)));
        assert_eq!(grid.get(Pos::new(0, 2)).map(|p| p.size), Some(Size::Small));
        assert_eq!(grid.get(Pos::new(0, 3)).map(|p| p.size), Some(Size::Medium));
    }

    #[test]
    fn test_all_eight_rays() {
        // Surround the center of a 3x3 board: every neighbour is on the edge.
        let mut grid = Grid::new(3);
        for pos in grid.positions().collect::<Vec<_>>() {
            if pos != Pos::new(1, 1) {
                put(&mut grid, pos.row, pos.col, P2, Size::Small);
            }
        }
        put(&mut grid, 1, 1, P1, Size::Large);

        let res = resolve_placement(&mut grid, Pos::new(1, 1), P1).unwrap();
        assert_eq!(res.captured.len(), 8);
        assert_eq!(grid.piece_count(), 1);
    }

    #[test]
    fn test_missing_placed_piece_is_fault() {
        let mut grid = Grid::new(3);
        assert_eq!(
            resolve_placement(&mut grid, Pos::new(1, 1), P1),
            Err(EngineFault::MissingPiece(Pos::new(1, 1)))
        );
    }

    #[test]
    fn test_deterministic() {
        let mut grid = Grid::new(5);
        put(&mut grid, 2, 3, P2, Size::Large);
        put(&mut grid, 2, 4, P1, Size::Medium);
        put(&mut grid, 3, 3, P2, Size::Small);
        put(&mut grid, 1, 2, P1, Size::Small);
        put(&mut grid, 2, 2, P1, Size::Small);

        let mut a = grid.clone();
        let mut b = grid.clone();
        let ra = resolve_placement(&mut a, Pos::new(2, 2), P1).unwrap();
        let rb = resolve_placement(&mut b, Pos::new(2, 2), P1).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a, b);
    }
}
