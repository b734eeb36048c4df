//! Wildcard color assignment.
//!
//! The packer leaves wildcards single. Here every wildcard is painted one of
//! the real colors, the painted pile is packed, and the best packing wins.
//!
//! Wildcards of the same size are interchangeable and the packer only looks
//! at (color, size) pairs, so instead of all `3^w` paintings it is enough to
//! try every way of splitting each size's wildcards into red/green/blue
//! counts. That covers every score the full enumeration can reach with far
//! fewer packs (`C(k + 2, 2)` splits for `k` wildcards of one size).

use serde::{Deserialize, Serialize};

use crate::error::EngineFault;
use crate::pack::{stack_indices, Grouping};
use crate::{Color, Piece, Size};

/// Most wildcards one pile may hold.
///
/// A full game never deals more than this many (see `GameConfig::validate`).
pub const MAX_WILDCARDS: usize = 24;

/// A grouping together with its score.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scored {
    pub grouping: Grouping,
    pub score: u32,
}

/// Pack `pile` with the best wildcard painting.
///
/// When several paintings tie, the first one in enumeration order is kept
/// (red before green before blue, small wildcards varied outermost). Callers
/// should rely on the score, not on which stack a wildcard lands in.
pub fn optimize(pile: &[Piece]) -> Result<Scored, EngineFault> {
    let mut wilds: [Vec<usize>; 3] = Default::default();
    for (i, piece) in pile.iter().enumerate() {
        if piece.color.is_wild() {
            wilds[piece.size.index()].push(i);
        }
    }
    let found: usize = wilds.iter().map(Vec::len).sum();
    if found > MAX_WILDCARDS {
        return Err(EngineFault::TooManyWildcards { found, limit: MAX_WILDCARDS });
    }

    let mut painted = pile.to_vec();
    let mut best: Option<Scored> = None;
    for small in splits(wilds[Size::Small.index()].len()) {
        paint(&mut painted, &wilds[Size::Small.index()], small);
        for medium in splits(wilds[Size::Medium.index()].len()) {
            paint(&mut painted, &wilds[Size::Medium.index()], medium);
            for large in splits(wilds[Size::Large.index()].len()) {
                paint(&mut painted, &wilds[Size::Large.index()], large);

                let grouping = Grouping::from_stacks(pile, &painted, &stack_indices(&painted));
                let score = grouping.score();
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(Scored { grouping, score });
                }
            }
        }
    }

    // Every split loop runs at least once, so `best` is always set.
    let best = best.unwrap_or_default();
    let placed = best.grouping.piece_count();
    if placed != pile.len() {
        return Err(EngineFault::GroupingMismatch { expected: pile.len(), found: placed });
    }
    Ok(best)
}

/// All `[red, green, blue]` counts summing to `k`.
fn splits(k: usize) -> Vec<[usize; 3]> {
    let mut out = Vec::with_capacity((k + 1) * (k + 2) / 2);
    for red in 0..=k {
        for green in 0..=k - red {
            out.push([red, green, k - red - green]);
        }
    }
    out
}

/// Paint the pieces at `wilds` according to `split`.
fn paint(painted: &mut [Piece], wilds: &[usize], split: [usize; 3]) {
    let colors = Color::REAL
        .iter()
        .zip(split)
        .flat_map(|(&color, n)| std::iter::repeat(color).take(n));
    for (&i, color) in wilds.iter().zip(colors) {
        painted[i].color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::pack;
    use crate::Player;

    use Color::{Blue, Green, Red, Wild};

    fn p(color: Color, size: u8) -> Piece {
        let size = Size::from_index(size as usize - 1).unwrap();
        Piece::new(Player(0), size, color)
    }

    #[test]
    fn test_splits_count() {
        assert_eq!(splits(0), vec![[0, 0, 0]]);
        assert_eq!(splits(1).len(), 3);
        assert_eq!(splits(2).len(), 6);
        assert_eq!(splits(4).len(), 15);
        assert!(splits(3).iter().all(|s| s.iter().sum::<usize>() == 3));
    }

    #[test]
    fn test_empty_pile_scores_zero() {
        let scored = optimize(&[]).unwrap();
        assert_eq!(scored.score, 0);
        assert_eq!(scored.grouping, Grouping::default());
    }

    #[test]
    fn test_no_wildcards_matches_pack() {
        let pile = [p(Red, 3), p(Blue, 2), p(Green, 1), p(Red, 2)];
        let scored = optimize(&pile).unwrap();
        assert_eq!(scored.grouping, pack(&pile));
        assert_eq!(scored.score, pack(&pile).score());
    }

    #[test]
    fn test_wildcard_completes_mono_trio() {
        let pile = [p(Wild, 3), p(Red, 2), p(Red, 1)];
        let scored = optimize(&pile).unwrap();
        assert_eq!(scored.score, 7);
        assert_eq!(scored.grouping.trios_mono.len(), 1);
        // The wildcard keeps its tag inside the trio.
        assert_eq!(scored.grouping.trios_mono[0][0], p(Wild, 3));
    }

    #[test]
    fn test_all_wild_trio() {
        let pile = [p(Wild, 1), p(Wild, 2), p(Wild, 3)];
        let scored = optimize(&pile).unwrap();
        assert_eq!(scored.score, 7);
    }

    #[test]
    fn test_wildcard_upgrades_mixed_to_mono() {
        // Painted red, the wild medium completes the red trio.
        let pile = [p(Red, 3), p(Wild, 2), p(Red, 1), p(Blue, 3), p(Blue, 2), p(Blue, 1)];
        let scored = optimize(&pile).unwrap();
        assert_eq!(scored.score, 14);
        assert_eq!(scored.grouping.trios_mono.len(), 2);
    }

    #[test]
    fn test_never_below_pack() {
        let pile = [
            p(Wild, 3), p(Green, 2), p(Blue, 1), p(Wild, 1),
            p(Red, 3), p(Red, 2), p(Wild, 2), p(Green, 3),
        ];
        let scored = optimize(&pile).unwrap();
        assert!(scored.score >= pack(&pile).score());
        assert_eq!(scored.grouping.piece_count(), pile.len());
    }

    #[test]
    fn test_too_many_wildcards() {
        let pile = vec![p(Wild, 1); MAX_WILDCARDS + 1];
        assert_eq!(
            optimize(&pile),
            Err(EngineFault::TooManyWildcards { found: MAX_WILDCARDS + 1, limit: MAX_WILDCARDS })
        );
    }

    #[test]
    fn test_max_wildcards_is_tractable() {
        let mut pile = Vec::new();
        for size in 1..=3 {
            for _ in 0..MAX_WILDCARDS / 3 {
                pile.push(p(Wild, size));
            }
        }
        let scored = optimize(&pile).unwrap();
        // Eight wild trios, all painted into mono trios.
        assert_eq!(scored.score, 7 * (MAX_WILDCARDS as u32 / 3));
    }
}
