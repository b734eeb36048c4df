//! Property-based tests for packing and wildcard optimization.

use proptest::prelude::*;

use shove_core::{optimize, pack, Color, Piece, Player, Size};

const COLORS: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Wild];

fn piece_strategy() -> impl Strategy<Value = Piece> {
    (0..4usize, 0..3usize)
        .prop_map(|(c, s)| Piece::new(Player(0), Size::from_index(s).unwrap(), COLORS[c]))
}

fn real_piece_strategy() -> impl Strategy<Value = Piece> {
    (0..3usize, 0..3usize)
        .prop_map(|(c, s)| Piece::new(Player(0), Size::from_index(s).unwrap(), COLORS[c]))
}

/// A pile with at most five wildcards, small enough for literal brute force.
fn small_pile_strategy() -> impl Strategy<Value = Vec<Piece>> {
    (
        prop::collection::vec(real_piece_strategy(), 0..9),
        prop::collection::vec(0..3usize, 0..=5),
    )
        .prop_map(|(mut pile, wild_sizes)| {
            for s in wild_sizes {
                pile.push(Piece::new(Player(0), Size::from_index(s).unwrap(), Color::Wild));
            }
            pile
        })
}

fn sorted(mut pieces: Vec<Piece>) -> Vec<Piece> {
    pieces.sort_by_key(|p| (p.owner, p.size, p.color));
    pieces
}

/// Best score over every one of the `3^w` wildcard paintings.
fn brute_force(pile: &[Piece]) -> u32 {
    let wilds: Vec<usize> = (0..pile.len()).filter(|&i| pile[i].color.is_wild()).collect();
    let paintings = 3usize.pow(wilds.len() as u32);
    let mut best = 0;
    for code in 0..paintings {
        let mut painted = pile.to_vec();
        let mut rest = code;
        for &i in &wilds {
            painted[i].color = Color::REAL[rest % 3];
            rest /= 3;
        }
        best = best.max(pack(&painted).score());
    }
    best
}

proptest! {
    // Packing neither loses nor invents pieces
    #[test]
    fn pack_conserves_pieces(pile in prop::collection::vec(piece_strategy(), 0..20)) {
        let grouping = pack(&pile);
        let packed: Vec<Piece> = grouping.groups().flat_map(|(_, s)| s.iter().copied()).collect();
        prop_assert_eq!(sorted(packed), sorted(pile));
    }

    // Pile order does not change the score
    #[test]
    fn pack_ignores_order(pile in prop::collection::vec(piece_strategy(), 0..20)) {
        let mut reversed = pile.clone();
        reversed.reverse();
        prop_assert_eq!(pack(&pile).score(), pack(&reversed).score());
    }

    // Every piece is worth at least one point
    #[test]
    fn pack_scores_at_least_piece_count(pile in prop::collection::vec(piece_strategy(), 0..20)) {
        prop_assert!(pack(&pile).score() as usize >= pile.len());
    }

    // Optimizing never does worse than plain packing
    #[test]
    fn optimize_bounds_pack(pile in prop::collection::vec(piece_strategy(), 0..20)) {
        let best = optimize(&pile).unwrap();
        prop_assert!(best.score >= pack(&pile).score());
        prop_assert_eq!(best.score, best.grouping.score());
    }

    // Without wildcards the optimizer is the packer
    #[test]
    fn optimize_without_wilds_is_pack(pile in prop::collection::vec(real_piece_strategy(), 0..20)) {
        prop_assert_eq!(optimize(&pile).unwrap().score, pack(&pile).score());
    }

    // Optimized grouping keeps the original pieces, wildcard tags included
    #[test]
    fn optimize_keeps_wild_tags(pile in small_pile_strategy()) {
        let best = optimize(&pile).unwrap();
        let packed: Vec<Piece> = best.grouping.groups().flat_map(|(_, s)| s.iter().copied()).collect();
        prop_assert_eq!(sorted(packed), sorted(pile));
    }

    // Matches literal enumeration of every wildcard painting
    #[test]
    fn optimize_matches_brute_force(pile in small_pile_strategy()) {
        prop_assert_eq!(optimize(&pile).unwrap().score, brute_force(&pile));
    }
}
