//! Greedy packing of a capture pile into scoring groups.
//!
//! # Point Schedule
//!
//! ```text
//! MonoTrio      S+M+L, one color        7
//! MixedTrio     S+M+L, several colors   5
//! MonoPartial   two sizes, one color    1 per piece
//! MixedPartial  two sizes, two colors   1 per piece
//! Single                                1
//! ```
//!
//! # Construction Order
//!
//! 1. Each large takes a same-color medium, then a same-color small.
//! 2. Lone larges take any medium; large+medium stacks take any small.
//! 3. Leftover mediums take a same-color small, else any small.
//! 4. Leftover smalls and every wildcard stay single.
//!
//! Same-color matches come first so mono trios are formed before mixed ones.
//! Wildcards are never matched here; see [`crate::optimize`].

use serde::{Deserialize, Serialize};

use crate::Piece;

pub const MONO_TRIO_POINTS: u32 = 7;
pub const MIXED_TRIO_POINTS: u32 = 5;
pub const LOOSE_PIECE_POINTS: u32 = 1;

/// Category of a packed stack.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    MonoTrio,
    MixedTrio,
    MonoPartial,
    MixedPartial,
    Single,
}

impl GroupKind {
    /// Classify a stack by length and color homogeneity.
    pub fn of(stack: &[Piece]) -> GroupKind {
        let mono = stack.windows(2).all(|w| w[0].color == w[1].color);
        match (stack.len(), mono) {
            (3, true) => GroupKind::MonoTrio,
            (3, false) => GroupKind::MixedTrio,
            (2, true) => GroupKind::MonoPartial,
            (2, false) => GroupKind::MixedPartial,
            _ => GroupKind::Single,
        }
    }

    /// Points for a stack of this kind holding `pieces` pieces.
    pub fn points(self, pieces: usize) -> u32 {
        match self {
            GroupKind::MonoTrio => MONO_TRIO_POINTS,
            GroupKind::MixedTrio => MIXED_TRIO_POINTS,
            _ => LOOSE_PIECE_POINTS * pieces as u32,
        }
    }
}

/// A partition of one pile. Stacks are ordered largest piece first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    pub trios_mono: Vec<Vec<Piece>>,
    pub trios_mixed: Vec<Vec<Piece>>,
    pub partials_mono: Vec<Vec<Piece>>,
    pub partials_mixed: Vec<Vec<Piece>>,
    pub miscellaneous: Vec<Piece>,
}

impl Grouping {
    /// Build a grouping from index stacks over `pile`.
    ///
    /// Stacks are classified using the colors in `painted` (the pile after
    /// wildcard substitution) but hold the pieces of `pile`, so wildcards keep
    /// their tag wherever they were placed.
    pub(crate) fn from_stacks(pile: &[Piece], painted: &[Piece], stacks: &[Vec<usize>]) -> Grouping {
        let mut grouping = Grouping::default();
        for stack in stacks {
            let classified: Vec<Piece> = stack.iter().map(|&i| painted[i]).collect();
            let original: Vec<Piece> = stack.iter().map(|&i| pile[i]).collect();
            match GroupKind::of(&classified) {
                GroupKind::MonoTrio => grouping.trios_mono.push(original),
                GroupKind::MixedTrio => grouping.trios_mixed.push(original),
                GroupKind::MonoPartial => grouping.partials_mono.push(original),
                GroupKind::MixedPartial => grouping.partials_mixed.push(original),
                GroupKind::Single => grouping.miscellaneous.extend(original),
            }
        }
        grouping
    }

    /// Total points.
    pub fn score(&self) -> u32 {
        let partial_pieces: usize = self
            .partials_mono
            .iter()
            .chain(&self.partials_mixed)
            .map(Vec::len)
            .sum();
        MONO_TRIO_POINTS * self.trios_mono.len() as u32
            + MIXED_TRIO_POINTS * self.trios_mixed.len() as u32
            + LOOSE_PIECE_POINTS * (partial_pieces + self.miscellaneous.len()) as u32
    }

    /// Number of pieces across all groups.
    pub fn piece_count(&self) -> usize {
        self.groups().map(|(_, stack)| stack.len()).sum()
    }

    /// Every stack with its category. Singles are yielded one piece at a time.
    pub fn groups(&self) -> impl Iterator<Item = (GroupKind, &[Piece])> + '_ {
        tagged(GroupKind::MonoTrio, &self.trios_mono)
            .chain(tagged(GroupKind::MixedTrio, &self.trios_mixed))
            .chain(tagged(GroupKind::MonoPartial, &self.partials_mono))
            .chain(tagged(GroupKind::MixedPartial, &self.partials_mixed))
            .chain(
                self.miscellaneous
                    .chunks(1)
                    .map(|single| (GroupKind::Single, single)),
            )
    }
}

fn tagged(kind: GroupKind, list: &[Vec<Piece>]) -> impl Iterator<Item = (GroupKind, &[Piece])> + '_ {
    list.iter().map(move |s| (kind, s.as_slice()))
}

/// Pack a pile greedily, treating wildcards as colorless singles.
pub fn pack(pile: &[Piece]) -> Grouping {
    Grouping::from_stacks(pile, pile, &stack_indices(pile))
}

/// Greedy stacking, as index lists into `pile`, largest piece first.
///
/// Buckets are sorted by color so the result depends only on the multiset of
/// (color, size) pairs, not on the order of the pile.
pub(crate) fn stack_indices(pile: &[Piece]) -> Vec<Vec<usize>> {
    let mut buckets: [Vec<usize>; 3] = Default::default();
    let mut wilds = Vec::new();
    for (i, piece) in pile.iter().enumerate() {
        if piece.color.is_wild() {
            wilds.push(i);
        } else {
            buckets[piece.size.index()].push(i);
        }
    }
    for bucket in &mut buckets {
        bucket.sort_by_key(|&i| (pile[i].color, i));
    }
    let [mut smalls, mut mediums, larges] = buckets;

    let mut stacks: Vec<Vec<usize>> = Vec::with_capacity(pile.len());
    for large in larges {
        let color = pile[large].color;
        let mut stack = vec![large];
        if let Some(medium) = take_first(&mut mediums, |i| pile[i].color == color) {
            stack.push(medium);
            if let Some(small) = take_first(&mut smalls, |i| pile[i].color == color) {
                stack.push(small);
            }
        }
        stacks.push(stack);
    }

    for stack in stacks.iter_mut().filter(|s| s.len() == 1) {
        if let Some(medium) = take_first(&mut mediums, |_| true) {
            stack.push(medium);
        }
    }
    for stack in stacks.iter_mut().filter(|s| s.len() == 2) {
        if let Some(small) = take_first(&mut smalls, |_| true) {
            stack.push(small);
        }
    }

    for medium in mediums {
        let color = pile[medium].color;
        let small = take_first(&mut smalls, |i| pile[i].color == color)
            .or_else(|| take_first(&mut smalls, |_| true));
        stacks.push(match small {
            Some(small) => vec![medium, small],
            None => vec![medium],
        });
    }

    stacks.extend(smalls.into_iter().map(|s| vec![s]));
    stacks.extend(wilds.into_iter().map(|w| vec![w]));
    stacks
}

/// Remove and return the first index in `bucket` matching `pred`.
fn take_first(bucket: &mut Vec<usize>, pred: impl Fn(usize) -> bool) -> Option<usize> {
    let at = bucket.iter().position(|&i| pred(i))?;
    Some(bucket.remove(at))
}
