//! Game state: reserves, capture piles, turns and the end of the game.
//!
//! Every piece dealt at setup is, at any moment, in exactly one place: on the
//! grid, in a reserve, or in a capture pile. `apply_validated` checks that
//! after each move and reports a fault if the count drifts.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cascade::resolve_placement;
use crate::error::{ConfigError, EngineFault, GameError, MoveError};
use crate::grid::Grid;
use crate::optimize::{optimize, Scored, MAX_WILDCARDS};
use crate::pack::Grouping;
use crate::{Color, Event, Piece, Placement, Player, Size};

/// Setup parameters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: u8,
    /// Number of seats.
    pub players: u8,
    /// Pieces of each size every seat starts with.
    pub trios_per_player: u8,
    /// Wildcard-tagged pieces of each size across the whole game.
    pub wilds_per_size: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: 8,
            players: 2,
            trios_per_player: 5,
            wilds_per_size: 2,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(3..=26).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if !(2..=4).contains(&self.players) {
            return Err(ConfigError::Players(self.players));
        }
        if self.trios_per_player == 0 {
            return Err(ConfigError::NoTrios);
        }
        let pieces = self.pieces_per_size();
        let wilds = self.wilds_per_size as usize;
        if wilds > pieces {
            return Err(ConfigError::WildsExceedPieces { wilds, pieces });
        }
        if self.total_wilds() > MAX_WILDCARDS {
            return Err(ConfigError::TooManyWilds(self.total_wilds()));
        }
        Ok(())
    }

    /// Pieces of one size across all seats.
    pub fn pieces_per_size(&self) -> usize {
        self.players as usize * self.trios_per_player as usize
    }

    /// Pieces in the game.
    pub fn total_pieces(&self) -> usize {
        3 * self.pieces_per_size()
    }

    /// Wildcards in the game, which bounds the wildcards in any one pile.
    pub fn total_wilds(&self) -> usize {
        3 * self.wilds_per_size as usize
    }

    /// Color tags for one size: the wildcards, then real colors in rotation.
    fn color_bag(&self) -> Vec<Color> {
        let wilds = self.wilds_per_size as usize;
        (0..self.pieces_per_size())
            .map(|i| {
                if i < wilds {
                    Color::Wild
                } else {
                    Color::REAL[(i - wilds) % Color::REAL.len()]
                }
            })
            .collect()
    }
}

/// Unplaced pieces of one seat, by size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reserve {
    pieces: [Vec<Piece>; 3],
}

impl Reserve {
    /// Counts as `[small, medium, large]`.
    pub fn counts(&self) -> [usize; 3] {
        [self.pieces[0].len(), self.pieces[1].len(), self.pieces[2].len()]
    }

    pub fn count(&self, size: Size) -> usize {
        self.pieces[size.index()].len()
    }

    pub fn len(&self) -> usize {
        self.pieces.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.iter().all(Vec::is_empty)
    }

    /// Take a piece of `size`; the most recently returned one comes out first.
    pub fn take(&mut self, size: Size) -> Option<Piece> {
        self.pieces[size.index()].pop()
    }

    pub fn put(&mut self, piece: Piece) {
        self.pieces[piece.size.index()].push(piece);
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }
}

/// Captured pieces of one seat. Only ever grows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile(Vec<Piece>);

impl Pile {
    pub fn push(&mut self, piece: Piece) {
        self.0.push(piece);
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Piece>> for Pile {
    fn from(pieces: Vec<Piece>) -> Self {
        Pile(pieces)
    }
}

/// One row of the final ranking.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Standing {
    pub player: Player,
    pub score: u32,
    /// Pieces in the capture pile; breaks score ties.
    pub captured: usize,
    /// 1-based; tied seats share a rank.
    pub rank: usize,
}

/// A game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) grid: Grid,
    pub(crate) reserves: Vec<Reserve>,
    pub(crate) piles: Vec<Pile>,
    pub(crate) capture_points: Vec<u32>,
    pub(crate) current: Player,
    pub(crate) moves_played: u32,
}

impl GameState {
    /// Deal a new game without shuffling: tags go round the table in order.
    pub fn new(config: GameConfig) -> Result<GameState, ConfigError> {
        config.validate()?;
        let bags = [config.color_bag(), config.color_bag(), config.color_bag()];
        Ok(GameState::deal(config, bags))
    }

    /// Deal a new game with each size's color tags shuffled by `rng`.
    pub fn new_shuffled<R: Rng + ?Sized>(
        config: GameConfig,
        rng: &mut R,
    ) -> Result<GameState, ConfigError> {
        config.validate()?;
        let mut bags = [config.color_bag(), config.color_bag(), config.color_bag()];
        for bag in &mut bags {
            bag.shuffle(rng);
        }
        Ok(GameState::deal(config, bags))
    }

    fn deal(config: GameConfig, bags: [Vec<Color>; 3]) -> GameState {
        let players = config.players as usize;
        let mut reserves = vec![Reserve::default(); players];
        for (size, bag) in Size::all().zip(bags) {
            for (i, color) in bag.into_iter().enumerate() {
                let owner = Player((i % players) as u8);
                reserves[owner.index()].put(Piece::new(owner, size, color));
            }
        }
        GameState {
            config,
            grid: Grid::new(config.board_size),
            reserves,
            piles: vec![Pile::default(); players],
            capture_points: vec![0; players],
            current: Player(0),
            moves_played: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Seat to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn reserve(&self, player: Player) -> Option<&Reserve> {
        self.reserves.get(player.index())
    }

    pub fn pile(&self, player: Player) -> Option<&Pile> {
        self.piles.get(player.index())
    }

    /// Running sum of captured sizes, for display only.
    pub fn capture_points(&self, player: Player) -> u32 {
        self.capture_points.get(player.index()).copied().unwrap_or(0)
    }

    /// Over when every reserve is empty or no cell is left to place on.
    pub fn is_finished(&self) -> bool {
        self.grid.is_full() || self.reserves.iter().all(Reserve::is_empty)
    }

    /// Check a placement for the seat to move without changing anything.
    pub fn validate(&self, placement: Placement) -> Result<(), MoveError> {
        if self.is_finished() {
            return Err(MoveError::Finished);
        }
        let Placement { size, to } = placement;
        if !self.grid.contains(to) {
            return Err(MoveError::OutOfBounds(to));
        }
        if !self.grid.is_empty(to) {
            return Err(MoveError::Occupied(to));
        }
        let player = self.current;
        if self.reserve(player).map_or(0, |r| r.count(size)) == 0 {
            return Err(MoveError::NoReserve { player, size });
        }
        Ok(())
    }

    /// Every valid placement for the seat to move, by size then cell.
    pub fn legal_placements(&self) -> Vec<Placement> {
        let Some(reserve) = self.reserve(self.current) else {
            return Vec::new();
        };
        if self.is_finished() {
            return Vec::new();
        }
        let empty: Vec<_> = self.grid.empty_cells().collect();
        Size::all()
            .filter(|&size| reserve.count(size) > 0)
            .flat_map(|size| empty.iter().map(move |&to| Placement { size, to }))
            .collect()
    }

    /// Validate and apply a placement for the seat to move.
    pub fn apply(&mut self, placement: Placement) -> Result<Vec<Event>, GameError> {
        self.validate(placement)?;
        Ok(self.apply_validated(placement)?)
    }

    /// Apply a placement that has already passed [`GameState::validate`].
    ///
    /// Any inconsistency met here is a fault; the state must then be
    /// discarded.
    pub fn apply_validated(&mut self, placement: Placement) -> Result<Vec<Event>, EngineFault> {
        let mover = self.current;
        let m = mover.index();
        let Placement { size, to } = placement;

        let reserve = self
            .reserves
            .get_mut(m)
            .ok_or(EngineFault::UnknownPlayer(mover))?;
        let piece = reserve
            .take(size)
            .ok_or(EngineFault::ReserveExhausted { player: mover, size })?;
        self.grid.place(to, piece)?;

        let mut events = vec![Event::Place { player: mover, at: to, size }];
        let resolution = resolve_placement(&mut self.grid, to, mover)?;
        events.extend(resolution.events);

        for piece in resolution.reclaimed {
            self.reserves[m].put(piece);
        }
        for piece in resolution.captured {
            self.capture_points[m] += piece.size.points();
            self.piles[m].push(piece);
        }

        self.moves_played += 1;
        self.verify_conservation()?;
        self.advance_turn();
        Ok(events)
    }

    /// Pass the turn to the next seat that still has pieces to place.
    fn advance_turn(&mut self) {
        let players = self.config.players;
        let mut next = self.current;
        for _ in 0..players {
            next = next.next(players);
            if !self.reserves[next.index()].is_empty() {
                self.current = next;
                return;
            }
        }
    }

    /// Pieces currently accounted for on the grid, in reserves and in piles.
    pub fn piece_count(&self) -> usize {
        self.grid.piece_count()
            + self.reserves.iter().map(Reserve::len).sum::<usize>()
            + self.piles.iter().map(Pile::len).sum::<usize>()
    }

    pub fn verify_conservation(&self) -> Result<(), EngineFault> {
        let expected = self.config.total_pieces();
        let found = self.piece_count();
        if found != expected {
            return Err(EngineFault::Conservation { expected, found });
        }
        Ok(())
    }

    fn scored(&self, player: Player) -> Result<Scored, EngineFault> {
        let pile = self.pile(player).ok_or(EngineFault::UnknownPlayer(player))?;
        optimize(pile.pieces())
    }

    /// Best score of a seat's capture pile, recomputed every call.
    pub fn score(&self, player: Player) -> Result<u32, EngineFault> {
        Ok(self.scored(player)?.score)
    }

    /// The grouping behind [`GameState::score`].
    pub fn grouping(&self, player: Player) -> Result<Grouping, EngineFault> {
        Ok(self.scored(player)?.grouping)
    }

    /// All seats ranked by score, then by pieces captured.
    pub fn standings(&self) -> Result<Vec<Standing>, EngineFault> {
        let mut rows = Player::all(self.config.players)
            .map(|player| {
                Ok(Standing {
                    player,
                    score: self.score(player)?,
                    captured: self.piles[player.index()].len(),
                    rank: 0,
                })
            })
            .collect::<Result<Vec<_>, EngineFault>>()?;

        let key = |s: &Standing| (s.score, s.captured);
        rows.sort_by(|a, b| key(b).cmp(&key(a)).then(a.player.cmp(&b.player)));
        for i in 0..rows.len() {
            rows[i].rank = if i > 0 && key(&rows[i]) == key(&rows[i - 1]) {
                rows[i - 1].rank
            } else {
                i + 1
            };
        }
        Ok(rows)
    }

    /// Seats sharing first place once the game is over; empty before that.
    pub fn winners(&self) -> Result<Vec<Player>, EngineFault> {
        if !self.is_finished() {
            return Ok(Vec::new());
        }
        Ok(self
            .standings()?
            .into_iter()
            .filter(|s| s.rank == 1)
            .map(|s| s.player)
            .collect())
    }
}
