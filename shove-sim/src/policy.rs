//! Placement policies for self-play.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use shove_core::{EngineFault, Event, GameState, Placement};

/// How the simulator picks the next placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Uniformly random legal placement.
    Random,
    /// Placement with the most immediate capture points; first one on ties.
    Greedy,
}

impl Policy {
    /// Ledger byte.
    pub fn code(self) -> u8 {
        match self {
            Policy::Random => 0,
            Policy::Greedy => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Policy> {
        match code {
            0 => Some(Policy::Random),
            1 => Some(Policy::Greedy),
            _ => None,
        }
    }

    /// Pick a placement for the seat to move, or None if it has none.
    pub fn choose<R: Rng + ?Sized>(
        self,
        game: &GameState,
        rng: &mut R,
    ) -> Result<Option<Placement>, EngineFault> {
        let legal = game.legal_placements();
        if legal.is_empty() {
            return Ok(None);
        }
        match self {
            Policy::Random => Ok(Some(legal[rng.random_range(0..legal.len())])),
            Policy::Greedy => {
                let mut best: Option<(u32, Placement)> = None;
                for placement in legal {
                    let gain = capture_gain(game, placement)?;
                    if best.map_or(true, |(g, _)| gain > g) {
                        best = Some((gain, placement));
                    }
                }
                Ok(best.map(|(_, p)| p))
            }
        }
    }
}

/// Capture points the mover would earn from `placement`.
fn capture_gain(game: &GameState, placement: Placement) -> Result<u32, EngineFault> {
    let mut probe = game.clone();
    let events = probe.apply_validated(placement)?;
    Ok(events
        .iter()
        .map(|e| match e {
            Event::Score { delta, .. } => *delta,
            _ => 0,
        })
        .sum())
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Random => write!(f, "random"),
            Policy::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Policy, String> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Policy::Random),
            "greedy" => Ok(Policy::Greedy),
            other => Err(format!("unknown policy '{}' (expected random or greedy)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shove_core::GameConfig;

    fn opened() -> GameState {
        let mut game = GameState::new(GameConfig { board_size: 3, ..GameConfig::default() }).unwrap();
        game.apply("S@a1".parse().unwrap()).unwrap();
        game
    }

    #[test]
    fn test_policy_codes_roundtrip() {
        for policy in [Policy::Random, Policy::Greedy] {
            assert_eq!(Policy::from_code(policy.code()), Some(policy));
            assert_eq!(policy.to_string().parse::<Policy>(), Ok(policy));
        }
        assert_eq!(Policy::from_code(7), None);
        assert!("minimax".parse::<Policy>().is_err());
    }

    #[test]
    fn test_random_picks_legal_placement() {
        let game = opened();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let placement = Policy::Random.choose(&game, &mut rng).unwrap().unwrap();
            assert!(game.validate(placement).is_ok());
        }
    }

    #[test]
    fn test_greedy_takes_first_capture() {
        let game = opened();
        let mut rng = StdRng::seed_from_u64(1);
        let placement = Policy::Greedy.choose(&game, &mut rng).unwrap();
        // Every neighbour of a1 captures it; b1 is the first small placement.
        assert_eq!(placement, Some("S@b1".parse().unwrap()));
        assert_eq!(capture_gain(&game, "S@c3".parse().unwrap()), Ok(0));
    }

    #[test]
    fn test_greedy_does_not_touch_game() {
        let game = opened();
        let before = game.clone();
        let mut rng = StdRng::seed_from_u64(1);
        Policy::Greedy.choose(&game, &mut rng).unwrap();
        assert_eq!(game, before);
    }
}
