//! Shove self-play simulator.
//!
//! Plays seeded games with simple policies, collects statistics, and keeps a
//! ledger of final-state fingerprints so a later run can check that the same
//! seeds still produce the same games.

pub mod ledger;
pub mod play;
pub mod policy;
pub mod stats;

pub use ledger::Ledger;
pub use play::{fingerprint, play_game, GameRecord, SimError};
pub use policy::Policy;
pub use stats::SimStats;
