//! WASM bindings for shove-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use crate::{GameConfig, GameState, Placement, Player, Pos, Size, Snapshot};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// 1-based seat from JS.
fn seat(player: u8) -> Result<Player, JsValue> {
    Player::from_number(player).ok_or_else(|| JsValue::from_str("player numbers start at 1"))
}

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Deal a default two-player game, shuffling color tags with `seed`
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WasmGame, JsValue> {
        let mut rng = StdRng::seed_from_u64(seed);
        let inner = GameState::new_shuffled(GameConfig::default(), &mut rng).map_err(js_error)?;
        Ok(WasmGame { inner })
    }

    /// Deal a game from a config object (see `GameConfig`)
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue, seed: u64) -> Result<WasmGame, JsValue> {
        let config: GameConfig = serde_wasm_bindgen::from_value(config)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let inner = GameState::new_shuffled(config, &mut rng).map_err(js_error)?;
        Ok(WasmGame { inner })
    }

    /// Rebuild a game from a snapshot object
    #[wasm_bindgen(js_name = fromSnapshot)]
    pub fn from_snapshot(snapshot: JsValue) -> Result<WasmGame, JsValue> {
        let snapshot: Snapshot = serde_wasm_bindgen::from_value(snapshot)?;
        let inner = GameState::restore(&snapshot).map_err(js_error)?;
        Ok(WasmGame { inner })
    }

    /// Snapshot object of the whole game
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.snapshot())?)
    }

    /// Current player (1-based)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player().0 + 1
    }

    /// Reserve counts for a player (1-based) as [small, medium, large]
    pub fn reserves(&self, player: u8) -> Result<Vec<u32>, JsValue> {
        let player = seat(player)?;
        self.inner
            .reserve(player)
            .map(|r| r.counts().iter().map(|&c| c as u32).collect())
            .ok_or_else(|| JsValue::from_str(&format!("{} is not in this game", player)))
    }

    /// Place a piece for the current player. Size is 1 (small) to 3 (large).
    /// Returns the event list.
    pub fn place(&mut self, size: u8, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let size = Size::from_index(size.wrapping_sub(1) as usize)
            .ok_or_else(|| JsValue::from_str("size must be 1, 2 or 3"))?;
        let events = self
            .inner
            .apply(Placement { size, to: Pos::new(row, col) })
            .map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    /// Legal placements as [{ size, to: { row, col } }]
    #[wasm_bindgen(js_name = legalPlacements)]
    pub fn legal_placements(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_placements())?)
    }

    /// Best score of a player's (1-based) capture pile
    pub fn score(&self, player: u8) -> Result<u32, JsValue> {
        self.inner.score(seat(player)?).map_err(js_error)
    }

    /// Grouping of a player's (1-based) capture pile
    pub fn grouping(&self, player: u8) -> Result<JsValue, JsValue> {
        let grouping = self
            .inner
            .grouping(seat(player)?)
            .map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&grouping)?)
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Winning players (1-based); empty while the game is running
    pub fn winners(&self) -> Result<Vec<u8>, JsValue> {
        let winners = self.inner.winners().map_err(js_error)?;
        Ok(winners.into_iter().map(|p| p.0 + 1).collect())
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame { inner: self.inner.clone() }
    }
}
