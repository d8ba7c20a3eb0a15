//! Browser bindings
//!
//! Thin wasm-bindgen wrapper so the canvas shell can drive the engine from its
//! `requestAnimationFrame` loop: call `advance()` once per animation beat and
//! draw the grid snapshot carried by each event.

use wasm_bindgen::prelude::*;

use crate::board::{Cell, Engine, SwapOutcome};
use crate::config::GameConfig;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl WebEngine {
    /// Build from the shell's config JSON. Errors surface as JS exceptions.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: u64) -> Result<WebEngine, JsValue> {
        let config = GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = Engine::new(&config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { engine })
    }

    pub fn rows(&self) -> usize {
        self.engine.grid().rows()
    }

    pub fn cols(&self) -> usize {
        self.engine.grid().cols()
    }

    /// Row-major cells: palette index, or -1 for empty
    pub fn cells(&self) -> Vec<i32> {
        self.engine
            .grid()
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Block(id) => id.0 as i32,
                Cell::Empty => -1,
            })
            .collect()
    }

    /// Name of a palette entry, for sprite lookup
    pub fn block_name(&self, index: u8) -> Option<String> {
        self.engine
            .palette()
            .name(crate::board::BlockId(index))
            .map(str::to_string)
    }

    pub fn score(&self) -> f64 {
        self.engine.score() as f64
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.engine.is_busy()
    }

    /// "busy", "invalid", "reverted" or "committed"
    #[wasm_bindgen(js_name = trySwap)]
    pub fn try_swap(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) -> String {
        match self.engine.try_swap(r1, c1, r2, c2) {
            SwapOutcome::Busy => "busy",
            SwapOutcome::Invalid => "invalid",
            SwapOutcome::Reverted => "reverted",
            SwapOutcome::Committed { .. } => "committed",
        }
        .to_string()
    }

    /// Next cascade phase as JSON, or `undefined` when idle
    pub fn advance(&mut self) -> Option<String> {
        let event = self.engine.advance()?;
        serde_json::to_string(&event).ok()
    }

    pub fn restart(&mut self, seed: u64) -> Result<(), JsValue> {
        self.engine
            .restart(seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
