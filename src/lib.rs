//! Gem Cascade - match-3 puzzle engine
//!
//! Core modules:
//! - `board`: Deterministic grid simulation (generation, matching, cascades, swaps)
//! - `config`: JSON game configuration and validation
//! - `error`: Configuration and engine error types
//!
//! Rendering, input mapping, audio and screen flow belong to the host. The
//! engine exposes grid snapshots, the running score and per-phase cascade
//! events for them to consume.

pub mod board;
pub mod config;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use board::{CascadeEvent, Cell, Coord, Engine, Grid, Palette, Rules, SwapOutcome};
pub use config::GameConfig;
pub use error::{ConfigError, EngineError};

/// Game configuration defaults
pub mod consts {
    /// Board size used when the config omits the grid section
    pub const DEFAULT_ROWS: usize = 8;
    pub const DEFAULT_COLS: usize = 8;

    /// Largest board the engine accepts (rows * cols)
    pub const MAX_CELLS: usize = 1 << 16;

    /// Classic match-3
    pub const DEFAULT_MIN_MATCH: usize = 3;
    pub const DEFAULT_SCORE_PER_MATCH: u64 = 10;

    /// Block kinds of the built-in config
    pub const DEFAULT_BLOCKS: [&str; 6] = ["ruby", "sapphire", "emerald", "topaz", "amethyst", "pearl"];
}
