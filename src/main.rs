//! Gem Cascade entry point
//!
//! Native build: a headless runner that plays hint moves and logs every
//! cascade. Useful for checking a config file before shipping it.
//!
//! Usage: `gem-cascade [config.json] [seed] [max_moves]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = native::run(&args) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is gem_cascade::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use gem_cascade::board::{CascadeEvent, Engine, SwapOutcome};
    use gem_cascade::{EngineError, GameConfig};

    const DEFAULT_SEED: u64 = 2024;
    const DEFAULT_MAX_MOVES: u32 = 25;

    pub fn run(args: &[String]) -> Result<(), EngineError> {
        let config = match args.first() {
            Some(path) => GameConfig::load(path)?,
            None => {
                log::info!("No config path given, using built-in config");
                GameConfig::default()
            }
        };
        let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SEED);
        let max_moves = args
            .get(2)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_MOVES);

        let mut engine = Engine::new(&config, seed)?;
        println!("Seed {seed}\n{}\n", engine.grid());

        for _ in 0..max_moves {
            let Some(hint) = engine.hint() else {
                println!("No moves left");
                break;
            };
            let SwapOutcome::Committed { matches } = engine.try_move(hint) else {
                log::warn!("Hint {:?} did not commit", hint);
                break;
            };
            println!(
                "Move {}: swap ({}, {}) <-> ({}, {}), {} matched",
                engine.moves_played(),
                hint.from.row,
                hint.from.col,
                hint.to.row,
                hint.to.col,
                matches.len()
            );
            while let Some(event) = engine.advance() {
                match event {
                    CascadeEvent::Cleared { pass, matches, points, .. } => {
                        println!("  pass {pass}: cleared {} (+{points})", matches.len());
                    }
                    CascadeEvent::Dropped { falls, .. } => {
                        log::debug!("  {} blocks fell", falls.len());
                    }
                    CascadeEvent::Refilled { spawned, grid, .. } => {
                        log::debug!("  {} blocks spawned\n{}", spawned.len(), grid);
                    }
                    CascadeEvent::Settled { passes, score } => {
                        println!("  settled after {passes} passes, +{score}");
                    }
                }
            }
        }

        println!("\n{}\n\nFinal score: {}", engine.grid(), engine.score());
        Ok(())
    }
}
