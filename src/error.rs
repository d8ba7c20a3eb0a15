//! Error types
//!
//! Configuration defects are caught once at startup by [`GameConfig::validate`].
//! Nothing in match detection or cascade resolution can fail.
//!
//! [`GameConfig::validate`]: crate::config::GameConfig::validate

/// A configuration that the engine cannot run with
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("minMatch must be at least 2, got {0}")]
    MinMatchTooSmall(usize),
    #[error("no assets of kind `block` were configured")]
    EmptyPalette,
    #[error("grid dimensions {rows}x{cols} exceed the {max_cells} cell limit")]
    GridTooLarge {
        rows: usize,
        cols: usize,
        max_cells: usize,
    },
    #[error("{count} distinct block kinds configured, at most {max} are supported")]
    PaletteTooLarge { count: usize, max: usize },
    #[error("palette has {palette} distinct blocks but minMatch is {min_match}; generation could never finish")]
    PaletteTooSmall { palette: usize, min_match: usize },
}

/// Failures surfaced by the engine itself
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("preset grid is {rows}x{cols} but the rules expect {expected_rows}x{expected_cols}")]
    GridMismatch {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },
    #[error("no palette entry can be placed at `({row}, {col})` without forming a match")]
    NoCandidate { row: usize, col: usize },
}
