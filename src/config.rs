//! Game configuration
//!
//! Loaded once from the same JSON file the canvas shell fetches at startup.
//! Only the grid, gameplay and block-asset sections matter to the engine;
//! anything else in the file (timer, screen text, sounds) is ignored here.

use serde::{Deserialize, Serialize};

use crate::board::palette::MAX_PALETTE_SIZE;
use crate::board::{Palette, Rules};
use crate::consts::*;
use crate::error::ConfigError;

/// Asset categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A block image; every block asset is one palette entry
    Block,
    Background,
    Ui,
    Sound,
    Music,
    #[serde(other)]
    Other,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Block => "block",
            AssetKind::Background => "background",
            AssetKind::Ui => "ui",
            AssetKind::Sound => "sound",
            AssetKind::Music => "music",
            AssetKind::Other => "other",
        }
    }
}

/// One entry of the asset list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
    pub name: String,
    pub kind: AssetKind,
    /// Image or sound path, only meaningful to the asset loader
    #[serde(default)]
    pub src: String,
}

impl AssetSpec {
    pub fn block(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: AssetKind::Block,
            src: format!("assets/{name}.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameplayConfig {
    /// Shortest run that counts as a match
    #[serde(default = "default_min_match")]
    pub min_match: usize,
    /// Points per cleared cell
    #[serde(default = "default_score_per_match")]
    pub score_per_match: u64,
}

fn default_min_match() -> usize {
    DEFAULT_MIN_MATCH
}

fn default_score_per_match() -> u64 {
    DEFAULT_SCORE_PER_MATCH
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            min_match: DEFAULT_MIN_MATCH,
            score_per_match: DEFAULT_SCORE_PER_MATCH,
        }
    }
}

/// Top-level configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub gameplay: GameplayConfig,
    #[serde(default)]
    pub assets: Vec<AssetSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            gameplay: GameplayConfig::default(),
            assets: DEFAULT_BLOCKS.iter().map(|name| AssetSpec::block(name)).collect(),
        }
    }
}

impl GameConfig {
    /// Parse a config document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Distinct block asset names in file order
    fn block_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for asset in self.assets.iter().filter(|a| a.kind == AssetKind::Block) {
            if !names.contains(&asset.name.as_str()) {
                names.push(&asset.name);
            }
        }
        names
    }

    /// Block assets in file order, duplicates removed
    pub fn palette(&self) -> Option<Palette> {
        Palette::new(self.block_names())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            rows: self.grid.rows,
            cols: self.grid.cols,
            min_match: self.gameplay.min_match,
            score_per_match: self.gameplay.score_per_match,
        }
    }

    /// Check everything the engine relies on and derive its inputs.
    /// Must succeed before an [`Engine`](crate::board::Engine) is built.
    pub fn validate(&self) -> Result<(Rules, Palette), ConfigError> {
        let rules = self.rules();
        let distinct = self.block_names().len();
        if distinct > MAX_PALETTE_SIZE {
            return Err(ConfigError::PaletteTooLarge {
                count: distinct,
                max: MAX_PALETTE_SIZE,
            });
        }
        let palette = self.palette().ok_or(ConfigError::EmptyPalette)?;
        rules.validate(&palette)?;
        log::debug!(
            "Config valid: {}x{}, minMatch {}, palette {:?}",
            rules.rows,
            rules.cols,
            rules.min_match,
            palette.ids().filter_map(|id| palette.name(id)).collect::<Vec<_>>()
        );
        Ok((rules, palette))
    }
}
