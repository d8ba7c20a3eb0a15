//! Block palette
//!
//! The set of block kinds eligible for generation and refill. Built once from
//! configuration and never modified afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{BlockId, Cell};

/// Largest palette a [`BlockId`] can index
pub const MAX_PALETTE_SIZE: usize = u8::MAX as usize + 1;

/// Ordered, deduplicated block names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    names: Vec<String>,
}

impl Palette {
    /// Build from names, dropping duplicates (first occurrence wins) and
    /// anything past [`MAX_PALETTE_SIZE`]. Returns `None` if nothing is left.
    pub fn new<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        if unique.len() > MAX_PALETTE_SIZE {
            log::warn!(
                "Palette has {} distinct blocks, keeping the first {}",
                unique.len(),
                MAX_PALETTE_SIZE
            );
            unique.truncate(MAX_PALETTE_SIZE);
        }
        (!unique.is_empty()).then_some(Self { names: unique })
    }

    /// Anonymous palette of `size` kinds named `block0`, `block1`, ...
    pub fn with_size(size: usize) -> Option<Self> {
        Self::new((0..size).map(|i| format!("block{i}")))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if there are no block kinds. `new` never builds such a palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.names.len()).map(|i| BlockId(i as u8))
    }

    pub fn name(&self, id: BlockId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn id_of(&self, name: &str) -> Option<BlockId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| BlockId(i as u8))
    }

    /// Uniformly random block kind
    pub fn draw<R: Rng>(&self, rng: &mut R) -> BlockId {
        BlockId(rng.random_range(0..self.names.len()) as u8)
    }

    /// Uniformly random block, already wrapped as a cell
    pub fn draw_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell::Block(self.draw(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_dedup_keeps_first() {
        let palette = Palette::new(["ruby", "jade", "ruby", "opal"]).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.id_of("opal"), Some(BlockId(2)));
        assert_eq!(palette.name(BlockId(1)), Some("jade"));
        assert_eq!(palette.name(BlockId(7)), None);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Palette::new(Vec::<String>::new()).is_none());
        assert!(Palette::with_size(0).is_none());
    }

    #[test]
    fn test_oversized_palette_truncated() {
        let palette = Palette::with_size(MAX_PALETTE_SIZE + 10).unwrap();
        assert_eq!(palette.len(), MAX_PALETTE_SIZE);
        assert_eq!(palette.id_of("block255"), Some(BlockId(255)));
        assert_eq!(palette.id_of("block256"), None);
    }

    #[test]
    fn test_draw_stays_in_range() {
        let palette = Palette::with_size(4).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..400 {
            let BlockId(id) = palette.draw(&mut rng);
            seen[id as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
