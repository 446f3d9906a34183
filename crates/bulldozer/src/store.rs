//! Where levels come from. Storage medium is the caller's business; the
//! bundled [`LevelPack`] holds a JSON array in memory.

use crate::level::LevelDescription;

pub trait LevelStore {
    /// Level with exactly this number.
    fn level(&self, number: u32) -> Option<&LevelDescription>;

    /// The lowest-numbered level after `number`, for "next level".
    fn next_after(&self, number: u32) -> Option<&LevelDescription>;
}

/// Levels sorted by number. Descriptions are not validated until played.
#[derive(Clone, Debug, Default)]
pub struct LevelPack {
    levels: Vec<LevelDescription>,
}

impl LevelPack {
    #[must_use]
    pub fn new(mut levels: Vec<LevelDescription>) -> Self {
        levels.sort_by_key(|l| l.number);
        Self { levels }
    }

    /// Parse a JSON array of level descriptions.
    ///
    /// # Errors
    ///
    /// The `serde_json` error when the text is not such an array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&LevelDescription> {
        self.levels.first()
    }
}

impl LevelStore for LevelPack {
    fn level(&self, number: u32) -> Option<&LevelDescription> {
        self.levels
            .binary_search_by_key(&number, |l| l.number)
            .ok()
            .map(|i| &self.levels[i])
    }

    fn next_after(&self, number: u32) -> Option<&LevelDescription> {
        let i = self.levels.partition_point(|l| l.number <= number);
        self.levels.get(i)
    }
}
