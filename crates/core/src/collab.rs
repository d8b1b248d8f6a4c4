//! Seams to the collaborators that live outside the core: deck storage and
//! high score persistence.

use crate::DeckConfig;

pub trait ScoreStore {
    /// Stored high score; absent or unreadable storage reads as zero.
    fn load_high_score(&self) -> i64;
    fn save_high_score(&mut self, score: i64);
}

pub trait DeckSource {
    fn selected_deck(&self) -> Option<DeckConfig>;
}

impl DeckSource for DeckConfig {
    fn selected_deck(&self) -> Option<DeckConfig> {
        Some(self.clone())
    }
}
