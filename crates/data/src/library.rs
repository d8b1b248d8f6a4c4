use crate::load::{load_json, write_json};
use crate::schema::{LibraryFile, LibraryRecord};
use evodeck_core::{Catalog, DeckConfig, DeckEntry, DeckSource};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck has {actual} cards, expected exactly {expected}")]
    WrongSize { expected: u32, actual: u32 },
    #[error("unknown card: {0}")]
    UnknownCard(String),
    #[error("at least one deck is required")]
    LastDeck,
    #[error("no deck at index {0}")]
    InvalidIndex(usize),
}

/// The player's saved decks and which one is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckLibrary {
    decks: Vec<DeckConfig>,
    selected: usize,
}

impl Default for DeckLibrary {
    fn default() -> Self {
        Self {
            decks: vec![DeckConfig::starter(), DeckConfig::starter()],
            selected: 0,
        }
    }
}

impl DeckLibrary {
    pub fn new(decks: Vec<DeckConfig>, selected: usize) -> Self {
        if decks.is_empty() {
            return Self::default();
        }
        let selected = if selected < decks.len() { selected } else { 0 };
        Self { decks, selected }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let record: LibraryRecord = load_json(path)?;
        let file = record.into_file();
        Ok(Self::new(file.decks, file.selected))
    }

    /// Missing or unreadable files give the default library.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = LibraryFile {
            selected: self.selected,
            decks: self.decks.clone(),
        };
        write_json(path, &file)
    }

    pub fn decks(&self) -> &[DeckConfig] {
        &self.decks
    }

    pub fn deck(&self, index: usize) -> Result<&DeckConfig, DeckError> {
        self.decks.get(index).ok_or(DeckError::InvalidIndex(index))
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &DeckConfig {
        &self.decks[self.selected]
    }

    pub fn select(&mut self, index: usize) -> Result<(), DeckError> {
        self.deck(index)?;
        self.selected = index;
        Ok(())
    }

    /// Appends a copy of the starter deck and returns its index.
    pub fn create(&mut self, name: &str) -> usize {
        let mut deck = DeckConfig::starter();
        deck.name = match name.trim() {
            "" => format!("New Deck {}", self.decks.len() + 1),
            trimmed => trimmed.to_string(),
        };
        self.decks.push(deck);
        self.decks.len() - 1
    }

    pub fn copy(&mut self, index: usize) -> Result<usize, DeckError> {
        let mut deck = self.deck(index)?.clone();
        deck.name = format!("{} (copy)", deck.name);
        self.decks.push(deck);
        Ok(self.decks.len() - 1)
    }

    pub fn delete(&mut self, index: usize) -> Result<DeckConfig, DeckError> {
        self.deck(index)?;
        if self.decks.len() <= 1 {
            return Err(DeckError::LastDeck);
        }
        let removed = self.decks.remove(index);
        if self.selected == index {
            self.selected = 0;
        } else if self.selected > index {
            self.selected -= 1;
        }
        Ok(removed)
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), DeckError> {
        let deck = self
            .decks
            .get_mut(index)
            .ok_or(DeckError::InvalidIndex(index))?;
        deck.name = match name.trim() {
            "" => format!("Untitled Deck {}", index + 1),
            trimmed => trimmed.to_string(),
        };
        Ok(())
    }

    /// Working copy of the deck at `index`. Nothing is stored until the draft
    /// is committed.
    pub fn edit(&self, index: usize) -> Result<DeckDraft, DeckError> {
        let deck = self.deck(index)?.clone();
        Ok(DeckDraft { index, deck })
    }

    /// Replaces the edited deck with the draft, if the draft is playable.
    pub fn commit(
        &mut self,
        draft: DeckDraft,
        catalog: &Catalog,
        deck_size: u32,
    ) -> Result<(), DeckError> {
        let DeckDraft { index, mut deck } = draft;
        self.deck(index)?;
        Self::validate(&deck, catalog, deck_size)?;
        deck.cards.retain(|entry| entry.count > 0);
        if deck.name.trim().is_empty() {
            deck.name = format!("Untitled Deck {}", index + 1);
        } else {
            deck.name = deck.name.trim().to_string();
        }
        self.decks[index] = deck;
        Ok(())
    }

    /// A playable deck has exactly `deck_size` cards, all known to the catalog.
    pub fn validate(deck: &DeckConfig, catalog: &Catalog, deck_size: u32) -> Result<(), DeckError> {
        if let Some(entry) = deck.cards.iter().find(|entry| !catalog.contains(&entry.id)) {
            return Err(DeckError::UnknownCard(entry.id.clone()));
        }
        let actual = deck.total_cards();
        if actual != deck_size {
            return Err(DeckError::WrongSize {
                expected: deck_size,
                actual,
            });
        }
        Ok(())
    }
}

/// An in-progress edit of one library deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckDraft {
    index: usize,
    deck: DeckConfig,
}

impl DeckDraft {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn deck(&self) -> &DeckConfig {
        &self.deck
    }

    pub fn total_cards(&self) -> u32 {
        self.deck.total_cards()
    }

    /// Blank names are replaced on commit.
    pub fn rename(&mut self, name: &str) {
        self.deck.name = name.to_string();
    }

    /// Adds `delta` copies of `id`, dropping the entry once its count reaches
    /// zero. Returns the new count.
    pub fn change_card_count(
        &mut self,
        id: &str,
        delta: i32,
        catalog: &Catalog,
    ) -> Result<u32, DeckError> {
        if !catalog.contains(id) {
            return Err(DeckError::UnknownCard(id.to_string()));
        }
        let cards = &mut self.deck.cards;
        let Some(pos) = cards.iter().position(|entry| entry.id == id) else {
            if delta <= 0 {
                return Ok(0);
            }
            cards.push(DeckEntry {
                id: id.to_string(),
                count: delta.unsigned_abs(),
            });
            return Ok(delta.unsigned_abs());
        };
        let count = i64::from(cards[pos].count) + i64::from(delta);
        if count <= 0 {
            cards.remove(pos);
            return Ok(0);
        }
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        cards[pos].count = count;
        Ok(count)
    }
}

impl DeckSource for DeckLibrary {
    fn selected_deck(&self) -> Option<DeckConfig> {
        self.decks.get(self.selected).cloned()
    }
}
