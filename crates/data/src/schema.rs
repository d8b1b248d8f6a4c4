use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use evodeck_core::{CardDefinition, DeckConfig, DeckEntry, EffectSpec};

/// Card definition as written in a catalog file. Kinds and categories are
/// free-form keywords resolved at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCardDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_category", alias = "type")]
    pub category: String,
    #[serde(default)]
    pub max_level: Option<u32>,
    #[serde(default, alias = "baseEvolution")]
    pub base_level: u32,
    pub effects: Vec<RawEffect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEffect {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, alias = "value")]
    pub values: Vec<i64>,
    /// Single named value table, used when `values` is absent.
    #[serde(default)]
    pub params: BTreeMap<String, Vec<i64>>,
    #[serde(default)]
    pub description: String,
}

impl RawEffect {
    pub fn value_table(&self) -> Vec<i64> {
        if !self.values.is_empty() {
            return self.values.clone();
        }
        self.params.values().next().cloned().unwrap_or_default()
    }
}

fn default_category() -> String {
    "utility".to_string()
}

/// On-disk deck library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryFile {
    #[serde(default)]
    pub selected: usize,
    pub decks: Vec<DeckConfig>,
}

/// Either the current library layout or a bare list of decks.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LibraryRecord {
    File(LibraryFile),
    Bare(Vec<DeckConfig>),
}

impl LibraryRecord {
    pub fn into_file(self) -> LibraryFile {
        match self {
            Self::File(file) => file,
            Self::Bare(decks) => LibraryFile { selected: 0, decks },
        }
    }
}
