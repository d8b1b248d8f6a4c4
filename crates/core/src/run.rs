use crate::{
    CardInstance, Catalog, CatalogError, Deck, EffectKind, GameConfig, GameState, InstanceId,
    RngState, ScoreStore,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod apply;
mod evolution;
mod snapshot;
mod stage;
mod state;
mod turn;

pub use snapshot::*;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("unknown card definition: {0}")]
    UnknownCardDefinition(String),
    #[error("unknown card instance: {0}")]
    UnknownInstance(InstanceId),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A whole game session: the master card list, the piles, and the round state.
pub struct RunState {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub rng: RngState,
    pub master: Vec<CardInstance>,
    pub deck: Deck,
    pub hand: Vec<InstanceId>,
    pub state: GameState,
    pub deck_name: String,
    next_instance_id: u32,
    score_store: Option<Box<dyn ScoreStore>>,
}

impl fmt::Debug for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunState")
            .field("seed", &self.rng.seed())
            .field("deck_name", &self.deck_name)
            .field("master", &self.master.len())
            .field("deck", &self.deck)
            .field("hand", &self.hand)
            .field("state", &self.state)
            .field("score_store", &self.score_store.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StageOutcome {
    Cleared,
    GameOver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedEffect {
    pub kind: EffectKind,
    pub base: i64,
    pub applied: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayReport {
    pub instance: InstanceId,
    pub definition_id: String,
    pub level: u32,
    pub cost_ignored: bool,
    pub effects: Vec<AppliedEffect>,
    pub returned_to_discard: bool,
    pub outcome: Option<StageOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvolvedCard {
    pub instance: InstanceId,
    pub definition_id: String,
    pub level: u32,
}
