use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    /// No game started yet.
    Setup,
    AwaitingPlay,
    Evolution,
    StageTransition,
    GameOver,
}

/// One upgrade choice offered after a stage clear.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvolutionCandidate {
    pub definition_id: String,
    /// Lowest level among this definition's instances, for display.
    pub level: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvolutionState {
    pub active: bool,
    pub remaining: u32,
    pub candidates: Vec<EvolutionCandidate>,
}

impl EvolutionState {
    pub fn clear(&mut self) {
        self.active = false;
        self.remaining = 0;
        self.candidates.clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub stage: u32,
    pub score: i64,
    pub target: i64,
    pub uses_this_turn: u32,
    pub max_uses_per_turn: u32,
    pub pending_multiplier: f64,
    pub pending_cost_ignore: u32,
    pub high_score: i64,
    #[serde(default)]
    pub purged: u32,
    #[serde(default)]
    pub evolution: EvolutionState,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            stage: 1,
            score: 0,
            target: 0,
            uses_this_turn: 0,
            max_uses_per_turn: 0,
            pending_multiplier: 1.0,
            pending_cost_ignore: 0,
            high_score: 0,
            purged: 0,
            evolution: EvolutionState::default(),
        }
    }

    pub fn uses_remaining(&self) -> u32 {
        self.max_uses_per_turn.saturating_sub(self.uses_this_turn)
    }

    pub fn uses_exhausted(&self) -> bool {
        self.uses_this_turn >= self.max_uses_per_turn
    }

    pub fn stage_cleared(&self) -> bool {
        self.score >= self.target
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
