use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    #[serde(default = "default_max_uses")]
    pub max_uses_per_turn: u32,
    #[serde(default = "default_initial_target")]
    pub initial_target: i64,
    #[serde(default = "default_target_growth")]
    pub target_growth: f64,
    #[serde(default = "default_evolution_choices")]
    pub evolution_choices: usize,
    #[serde(default = "default_evolution_selections")]
    pub evolution_selections: u32,
    #[serde(default = "default_deck_size")]
    pub deck_size: u32,
}

fn default_hand_size() -> usize {
    5
}

fn default_max_uses() -> u32 {
    3
}

fn default_initial_target() -> i64 {
    10
}

fn default_target_growth() -> f64 {
    1.5
}

fn default_evolution_choices() -> usize {
    3
}

fn default_evolution_selections() -> u32 {
    3
}

fn default_deck_size() -> u32 {
    20
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: default_hand_size(),
            max_uses_per_turn: default_max_uses(),
            initial_target: default_initial_target(),
            target_growth: default_target_growth(),
            evolution_choices: default_evolution_choices(),
            evolution_selections: default_evolution_selections(),
            deck_size: default_deck_size(),
        }
    }
}

impl GameConfig {
    /// Target of the stage after one whose target was `current`.
    pub fn next_target(&self, current: i64) -> i64 {
        (current as f64 * self.target_growth).ceil() as i64
    }
}
