use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MAX_LEVEL: u32 = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardCategory {
    Score,
    Buff,
    Cost,
    Draw,
    Utility,
}

impl CardCategory {
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "score" => Some(Self::Score),
            "buff" => Some(Self::Buff),
            "cost" => Some(Self::Cost),
            "draw" | "resource" => Some(Self::Draw),
            "utility" => Some(Self::Utility),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Score,
    Draw,
    ScoreMultiplier,
    CostIgnore,
    PurgeSelf,
    AdjustUsesRemaining,
    RetrieveFromDiscard,
    ShuffleDiscardIntoDeck,
    DiscardFromHand,
}

impl EffectKind {
    pub const ALL: [EffectKind; 9] = [
        EffectKind::Score,
        EffectKind::Draw,
        EffectKind::ScoreMultiplier,
        EffectKind::CostIgnore,
        EffectKind::PurgeSelf,
        EffectKind::AdjustUsesRemaining,
        EffectKind::RetrieveFromDiscard,
        EffectKind::ShuffleDiscardIntoDeck,
        EffectKind::DiscardFromHand,
    ];

    /// Kinds that still fire when their resolved value is zero.
    pub fn fires_at_zero(self) -> bool {
        match self {
            Self::PurgeSelf
            | Self::RetrieveFromDiscard
            | Self::ShuffleDiscardIntoDeck
            | Self::AdjustUsesRemaining
            | Self::DiscardFromHand => true,
            Self::Score | Self::Draw | Self::ScoreMultiplier | Self::CostIgnore => false,
        }
    }

    /// Kinds whose magnitude is scaled by the pending score multiplier.
    pub fn takes_multiplier(self) -> bool {
        match self {
            Self::Score
            | Self::Draw
            | Self::CostIgnore
            | Self::PurgeSelf
            | Self::AdjustUsesRemaining
            | Self::RetrieveFromDiscard
            | Self::DiscardFromHand => true,
            Self::ScoreMultiplier | Self::ShuffleDiscardIntoDeck => false,
        }
    }

    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "score" => Some(Self::Score),
            "draw" => Some(Self::Draw),
            "score_multiplier" | "scoremultiplier" | "multiplier" => Some(Self::ScoreMultiplier),
            "cost_ignore" | "costignore" => Some(Self::CostIgnore),
            "purge_self" | "purgeself" | "purge" => Some(Self::PurgeSelf),
            "adjust_uses_remaining" | "adjustusesremaining" | "card_use_mod" | "cardusemod" => {
                Some(Self::AdjustUsesRemaining)
            }
            "retrieve_from_discard" | "retrievefromdiscard" | "retrieve" => {
                Some(Self::RetrieveFromDiscard)
            }
            "shuffle_discard_into_deck" | "shufflediscardintodeck" | "recycle" => {
                Some(Self::ShuffleDiscardIntoDeck)
            }
            "discard_from_hand" | "discardfromhand" | "discard_hand" | "discardhand" => {
                Some(Self::DiscardFromHand)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub values: Vec<i64>,
    #[serde(default)]
    pub description: String,
}

impl EffectSpec {
    pub fn new(kind: EffectKind, values: &[i64], description: &str) -> Self {
        Self {
            kind,
            values: values.to_vec(),
            description: description.to_string(),
        }
    }

    /// Value at `level`, clamped to the last entry of the table.
    pub fn value_at(&self, level: u32) -> i64 {
        let last = self.values.len().saturating_sub(1);
        let index = (level as usize).min(last);
        self.values.get(index).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDefinition {
    pub id: String,
    pub name: String,
    pub category: CardCategory,
    #[serde(default)]
    pub max_level: Option<u32>,
    #[serde(default)]
    pub base_level: u32,
    pub effects: Vec<EffectSpec>,
}

impl CardDefinition {
    pub fn max_level(&self) -> u32 {
        self.max_level.unwrap_or(DEFAULT_MAX_LEVEL)
    }

    pub fn starting_level(&self) -> u32 {
        self.base_level.min(self.max_level())
    }

    pub fn clamp_level(&self, level: u32) -> u32 {
        level.min(self.max_level())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One independently levelable copy of a card definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardInstance {
    pub instance_id: InstanceId,
    pub definition_id: String,
    pub level: u32,
}

impl CardInstance {
    pub fn new(instance_id: InstanceId, definition: &CardDefinition) -> Self {
        Self {
            instance_id,
            definition_id: definition.id.clone(),
            level: definition.starting_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_lookup_clamps_to_last_entry() {
        let spec = EffectSpec::new(EffectKind::Score, &[2, 4], "");
        assert_eq!(spec.value_at(0), 2);
        assert_eq!(spec.value_at(1), 4);
        assert_eq!(spec.value_at(9), 4);
    }

    #[test]
    fn max_level_defaults_to_two() {
        let def = CardDefinition {
            id: "x".to_string(),
            name: "X".to_string(),
            category: CardCategory::Utility,
            max_level: None,
            base_level: 5,
            effects: Vec::new(),
        };
        assert_eq!(def.max_level(), DEFAULT_MAX_LEVEL);
        assert_eq!(def.starting_level(), DEFAULT_MAX_LEVEL);
    }

    #[test]
    fn multiplier_and_zero_policies_are_disjoint_where_expected() {
        assert!(!EffectKind::ScoreMultiplier.takes_multiplier());
        assert!(!EffectKind::ShuffleDiscardIntoDeck.takes_multiplier());
        assert!(!EffectKind::Score.fires_at_zero());
        assert!(EffectKind::PurgeSelf.fires_at_zero());
        assert_eq!(EffectKind::from_keyword("Multiplier"), Some(EffectKind::ScoreMultiplier));
        assert_eq!(EffectKind::from_keyword("teleport"), None);
    }
}
