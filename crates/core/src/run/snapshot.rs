use super::RunState;
use crate::{describe_effects, resolve_effects, EvolutionCandidate, InstanceId, Phase, ResolvedEffect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandCardView {
    pub index: usize,
    pub instance: InstanceId,
    pub definition_id: String,
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    pub effects: Vec<ResolvedEffect>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateView {
    pub index: usize,
    pub definition_id: String,
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    pub text: String,
    pub next_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionView {
    pub active: bool,
    pub remaining: u32,
    pub candidates: Vec<CandidateView>,
}

/// Read-only view of the round for rendering collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub deck_name: String,
    pub stage: u32,
    pub score: i64,
    pub target: i64,
    pub high_score: i64,
    pub uses_this_turn: u32,
    pub max_uses_per_turn: u32,
    pub uses_remaining: u32,
    pub pending_multiplier: f64,
    pub pending_cost_ignore: u32,
    pub hand: Vec<HandCardView>,
    pub draw_pile: usize,
    pub discard_pile: usize,
    pub master_cards: usize,
    pub purged: u32,
    pub evolution: EvolutionView,
}

impl RunState {
    pub fn snapshot(&self) -> RoundSnapshot {
        let hand = self
            .hand
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let card = self.instance(*id)?;
                let def = self.catalog.get(&card.definition_id)?;
                Some(HandCardView {
                    index,
                    instance: card.instance_id,
                    definition_id: def.id.clone(),
                    name: def.name.clone(),
                    level: card.level,
                    max_level: def.max_level(),
                    effects: resolve_effects(def, card.level),
                    text: describe_effects(def, card.level),
                })
            })
            .collect();
        let candidates = self
            .state
            .evolution
            .candidates
            .iter()
            .enumerate()
            .filter_map(|(index, candidate)| self.candidate_view(index, candidate))
            .collect();
        RoundSnapshot {
            phase: self.state.phase,
            deck_name: self.deck_name.clone(),
            stage: self.state.stage,
            score: self.state.score,
            target: self.state.target,
            high_score: self.state.high_score,
            uses_this_turn: self.state.uses_this_turn,
            max_uses_per_turn: self.state.max_uses_per_turn,
            uses_remaining: self.state.uses_remaining(),
            pending_multiplier: self.state.pending_multiplier,
            pending_cost_ignore: self.state.pending_cost_ignore,
            hand,
            draw_pile: self.deck.draw.len(),
            discard_pile: self.deck.discard.len(),
            master_cards: self.master.len(),
            purged: self.state.purged,
            evolution: EvolutionView {
                active: self.state.evolution.active,
                remaining: self.state.evolution.remaining,
                candidates,
            },
        }
    }

    fn candidate_view(&self, index: usize, candidate: &EvolutionCandidate) -> Option<CandidateView> {
        let def = self.catalog.get(&candidate.definition_id)?;
        Some(CandidateView {
            index,
            definition_id: def.id.clone(),
            name: def.name.clone(),
            level: candidate.level,
            max_level: def.max_level(),
            text: describe_effects(def, candidate.level),
            next_text: describe_effects(def, candidate.level + 1),
        })
    }
}
