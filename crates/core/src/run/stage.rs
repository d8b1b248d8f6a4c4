use super::*;
use crate::*;

impl RunState {
    /// Resets the round state for a new stage and deals the opening hand.
    ///
    /// Every stage after the first bumps the stage counter and grows the target.
    pub(super) fn begin_stage(&mut self, initial: bool, events: &mut EventBus) {
        if initial {
            self.state.stage = 1;
            self.state.target = self.config.initial_target;
        } else {
            self.state.stage = self.state.stage.saturating_add(1);
            self.state.target = self.config.next_target(self.state.target);
        }
        self.state.score = 0;
        self.state.uses_this_turn = 0;
        self.state.pending_multiplier = 1.0;
        self.state.pending_cost_ignore = 0;
        self.state.evolution.clear();
        self.hand.clear();
        self.deck = Deck::for_stage(&self.master, &mut self.rng);
        self.state.phase = Phase::AwaitingPlay;
        events.push(Event::StageStarted {
            stage: self.state.stage,
            target: self.state.target,
        });
        self.start_turn(events);
        if self.hand.is_empty() && !self.state.stage_cleared() {
            self.game_over(events);
        }
    }

    pub fn stage_outcome(&self) -> Option<StageOutcome> {
        match self.state.phase {
            Phase::GameOver => Some(StageOutcome::GameOver),
            Phase::Evolution => Some(StageOutcome::Cleared),
            _ => None,
        }
    }

    /// Hand and both piles exhausted while still short of the target.
    pub(super) fn out_of_cards(&self) -> bool {
        self.hand.is_empty() && self.deck.is_empty() && !self.state.stage_cleared()
    }

    pub(super) fn clear_stage(&mut self, events: &mut EventBus) {
        events.push(Event::StageCleared {
            stage: self.state.stage,
            score: self.state.score,
            target: self.state.target,
        });
        self.enter_evolution(events);
    }

    pub(super) fn game_over(&mut self, events: &mut EventBus) {
        self.state.phase = Phase::GameOver;
        self.state.evolution.clear();
        self.record_high_score(events);
        events.push(Event::GameOver {
            stage: self.state.stage,
            score: self.state.score,
            high_score: self.state.high_score,
        });
    }
}
