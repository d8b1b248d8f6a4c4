use super::*;
use crate::*;

impl RunState {
    /// Resets the per-turn use counter and tops the hand up to the hand size.
    /// The existing hand is kept.
    pub(super) fn start_turn(&mut self, events: &mut EventBus) {
        self.state.uses_this_turn = 0;
        let shortfall = self.config.hand_size.saturating_sub(self.hand.len());
        self.draw_into_hand(shortfall, events);
        events.push(Event::TurnStarted {
            stage: self.state.stage,
            hand: self.hand.len(),
        });
    }

    pub(super) fn draw_into_hand(&mut self, count: usize, events: &mut EventBus) -> usize {
        if count == 0 {
            return 0;
        }
        let drawn = self.deck.draw_cards(count, &mut self.rng, events);
        let drawn_count = drawn.len();
        self.hand.extend(drawn);
        if drawn_count > 0 {
            events.push(Event::CardsDrawn {
                count: drawn_count,
            });
        }
        drawn_count
    }

    /// Plays the hand card at `hand_index`.
    ///
    /// Returns `Ok(None)` when the play is ignored: wrong phase, index out of
    /// range, or no uses left with no cost-ignore pending.
    pub fn play_card(
        &mut self,
        hand_index: usize,
        events: &mut EventBus,
    ) -> Result<Option<PlayReport>, RunError> {
        if self.state.phase != Phase::AwaitingPlay {
            return Ok(None);
        }
        let Some(&instance_id) = self.hand.get(hand_index) else {
            return Ok(None);
        };
        let cost_ignored = self.state.pending_cost_ignore > 0;
        if !cost_ignored && self.state.uses_exhausted() {
            return Ok(None);
        }
        let card = self
            .instance(instance_id)
            .cloned()
            .ok_or(RunError::UnknownInstance(instance_id))?;
        let effects = resolve_effects(self.catalog.definition(&card.definition_id)?, card.level);

        if cost_ignored {
            self.state.pending_cost_ignore -= 1;
        } else {
            self.state.uses_this_turn += 1;
        }
        self.hand.remove(hand_index);
        events.push(Event::CardPlayed {
            instance: instance_id,
            definition: card.definition_id.clone(),
            level: card.level,
            cost_ignored,
        });

        let (applied, returned_to_discard) = self.apply_effects(instance_id, &effects, events);
        if returned_to_discard {
            self.deck.discard(vec![instance_id]);
        }
        let outcome = self.after_play(events);
        Ok(Some(PlayReport {
            instance: instance_id,
            definition_id: card.definition_id,
            level: card.level,
            cost_ignored,
            effects: applied,
            returned_to_discard,
            outcome,
        }))
    }

    /// Ends the turn on the player's request. Ignored outside normal play.
    pub fn end_turn_manually(&mut self, events: &mut EventBus) -> Option<StageOutcome> {
        if self.state.phase != Phase::AwaitingPlay {
            return None;
        }
        self.end_turn(events)
    }

    pub(super) fn end_turn(&mut self, events: &mut EventBus) -> Option<StageOutcome> {
        if self.state.stage_cleared() {
            self.clear_stage(events);
            return Some(StageOutcome::Cleared);
        }
        self.start_turn(events);
        if self.hand.is_empty() {
            self.game_over(events);
            return Some(StageOutcome::GameOver);
        }
        None
    }

    fn after_play(&mut self, events: &mut EventBus) -> Option<StageOutcome> {
        if self.out_of_cards() {
            self.game_over(events);
            return Some(StageOutcome::GameOver);
        }
        if self.state.stage_cleared() {
            self.clear_stage(events);
            return Some(StageOutcome::Cleared);
        }
        let blocked = self.state.pending_cost_ignore == 0 && self.state.uses_exhausted();
        if self.hand.is_empty() || blocked {
            return self.end_turn(events);
        }
        None
    }
}
