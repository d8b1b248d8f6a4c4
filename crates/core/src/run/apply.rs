use super::*;
use crate::*;

fn magnitude(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

impl RunState {
    /// Applies a played card's resolved effects left to right.
    ///
    /// The pending multiplier is taken once up front and scales every
    /// multiplier-sensitive effect of this card. If the card has none, the taken
    /// multiplier is folded back into the pending one so that multiplier cards
    /// chain across plays. Returns the applied effects and whether the card goes
    /// to the discard pile afterwards.
    pub(super) fn apply_effects(
        &mut self,
        source: InstanceId,
        effects: &[ResolvedEffect],
        events: &mut EventBus,
    ) -> (Vec<AppliedEffect>, bool) {
        let multiplier = self.state.pending_multiplier;
        self.state.pending_multiplier = 1.0;
        let mut consumed = false;
        let mut returned_to_discard = true;
        let mut applied_effects = Vec::with_capacity(effects.len());

        for effect in effects {
            let applied = if effect.kind.takes_multiplier() {
                consumed = true;
                scale_value(effect.value, multiplier)
            } else {
                effect.value
            };
            match effect.kind {
                EffectKind::Score => {
                    self.state.score = self.state.score.saturating_add(applied);
                }
                EffectKind::Draw => {
                    self.draw_into_hand(magnitude(applied), events);
                }
                EffectKind::ScoreMultiplier => {
                    self.state.pending_multiplier *= applied.max(0) as f64;
                    events.push(Event::MultiplierPending {
                        multiplier: self.state.pending_multiplier,
                    });
                }
                EffectKind::CostIgnore => {
                    let tokens = u32::try_from(applied).unwrap_or(0);
                    self.state.pending_cost_ignore =
                        self.state.pending_cost_ignore.saturating_add(tokens);
                }
                EffectKind::PurgeSelf => {
                    self.purge(source, events);
                    self.state.score = self.state.score.saturating_add(applied);
                    returned_to_discard = false;
                }
                EffectKind::AdjustUsesRemaining => {
                    let refund = u32::try_from(applied).unwrap_or(0);
                    self.state.uses_this_turn = self.state.uses_this_turn.saturating_sub(refund);
                }
                EffectKind::RetrieveFromDiscard => {
                    let cards = self.deck.take_random_discards(magnitude(applied), &mut self.rng);
                    let count = cards.len();
                    self.hand.extend(cards);
                    events.push(Event::CardsRetrieved { count });
                }
                EffectKind::ShuffleDiscardIntoDeck => {
                    let moved = self.deck.reshuffle_discard(&mut self.rng);
                    if moved > 0 {
                        events.push(Event::DiscardReshuffled { count: moved });
                    }
                }
                EffectKind::DiscardFromHand => {
                    let count = self.discard_random_from_hand(magnitude(applied));
                    events.push(Event::CardsDiscarded { count });
                }
            }
            events.push(Event::EffectApplied {
                kind: effect.kind,
                base: effect.value,
                applied,
            });
            applied_effects.push(AppliedEffect {
                kind: effect.kind,
                base: effect.value,
                applied,
            });
        }

        if !consumed {
            self.state.pending_multiplier *= multiplier;
        }
        (applied_effects, returned_to_discard)
    }

    fn discard_random_from_hand(&mut self, count: usize) -> usize {
        let mut picked = self.rng.sample_indices(self.hand.len(), count);
        picked.sort_unstable_by(|a, b| b.cmp(a));
        let cards: Vec<InstanceId> = picked
            .into_iter()
            .map(|idx| self.hand.remove(idx))
            .collect();
        let count = cards.len();
        self.deck.discard(cards);
        count
    }

    /// Removes a card from the run for good. It will not come back in later
    /// stages.
    fn purge(&mut self, id: InstanceId, events: &mut EventBus) {
        let Some(pos) = self.master.iter().position(|card| card.instance_id == id) else {
            return;
        };
        let card = self.master.remove(pos);
        self.deck.remove(id);
        self.hand.retain(|held| *held != id);
        self.state.purged = self.state.purged.saturating_add(1);
        events.push(Event::CardPurged {
            instance: id,
            definition: card.definition_id,
        });
    }
}
