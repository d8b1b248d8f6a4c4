use super::*;
use crate::*;

impl RunState {
    /// One entry per definition that still has an instance below its max
    /// level, in master-list order, carrying the lowest level among them.
    pub fn evolvable_definitions(&self) -> Vec<EvolutionCandidate> {
        let mut out: Vec<EvolutionCandidate> = Vec::new();
        for card in &self.master {
            let Some(def) = self.catalog.get(&card.definition_id) else {
                continue;
            };
            if card.level >= def.max_level() {
                continue;
            }
            match out
                .iter_mut()
                .find(|candidate| candidate.definition_id == card.definition_id)
            {
                Some(candidate) => candidate.level = candidate.level.min(card.level),
                None => out.push(EvolutionCandidate {
                    definition_id: card.definition_id.clone(),
                    level: card.level,
                }),
            }
        }
        out
    }

    pub(super) fn enter_evolution(&mut self, events: &mut EventBus) {
        self.state.phase = Phase::Evolution;
        self.state.evolution.active = true;
        self.state.evolution.remaining = self.config.evolution_selections;
        self.offer_candidates(events);
    }

    /// Rolls a fresh candidate list, or moves straight on to the next stage
    /// when nothing can evolve or no selections are left.
    fn offer_candidates(&mut self, events: &mut EventBus) {
        if self.state.evolution.remaining == 0 {
            self.finish_evolution(events);
            return;
        }
        let mut candidates = self.evolvable_definitions();
        if candidates.is_empty() {
            events.push(Event::EvolutionSkipped {
                stage: self.state.stage,
            });
            self.finish_evolution(events);
            return;
        }
        self.rng.shuffle(&mut candidates);
        candidates.truncate(self.config.evolution_choices.max(1));
        events.push(Event::EvolutionOffered {
            remaining: self.state.evolution.remaining,
            candidates: candidates
                .iter()
                .map(|candidate| candidate.definition_id.clone())
                .collect(),
        });
        self.state.evolution.candidates = candidates;
    }

    /// Levels up the lowest-level instance of the chosen candidate's definition.
    ///
    /// Ignored (returns `Ok(None)`) outside the evolution phase or for an index
    /// that is not on offer.
    pub fn select_evolution(
        &mut self,
        candidate_index: usize,
        events: &mut EventBus,
    ) -> Result<Option<EvolvedCard>, RunError> {
        if self.state.phase != Phase::Evolution || self.state.evolution.remaining == 0 {
            return Ok(None);
        }
        let Some(candidate) = self.state.evolution.candidates.get(candidate_index).cloned() else {
            return Ok(None);
        };
        let max_level = self.catalog.definition(&candidate.definition_id)?.max_level();
        let Some(pos) = lowest_level_position(&self.master, &candidate.definition_id, max_level)
        else {
            return Ok(None);
        };

        let card = &mut self.master[pos];
        card.level += 1;
        let evolved = EvolvedCard {
            instance: card.instance_id,
            definition_id: card.definition_id.clone(),
            level: card.level,
        };
        events.push(Event::CardEvolved {
            instance: evolved.instance,
            definition: evolved.definition_id.clone(),
            level: evolved.level,
        });
        self.state.evolution.remaining -= 1;
        self.offer_candidates(events);
        Ok(Some(evolved))
    }

    fn finish_evolution(&mut self, events: &mut EventBus) {
        self.state.evolution.clear();
        self.state.phase = Phase::StageTransition;
        self.record_high_score(events);
        self.begin_stage(false, events);
    }
}

/// First instance of `definition_id` below `max_level` with the lowest level.
fn lowest_level_position(master: &[CardInstance], definition_id: &str, max_level: u32) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (idx, card) in master.iter().enumerate() {
        if card.definition_id != definition_id || card.level >= max_level {
            continue;
        }
        match best {
            Some((_, level)) if level <= card.level => {}
            _ => best = Some((idx, card.level)),
        }
    }
    best.map(|(idx, _)| idx)
}
