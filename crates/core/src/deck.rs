use crate::{CardInstance, Catalog, Event, EventBus, InstanceId, RngState, RunError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckEntry {
    pub id: String,
    pub count: u32,
}

/// A named deck recipe: which definitions, how many of each.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckConfig {
    pub name: String,
    pub cards: Vec<DeckEntry>,
}

impl DeckConfig {
    pub fn starter() -> Self {
        let cards = [
            ("score_1", 8),
            ("score_2", 4),
            ("new_score_3", 2),
            ("new_draw_low", 2),
            ("combo_x2", 2),
            ("combo_ignore", 1),
            ("new_max_use_add", 1),
        ]
        .into_iter()
        .map(|(id, count)| DeckEntry {
            id: id.to_string(),
            count,
        })
        .collect();
        Self {
            name: "Starter Deck".to_string(),
            cards,
        }
    }

    pub fn total_cards(&self) -> u32 {
        self.cards.iter().map(|entry| entry.count).sum()
    }

    pub fn count_of(&self, id: &str) -> u32 {
        self.cards
            .iter()
            .filter(|entry| entry.id == id)
            .map(|entry| entry.count)
            .sum()
    }
}

/// Expands a deck recipe into fresh card instances at their starting level.
///
/// Unknown definition ids are a configuration error and abort the build.
pub fn build_master_list(
    config: &DeckConfig,
    catalog: &Catalog,
    next_id: &mut u32,
) -> Result<Vec<CardInstance>, RunError> {
    let mut master = Vec::with_capacity(config.total_cards() as usize);
    for entry in &config.cards {
        let def = catalog
            .get(&entry.id)
            .ok_or_else(|| RunError::UnknownCardDefinition(entry.id.clone()))?;
        for _ in 0..entry.count {
            let id = InstanceId(*next_id);
            *next_id = next_id.saturating_add(1);
            master.push(CardInstance::new(id, def));
        }
    }
    Ok(master)
}

/// Draw and discard piles, holding ids into the run's master list.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub draw: Vec<InstanceId>,
    pub discard: Vec<InstanceId>,
}

impl Deck {
    /// Fresh shuffled draw pile over the whole master list, empty discard.
    pub fn for_stage(master: &[CardInstance], rng: &mut RngState) -> Self {
        let mut deck = Self {
            draw: master.iter().map(|card| card.instance_id).collect(),
            discard: Vec::new(),
        };
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty() && self.discard.is_empty()
    }

    /// Pops up to `count` cards off the end of the draw pile, reshuffling the
    /// discard pile in whenever the draw pile runs dry. Stops early once both
    /// piles are empty.
    pub fn draw_cards(
        &mut self,
        count: usize,
        rng: &mut RngState,
        events: &mut EventBus,
    ) -> Vec<InstanceId> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if self.draw.is_empty() {
                let moved = self.reshuffle_discard(rng);
                if moved > 0 {
                    events.push(Event::DiscardReshuffled { count: moved });
                }
            }
            match self.draw.pop() {
                Some(card) => cards.push(card),
                None => break,
            }
        }
        cards
    }

    pub fn discard(&mut self, mut cards: Vec<InstanceId>) {
        self.discard.append(&mut cards);
    }

    /// Moves the whole discard pile into the draw pile and shuffles it.
    pub fn reshuffle_discard(&mut self, rng: &mut RngState) -> usize {
        if self.discard.is_empty() {
            return 0;
        }
        let moved = self.discard.len();
        self.draw.append(&mut self.discard);
        rng.shuffle(&mut self.draw);
        moved
    }

    /// Removes up to `count` uniformly random cards from the discard pile.
    pub fn take_random_discards(&mut self, count: usize, rng: &mut RngState) -> Vec<InstanceId> {
        let mut picked = rng.sample_indices(self.discard.len(), count);
        picked.sort_unstable_by(|a, b| b.cmp(a));
        picked
            .into_iter()
            .map(|idx| self.discard.remove(idx))
            .collect()
    }

    pub fn remove(&mut self, id: InstanceId) -> bool {
        let before = self.len();
        self.draw.retain(|card| *card != id);
        self.discard.retain(|card| *card != id);
        before != self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<InstanceId> {
        range.map(InstanceId).collect()
    }

    #[test]
    fn empty_draw_pile_refills_from_discard() {
        let mut rng = RngState::from_seed(3);
        let mut events = EventBus::default();
        let mut deck = Deck {
            draw: Vec::new(),
            discard: ids(0..6),
        };
        let drawn = deck.draw_cards(1, &mut rng, &mut events);
        assert_eq!(drawn.len(), 1);
        assert_eq!(deck.draw.len(), 5);
        assert!(deck.discard.is_empty());
        let reshuffles: Vec<Event> = events.drain().collect();
        assert_eq!(reshuffles, vec![Event::DiscardReshuffled { count: 6 }]);
    }

    #[test]
    fn drawing_past_both_piles_returns_short() {
        let mut rng = RngState::from_seed(3);
        let mut events = EventBus::default();
        let mut deck = Deck {
            draw: ids(0..2),
            discard: ids(2..3),
        };
        let drawn = deck.draw_cards(5, &mut rng, &mut events);
        assert_eq!(drawn.len(), 3);
        assert!(deck.is_empty());
    }

    #[test]
    fn draws_from_the_end_of_the_pile() {
        let mut rng = RngState::from_seed(3);
        let mut events = EventBus::default();
        let mut deck = Deck {
            draw: ids(0..3),
            discard: Vec::new(),
        };
        let drawn = deck.draw_cards(2, &mut rng, &mut events);
        assert_eq!(drawn, vec![InstanceId(2), InstanceId(1)]);
    }

    #[test]
    fn master_list_rejects_unknown_ids() {
        let catalog = Catalog::builtin();
        let config = DeckConfig {
            name: "bad".to_string(),
            cards: vec![DeckEntry {
                id: "ghost".to_string(),
                count: 1,
            }],
        };
        let mut next_id = 1;
        let err = build_master_list(&config, &catalog, &mut next_id).unwrap_err();
        assert!(matches!(err, RunError::UnknownCardDefinition(id) if id == "ghost"));
    }

    #[test]
    fn master_list_assigns_unique_ids() {
        let catalog = Catalog::builtin();
        let config = DeckConfig::starter();
        let mut next_id = 1;
        let master = build_master_list(&config, &catalog, &mut next_id).expect("build");
        assert_eq!(master.len(), 20);
        let mut seen: Vec<InstanceId> = master.iter().map(|card| card.instance_id).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 20);
        assert!(master.iter().all(|card| card.level == 0));
        assert_eq!(next_id, 21);
    }

    #[test]
    fn stage_pile_covers_master_list() {
        let catalog = Catalog::builtin();
        let mut next_id = 1;
        let master =
            build_master_list(&DeckConfig::starter(), &catalog, &mut next_id).expect("build");
        let mut rng = RngState::from_seed(11);
        let deck = Deck::for_stage(&master, &mut rng);
        let mut draw = deck.draw.clone();
        draw.sort_unstable();
        let mut expected: Vec<InstanceId> = master.iter().map(|card| card.instance_id).collect();
        expected.sort_unstable();
        assert_eq!(draw, expected);
        assert!(deck.discard.is_empty());
    }
}
