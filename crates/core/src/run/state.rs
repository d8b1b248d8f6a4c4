use super::*;
use crate::*;

impl RunState {
    pub fn new(config: GameConfig, catalog: Catalog, seed: u64) -> Self {
        let mut state = GameState::new();
        state.max_uses_per_turn = config.max_uses_per_turn;
        Self {
            config,
            catalog,
            rng: RngState::from_seed(seed),
            master: Vec::new(),
            deck: Deck::default(),
            hand: Vec::new(),
            state,
            deck_name: String::new(),
            next_instance_id: 1,
            score_store: None,
        }
    }

    pub fn set_score_store(&mut self, store: Option<Box<dyn ScoreStore>>) {
        if let Some(store) = store.as_ref() {
            self.state.high_score = self.state.high_score.max(store.load_high_score());
        }
        self.score_store = store;
    }

    /// Builds a fresh master list from `deck` and starts stage 1.
    ///
    /// Fails without touching the current session if the deck names a card the
    /// catalog does not know.
    pub fn start_new_game(&mut self, deck: &DeckConfig, events: &mut EventBus) -> Result<(), RunError> {
        let master = build_master_list(deck, &self.catalog, &mut self.next_instance_id)?;
        let high_score = match self.score_store.as_ref() {
            Some(store) => store.load_high_score().max(self.state.high_score),
            None => self.state.high_score,
        };
        self.master = master;
        self.deck = Deck::default();
        self.hand.clear();
        self.deck_name = deck.name.clone();
        self.state = GameState::new();
        self.state.max_uses_per_turn = self.config.max_uses_per_turn;
        self.state.high_score = high_score;
        events.push(Event::GameStarted {
            deck: self.deck_name.clone(),
            cards: self.master.len(),
            high_score,
        });
        self.begin_stage(true, events);
        Ok(())
    }

    /// Starts a game with whatever deck `source` has selected, falling back to
    /// the starter deck when it has none.
    pub fn start_new_game_from(
        &mut self,
        source: &dyn DeckSource,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        let deck = source.selected_deck().unwrap_or_else(DeckConfig::starter);
        self.start_new_game(&deck, events)
    }

    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.master.iter().find(|card| card.instance_id == id)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    pub(super) fn record_high_score(&mut self, events: &mut EventBus) {
        if self.state.score <= self.state.high_score {
            return;
        }
        self.state.high_score = self.state.score;
        if let Some(store) = self.score_store.as_mut() {
            store.save_high_score(self.state.high_score);
        }
        events.push(Event::HighScore {
            score: self.state.high_score,
        });
    }
}
