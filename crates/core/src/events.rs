use crate::{EffectKind, InstanceId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        deck: String,
        cards: usize,
        high_score: i64,
    },
    StageStarted {
        stage: u32,
        target: i64,
    },
    TurnStarted {
        stage: u32,
        hand: usize,
    },
    CardsDrawn {
        count: usize,
    },
    DiscardReshuffled {
        count: usize,
    },
    CardPlayed {
        instance: InstanceId,
        definition: String,
        level: u32,
        cost_ignored: bool,
    },
    EffectApplied {
        kind: EffectKind,
        base: i64,
        applied: i64,
    },
    MultiplierPending {
        multiplier: f64,
    },
    CardPurged {
        instance: InstanceId,
        definition: String,
    },
    CardsRetrieved {
        count: usize,
    },
    CardsDiscarded {
        count: usize,
    },
    StageCleared {
        stage: u32,
        score: i64,
        target: i64,
    },
    EvolutionOffered {
        remaining: u32,
        candidates: Vec<String>,
    },
    CardEvolved {
        instance: InstanceId,
        definition: String,
        level: u32,
    },
    EvolutionSkipped {
        stage: u32,
    },
    HighScore {
        score: i64,
    },
    GameOver {
        stage: u32,
        score: i64,
        high_score: i64,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
