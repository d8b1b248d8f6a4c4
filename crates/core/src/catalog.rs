use crate::{CardCategory, CardDefinition, EffectKind, EffectSpec};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("card definition not found: {0}")]
    NotFound(String),
    #[error("duplicate card definition: {0}")]
    DuplicateDefinition(String),
    #[error("card {id} has an effect with no values ({kind:?})")]
    EmptyValues { id: String, kind: EffectKind },
}

/// Static registry of card definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<CardDefinition>,
}

impl Catalog {
    pub fn from_definitions(definitions: Vec<CardDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for def in &definitions {
            if !seen.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateDefinition(def.id.clone()));
            }
            if let Some(effect) = def.effects.iter().find(|effect| effect.values.is_empty()) {
                return Err(CatalogError::EmptyValues {
                    id: def.id.clone(),
                    kind: effect.kind,
                });
            }
        }
        Ok(Self { definitions })
    }

    pub fn builtin() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    pub fn definition(&self, id: &str) -> Result<&CardDefinition, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.definitions.iter().find(|def| def.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn definitions(&self) -> &[CardDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn card(
    id: &str,
    name: &str,
    category: CardCategory,
    max_level: Option<u32>,
    effects: Vec<EffectSpec>,
) -> CardDefinition {
    CardDefinition {
        id: id.to_string(),
        name: name.to_string(),
        category,
        max_level,
        base_level: 0,
        effects,
    }
}

fn builtin_definitions() -> Vec<CardDefinition> {
    use EffectKind::*;
    vec![
        card(
            "score_1",
            "Basic Points",
            CardCategory::Score,
            None,
            vec![EffectSpec::new(Score, &[2, 4, 6], "Gain {value} points")],
        ),
        card(
            "score_2",
            "Accelerated Points",
            CardCategory::Score,
            None,
            vec![
                EffectSpec::new(Score, &[4, 6, 8], "Gain {value} points"),
                EffectSpec::new(Draw, &[0, 1, 1], "Draw {value} cards"),
            ],
        ),
        card(
            "new_score_3",
            "Focus Points",
            CardCategory::Score,
            None,
            vec![EffectSpec::new(
                PurgeSelf,
                &[5, 10, 15],
                "Gain {value} points and remove this card from the deck",
            )],
        ),
        card(
            "new_draw_low",
            "Survey",
            CardCategory::Draw,
            None,
            vec![
                EffectSpec::new(Score, &[1, 2, 3], "Gain {value} points"),
                EffectSpec::new(Draw, &[1, 2, 2], "Draw {value} cards"),
                EffectSpec::new(DiscardFromHand, &[1, 1, 0], "Discard {value} random cards"),
            ],
        ),
        card(
            "combo_x2",
            "Double Up",
            CardCategory::Buff,
            None,
            vec![EffectSpec::new(
                ScoreMultiplier,
                &[2, 3, 4],
                "Multiply the next card's effects by {value}",
            )],
        ),
        card(
            "combo_ignore",
            "Quick",
            CardCategory::Cost,
            None,
            vec![EffectSpec::new(
                CostIgnore,
                &[1, 2, 3],
                "The next {value} cards are free to play",
            )],
        ),
        card(
            "new_max_use_add",
            "Mobility",
            CardCategory::Utility,
            Some(1),
            vec![EffectSpec::new(
                AdjustUsesRemaining,
                &[1, 2],
                "Refund {value} card uses this turn",
            )],
        ),
        card(
            "recall",
            "Recall",
            CardCategory::Utility,
            None,
            vec![EffectSpec::new(
                RetrieveFromDiscard,
                &[1, 2, 3],
                "Return {value} random cards from the discard pile to your hand",
            )],
        ),
        card(
            "recycle",
            "Recycle",
            CardCategory::Utility,
            None,
            vec![
                EffectSpec::new(
                    ShuffleDiscardIntoDeck,
                    &[0],
                    "Shuffle the discard pile into the deck",
                ),
                EffectSpec::new(Draw, &[0, 1, 2], "Draw {value} cards"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::from_definitions(builtin.definitions().to_vec());
        assert!(rebuilt.is_ok());
        assert_eq!(builtin.len(), 9);
    }

    #[test]
    fn missing_definition_is_not_found() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.definition("nope").unwrap_err(),
            CatalogError::NotFound("nope".to_string())
        );
        assert_eq!(catalog.definition("score_1").map(|d| d.max_level()), Ok(2));
        assert_eq!(
            catalog.definition("new_max_use_add").map(|d| d.max_level()),
            Ok(1)
        );
    }

    #[test]
    fn rejects_duplicates_and_empty_tables() {
        let def = card("a", "A", CardCategory::Score, None, Vec::new());
        let err = Catalog::from_definitions(vec![def.clone(), def]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateDefinition("a".to_string()));

        let empty = card(
            "b",
            "B",
            CardCategory::Score,
            None,
            vec![EffectSpec::new(EffectKind::Score, &[], "")],
        );
        assert!(matches!(
            Catalog::from_definitions(vec![empty]),
            Err(CatalogError::EmptyValues { .. })
        ));
    }
}
