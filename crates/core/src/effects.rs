use crate::{CardDefinition, EffectKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedEffect {
    pub kind: EffectKind,
    pub value: i64,
}

/// Concrete effects of `definition` at `level`, in definition order.
///
/// Levels past the definition's max level resolve as the max level. Effects
/// that resolve to zero are dropped unless their kind carries meaning at zero.
pub fn resolve_effects(definition: &CardDefinition, level: u32) -> Vec<ResolvedEffect> {
    let level = definition.clamp_level(level);
    definition
        .effects
        .iter()
        .map(|spec| ResolvedEffect {
            kind: spec.kind,
            value: spec.value_at(level),
        })
        .filter(|effect| effect.value != 0 || effect.kind.fires_at_zero())
        .collect()
}

/// Scales `value` by a pending multiplier, rounding to the nearest integer and
/// never going below zero.
pub fn scale_value(value: i64, multiplier: f64) -> i64 {
    let scaled = (value as f64 * multiplier).round();
    if scaled.is_finite() && scaled > 0.0 {
        scaled as i64
    } else {
        0
    }
}

/// Human readable effect text, e.g. `"Gain 4 points / Draw 1 cards"`.
pub fn describe_effects(definition: &CardDefinition, level: u32) -> String {
    let level = definition.clamp_level(level);
    let parts: Vec<String> = definition
        .effects
        .iter()
        .filter(|spec| spec.value_at(level) != 0 || spec.kind.fires_at_zero())
        .map(|spec| fill_template(&spec.description, spec.value_at(level)))
        .collect();
    if parts.is_empty() {
        "No effect".to_string()
    } else {
        parts.join(" / ")
    }
}

fn fill_template(template: &str, value: i64) -> String {
    let Some(start) = template.find('{') else {
        return template.to_string();
    };
    let Some(len) = template[start..].find('}') else {
        return template.to_string();
    };
    let mut out = String::with_capacity(template.len() + 4);
    out.push_str(&template[..start]);
    out.push_str(&value.to_string());
    out.push_str(&template[start + len + 1..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardCategory, EffectSpec};

    fn def(effects: Vec<EffectSpec>) -> CardDefinition {
        CardDefinition {
            id: "test".to_string(),
            name: "Test".to_string(),
            category: CardCategory::Score,
            max_level: Some(2),
            base_level: 0,
            effects,
        }
    }

    #[test]
    fn zero_score_is_suppressed_but_zero_purge_fires() {
        let card = def(vec![
            EffectSpec::new(EffectKind::Score, &[0, 3], "Gain {value} points"),
            EffectSpec::new(EffectKind::PurgeSelf, &[0], "Purge"),
        ]);
        let resolved = resolve_effects(&card, 0);
        assert_eq!(
            resolved,
            vec![ResolvedEffect {
                kind: EffectKind::PurgeSelf,
                value: 0
            }]
        );
        assert_eq!(resolve_effects(&card, 1).len(), 2);
    }

    #[test]
    fn levels_past_max_resolve_as_max() {
        let card = def(vec![EffectSpec::new(EffectKind::Score, &[1, 2, 3, 4], "")]);
        assert_eq!(resolve_effects(&card, 7), resolve_effects(&card, 2));
        assert_eq!(resolve_effects(&card, 7)[0].value, 3);
    }

    #[test]
    fn keeps_definition_order() {
        let card = def(vec![
            EffectSpec::new(EffectKind::Draw, &[1], ""),
            EffectSpec::new(EffectKind::Score, &[2], ""),
            EffectSpec::new(EffectKind::ScoreMultiplier, &[3], ""),
        ]);
        let kinds: Vec<EffectKind> = resolve_effects(&card, 0).iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EffectKind::Draw, EffectKind::Score, EffectKind::ScoreMultiplier]
        );
    }

    #[test]
    fn scaling_rounds_and_floors_at_zero() {
        assert_eq!(scale_value(5, 3.0), 15);
        assert_eq!(scale_value(3, 1.5), 5);
        assert_eq!(scale_value(-4, 2.0), 0);
    }

    #[test]
    fn describes_with_substituted_values() {
        let card = def(vec![
            EffectSpec::new(EffectKind::Score, &[4, 6], "Gain {value} points"),
            EffectSpec::new(EffectKind::Draw, &[0, 1], "Draw {value} cards"),
        ]);
        assert_eq!(describe_effects(&card, 0), "Gain 4 points");
        assert_eq!(describe_effects(&card, 1), "Gain 6 points / Draw 1 cards");
        assert_eq!(describe_effects(&def(Vec::new()), 0), "No effect");
    }
}
