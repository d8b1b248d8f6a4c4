use crate::schema::{RawCardDef, RawEffect};
use anyhow::{bail, Context};
use evodeck_core::{CardCategory, CardDefinition, Catalog, EffectKind, EffectSpec};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "cards.json";
pub const DECKS_FILE: &str = "decks.json";
pub const HIGH_SCORE_FILE: &str = "high_score.json";

/// `$EVODECK_HOME`, else `$HOME/.evodeck`.
pub fn default_data_dir() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("EVODECK_HOME") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".evodeck"))
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw: Vec<RawCardDef> = load_json(path)?;
    build_catalog(raw).with_context(|| format!("catalog {}", path.display()))
}

/// Catalog from `dir/cards.json` if present, the built-in one otherwise.
pub fn load_catalog_or_builtin(dir: &Path) -> anyhow::Result<Catalog> {
    let path = dir.join(CATALOG_FILE);
    if path.exists() {
        load_catalog(&path)
    } else {
        Ok(Catalog::builtin())
    }
}

pub fn parse_catalog(raw: &str) -> anyhow::Result<Catalog> {
    let defs: Vec<RawCardDef> = serde_json::from_str(raw).context("parse catalog")?;
    build_catalog(defs)
}

fn build_catalog(raw: Vec<RawCardDef>) -> anyhow::Result<Catalog> {
    let mut definitions = Vec::with_capacity(raw.len());
    for def in raw {
        definitions.push(convert_definition(def)?);
    }
    Ok(Catalog::from_definitions(definitions)?)
}

fn convert_definition(raw: RawCardDef) -> anyhow::Result<CardDefinition> {
    let Some(category) = CardCategory::from_keyword(&raw.category) else {
        bail!("card {}: unknown category '{}'", raw.id, raw.category);
    };
    let mut effects = Vec::with_capacity(raw.effects.len());
    for effect in &raw.effects {
        effects.push(convert_effect(&raw.id, effect)?);
    }
    Ok(CardDefinition {
        id: raw.id,
        name: raw.name,
        category,
        max_level: raw.max_level,
        base_level: raw.base_level,
        effects,
    })
}

fn convert_effect(card_id: &str, raw: &RawEffect) -> anyhow::Result<EffectSpec> {
    let Some(kind) = EffectKind::from_keyword(&raw.kind) else {
        bail!("card {card_id}: unknown effect kind '{}'", raw.kind);
    };
    Ok(EffectSpec {
        kind,
        values: raw.value_table(),
        description: raw.description.clone(),
    })
}

pub(crate) fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value).context("serialize")?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
