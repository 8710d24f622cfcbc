use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub category: String,
    pub title: String,
    pub source: String,
}

#[derive(Deserialize)]
struct FileCatalog {
    #[serde(default)]
    card: Vec<RawCard>,
}

#[derive(Deserialize)]
struct RawCard {
    #[serde(default)]
    category: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    source: String,
}

static BUILTIN: Lazy<Vec<Card>> = Lazy::new(load_builtin);

fn load_builtin() -> Vec<Card> {
    const RAW: &str = include_str!("../docs/showreel.yaml");
    match parse_catalog(RAW) {
        Ok(cards) => cards,
        Err(err) => {
            eprintln!("Failed to parse bundled showreel manifest: {err}");
            Vec::new()
        }
    }
}

pub fn builtin() -> Vec<Card> {
    BUILTIN.clone()
}

pub fn load_file(path: &Path) -> Result<Vec<Card>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest at {}", path.display()))?;
    parse_catalog(&data).with_context(|| format!("Failed to parse manifest at {}", path.display()))
}

fn parse_catalog(raw: &str) -> Result<Vec<Card>> {
    let parsed: FileCatalog = serde_yaml::from_str(raw)?;
    Ok(parsed
        .card
        .into_iter()
        .filter_map(|raw| {
            let title = raw.title.trim().to_string();
            let source = raw.source.trim().to_string();
            if title.is_empty() || source.is_empty() {
                log::debug!("skipping manifest card with empty title or source");
                return None;
            }
            Some(Card {
                category: raw.category.trim().to_string(),
                title,
                source,
            })
        })
        .collect())
}

// first-seen manifest order
pub fn categories(cards: &[Card]) -> Vec<String> {
    let mut seen = Vec::new();
    for card in cards {
        if card.category.is_empty() {
            continue;
        }
        if !seen.iter().any(|known| known == &card.category) {
            seen.push(card.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_entries() {
        let raw = "card:\n  - category: gaming\n    title: Arcade Reel\n    source: https://youtu.be/abc\n  - category: ecommerce\n    title: Store Launch\n    source: https://cdn.example.com/store.mp4\n";
        let cards = parse_catalog(raw).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].category, "gaming");
        assert_eq!(cards[1].title, "Store Launch");
    }

    #[test]
    fn skips_entries_missing_title_or_source() {
        let raw = "card:\n  - category: gaming\n    title: ''\n    source: https://youtu.be/abc\n  - category: gaming\n    title: Kept\n    source: https://youtu.be/def\n  - category: gaming\n    title: Dropped\n    source: ''\n";
        let cards = parse_catalog(raw).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Kept");
    }

    #[test]
    fn builtin_manifest_is_well_formed() {
        let cards = builtin();
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|card| !card.category.is_empty()));
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let cards = vec![
            Card {
                category: "gaming".into(),
                title: "A".into(),
                source: "s".into(),
            },
            Card {
                category: "ecommerce".into(),
                title: "B".into(),
                source: "s".into(),
            },
            Card {
                category: "gaming".into(),
                title: "C".into(),
                source: "s".into(),
            },
        ];
        assert_eq!(categories(&cards), vec!["gaming", "ecommerce"]);
    }
}
