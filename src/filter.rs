use crate::catalog::Card;

pub const ALL_FILTER: &str = "all";

// Exactly one filter tag is active at a time; cards are only ever
// hidden, never removed or reordered.
pub struct FilterEngine {
    cards: Vec<Card>,
    active: String,
    query: String,
    visible: Vec<bool>,
}

impl FilterEngine {
    pub fn new(cards: Vec<Card>) -> Self {
        let visible = vec![true; cards.len()];
        let mut engine = FilterEngine {
            cards,
            active: ALL_FILTER.to_string(),
            query: String::new(),
            visible,
        };
        engine.refresh();
        engine
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn active_filter(&self) -> &str {
        &self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible_indices(&self) -> Vec<usize> {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(index, shown)| shown.then_some(index))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|shown| **shown).count()
    }

    // unknown tags are accepted and match no cards
    pub fn set_filter(&mut self, tag: &str) {
        self.active = tag.to_string();
        self.refresh();
    }

    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.refresh();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
        self.refresh();
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.refresh();
    }

    fn refresh(&mut self) {
        let needle = normalize(&self.query);
        for (card, slot) in self.cards.iter().zip(self.visible.iter_mut()) {
            *slot = card_matches(card, &self.active, &needle);
        }
    }
}

fn card_matches(card: &Card, filter: &str, needle: &str) -> bool {
    let by_filter = filter == ALL_FILTER || card.category == filter;
    let by_query = needle.is_empty() || normalize(&card.title).contains(needle);
    by_filter && by_query
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(category: &str, title: &str) -> Card {
        Card {
            category: category.into(),
            title: title.into(),
            source: format!("https://cdn.example.com/{}.mp4", title.to_lowercase()),
        }
    }

    fn sample() -> Vec<Card> {
        vec![
            card("civil", "River Bridge"),
            card("civil", "Tunnel"),
            card("gaming", "Bridge Duel"),
            card("gaming", "Arena Finals"),
        ]
    }

    #[test]
    fn starts_with_everything_visible() {
        let engine = FilterEngine::new(sample());
        assert_eq!(engine.active_filter(), ALL_FILTER);
        assert_eq!(engine.visible_count(), 4);
    }

    #[test]
    fn filter_selects_exact_category() {
        let mut engine = FilterEngine::new(sample());
        engine.set_filter("civil");
        assert_eq!(engine.visible_indices(), vec![0, 1]);
    }

    #[test]
    fn query_matches_title_substring_case_insensitive() {
        let mut engine = FilterEngine::new(sample());
        engine.set_query("  BRIDGE ");
        assert_eq!(engine.visible_indices(), vec![0, 2]);
    }

    #[test]
    fn filter_and_query_combine() {
        let mut engine = FilterEngine::new(sample());
        engine.set_filter(ALL_FILTER);
        engine.set_query("bridge");
        let mut cards = engine
            .visible_indices()
            .into_iter()
            .map(|index| engine.card(index).unwrap().title.clone())
            .collect::<Vec<_>>();
        cards.sort();
        assert_eq!(cards, vec!["Bridge Duel", "River Bridge"]);
    }

    #[test]
    fn update_order_does_not_matter() {
        let mut first = FilterEngine::new(sample());
        first.set_filter("gaming");
        first.set_query("bridge");

        let mut second = FilterEngine::new(sample());
        second.set_query("bridge");
        second.set_filter("gaming");

        assert_eq!(first.visible_indices(), second.visible_indices());
        assert_eq!(first.visible_indices(), vec![2]);
    }

    #[test]
    fn clearing_query_restores_filter_only_set() {
        let mut engine = FilterEngine::new(sample());
        engine.set_filter("civil");
        let filter_only = engine.visible_indices();
        engine.set_query("bridge");
        engine.clear_query();
        assert_eq!(engine.visible_indices(), filter_only);
    }

    #[test]
    fn unknown_filter_hides_every_card() {
        let mut engine = FilterEngine::new(sample());
        engine.set_filter("weddings");
        assert_eq!(engine.visible_count(), 0);
    }

    #[test]
    fn whitespace_query_is_treated_as_empty() {
        let mut engine = FilterEngine::new(sample());
        engine.set_query("   ");
        assert_eq!(engine.visible_count(), 4);
    }

    #[test]
    fn bridge_search_keeps_only_matching_civil_card() {
        let mut engine = FilterEngine::new(vec![
            card("civil", "River Bridge"),
            card("civil", "Tunnel"),
        ]);
        engine.set_filter(ALL_FILTER);
        engine.set_query("bridge");
        assert_eq!(engine.visible_indices(), vec![0]);
    }
}
