//! Flashcards, grouped by set name for filtering.
//!
//! No spaced-repetition scheduling: cards are created and deleted by
//! direct user action only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub set_name: String,
}

/// Session-owned card collection.
#[derive(Debug, Default)]
pub struct CardDeck {
    cards: Vec<Flashcard>,
}

impl CardDeck {
    /// Set used when the user doesn't name one.
    pub const DEFAULT_SET: &'static str = "General";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        front: impl Into<String>,
        back: impl Into<String>,
        set_name: Option<&str>,
    ) -> &Flashcard {
        self.cards.push(Flashcard {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            set_name: set_name.unwrap_or(Self::DEFAULT_SET).to_string(),
        });
        self.cards
            .last()
            .unwrap_or_else(|| unreachable!("just pushed"))
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        self.cards.len() != before
    }

    /// Distinct set names in first-seen order.
    pub fn set_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for card in &self.cards {
            if !names.contains(&card.set_name.as_str()) {
                names.push(&card.set_name);
            }
        }
        names
    }

    /// Cards in the given set, or every card when no set is given.
    pub fn filtered(&self, set_name: Option<&str>) -> Vec<&Flashcard> {
        self.cards
            .iter()
            .filter(|c| set_name.map_or(true, |s| c.set_name == s))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flashcard> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_applies_when_unnamed() {
        let mut deck = CardDeck::new();
        let card = deck.add("photosynthesis", "light to sugar", None);
        assert_eq!(card.set_name, CardDeck::DEFAULT_SET);
    }

    #[test]
    fn set_names_are_deduped_in_first_seen_order() {
        let mut deck = CardDeck::new();
        deck.add("a", "1", Some("Biology"));
        deck.add("b", "2", Some("Math"));
        deck.add("c", "3", Some("Biology"));
        assert_eq!(deck.set_names(), vec!["Biology", "Math"]);
    }

    #[test]
    fn filtering_by_set() {
        let mut deck = CardDeck::new();
        deck.add("a", "1", Some("Biology"));
        deck.add("b", "2", Some("Math"));
        deck.add("c", "3", Some("Biology"));

        assert_eq!(deck.filtered(Some("Biology")).len(), 2);
        assert_eq!(deck.filtered(Some("History")).len(), 0);
        assert_eq!(deck.filtered(None).len(), 3);
    }

    #[test]
    fn remove_by_id() {
        let mut deck = CardDeck::new();
        let id = deck.add("a", "1", None).id;
        assert!(deck.remove(id));
        assert!(deck.is_empty());
        assert!(!deck.remove(id));
    }
}
