use crate::domain::card::{Card, Priority};

/// Filter criteria applied to cards
///
/// Populated criteria are combined with AND; an empty filter matches
/// every card. The filter is pure and holds no document state, so it
/// composes directly over [`Document::cards_in`](crate::Document::cards_in).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardFilter {
    /// Case-insensitive substring matched against title, description,
    /// or any label
    pub query: Option<String>,
    /// Exact priority match
    pub priority: Option<Priority>,
    /// Label the card must carry
    pub label: Option<String>,
}

impl CardFilter {
    /// Checks whether a card satisfies every populated criterion
    pub fn matches(&self, card: &Card) -> bool {
        self.matches_query(card) && self.matches_priority(card) && self.matches_label(card)
    }

    fn matches_query(&self, card: &Card) -> bool {
        let query = match &self.query {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };

        card.title.to_lowercase().contains(&query)
            || card.description.to_lowercase().contains(&query)
            || card
                .labels
                .iter()
                .any(|label| label.to_lowercase().contains(&query))
    }

    fn matches_priority(&self, card: &Card) -> bool {
        self.priority
            .map(|priority| priority == card.priority)
            .unwrap_or(true)
    }

    fn matches_label(&self, card: &Card) -> bool {
        self.label
            .as_ref()
            .map(|label| card.labels.contains(label))
            .unwrap_or(true)
    }
}
