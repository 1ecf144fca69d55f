use crate::domain::card::{Card, CardId, CardPatch, Priority};
use crate::domain::label;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a column (e.g., "backlog", "col-9bf71c…")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    /// Wraps a known column identifier
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh unique column id
    pub fn generate() -> Self {
        Self(format!("col-{}", Uuid::new_v4().simple()))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered list of card ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl Column {
    pub fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            card_ids: Vec::new(),
        }
    }
}

/// The whole board: ordered columns, the card map, and the id counter
///
/// Column order is display order; `card_ids` entries resolve in `cards`,
/// and every card lives in exactly one column. The ticket counter only
/// moves forward, so deleted ids are never reissued. Maps are B-tree
/// backed so serialized documents come out in a stable, diffable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub columns: Vec<Column>,
    pub cards: BTreeMap<CardId, Card>,
    pub next_ticket_number: u32,
    #[serde(default = "crate::domain::label::default_label_colors")]
    pub label_colors: BTreeMap<String, String>,
}

impl Document {
    /// Creates a new card in the given column, returning a reference to it
    ///
    /// The card gets the next ticket number and the stock defaults, and its
    /// id is appended at the end of the column. Returns `None` when the
    /// column does not exist, leaving the counter untouched.
    pub fn create_card(&mut self, column_id: &ColumnId) -> Option<&Card> {
        let column = self.columns.iter_mut().find(|col| &col.id == column_id)?;

        let id = CardId::new(self.next_ticket_number);
        self.next_ticket_number += 1;
        column.card_ids.push(id.clone());

        self.cards.insert(id.clone(), Card::new(id.clone()));
        self.cards.get(&id)
    }

    /// Applies a partial update to a card
    ///
    /// Returns `false` when the card does not exist.
    pub fn update_card(&mut self, card_id: &CardId, patch: CardPatch) -> bool {
        match self.cards.get_mut(card_id) {
            Some(card) => {
                card.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Deletes a card from the card map and from its owning column
    ///
    /// Returns `false` when the card does not exist.
    pub fn delete_card(&mut self, card_id: &CardId) -> bool {
        if self.cards.remove(card_id).is_none() {
            return false;
        }
        for column in &mut self.columns {
            column.card_ids.retain(|id| id != card_id);
        }
        true
    }

    /// Appends a new empty column, returning a reference to it
    ///
    /// A missing or empty title becomes "NEW COLUMN".
    pub fn create_column(&mut self, title: Option<&str>) -> &Column {
        let title = match title {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => "NEW COLUMN".to_string(),
        };
        self.columns.push(Column::new(ColumnId::generate(), title));
        &self.columns[self.columns.len() - 1]
    }

    /// Replaces a column's title, leaving order and membership alone
    ///
    /// Returns `false` when the column does not exist.
    pub fn rename_column(&mut self, column_id: &ColumnId, title: &str) -> bool {
        match self.columns.iter_mut().find(|col| &col.id == column_id) {
            Some(column) => {
                column.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Deletes a column and cascades to every card it owns
    ///
    /// Returns `false` when the column does not exist.
    pub fn delete_column(&mut self, column_id: &ColumnId) -> bool {
        if let Some(pos) = self.columns.iter().position(|col| &col.id == column_id) {
            let column = self.columns.remove(pos);
            for card_id in &column.card_ids {
                self.cards.remove(card_id);
            }
            true
        } else {
            false
        }
    }

    /// Moves a card into a column at the given index
    ///
    /// Two phases: the id is first removed from every column, then inserted
    /// into the target. `index` is interpreted against the post-removal
    /// list, so moving a card forward within its own column lands it one
    /// slot later than the index read off the pre-removal list. A missing
    /// or out-of-bounds index appends at the end.
    ///
    /// Returns `false` when the card or the target column does not exist,
    /// with every column left untouched.
    pub fn move_card(
        &mut self,
        card_id: &CardId,
        target_column_id: &ColumnId,
        index: Option<usize>,
    ) -> bool {
        if !self.cards.contains_key(card_id) {
            return false;
        }
        let target_pos = match self
            .columns
            .iter()
            .position(|col| &col.id == target_column_id)
        {
            Some(pos) => pos,
            None => return false,
        };

        for column in &mut self.columns {
            column.card_ids.retain(|id| id != card_id);
        }

        let target = &mut self.columns[target_pos];
        let insert_at = match index {
            Some(i) if i < target.card_ids.len() => i,
            _ => target.card_ids.len(),
        };
        target.card_ids.insert(insert_at, card_id.clone());
        true
    }

    /// Looks up a column by id
    pub fn column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == column_id)
    }

    /// Looks up a card by id
    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.get(card_id)
    }

    /// Returns a column's cards in display order
    ///
    /// Unknown columns yield an empty list.
    pub fn cards_in(&self, column_id: &ColumnId) -> Vec<&Card> {
        self.column(column_id)
            .map(|column| {
                column
                    .card_ids
                    .iter()
                    .filter_map(|id| self.cards.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolves the display color for a label name
    ///
    /// Registered labels come from the document's registry; any other name
    /// gets a stable color from the fallback palette.
    pub fn label_color(&self, name: &str) -> &str {
        match self.label_colors.get(name) {
            Some(color) => color,
            None => label::fallback_color(name),
        }
    }

    /// Verifies the document's structural invariants
    ///
    /// Checked: unique column ids, every `card_ids` entry resolving to a
    /// card listed exactly once, map keys agreeing with card ids, and the
    /// ticket counter staying ahead of every counter-form card id. Returns
    /// the first violation found.
    pub fn check_integrity(&self) -> std::result::Result<(), String> {
        let mut column_ids = BTreeSet::new();
        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(format!("duplicate column id: {}", column.id));
            }
        }

        let mut placements: BTreeMap<&CardId, &ColumnId> = BTreeMap::new();
        for column in &self.columns {
            for card_id in &column.card_ids {
                if !self.cards.contains_key(card_id) {
                    return Err(format!(
                        "column {} references unknown card {}",
                        column.id, card_id
                    ));
                }
                if let Some(previous) = placements.insert(card_id, &column.id) {
                    return Err(format!(
                        "card {} listed more than once (in {} and {})",
                        card_id, previous, column.id
                    ));
                }
            }
        }

        for (key, card) in &self.cards {
            if key != &card.id {
                return Err(format!(
                    "card map key {} does not match card id {}",
                    key, card.id
                ));
            }
            if !placements.contains_key(key) {
                return Err(format!("card {} is not placed in any column", key));
            }
            if let Some(sequence) = card.id.sequence() {
                if sequence >= self.next_ticket_number {
                    return Err(format!(
                        "card {} is ahead of nextTicketNumber {}",
                        key, self.next_ticket_number
                    ));
                }
            }
        }

        Ok(())
    }

    /// The built-in starter document used when no persisted state exists
    pub fn seed() -> Self {
        let mut document = Self::default();

        let backlog = ColumnId::new("backlog".to_string());
        let todo = ColumnId::new("todo".to_string());
        let progress = ColumnId::new("progress".to_string());
        let review = ColumnId::new("review".to_string());
        let done = ColumnId::new("done".to_string());

        let cards = vec![
            (
                &backlog,
                CardPatch::default()
                    .title("Design the landing page".to_string())
                    .description("Hero section, pricing tiers, and footer.".to_string())
                    .labels(vec!["design".to_string()]),
            ),
            (
                &backlog,
                CardPatch::default()
                    .title("Evaluate billing providers".to_string())
                    .description("Compare Stripe and Paddle for EU VAT handling.".to_string())
                    .priority(Priority::High)
                    .labels(vec!["feature".to_string(), "backend".to_string()]),
            ),
            (
                &todo,
                CardPatch::default()
                    .title("Fix login redirect loop".to_string())
                    .description("Safari drops the session cookie on the callback.".to_string())
                    .priority(Priority::Critical)
                    .labels(vec!["bug".to_string(), "urgent".to_string()])
                    .due_date(Utc::now().date_naive() + chrono::Duration::days(3)),
            ),
            (
                &progress,
                CardPatch::default()
                    .title("Migrate attachments to object storage".to_string())
                    .description("Move uploads off the app host.".to_string())
                    .priority(Priority::High)
                    .labels(vec!["backend".to_string()]),
            ),
            (
                &review,
                CardPatch::default()
                    .title("Add keyboard shortcuts overlay".to_string())
                    .priority(Priority::Low)
                    .labels(vec!["feature".to_string(), "frontend".to_string()]),
            ),
            (
                &done,
                CardPatch::default()
                    .title("Set up CI pipeline".to_string())
                    .description("Build, test, and lint on every push.".to_string())
                    .labels(vec!["chore".to_string()]),
            ),
        ];

        for (column_id, patch) in cards {
            let created = document.create_card(column_id).map(|card| card.id.clone());
            if let Some(id) = created {
                document.update_card(&id, patch);
            }
        }

        document
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            columns: vec![
                Column::new(ColumnId::new("backlog".to_string()), "BACKLOG".to_string()),
                Column::new(ColumnId::new("todo".to_string()), "TO DO".to_string()),
                Column::new(
                    ColumnId::new("progress".to_string()),
                    "IN PROGRESS".to_string(),
                ),
                Column::new(
                    ColumnId::new("review".to_string()),
                    "IN REVIEW".to_string(),
                ),
                Column::new(ColumnId::new("done".to_string()), "DONE".to_string()),
            ],
            cards: BTreeMap::new(),
            next_ticket_number: 1,
            label_colors: label::default_label_colors(),
        }
    }
}
