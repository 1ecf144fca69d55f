use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fmt, str::FromStr};

/// Unique identifier for a card (e.g., TKT-001, TKT-042, TKT-1000)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Creates a new CardId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("TKT-{:03}", counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the sequence number for counter-form ids (`TKT-<n>`)
    ///
    /// Documents loaded from elsewhere may carry ids in other shapes;
    /// those return `None` and sit outside the counter's range checks.
    pub fn sequence(&self) -> Option<u32> {
        self.0.strip_prefix("TKT-").and_then(|n| n.parse().ok())
    }
}

impl FromStr for CardId {
    type Err = crate::error::TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("TKT-") && s.len() > 4 {
            // Verify the rest is a valid number
            if s[4..].parse::<u32>().is_ok() {
                Ok(Self(s.to_string()))
            } else {
                Err(crate::error::TabulaError::InvalidCardId(s.to_string()))
            }
        } else {
            Err(crate::error::TabulaError::InvalidCardId(s.to_string()))
        }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!(
                "Invalid priority '{}'. Valid priorities: critical, high, medium, low",
                s
            )),
        }
    }
}

/// A card on the board
///
/// Serialized in the camelCase wire form used by the persisted document
/// (`dueDate`, `createdAt`). Only `id`, `title`, and `createdAt` are
/// required on parse; the remaining fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Creates a card with the stock default field values
    pub fn new(id: CardId) -> Self {
        Self {
            id,
            title: "New Ticket".to_string(),
            description: String::new(),
            priority: Priority::Medium,
            labels: BTreeSet::new(),
            due_date: None,
            created_at: Utc::now(),
        }
    }

    /// Merges a patch into the card
    ///
    /// `id` and `created_at` are never modified.
    pub fn apply(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(labels) = patch.labels {
            self.labels = labels;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }

    /// Checks if the due date has passed relative to the given day
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.map(|due| due < today).unwrap_or(false)
    }

    /// Checks if the due date falls within the next three days
    ///
    /// The window is inclusive on both ends: a card due today or in
    /// exactly three days counts, an overdue card does not.
    pub fn is_due_soon(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => (0..=3).contains(&(due - today).num_days()),
            None => false,
        }
    }
}

/// Partial update applied to an existing card
///
/// `None` fields are left unchanged. The due date is a nested option so
/// a patch can distinguish keep (`None`), set (`Some(Some(date))`), and
/// clear (`Some(None)`). Callers that intend a save should not patch in
/// an empty title; the store does not enforce this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub labels: Option<BTreeSet<String>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl CardPatch {
    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(Some(date));
        self
    }

    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }
}
