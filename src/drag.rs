use crate::domain::{CardId, ColumnId};

/// Pointer-level events reported by a host UI during a drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// A drag gesture started on a card
    Started { card_id: CardId },
    /// The pointer is over a column's empty area
    OverColumn { column_id: ColumnId },
    /// The pointer is over the card slot at `index` within a column
    OverCard { column_id: ColumnId, index: usize },
    /// The pointer was released over a column
    Dropped { column_id: ColumnId },
    /// The gesture ended without a valid drop
    Ended,
}

/// Tracker state between events
///
/// At most one gesture is tracked at a time; candidate target fields
/// hold the most recently observed values only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// A card is being dragged
    Dragging {
        card_id: CardId,
        over_column: Option<ColumnId>,
        over_index: Option<usize>,
    },
}

/// A completed drop, ready to apply as a single move operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResolution {
    pub card_id: CardId,
    pub column_id: ColumnId,
    /// Insertion index for the move; `None` appends at the end
    pub index: Option<usize>,
}

/// Advances the tracker by one event
///
/// Pure transition function: the outputs are the next state and, for a
/// drop that completes a gesture, exactly one resolution. The resolved
/// column is the drop event's own column; the candidate index is carried
/// over only when it was observed over that same column. Cancellation
/// and drops without an active gesture resolve nothing.
pub fn step(state: DragState, event: DragEvent) -> (DragState, Option<DropResolution>) {
    match (state, event) {
        // A new drag-start always begins a fresh gesture, dropping any
        // candidates accumulated for the previous subject
        (_, DragEvent::Started { card_id }) => (
            DragState::Dragging {
                card_id,
                over_column: None,
                over_index: None,
            },
            None,
        ),
        (DragState::Dragging { card_id, .. }, DragEvent::OverColumn { column_id }) => (
            DragState::Dragging {
                card_id,
                over_column: Some(column_id),
                // Pointer over empty space: card-level index no longer applies
                over_index: None,
            },
            None,
        ),
        (DragState::Dragging { card_id, .. }, DragEvent::OverCard { column_id, index }) => (
            DragState::Dragging {
                card_id,
                over_column: Some(column_id),
                over_index: Some(index),
            },
            None,
        ),
        (
            DragState::Dragging {
                card_id,
                over_column,
                over_index,
            },
            DragEvent::Dropped { column_id },
        ) => {
            let index = match over_column {
                Some(candidate) if candidate == column_id => over_index,
                _ => None,
            };
            (
                DragState::Idle,
                Some(DropResolution {
                    card_id,
                    column_id,
                    index,
                }),
            )
        }
        (DragState::Dragging { .. }, DragEvent::Ended) => (DragState::Idle, None),
        (DragState::Idle, _) => (DragState::Idle, None),
    }
}

/// Stateful wrapper over [`step`] for hosts feeding events one at a time
#[derive(Debug, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one event, returning the resolution when a drop completes
    pub fn handle(&mut self, event: DragEvent) -> Option<DropResolution> {
        let state = std::mem::take(&mut self.state);
        let (next, resolution) = step(state, event);
        self.state = next;
        resolution
    }

    /// The card being dragged, if any
    pub fn dragged_card(&self) -> Option<&CardId> {
        match &self.state {
            DragState::Dragging { card_id, .. } => Some(card_id),
            DragState::Idle => None,
        }
    }

    /// The column currently highlighted as the drop target
    pub fn over_column(&self) -> Option<&ColumnId> {
        match &self.state {
            DragState::Dragging {
                over_column: Some(column_id),
                ..
            } => Some(column_id),
            _ => None,
        }
    }

    /// The card slot currently highlighted within the target column
    pub fn over_index(&self) -> Option<usize> {
        match &self.state {
            DragState::Dragging { over_index, .. } => *over_index,
            DragState::Idle => None,
        }
    }

    /// The current tracker state
    pub fn state(&self) -> &DragState {
        &self.state
    }
}
