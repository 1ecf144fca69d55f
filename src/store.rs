use crate::{
    domain::{Card, CardId, CardPatch, Column, ColumnId, Document},
    drag::DropResolution,
    error::{Result, TabulaError},
    storage::KeyValueSlot,
};
use tracing::{debug, warn};

/// Configuration for a board store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Slot key the document is persisted under
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: "kanban-board".to_string(),
        }
    }
}

/// Sole owner and mutator of a board [`Document`]
///
/// The store loads persisted state at startup, applies mutations to the
/// in-memory document, and writes the full serialized document back to
/// its slot after every successful mutation. Mutations naming unknown
/// ids are no-ops reported as `Ok(false)`/`Ok(None)` and skip the write.
pub struct BoardStore<S: KeyValueSlot> {
    document: Document,
    slot: S,
    config: StoreConfig,
}

impl<S: KeyValueSlot> BoardStore<S> {
    /// Opens a store with the default configuration
    pub async fn open(slot: S) -> Result<Self> {
        Self::open_with_config(slot, StoreConfig::default()).await
    }

    /// Opens a store, loading persisted state or falling back to the seed
    ///
    /// A persisted document that fails to parse or validate is never
    /// fatal: the store logs the reason and starts from the built-in
    /// seed instead. Slot read failures do propagate, so a flaky backend
    /// cannot silently overwrite good data with seed content later.
    pub async fn open_with_config(slot: S, config: StoreConfig) -> Result<Self> {
        let document = match slot.get(&config.storage_key).await? {
            Some(raw) => match parse_document(&raw) {
                Ok(document) => document,
                Err(reason) => {
                    warn!(
                        key = %config.storage_key,
                        reason = %reason,
                        "persisted document rejected, starting from seed"
                    );
                    Document::seed()
                }
            },
            None => Document::seed(),
        };

        Ok(Self {
            document,
            slot,
            config,
        })
    }

    /// The current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The slot this store persists into
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Creates a card in a column, returning the created card
    ///
    /// `Ok(None)` when the column does not exist.
    pub async fn create_card(&mut self, column_id: &ColumnId) -> Result<Option<Card>> {
        let created = self.document.create_card(column_id).cloned();
        if created.is_some() {
            self.persist().await?;
        }
        Ok(created)
    }

    /// Applies a partial update to a card
    pub async fn update_card(&mut self, card_id: &CardId, patch: CardPatch) -> Result<bool> {
        let changed = self.document.update_card(card_id, patch);
        if changed {
            self.persist().await?;
        }
        Ok(changed)
    }

    /// Deletes a card
    pub async fn delete_card(&mut self, card_id: &CardId) -> Result<bool> {
        let changed = self.document.delete_card(card_id);
        if changed {
            self.persist().await?;
        }
        Ok(changed)
    }

    /// Appends a new column, returning it
    pub async fn create_column(&mut self, title: Option<&str>) -> Result<Column> {
        let column = self.document.create_column(title).clone();
        self.persist().await?;
        Ok(column)
    }

    /// Renames a column
    pub async fn rename_column(&mut self, column_id: &ColumnId, title: &str) -> Result<bool> {
        let changed = self.document.rename_column(column_id, title);
        if changed {
            self.persist().await?;
        }
        Ok(changed)
    }

    /// Deletes a column and every card it owns
    pub async fn delete_column(&mut self, column_id: &ColumnId) -> Result<bool> {
        let changed = self.document.delete_column(column_id);
        if changed {
            self.persist().await?;
        }
        Ok(changed)
    }

    /// Moves a card into a column at an index (post-removal semantics)
    ///
    /// See [`Document::move_card`] for the exact indexing contract.
    pub async fn move_card(
        &mut self,
        card_id: &CardId,
        target_column_id: &ColumnId,
        index: Option<usize>,
    ) -> Result<bool> {
        let changed = self.document.move_card(card_id, target_column_id, index);
        if changed {
            self.persist().await?;
        }
        Ok(changed)
    }

    /// Applies a drop resolved by the drag tracker as a single move
    pub async fn apply_drop(&mut self, resolution: DropResolution) -> Result<bool> {
        self.move_card(
            &resolution.card_id,
            &resolution.column_id,
            resolution.index,
        )
        .await
    }

    /// Serializes the current document as pretty-printed JSON
    ///
    /// The output is stable (maps serialize in key order) and
    /// byte-for-byte re-importable.
    pub fn export_document(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Replaces the whole document with a parsed import
    ///
    /// The input must parse into the document shape and pass the
    /// integrity check; otherwise the import is rejected with
    /// [`TabulaError::MalformedDocument`] and the current document is
    /// left untouched. A successful import persists like any mutation.
    pub async fn import_document(&mut self, raw: &str) -> Result<()> {
        match parse_document(raw) {
            Ok(document) => {
                self.document = document;
                self.persist().await?;
                Ok(())
            }
            Err(reason) => {
                warn!(reason = %reason, "import rejected");
                Err(TabulaError::MalformedDocument(reason))
            }
        }
    }

    async fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.document)?;
        self.slot.set(&self.config.storage_key, &json).await?;
        debug!(
            key = %self.config.storage_key,
            bytes = json.len(),
            "document persisted"
        );
        Ok(())
    }
}

/// Parses and validates a serialized document
///
/// Used for both imports and the startup load so the two paths accept
/// exactly the same inputs.
fn parse_document(raw: &str) -> std::result::Result<Document, String> {
    let document: Document =
        serde_json::from_str(raw).map_err(|err| format!("parse failure: {}", err))?;
    document.check_integrity()?;
    Ok(document)
}
