use anyhow::Result;
use tabula_core::storage::{file_slot::FileSlot, memory_slot::MemorySlot};
use tabula_core::{
    BoardStore, CardId, CardPatch, ColumnId, Document, DragEvent, DragTracker, Priority,
    TabulaError,
};
use tempfile::TempDir;

fn column_id(id: &str) -> ColumnId {
    ColumnId::new(id.to_string())
}

fn order(document: &Document, column: &str) -> Vec<String> {
    document
        .column(&column_id(column))
        .map(|col| {
            col.card_ids
                .iter()
                .map(|id| id.as_str().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Store with the default empty columns instead of the seed cards, so
/// tests can pin exact ids and orders
async fn empty_store() -> Result<BoardStore<MemorySlot>> {
    let mut store = BoardStore::open(MemorySlot::new()).await?;
    store
        .import_document(&serde_json::to_string(&Document::default())?)
        .await?;
    Ok(store)
}

#[tokio::test]
async fn test_board_survives_reopen_via_file_slot() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let expected = {
        let mut store = BoardStore::open(FileSlot::new(temp_dir.path())).await?;
        let card = store.create_card(&column_id("todo")).await?.unwrap();
        store
            .update_card(
                &card.id,
                CardPatch::default().title("Write release notes".to_string()),
            )
            .await?;
        store.document().clone()
    };

    let store = BoardStore::open(FileSlot::new(temp_dir.path())).await?;
    assert_eq!(store.document(), &expected);
    Ok(())
}

#[tokio::test]
async fn test_full_lifecycle_round_trip() -> Result<()> {
    let mut store = empty_store().await?;

    // Build up a board the way a host UI would
    let blocked = store.create_column(Some("BLOCKED")).await?;
    store.rename_column(&blocked.id, "ON HOLD").await?;

    let first = store.create_card(&column_id("todo")).await?.unwrap();
    let second = store.create_card(&column_id("todo")).await?.unwrap();
    store.create_card(&column_id("progress")).await?.unwrap();

    store
        .update_card(
            &first.id,
            CardPatch::default()
                .title("Ship the beta".to_string())
                .priority(Priority::High)
                .labels(vec!["feature".to_string()]),
        )
        .await?;
    store.move_card(&first.id, &blocked.id, None).await?;
    store.delete_card(&second.id).await?;

    assert!(store.document().check_integrity().is_ok());

    // The exported snapshot rebuilds the identical document elsewhere
    let exported = store.export_document()?;
    let mut other = BoardStore::open(MemorySlot::new()).await?;
    other.import_document(&exported).await?;

    assert_eq!(other.document(), store.document());
    assert_eq!(other.export_document()?, exported);
    Ok(())
}

#[tokio::test]
async fn test_cascade_delete_through_store() -> Result<()> {
    let mut store = empty_store().await?;

    store.create_card(&column_id("todo")).await?;
    store.create_card(&column_id("todo")).await?;
    let kept = store.create_card(&column_id("done")).await?.unwrap();

    assert!(store.delete_column(&column_id("todo")).await?);

    let document = store.document();
    assert_eq!(document.cards.len(), 1);
    assert!(document.card(&kept.id).is_some());
    assert!(document.column(&column_id("todo")).is_none());
    assert!(document.check_integrity().is_ok());
    Ok(())
}

#[tokio::test]
async fn test_malformed_import_is_rejected() -> Result<()> {
    let mut store = BoardStore::open(MemorySlot::new()).await?;
    let before = store.document().clone();
    let writes_before = store.slot().write_count();

    let payloads = [
        // Not JSON
        "hello board",
        // JSON but not a document
        "[1, 2, 3]",
        // Missing required fields
        r#"{"columns": []}"#,
        // Unknown priority value
        r#"{
            "columns": [{"id": "todo", "title": "TO DO", "cardIds": ["TKT-001"]}],
            "cards": {"TKT-001": {"id": "TKT-001", "title": "x", "priority": "blocker",
                      "createdAt": "2024-01-01T00:00:00Z"}},
            "nextTicketNumber": 2
        }"#,
        // Dangling card reference
        r#"{
            "columns": [{"id": "todo", "title": "TO DO", "cardIds": ["TKT-001"]}],
            "cards": {},
            "nextTicketNumber": 1
        }"#,
        // Counter behind an existing card
        r#"{
            "columns": [{"id": "todo", "title": "TO DO", "cardIds": ["TKT-005"]}],
            "cards": {"TKT-005": {"id": "TKT-005", "title": "x",
                      "createdAt": "2024-01-01T00:00:00Z"}},
            "nextTicketNumber": 3
        }"#,
    ];

    for payload in payloads {
        let result = store.import_document(payload).await;
        assert!(
            matches!(result, Err(TabulaError::MalformedDocument(_))),
            "payload was accepted: {}",
            payload
        );
        assert_eq!(store.document(), &before);
    }

    assert_eq!(store.slot().write_count(), writes_before);
    Ok(())
}

#[tokio::test]
async fn test_drag_pipeline_moves_card() -> Result<()> {
    let mut store = empty_store().await?;

    // Source [A,B], target [X,Y]
    let a = store.create_card(&column_id("todo")).await?.unwrap();
    store.create_card(&column_id("todo")).await?;
    store.create_card(&column_id("review")).await?;
    store.create_card(&column_id("review")).await?;

    let mut tracker = DragTracker::new();
    tracker.handle(DragEvent::Started {
        card_id: a.id.clone(),
    });
    tracker.handle(DragEvent::OverColumn {
        column_id: column_id("review"),
    });
    tracker.handle(DragEvent::OverCard {
        column_id: column_id("review"),
        index: 1,
    });
    let resolution = tracker
        .handle(DragEvent::Dropped {
            column_id: column_id("review"),
        })
        .unwrap();

    assert!(store.apply_drop(resolution).await?);

    let document = store.document();
    assert_eq!(order(document, "todo"), vec!["TKT-002"]);
    assert_eq!(
        order(document, "review"),
        vec!["TKT-003", "TKT-001", "TKT-004"]
    );
    Ok(())
}

#[tokio::test]
async fn test_drag_cancellation_changes_nothing() -> Result<()> {
    let mut store = BoardStore::open(MemorySlot::new()).await?;
    let card = store.create_card(&column_id("todo")).await?.unwrap();
    let before = store.document().clone();
    let writes_before = store.slot().write_count();

    let mut tracker = DragTracker::new();
    tracker.handle(DragEvent::Started {
        card_id: card.id.clone(),
    });
    tracker.handle(DragEvent::OverCard {
        column_id: column_id("done"),
        index: 0,
    });
    let resolution = tracker.handle(DragEvent::Ended);

    assert!(resolution.is_none());
    assert_eq!(store.document(), &before);
    assert_eq!(store.slot().write_count(), writes_before);
    Ok(())
}

#[tokio::test]
async fn test_same_column_reorder_pinned_orders() -> Result<()> {
    let mut store = empty_store().await?;

    for _ in 0..3 {
        store.create_card(&column_id("backlog")).await?;
    }
    assert_eq!(
        order(store.document(), "backlog"),
        vec!["TKT-001", "TKT-002", "TKT-003"]
    );

    // Forward: the index counts positions after the card is pulled out
    store
        .move_card(&CardId::new(1), &column_id("backlog"), Some(2))
        .await?;
    assert_eq!(
        order(store.document(), "backlog"),
        vec!["TKT-002", "TKT-003", "TKT-001"]
    );

    // Backward
    store
        .move_card(&CardId::new(1), &column_id("backlog"), Some(0))
        .await?;
    assert_eq!(
        order(store.document(), "backlog"),
        vec!["TKT-001", "TKT-002", "TKT-003"]
    );
    Ok(())
}

#[tokio::test]
async fn test_ticket_numbers_never_reused_through_store() -> Result<()> {
    let mut store = empty_store().await?;

    let first = store.create_card(&column_id("todo")).await?.unwrap();
    let second = store.create_card(&column_id("todo")).await?.unwrap();
    store.delete_card(&first.id).await?;
    store.delete_card(&second.id).await?;

    let third = store.create_card(&column_id("todo")).await?.unwrap();

    assert_eq!(first.id.as_str(), "TKT-001");
    assert_eq!(second.id.as_str(), "TKT-002");
    assert_eq!(third.id.as_str(), "TKT-003");
    Ok(())
}
