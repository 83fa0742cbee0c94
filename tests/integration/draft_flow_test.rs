//! Draft Lifecycle Integration Tests
//!
//! End-to-end save pipeline against the in-memory store:
//! - First save mints the identifier and submits every row
//! - Re-save targets the minted identifier; versions only move forward
//! - Discard deletes the minted draft and resets the editor
//! - A stored template rounds through a fresh controller intact

use std::sync::Arc;

use aiscale_app::models::{builtin_presets, ItemPatch, RowKey, DEFAULT_TITLE};
use aiscale_app::services::SaveReceipt;
use aiscale_app::AppState;

use crate::support::InMemoryStore;

fn app() -> (Arc<InMemoryStore>, AppState<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(Arc::clone(&store));
    (store, state)
}

#[tokio::test]
async fn test_new_draft_save_end_to_end() {
    let (store, state) = app();
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();

    ctrl.header_mut().name = "COMP10001 AI Use Guidelines".to_string();
    ctrl.header_mut().subject_code = "COMP10001".to_string();
    let first_row = ctrl.items().rows()[0].key;
    ctrl.items_mut()
        .update(first_row, ItemPatch::Task("Final essay".into()));

    let receipt = ctrl.save("coord1").await.unwrap();
    assert_eq!(
        receipt,
        SaveReceipt {
            template_id: 1,
            version: 1
        }
    );
    assert_eq!(state.marker().current(), Some(1));

    let stored = store.template(1).unwrap();
    assert_eq!(stored.name, "COMP10001 AI Use Guidelines");
    assert_eq!(stored.version, 1);
    assert_eq!(stored.template_items.len(), 4);
    assert_eq!(stored.template_items[0].task, "Final essay");

    // Post-save refresh replaced draft rows with the stored ones.
    assert!(ctrl
        .items()
        .rows()
        .iter()
        .all(|row| matches!(row.key, RowKey::Stored(_))));
}

#[tokio::test]
async fn test_resave_targets_minted_id_and_bumps_version() {
    let (store, state) = app();
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();
    ctrl.header_mut().subject_code = "COMP10001".to_string();
    ctrl.save("coord1").await.unwrap();
    assert_eq!(ctrl.version(), 1);

    let receipt = ctrl.save("coord1").await.unwrap();
    assert_eq!(receipt.template_id, 1);
    assert_eq!(receipt.version, 2);
    assert_eq!(store.template_count(), 1);

    // Item writes append; the stored record now carries both submissions.
    let stored = store.template(1).unwrap();
    assert_eq!(stored.template_items.len(), 8);
}

#[tokio::test]
async fn test_rejected_header_leaves_store_untouched() {
    let (store, state) = app();
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();
    ctrl.header_mut().subject_code = String::new();

    let err = ctrl.save("coord1").await.unwrap_err();
    assert_eq!(err.to_string(), "subjectCode is required");
    assert_eq!(store.template_count(), 0);
    assert_eq!(state.marker().current(), None);
    // Editor state intact for a retry.
    assert_eq!(ctrl.items().len(), 4);
}

#[tokio::test]
async fn test_discard_deletes_minted_draft() {
    let (store, state) = app();
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();
    ctrl.header_mut().subject_code = "COMP10001".to_string();
    ctrl.save("coord1").await.unwrap();
    assert_eq!(store.template_count(), 1);

    ctrl.discard().await;
    assert_eq!(store.template_count(), 0);
    assert_eq!(state.marker().current(), None);
    assert_eq!(ctrl.header().name, DEFAULT_TITLE);
    assert_eq!(ctrl.template_id(), None);
}

#[tokio::test]
async fn test_kept_template_survives_later_discard() {
    let (store, state) = app();

    // Session 1: save and keep ("Save & Continue").
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();
    ctrl.header_mut().subject_code = "COMP10001".to_string();
    ctrl.save("coord1").await.unwrap();
    ctrl.confirm_kept();
    assert_eq!(store.template_count(), 1);

    // Session 2: a fresh draft abandoned via "Don't Save" must not
    // touch the template kept in session 1.
    let mut later = state.draft_controller();
    later.open(None).await.unwrap();
    later.discard().await;
    assert_eq!(store.template_count(), 1);
    assert_eq!(state.marker().current(), None);
}

#[tokio::test]
async fn test_preset_rows_survive_save() {
    let (store, state) = app();
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();
    ctrl.header_mut().subject_code = "COMP10001".to_string();

    let preset = &builtin_presets()[0];
    ctrl.apply_preset(preset);
    assert_eq!(ctrl.header().name, preset.name);

    ctrl.save("coord1").await.unwrap();
    let stored = store.template(1).unwrap();
    let stored_levels: Vec<Option<&str>> = stored
        .template_items
        .iter()
        .map(|item| item.level_name.as_deref())
        .collect();
    let preset_levels: Vec<Option<&str>> = preset
        .levels
        .iter()
        .map(|level| Some(level.name.as_str()))
        .collect();
    assert_eq!(stored_levels, preset_levels);
}

#[tokio::test]
async fn test_stored_template_round_trips_through_fresh_controller() {
    let (_store, state) = app();
    let mut ctrl = state.draft_controller();
    ctrl.open(None).await.unwrap();
    ctrl.header_mut().name = "Guidelines v1".to_string();
    ctrl.header_mut().subject_code = "LING20003".to_string();
    ctrl.header_mut().year = 2026;
    ctrl.header_mut().semester = 2;
    let receipt = ctrl.save("coord1").await.unwrap();

    let mut reopened = state.draft_controller();
    reopened.open(Some(receipt.template_id)).await.unwrap();
    assert_eq!(reopened.header().name, "Guidelines v1");
    assert_eq!(reopened.header().subject_code, "LING20003");
    assert_eq!(reopened.header().year, 2026);
    assert_eq!(reopened.header().semester, 2);
    assert_eq!(reopened.version(), 1);
    assert_eq!(reopened.items().len(), 4);
}
