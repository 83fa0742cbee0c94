//! Items Collection Editor
//!
//! Maintains the ordered, mutable collection of use-level rows being
//! edited. All operations are pure state transitions — no I/O. The
//! collection is never empty: removal of the last remaining row is
//! rejected.

use crate::models::{default_levels, DraftKeyGen, ItemDraft, ItemPatch, PresetScale, RowKey};
use aiscale_store::{NewItem, TemplateItemRecord};

/// In-memory editor over the ordered collection of use-level rows
#[derive(Debug)]
pub struct ItemsEditor {
    rows: Vec<ItemDraft>,
    keygen: DraftKeyGen,
}

impl ItemsEditor {
    /// Create an editor seeded with the default four-level scale
    pub fn new() -> Self {
        let mut keygen = DraftKeyGen::new();
        let rows = default_levels()
            .into_iter()
            .map(|level| ItemDraft {
                key: keygen.next_key(),
                task: String::new(),
                level_name: level.name,
                instructions: level.instructions,
                examples: level.examples,
                ai_generated_content: level.ai_generated_content,
                acknowledgement: level.acknowledgement,
            })
            .collect();
        Self { rows, keygen }
    }

    /// The current rows, in insertion order
    pub fn rows(&self) -> &[ItemDraft] {
        &self.rows
    }

    /// Number of rows (always ≥ 1)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for API completeness
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the collection with rows mapped from fetched store records.
    ///
    /// An empty record set keeps the current rows, so opening a template
    /// that has no items yet leaves the defaults in place.
    pub fn seed(&mut self, records: &[TemplateItemRecord]) {
        if records.is_empty() {
            return;
        }
        self.rows = records
            .iter()
            .enumerate()
            .map(|(index, record)| ItemDraft::from_record(record, index))
            .collect();
    }

    /// Append a blank row; returns its key. Never fails.
    pub fn add(&mut self) -> RowKey {
        let key = self.keygen.next_key();
        self.rows.push(ItemDraft::blank(key));
        key
    }

    /// Remove a row by key.
    ///
    /// Returns false (and leaves the collection untouched) when only one
    /// row remains or the key is unknown. Remaining rows keep their order.
    pub fn remove(&mut self, key: RowKey) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|row| row.key != key);
        self.rows.len() != before
    }

    /// Replace one field of one row; no-op if the key is unknown.
    pub fn update(&mut self, key: RowKey, patch: ItemPatch) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.key == key) else {
            return false;
        };
        match patch {
            ItemPatch::Task(value) => row.task = value,
            ItemPatch::LevelName(value) => row.level_name = value,
            ItemPatch::Instructions(value) => row.instructions = value,
            ItemPatch::Examples(value) => row.examples = value,
            ItemPatch::AiGeneratedContent(value) => row.ai_generated_content = value,
            ItemPatch::Acknowledgement(value) => row.acknowledgement = value,
        }
        true
    }

    /// Discard the collection and load rows from a named preset, minting
    /// fresh draft keys for every row. An empty preset is rejected.
    pub fn replace_from_preset(&mut self, preset: &PresetScale) -> bool {
        if preset.levels.is_empty() {
            return false;
        }
        self.rows = preset
            .levels
            .iter()
            .map(|level| ItemDraft {
                key: self.keygen.next_key(),
                task: String::new(),
                level_name: level.name.clone(),
                instructions: level.instructions.clone(),
                examples: level.examples.clone(),
                ai_generated_content: level.ai_generated_content.clone(),
                acknowledgement: level.acknowledgement,
            })
            .collect();
        true
    }

    /// Project every row into the item-create wire shape, preserving order
    pub fn snapshot_new_items(&self) -> Vec<NewItem> {
        self.rows.iter().map(ItemDraft::to_new_item).collect()
    }
}

impl Default for ItemsEditor {
    fn default() -> Self {
        Self::new()
    }
}
