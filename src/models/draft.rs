//! Draft Models
//!
//! In-memory structures for a template being edited: the header fields,
//! one editor row per AI use level, and the keys that identify rows
//! before and after they have been persisted.

use serde::{Deserialize, Serialize};

use aiscale_store::{NewItem, TemplateDetails, TemplateItemRecord};

/// Default title for a fresh guidelines draft
pub const DEFAULT_TITLE: &str = "AI Use Guidelines for Assessment";

/// Identity of one editor row.
///
/// Rows seeded from the store carry the stored item id; rows created
/// locally carry a time-based draft key that is unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKey {
    /// Item id assigned by the store
    Stored(i64),
    /// Client-generated temporary key (millisecond timestamp, bumped on
    /// collision)
    Draft(i64),
}

/// Generator for draft row keys.
///
/// Keys are based on the wall clock but strictly increasing, so two rows
/// added within the same millisecond still get distinct keys.
#[derive(Debug, Default)]
pub struct DraftKeyGen {
    last: i64,
}

impl DraftKeyGen {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next unique draft key
    pub fn next_key(&mut self) -> RowKey {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        RowKey::Draft(self.last)
    }
}

/// One editable use-level row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Row identity; stable across edits within a session
    pub key: RowKey,
    /// Task label / description
    pub task: String,
    /// AI use level name
    pub level_name: String,
    /// Instructions to students about permitted AI use
    pub instructions: String,
    /// Examples of permitted use
    pub examples: String,
    /// Notes about AI-generated content in submissions
    pub ai_generated_content: String,
    /// Whether students must acknowledge AI use
    pub acknowledgement: bool,
}

impl ItemDraft {
    /// A blank row with the given key, as produced by the "add level"
    /// action.
    pub fn blank(key: RowKey) -> Self {
        Self {
            key,
            task: String::new(),
            level_name: "New AI Use Level".to_string(),
            instructions: String::new(),
            examples: String::new(),
            ai_generated_content: String::new(),
            acknowledgement: true,
        }
    }

    /// Map a stored item record to an editor row.
    ///
    /// `index` supplies the positional fallback name for records whose
    /// level reference was left unset.
    pub fn from_record(record: &TemplateItemRecord, index: usize) -> Self {
        Self {
            key: RowKey::Stored(record.id),
            task: record.task.clone(),
            level_name: record
                .level_name
                .clone()
                .unwrap_or_else(|| format!("Level {}", index + 1)),
            instructions: record.instructions_to_students.clone(),
            examples: record.examples.clone(),
            ai_generated_content: record.ai_generated_content.clone(),
            acknowledgement: record.use_acknowledgement,
        }
    }

    /// Project this row into the item-create wire shape
    pub fn to_new_item(&self) -> NewItem {
        NewItem {
            task: self.task.clone(),
            level_name: self.level_name.clone(),
            instructions_to_students: self.instructions.clone(),
            examples: self.examples.clone(),
            ai_generated_content: self.ai_generated_content.clone(),
            use_acknowledgement: self.acknowledgement,
        }
    }
}

/// One editable field of a row, with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPatch {
    Task(String),
    LevelName(String),
    Instructions(String),
    Examples(String),
    AiGeneratedContent(String),
    Acknowledgement(bool),
}

/// Header fields of the guidelines form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftHeader {
    /// Guidelines title
    pub name: String,
    /// Assessment scope (e.g. "Research Paper", "Exam")
    pub scope: String,
    /// Free-form description
    pub description: String,
    /// Subject code the guidelines apply to
    pub subject_code: String,
    /// Teaching semester
    pub semester: i32,
    /// Academic year
    pub year: i32,
    /// May other users duplicate this template
    pub is_publishable: bool,
    /// Admin-authored reusable template vs. personal instance
    pub is_template: bool,
}

impl Default for DraftHeader {
    fn default() -> Self {
        Self {
            name: DEFAULT_TITLE.to_string(),
            scope: String::new(),
            description: String::new(),
            subject_code: String::new(),
            semester: 1,
            year: 2025,
            is_publishable: false,
            is_template: false,
        }
    }
}

impl DraftHeader {
    /// Populate header fields from fetched template details
    pub fn from_details(details: &TemplateDetails) -> Self {
        Self {
            name: details.name.clone(),
            scope: details.scope.clone(),
            description: details.description.clone(),
            subject_code: details.subject.code.clone(),
            semester: details.subject.semester,
            year: details.subject.year,
            is_publishable: details.is_publishable,
            is_template: details.is_template,
        }
    }
}
