//! Shared Test Support
//!
//! An in-memory `TemplateStore` that behaves like the real backend:
//! identifiers are minted store-side, versions are incremented store-side
//! on every header write, item writes append to the stored record, and
//! the community listing filters and pages server-side.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use aiscale_store::{
    CommunityPage, CommunityQuery, NewItem, StoreError, StoreResult, SubjectRef, TemplateDetails,
    TemplateForm, TemplateItemRecord, TemplateStore, TemplateSummary, UpsertOutcome, UserInfo,
};

#[derive(Default)]
pub struct InMemoryStore {
    templates: Mutex<HashMap<i64, TemplateDetails>>,
    community: Mutex<Vec<TemplateSummary>>,
    user: Mutex<Option<UserInfo>>,
    next_template_id: Mutex<i64>,
    next_item_id: Mutex<i64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_template_id: Mutex::new(1),
            next_item_id: Mutex::new(1),
            ..Self::default()
        }
    }

    pub fn with_user(username: &str) -> Self {
        let store = Self::new();
        *store.user.lock().unwrap() = Some(UserInfo {
            username: username.to_string(),
            role: Some("COORDINATOR".to_string()),
            first_name: None,
            last_name: None,
        });
        store
    }

    pub fn seed_community(&self, rows: Vec<TemplateSummary>) {
        // Keep minted ids clear of the seeded ones.
        if let Some(max_id) = rows.iter().map(|row| row.template_id).max() {
            let mut next = self.next_template_id.lock().unwrap();
            if *next <= max_id {
                *next = max_id + 1;
            }
        }
        *self.community.lock().unwrap() = rows;
    }

    pub fn template(&self, id: i64) -> Option<TemplateDetails> {
        self.templates.lock().unwrap().get(&id).cloned()
    }

    pub fn template_count(&self) -> usize {
        self.templates.lock().unwrap().len()
    }

    fn mint_template_id(&self) -> i64 {
        let mut next = self.next_template_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }

    fn mint_item_id(&self) -> i64 {
        let mut next = self.next_item_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    }
}

pub fn community_summary(id: i64, name: &str, owner: &str) -> TemplateSummary {
    TemplateSummary {
        template_id: id,
        name: name.to_string(),
        version: 1,
        subject_code: "COMP10001".to_string(),
        year: 2025,
        semester: 1,
        owner_name: owner.to_string(),
        owner_username: Some(owner.to_string()),
        is_publishable: true,
        is_template: true,
    }
}

fn matches_search(row: &TemplateSummary, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    row.name.to_lowercase().contains(&needle)
        || row.subject_code.to_lowercase().contains(&needle)
        || row.owner_name.to_lowercase().contains(&needle)
}

#[async_trait]
impl TemplateStore for InMemoryStore {
    async fn resolve_session(&self) -> StoreResult<Option<UserInfo>> {
        Ok(self.user.lock().unwrap().clone())
    }

    async fn issue_csrf_token(&self) -> StoreResult<Option<String>> {
        Ok(Some("test-token".to_string()))
    }

    async fn logout(&self) -> StoreResult<()> {
        *self.user.lock().unwrap() = None;
        Ok(())
    }

    async fn template_details(&self, template_id: i64) -> StoreResult<TemplateDetails> {
        self.template(template_id).ok_or(StoreError::Http {
            status: 404,
            message: "template not found".to_string(),
        })
    }

    async fn upsert_template(&self, form: &TemplateForm) -> StoreResult<UpsertOutcome> {
        if form.subject_code.is_empty() {
            return Err(StoreError::rejected("subjectCode is required"));
        }
        let mut templates = self.templates.lock().unwrap();
        if let Some(id) = form.template_id {
            let existing = templates
                .get_mut(&id)
                .ok_or_else(|| StoreError::rejected("template not found"))?;
            existing.name = form.name.clone();
            existing.subject.code = form.subject_code.clone();
            existing.subject.year = form.year;
            existing.subject.semester = form.semester;
            existing.scope = form.scope.clone();
            existing.description = form.description.clone();
            existing.is_publishable = form.is_publishable;
            existing.is_template = form.is_template;
            existing.version += 1;
            Ok(UpsertOutcome {
                template_id: id,
                version: existing.version,
            })
        } else {
            let id = self.mint_template_id();
            templates.insert(
                id,
                TemplateDetails {
                    id,
                    name: form.name.clone(),
                    version: 1,
                    owner_id: None,
                    subject: SubjectRef {
                        code: form.subject_code.clone(),
                        name: None,
                        semester: form.semester,
                        year: form.year,
                    },
                    scope: form.scope.clone(),
                    description: form.description.clone(),
                    is_publishable: form.is_publishable,
                    is_template: form.is_template,
                    template_items: vec![],
                },
            );
            Ok(UpsertOutcome {
                template_id: id,
                version: 1,
            })
        }
    }

    async fn add_template_item(&self, template_id: i64, item: &NewItem) -> StoreResult<()> {
        let mut templates = self.templates.lock().unwrap();
        let template = templates
            .get_mut(&template_id)
            .ok_or_else(|| StoreError::rejected("template not found"))?;
        template.template_items.push(TemplateItemRecord {
            id: self.mint_item_id(),
            task: item.task.clone(),
            instructions_to_students: item.instructions_to_students.clone(),
            examples: item.examples.clone(),
            ai_generated_content: item.ai_generated_content.clone(),
            use_acknowledgement: item.use_acknowledgement,
            level_name: Some(item.level_name.clone()),
        });
        Ok(())
    }

    async fn delete_template(&self, template_id: i64) -> StoreResult<()> {
        self.templates.lock().unwrap().remove(&template_id);
        Ok(())
    }

    async fn list_community(&self, query: &CommunityQuery) -> StoreResult<CommunityPage> {
        let community = self.community.lock().unwrap();
        let matching: Vec<TemplateSummary> = community
            .iter()
            .filter(|row| matches_search(row, &query.search))
            .cloned()
            .collect();
        let count = matching.len() as u64;
        let results = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        Ok(CommunityPage {
            results,
            count: Some(count),
        })
    }

    async fn duplicate_template(
        &self,
        template_id: i64,
        username: &str,
    ) -> StoreResult<TemplateSummary> {
        let source = {
            let community = self.community.lock().unwrap();
            community
                .iter()
                .find(|row| row.template_id == template_id)
                .cloned()
                .ok_or_else(|| StoreError::rejected("template not found"))?
        };
        let copy = TemplateSummary {
            template_id: self.mint_template_id(),
            owner_name: username.to_string(),
            owner_username: Some(username.to_string()),
            ..source
        };
        self.community.lock().unwrap().push(copy.clone());
        Ok(copy)
    }

    async fn list_owned(&self, username: &str) -> StoreResult<Vec<TemplateSummary>> {
        Ok(self
            .community
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.owner_username.as_deref() == Some(username))
            .cloned()
            .collect())
    }
}
