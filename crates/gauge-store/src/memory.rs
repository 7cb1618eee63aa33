//! In-memory reference implementation of [`EntityStore`].
//!
//! All tables live behind one `RwLock`, so a composite operation such as
//! [`EntityStore::create_analyzed_document`] runs in a single write-lock scope
//! and the duplicate-analysis check cannot race with another insert.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use gauge_core::EntityId;
use gauge_core::entities::{
    Activity, Analysis, ContactSubmission, Document, NewActivity, NewContactSubmission,
    NewDocument, NewUser, User,
};
use gauge_core::enums::ProviderKind;
use gauge_core::scorecard::Scorecard;

use crate::error::StoreError;
use crate::update::DocumentUpdate;
use crate::{EntityStore, check_new_user, check_update, credentials};

/// Next-id counters, one per entity kind. Ids start at 1 and only grow.
#[derive(Debug)]
struct Sequences {
    user: EntityId,
    document: EntityId,
    analysis: EntityId,
    activity: EntityId,
    contact: EntityId,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            user: 1,
            document: 1,
            analysis: 1,
            activity: 1,
            contact: 1,
        }
    }
}

fn take(seq: &mut EntityId) -> EntityId {
    let id = *seq;
    *seq += 1;
    id
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<EntityId, User>,
    documents: BTreeMap<EntityId, Document>,
    analyses: BTreeMap<EntityId, Analysis>,
    activities: BTreeMap<EntityId, Activity>,
    contacts: BTreeMap<EntityId, ContactSubmission>,
    seq: Sequences,
}

impl Tables {
    fn insert_document(&mut self, new: NewDocument, score: Option<u8>) -> Document {
        let document = Document {
            id: take(&mut self.seq.document),
            user_id: new.user_id,
            title: new.title,
            content_type: new.content_type,
            content: new.content,
            page_count: new.page_count,
            score,
            uploaded_at: Utc::now(),
        };
        self.documents.insert(document.id, document.clone());
        document
    }

    fn analysis_for(&self, document_id: EntityId) -> Option<&Analysis> {
        self.analyses
            .values()
            .find(|analysis| analysis.document_id == document_id)
    }

    fn insert_analysis(
        &mut self,
        document_id: EntityId,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<Analysis, StoreError> {
        if self.analysis_for(document_id).is_some() {
            return Err(StoreError::DuplicateAnalysis { document_id });
        }
        let overall = scorecard.overall_score;
        let document = self
            .documents
            .get_mut(&document_id)
            .ok_or_else(|| StoreError::not_found("document", document_id))?;
        document.score = Some(overall);

        let analysis = Analysis {
            id: take(&mut self.seq.analysis),
            document_id,
            provider,
            scorecard,
            created_at: Utc::now(),
        };
        self.analyses.insert(analysis.id, analysis.clone());
        Ok(analysis)
    }
}

/// Reference [`EntityStore`] backed by process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Every write leaves the maps consistent, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Newest first: by timestamp, then by id for entries created in the same instant.
fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

impl EntityStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        check_new_user(&user)?;
        // Hash outside the lock.
        let password_hash = credentials::hash_password(&user.password)?;

        let mut tables = self.write();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername {
                username: user.username,
            });
        }
        let created = User {
            id: take(&mut tables.seq.user),
            username: user.username,
            password_hash,
            user_type: user.user_type,
            created_at: Utc::now(),
        };
        tables.users.insert(created.id, created.clone());
        drop(tables);

        tracing::debug!(user_id = created.id, "user created");
        Ok(created)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError> {
        crate::require_text("title", &document.title)?;
        Ok(self.write().insert_document(document, None))
    }

    async fn get_document(&self, id: EntityId) -> Result<Option<Document>, StoreError> {
        Ok(self.read().documents.get(&id).cloned())
    }

    async fn get_documents_by_user_id(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<Document>, StoreError> {
        let documents = self
            .read()
            .documents
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(documents, |d| (d.uploaded_at, d.id)))
    }

    async fn update_document(
        &self,
        id: EntityId,
        update: DocumentUpdate,
    ) -> Result<Document, StoreError> {
        check_update(&update)?;
        let mut tables = self.write();
        let document = tables
            .documents
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("document", id))?;

        if let Some(title) = update.title {
            document.title = title;
        }
        if let Some(content_type) = update.content_type {
            document.content_type = content_type;
        }
        if let Some(page_count) = update.page_count {
            document.page_count = page_count;
        }
        if let Some(score) = update.score {
            document.score = Some(score);
        }
        Ok(document.clone())
    }

    async fn create_analysis(
        &self,
        document_id: EntityId,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<Analysis, StoreError> {
        self.write()
            .insert_analysis(document_id, scorecard, provider)
    }

    async fn get_analysis_by_document_id(
        &self,
        document_id: EntityId,
    ) -> Result<Option<Analysis>, StoreError> {
        Ok(self.read().analysis_for(document_id).cloned())
    }

    async fn create_analyzed_document(
        &self,
        document: NewDocument,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<(Document, Analysis), StoreError> {
        crate::require_text("title", &document.title)?;
        let mut tables = self.write();
        let created = tables.insert_document(document, Some(scorecard.overall_score));
        let analysis = tables.insert_analysis(created.id, scorecard, provider)?;
        Ok((created, analysis))
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let mut tables = self.write();
        let created = Activity {
            id: take(&mut tables.seq.activity),
            user_id: activity.user_id,
            document_id: activity.document_id,
            activity_type: activity.activity_type,
            details: activity.details,
            timestamp: Utc::now(),
        };
        tables.activities.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_activities(
        &self,
        user_id: EntityId,
        limit: u32,
    ) -> Result<Vec<Activity>, StoreError> {
        let activities = self
            .read()
            .activities
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        let mut activities = newest_first(activities, |a| (a.timestamp, a.id));
        activities.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(activities)
    }

    async fn create_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, StoreError> {
        crate::require_text("email", &submission.email)?;
        let mut tables = self.write();
        let created = ContactSubmission {
            id: take(&mut tables.seq.contact),
            name: submission.name,
            email: submission.email,
            company: submission.company,
            message: submission.message,
            extra: submission.extra,
            submitted_at: Utc::now(),
        };
        tables.contacts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        let submissions = self.read().contacts.values().cloned().collect();
        Ok(newest_first(submissions, |s| (s.submitted_at, s.id)))
    }
}
