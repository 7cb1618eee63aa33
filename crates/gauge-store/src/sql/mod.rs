//! libSQL implementation of [`EntityStore`].
//!
//! Works against a local file, `:memory:`, or a Turso remote database. Every
//! statement on the shared connection runs under one async lock. Writers need
//! it so that `last_insert_rowid` and transactions never interleave. Readers
//! need it because an open transaction on the same connection is visible to
//! any statement issued in the meantime. The UNIQUE constraint on
//! `analyses.document_id` still guards the duplicate-analysis invariant
//! against writers in other processes.

pub mod helpers;
mod migrations;

use gauge_core::EntityId;
use gauge_core::entities::{
    Activity, Analysis, ContactSubmission, Document, NewActivity, NewContactSubmission,
    NewDocument, NewUser, User,
};
use gauge_core::enums::ProviderKind;
use gauge_core::scorecard::{ComparisonData, Scorecard};
use libsql::{Builder, Connection};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::update::DocumentUpdate;
use crate::{EntityStore, check_new_user, check_update, credentials, require_text};
use helpers::{
    format_timestamp, get_opt_score, get_opt_string, get_score, get_u32, is_unique_violation,
    now, parse_datetime, parse_enum, parse_json, to_json,
};

const USER_COLUMNS: &str = "id, username, password_hash, user_type, created_at";
const DOCUMENT_COLUMNS: &str =
    "id, user_id, title, content_type, content, page_count, score, uploaded_at";
const ANALYSIS_COLUMNS: &str = "id, document_id, provider, overall_score, feasibility_score, \
     scalability_score, financial_health_score, innovation_score, market_fit_score, \
     improvement_areas, industry_average, top_performers, summary, confidence, created_at";
const ACTIVITY_COLUMNS: &str = "id, user_id, document_id, activity_type, details, timestamp";
const CONTACT_COLUMNS: &str = "id, name, email, company, message, extra, submitted_at";

fn row_to_user(row: &libsql::Row) -> Result<User, StoreError> {
    Ok(User {
        id: row.get::<i64>(0)?,
        username: row.get::<String>(1)?,
        password_hash: row.get::<String>(2)?,
        user_type: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_document(row: &libsql::Row) -> Result<Document, StoreError> {
    Ok(Document {
        id: row.get::<i64>(0)?,
        user_id: row.get::<i64>(1)?,
        title: row.get::<String>(2)?,
        content_type: row.get::<String>(3)?,
        content: row.get::<String>(4)?,
        page_count: get_u32(row, 5)?,
        score: get_opt_score(row, 6)?,
        uploaded_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn row_to_analysis(row: &libsql::Row) -> Result<Analysis, StoreError> {
    Ok(Analysis {
        id: row.get::<i64>(0)?,
        document_id: row.get::<i64>(1)?,
        provider: parse_enum(&row.get::<String>(2)?)?,
        scorecard: Scorecard {
            overall_score: get_score(row, 3)?,
            feasibility_score: get_score(row, 4)?,
            scalability_score: get_score(row, 5)?,
            financial_health_score: get_score(row, 6)?,
            innovation_score: get_score(row, 7)?,
            market_fit_score: get_score(row, 8)?,
            improvement_areas: parse_json(&row.get::<String>(9)?)?,
            comparison_data: ComparisonData {
                industry_average: get_score(row, 10)?,
                top_performers: get_score(row, 11)?,
            },
            summary: row.get::<String>(12)?,
            confidence: get_score(row, 13)?,
        },
        created_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

fn row_to_activity(row: &libsql::Row) -> Result<Activity, StoreError> {
    Ok(Activity {
        id: row.get::<i64>(0)?,
        user_id: row.get::<i64>(1)?,
        document_id: row.get::<Option<i64>>(2)?,
        activity_type: parse_enum(&row.get::<String>(3)?)?,
        details: parse_json(&row.get::<String>(4)?)?,
        timestamp: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn row_to_contact(row: &libsql::Row) -> Result<ContactSubmission, StoreError> {
    Ok(ContactSubmission {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        company: get_opt_string(row, 3)?,
        message: row.get::<String>(4)?,
        extra: parse_json(&row.get::<String>(5)?)?,
        submitted_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

async fn collect<T>(
    mut rows: libsql::Rows,
    map: fn(&libsql::Row) -> Result<T, StoreError>,
) -> Result<Vec<T>, StoreError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(map(&row)?);
    }
    Ok(out)
}

async fn select_document(conn: &Connection, id: EntityId) -> Result<Option<Document>, StoreError> {
    let mut rows = conn
        .query(
            &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"),
            [id],
        )
        .await?;
    rows.next().await?.as_ref().map(row_to_document).transpose()
}

async fn insert_document(
    conn: &Connection,
    new: NewDocument,
    score: Option<u8>,
) -> Result<Document, StoreError> {
    let uploaded_at = now();
    conn.execute(
        "INSERT INTO documents (user_id, title, content_type, content, page_count, score, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            new.user_id,
            new.title.as_str(),
            new.content_type.as_str(),
            new.content.as_str(),
            i64::from(new.page_count),
            score.map(i64::from),
            format_timestamp(uploaded_at)
        ],
    )
    .await?;

    Ok(Document {
        id: conn.last_insert_rowid(),
        user_id: new.user_id,
        title: new.title,
        content_type: new.content_type,
        content: new.content,
        page_count: new.page_count,
        score,
        uploaded_at,
    })
}

async fn insert_analysis(
    conn: &Connection,
    document_id: EntityId,
    scorecard: Scorecard,
    provider: ProviderKind,
) -> Result<Analysis, StoreError> {
    if select_document(conn, document_id).await?.is_none() {
        return Err(StoreError::not_found("document", document_id));
    }

    let created_at = now();
    let inserted = conn
        .execute(
            "INSERT INTO analyses (document_id, provider, overall_score, feasibility_score,
                 scalability_score, financial_health_score, innovation_score, market_fit_score,
                 improvement_areas, industry_average, top_performers, summary, confidence, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            libsql::params![
                document_id,
                provider.as_str(),
                i64::from(scorecard.overall_score),
                i64::from(scorecard.feasibility_score),
                i64::from(scorecard.scalability_score),
                i64::from(scorecard.financial_health_score),
                i64::from(scorecard.innovation_score),
                i64::from(scorecard.market_fit_score),
                to_json(&scorecard.improvement_areas)?,
                i64::from(scorecard.comparison_data.industry_average),
                i64::from(scorecard.comparison_data.top_performers),
                scorecard.summary.as_str(),
                i64::from(scorecard.confidence),
                format_timestamp(created_at)
            ],
        )
        .await;
    match inserted {
        Err(e) if is_unique_violation(&e) => {
            return Err(StoreError::DuplicateAnalysis { document_id });
        }
        Err(e) => return Err(e.into()),
        Ok(_) => {}
    }
    let id = conn.last_insert_rowid();

    conn.execute(
        "UPDATE documents SET score = ?1 WHERE id = ?2",
        libsql::params![i64::from(scorecard.overall_score), document_id],
    )
    .await?;

    Ok(Analysis {
        id,
        document_id,
        provider,
        scorecard,
        created_at,
    })
}

/// Commit on success, roll back on failure. The original error wins over a
/// rollback error.
async fn finish<T>(
    tx: libsql::Transaction,
    outcome: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "transaction rollback failed");
            }
            Err(e)
        }
    }
}

/// [`EntityStore`] backed by libSQL.
pub struct SqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: Connection,
    /// Serializes every statement on `conn`, reads included.
    lock: Mutex<()>,
}

impl SqlStore {
    /// Open a local database file (or `":memory:"`).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| StoreError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        Self::init(db, conn).await
    }

    /// Open a private in-memory database. Used by tests and `--memory` runs
    /// that still want SQL semantics.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations fail.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        Self::open_local(":memory:").await
    }

    /// Open a Turso remote database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, StoreError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        Self::init(db, conn).await
    }

    async fn init(db: libsql::Database, conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            db,
            conn,
            lock: Mutex::new(()),
        };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Trivial read, used as the document-store liveness check.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or returns nothing.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut rows = self.conn.query("SELECT 1", ()).await?;
        rows.next()
            .await?
            .map(|_| ())
            .ok_or_else(|| StoreError::Query("SELECT 1 returned no rows".into()))
    }
}

impl EntityStore for SqlStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        check_new_user(&user)?;
        let password_hash = credentials::hash_password(&user.password)?;
        let created_at = now();

        let _guard = self.lock.lock().await;
        let inserted = self
            .conn
            .execute(
                "INSERT INTO users (username, password_hash, user_type, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    user.username.as_str(),
                    password_hash.as_str(),
                    user.user_type.as_str(),
                    format_timestamp(created_at)
                ],
            )
            .await;
        match inserted {
            Err(e) if is_unique_violation(&e) => {
                return Err(StoreError::DuplicateUsername {
                    username: user.username,
                });
            }
            Err(e) => return Err(e.into()),
            Ok(_) => {}
        }

        let created = User {
            id: self.conn.last_insert_rowid(),
            username: user.username,
            password_hash,
            user_type: user.user_type,
            created_at,
        };
        tracing::debug!(user_id = created.id, "user created");
        Ok(created)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                [username],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_user).transpose()
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document, StoreError> {
        require_text("title", &document.title)?;
        let _guard = self.lock.lock().await;
        insert_document(&self.conn, document, None).await
    }

    async fn get_document(&self, id: EntityId) -> Result<Option<Document>, StoreError> {
        let _guard = self.lock.lock().await;
        select_document(&self.conn, id).await
    }

    async fn get_documents_by_user_id(
        &self,
        user_id: EntityId,
    ) -> Result<Vec<Document>, StoreError> {
        let _guard = self.lock.lock().await;
        let rows = self
            .conn
            .query(
                &format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE user_id = ?1
                     ORDER BY uploaded_at DESC, id DESC"
                ),
                [user_id],
            )
            .await?;
        collect(rows, row_to_document).await
    }

    async fn update_document(
        &self,
        id: EntityId,
        update: DocumentUpdate,
    ) -> Result<Document, StoreError> {
        check_update(&update)?;
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.as_str().into());
            idx += 1;
        }
        if let Some(ref content_type) = update.content_type {
            sets.push(format!("content_type = ?{idx}"));
            params.push(content_type.as_str().into());
            idx += 1;
        }
        if let Some(page_count) = update.page_count {
            sets.push(format!("page_count = ?{idx}"));
            params.push(i64::from(page_count).into());
            idx += 1;
        }
        if let Some(score) = update.score {
            sets.push(format!("score = ?{idx}"));
            params.push(i64::from(score).into());
            idx += 1;
        }

        if sets.is_empty() {
            return self
                .get_document(id)
                .await?
                .ok_or_else(|| StoreError::not_found("document", id));
        }

        params.push(id.into());
        let sql = format!("UPDATE documents SET {} WHERE id = ?{idx}", sets.join(", "));

        let _guard = self.lock.lock().await;
        let changed = self
            .conn
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(StoreError::not_found("document", id));
        }
        select_document(&self.conn, id)
            .await?
            .ok_or_else(|| StoreError::not_found("document", id))
    }

    async fn create_analysis(
        &self,
        document_id: EntityId,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<Analysis, StoreError> {
        let _guard = self.lock.lock().await;
        let tx = self.conn.transaction().await?;
        let outcome = insert_analysis(&tx, document_id, scorecard, provider).await;
        finish(tx, outcome).await
    }

    async fn get_analysis_by_document_id(
        &self,
        document_id: EntityId,
    ) -> Result<Option<Analysis>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {ANALYSIS_COLUMNS} FROM analyses WHERE document_id = ?1"),
                [document_id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_analysis).transpose()
    }

    async fn create_analyzed_document(
        &self,
        document: NewDocument,
        scorecard: Scorecard,
        provider: ProviderKind,
    ) -> Result<(Document, Analysis), StoreError> {
        require_text("title", &document.title)?;
        let overall = scorecard.overall_score;

        let _guard = self.lock.lock().await;
        let tx = self.conn.transaction().await?;
        let outcome = async {
            let created = insert_document(&tx, document, Some(overall)).await?;
            let analysis = insert_analysis(&tx, created.id, scorecard, provider).await?;
            Ok::<_, StoreError>((created, analysis))
        }
        .await;
        finish(tx, outcome).await
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let timestamp = now();
        let details = to_json(&activity.details)?;

        let _guard = self.lock.lock().await;
        self.conn
            .execute(
                "INSERT INTO activities (user_id, document_id, activity_type, details, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    activity.user_id,
                    activity.document_id,
                    activity.activity_type.as_str(),
                    details,
                    format_timestamp(timestamp)
                ],
            )
            .await?;

        Ok(Activity {
            id: self.conn.last_insert_rowid(),
            user_id: activity.user_id,
            document_id: activity.document_id,
            activity_type: activity.activity_type,
            details: activity.details,
            timestamp,
        })
    }

    async fn get_activities(
        &self,
        user_id: EntityId,
        limit: u32,
    ) -> Result<Vec<Activity>, StoreError> {
        let _guard = self.lock.lock().await;
        let rows = self
            .conn
            .query(
                &format!(
                    "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE user_id = ?1
                     ORDER BY timestamp DESC, id DESC LIMIT ?2"
                ),
                libsql::params![user_id, i64::from(limit)],
            )
            .await?;
        collect(rows, row_to_activity).await
    }

    async fn create_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, StoreError> {
        require_text("email", &submission.email)?;
        let submitted_at = now();
        let extra = to_json(&submission.extra)?;

        let _guard = self.lock.lock().await;
        self.conn
            .execute(
                "INSERT INTO contact_submissions (name, email, company, message, extra, submitted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    submission.name.as_str(),
                    submission.email.as_str(),
                    submission.company.as_deref(),
                    submission.message.as_str(),
                    extra,
                    format_timestamp(submitted_at)
                ],
            )
            .await?;

        Ok(ContactSubmission {
            id: self.conn.last_insert_rowid(),
            name: submission.name,
            email: submission.email,
            company: submission.company,
            message: submission.message,
            extra: submission.extra,
            submitted_at,
        })
    }

    async fn get_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        let _guard = self.lock.lock().await;
        let rows = self
            .conn
            .query(
                &format!(
                    "SELECT {CONTACT_COLUMNS} FROM contact_submissions
                     ORDER BY submitted_at DESC, id DESC"
                ),
                (),
            )
            .await?;
        collect(rows, row_to_contact).await
    }
}
