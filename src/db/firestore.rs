// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Journal entries (owned by one user, draft or completed)
//! - User profiles (preferences)

use chrono::{DateTime, Utc};

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Difficulty, EntryStatus, JournalEntry, UserProfile};
use crate::time_utils::format_utc_rfc3339;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore emulator");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Cheap read used by the readiness probe.
    pub async fn ping(&self) -> Result<(), AppError> {
        let _: Vec<UserProfile> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USER_PROFILES)
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Journal Entry Operations ────────────────────────────────

    /// Fetch an entry, returning `None` unless it belongs to `user_id`.
    pub async fn get_entry_for_user(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<Option<JournalEntry>, AppError> {
        let entry: Option<JournalEntry> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::JOURNAL_ENTRIES)
            .obj()
            .one(entry_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(entry.filter(|e| e.user_id == user_id))
    }

    /// All entries of a user, newest first, optionally narrowed by status
    /// and difficulty.
    pub async fn list_entries(
        &self,
        user_id: &str,
        status: Option<EntryStatus>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<JournalEntry>, AppError> {
        let user_id = user_id.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::JOURNAL_ENTRIES)
            .filter(move |q| {
                q.for_all([
                    q.field("userId").eq(user_id.clone()),
                    status.and_then(|s| q.field("status").eq(s.as_str())),
                    difficulty.and_then(|d| q.field("trail.difficulty").eq(d.as_str())),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Completed entries of a user within an inclusive date range, newest first.
    pub async fn completed_entries(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<JournalEntry>, AppError> {
        let user_id = user_id.to_string();
        let start = start.map(format_utc_rfc3339);
        let end = end.map(format_utc_rfc3339);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::JOURNAL_ENTRIES)
            .filter(move |q| {
                q.for_all([
                    q.field("userId").eq(user_id.clone()),
                    q.field("status").eq(EntryStatus::Completed.as_str()),
                    start
                        .clone()
                        .and_then(|s| q.field("date").greater_than_or_equal(s)),
                    end.clone().and_then(|e| q.field("date").less_than_or_equal(e)),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Latest completed public entries across all users.
    pub async fn public_completed_entries(
        &self,
        limit: u32,
    ) -> Result<Vec<JournalEntry>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::JOURNAL_ENTRIES)
            .filter(|q| {
                q.for_all([
                    q.field("status").eq(EntryStatus::Completed.as_str()),
                    q.field("privacy").eq("public"),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite an entry document.
    pub async fn save_entry(&self, entry: &JournalEntry) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::JOURNAL_ENTRIES)
            .document_id(&entry.id)
            .object(entry)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(entry_id = %entry.id, user_id = %entry.user_id, "Entry saved");
        Ok(())
    }

    pub async fn delete_entry(&self, entry_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::JOURNAL_ENTRIES)
            .document_id(entry_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Profile Operations ─────────────────────────────────

    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_PROFILES)
            .obj()
            .one(&profile_doc_id(user_id))
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn upsert_user_profile(&self, profile: &UserProfile) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_PROFILES)
            .document_id(profile_doc_id(&profile.user_id))
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch the profile, creating it with default preferences on first use.
    pub async fn get_or_create_user_profile(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.get_user_profile(user_id).await? {
            return Ok(profile);
        }

        let profile = UserProfile::new(user_id, now);
        self.upsert_user_profile(&profile).await?;
        tracing::info!(user_id, "Created user profile");
        Ok(profile)
    }
}

/// Auth subjects such as `google-oauth2|123` may contain characters that are
/// not valid in a document id.
fn profile_doc_id(user_id: &str) -> String {
    urlencoding::encode(user_id).into_owned()
}
