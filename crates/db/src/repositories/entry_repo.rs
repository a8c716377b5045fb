//! Repository for the `changelog_entries` table.
//!
//! All operations are scoped to a project by joining through `changelogs`,
//! so an entry id from another project behaves exactly like a missing row.
//! Publication state transitions are single-row updates: publish stamps
//! `published_at`, unpublish clears it, delete removes the row (tag
//! associations cascade via the junction table FK).

use sqlx::PgPool;

use changerawr_core::types::DbId;

use crate::models::entry::{ChangelogEntry, CreateEntry, UpdateEntry};

/// Column list for changelog_entries queries, qualified for joins.
const ENTRY_COLUMNS: &str = "e.id, e.changelog_id, e.title, e.content, e.version, \
    e.published_at, e.created_at, e.updated_at";

/// Provides CRUD and publication-state operations for changelog entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new draft entry into the project's changelog.
    ///
    /// Returns `None` when the project (and therefore its changelog) does
    /// not exist.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateEntry,
    ) -> Result<Option<ChangelogEntry>, sqlx::Error> {
        sqlx::query_as::<_, ChangelogEntry>(
            "INSERT INTO changelog_entries (changelog_id, title, content, version)
             SELECT c.id, $2, $3, $4
             FROM changelogs c
             WHERE c.project_id = $1
             RETURNING id, changelog_id, title, content, version, published_at,
                       created_at, updated_at",
        )
        .bind(project_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.version)
        .fetch_optional(pool)
        .await
    }

    /// List a project's entries, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ChangelogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS}
             FROM changelog_entries e
             JOIN changelogs c ON c.id = e.changelog_id
             WHERE c.project_id = $1
             ORDER BY e.created_at DESC"
        );
        sqlx::query_as::<_, ChangelogEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find an entry by id within a project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        entry_id: DbId,
    ) -> Result<Option<ChangelogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS}
             FROM changelog_entries e
             JOIN changelogs c ON c.id = e.changelog_id
             WHERE c.project_id = $1 AND e.id = $2"
        );
        sqlx::query_as::<_, ChangelogEntry>(&query)
            .bind(project_id)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial content update, returning the updated row or `None`
    /// if the entry does not exist in the project.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        entry_id: DbId,
        input: &UpdateEntry,
    ) -> Result<Option<ChangelogEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE changelog_entries e
             SET title = COALESCE($3, e.title),
                 content = COALESCE($4, e.content),
                 version = COALESCE($5, e.version),
                 updated_at = now()
             FROM changelogs c
             WHERE c.id = e.changelog_id AND c.project_id = $1 AND e.id = $2
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, ChangelogEntry>(&query)
            .bind(project_id)
            .bind(entry_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.version)
            .fetch_optional(pool)
            .await
    }

    /// Set `published_at` to the current time.
    ///
    /// Re-invoking on an already-published entry refreshes the timestamp;
    /// that is intentional, not an error.
    pub async fn publish(
        pool: &PgPool,
        project_id: DbId,
        entry_id: DbId,
    ) -> Result<Option<ChangelogEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE changelog_entries e
             SET published_at = now(), updated_at = now()
             FROM changelogs c
             WHERE c.id = e.changelog_id AND c.project_id = $1 AND e.id = $2
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, ChangelogEntry>(&query)
            .bind(project_id)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }

    /// Clear `published_at`, returning the entry to draft state.
    ///
    /// A no-op on drafts with respect to state, but still returns the row.
    pub async fn unpublish(
        pool: &PgPool,
        project_id: DbId,
        entry_id: DbId,
    ) -> Result<Option<ChangelogEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE changelog_entries e
             SET published_at = NULL, updated_at = now()
             FROM changelogs c
             WHERE c.id = e.changelog_id AND c.project_id = $1 AND e.id = $2
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, ChangelogEntry>(&query)
            .bind(project_id)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove the entry row, returning it, or `None` if it does not exist
    /// in the project.
    pub async fn delete_entry(
        pool: &PgPool,
        project_id: DbId,
        entry_id: DbId,
    ) -> Result<Option<ChangelogEntry>, sqlx::Error> {
        let query = format!(
            "DELETE FROM changelog_entries e
             USING changelogs c
             WHERE c.id = e.changelog_id AND c.project_id = $1 AND e.id = $2
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, ChangelogEntry>(&query)
            .bind(project_id)
            .bind(entry_id)
            .fetch_optional(pool)
            .await
    }
}
