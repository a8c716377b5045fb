//! Changelog entry models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use changerawr_core::types::{DbId, Timestamp};

/// A row from the `changelog_entries` table.
///
/// `published_at` doubles as the publication state: `None` is a draft,
/// `Some(_)` is published.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangelogEntry {
    pub id: DbId,
    pub changelog_id: DbId,
    pub title: String,
    pub content: String,
    pub version: Option<String>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ChangelogEntry {
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// DTO for creating an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntry {
    pub title: String,
    pub content: String,
    pub version: Option<String>,
}

/// DTO for a partial entry update. Publication state is never touched here;
/// that goes through the status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntry {
    pub title: Option<String>,
    pub content: Option<String>,
    pub version: Option<String>,
}
