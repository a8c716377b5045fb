//! Repository for the `changelog_requests` table (the request ledger).
//!
//! The ledger invariant is at most one PENDING request per entry (scoped by
//! type or not, per [`DedupScope`]). `submit` enforces it with an existence
//! check and insert inside one transaction; the partial unique index
//! `uq_changelog_requests_pending` backstops the per-type form against
//! concurrent submitters, with `ON CONFLICT DO NOTHING` turning the race
//! loser into a duplicate instead of an error.

use sqlx::PgPool;

use changerawr_core::publication::{DedupScope, RequestStatus, RequestType};
use changerawr_core::types::DbId;

use crate::models::request::{ChangelogRequest, SubmitRequest};

/// Column list for changelog_requests queries.
const REQUEST_COLUMNS: &str = "id, type, status, staff_id, project_id, changelog_entry_id, \
    reviewed_by, reviewed_at, created_at, updated_at";

/// Provides ledger operations for queued change requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Queue a new PENDING request.
    ///
    /// Returns `Ok(None)` when a pending request already blocks this entry
    /// under the given scope; no row is inserted in that case.
    pub async fn submit(
        pool: &PgPool,
        input: &SubmitRequest,
        scope: DedupScope,
    ) -> Result<Option<ChangelogRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId,)> = match scope {
            DedupScope::PerEntry => {
                sqlx::query_as(
                    "SELECT id FROM changelog_requests
                     WHERE changelog_entry_id = $1 AND status = 'PENDING'
                     LIMIT 1",
                )
                .bind(input.changelog_entry_id)
                .fetch_optional(&mut *tx)
                .await?
            }
            DedupScope::PerEntryAndType => {
                sqlx::query_as(
                    "SELECT id FROM changelog_requests
                     WHERE changelog_entry_id = $1 AND type = $2 AND status = 'PENDING'
                     LIMIT 1",
                )
                .bind(input.changelog_entry_id)
                .bind(input.request_type.as_str())
                .fetch_optional(&mut *tx)
                .await?
            }
        };

        if existing.is_some() {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO changelog_requests (type, status, staff_id, project_id, changelog_entry_id)
             VALUES ($1, 'PENDING', $2, $3, $4)
             ON CONFLICT (changelog_entry_id, type) WHERE status = 'PENDING' DO NOTHING
             RETURNING {REQUEST_COLUMNS}"
        );
        let created = sqlx::query_as::<_, ChangelogRequest>(&query)
            .bind(input.request_type.as_str())
            .bind(input.staff_id)
            .bind(input.project_id)
            .bind(input.changelog_entry_id)
            .fetch_optional(&mut *tx)
            .await?;

        match created {
            Some(request) => {
                tx.commit().await?;
                Ok(Some(request))
            }
            // Lost a race with a concurrent submitter.
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Find a request by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChangelogRequest>, sqlx::Error> {
        let query = format!("SELECT {REQUEST_COLUMNS} FROM changelog_requests WHERE id = $1");
        sqlx::query_as::<_, ChangelogRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's PENDING requests, oldest first (review queue order).
    pub async fn list_pending(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ChangelogRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_COLUMNS} FROM changelog_requests
             WHERE project_id = $1 AND status = 'PENDING'
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ChangelogRequest>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Consume a PENDING request: transition its status and, on approval,
    /// apply the requested entry mutation in the same transaction.
    ///
    /// Returns `Ok(None)` when the request does not exist or is no longer
    /// PENDING (already reviewed by another admin).
    pub async fn resolve(
        pool: &PgPool,
        request_id: DbId,
        decision: RequestStatus,
        reviewer_id: DbId,
    ) -> Result<Option<ChangelogRequest>, sqlx::Error> {
        debug_assert_ne!(decision, RequestStatus::Pending);

        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE changelog_requests
             SET status = $2, reviewed_by = $3, reviewed_at = now(), updated_at = now()
             WHERE id = $1 AND status = 'PENDING'
             RETURNING {REQUEST_COLUMNS}"
        );
        let Some(request) = sqlx::query_as::<_, ChangelogRequest>(&query)
            .bind(request_id)
            .bind(decision.as_str())
            .bind(reviewer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        if decision == RequestStatus::Approved {
            if request.request_type == RequestType::AllowPublish.as_str() {
                sqlx::query(
                    "UPDATE changelog_entries
                     SET published_at = now(), updated_at = now()
                     WHERE id = $1",
                )
                .bind(request.changelog_entry_id)
                .execute(&mut *tx)
                .await?;
            } else {
                // DELETE_ENTRY. The FK cascade removes the request row with
                // the entry; RETURNING above already captured its state.
                sqlx::query("DELETE FROM changelog_entries WHERE id = $1")
                    .bind(request.changelog_entry_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(Some(request))
    }
}
