//! Queued change request models.

use serde::Serialize;
use sqlx::FromRow;

use changerawr_core::publication::RequestType;
use changerawr_core::types::{DbId, Timestamp};

/// A row from the `changelog_requests` table.
///
/// `request_type` and `status` are TEXT at the storage boundary; the CHECK
/// constraints and the closed enums in `changerawr_core::publication` keep
/// the two in lockstep.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangelogRequest {
    pub id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub request_type: String,
    pub status: String,
    pub staff_id: DbId,
    pub project_id: DbId,
    pub changelog_entry_id: DbId,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for queueing a new pending request.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub request_type: RequestType,
    pub staff_id: DbId,
    pub project_id: DbId,
    pub changelog_entry_id: DbId,
}
