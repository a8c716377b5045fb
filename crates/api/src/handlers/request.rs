//! Handlers for pending change-request review (admin only).

use axum::extract::{Path, State};
use axum::Json;

use changerawr_core::error::CoreError;
use changerawr_core::publication::RequestStatus;
use changerawr_core::types::DbId;
use changerawr_db::models::request::ChangelogRequest;
use changerawr_db::repositories::{ProjectRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/projects/{project_id}/requests
///
/// The project's review queue: pending requests, oldest first.
pub async fn list_pending(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ChangelogRequest>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let requests = RequestRepo::list_pending(&state.pool, project_id).await?;
    Ok(Json(requests))
}

/// POST /api/requests/{request_id}/approve
///
/// Consumes the pending request and applies the requested entry mutation
/// atomically.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(request_id): Path<DbId>,
) -> AppResult<Json<ChangelogRequest>> {
    resolve(&state, request_id, RequestStatus::Approved, user.user_id).await
}

/// POST /api/requests/{request_id}/reject
///
/// Consumes the pending request without touching the entry.
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Path(request_id): Path<DbId>,
) -> AppResult<Json<ChangelogRequest>> {
    resolve(&state, request_id, RequestStatus::Rejected, user.user_id).await
}

async fn resolve(
    state: &AppState,
    request_id: DbId,
    decision: RequestStatus,
    reviewer_id: DbId,
) -> AppResult<Json<ChangelogRequest>> {
    match RequestRepo::resolve(&state.pool, request_id, decision, reviewer_id).await? {
        Some(request) => {
            tracing::info!(
                request_id,
                reviewer_id,
                status = decision.as_str(),
                "change request reviewed"
            );
            Ok(Json(request))
        }
        // Distinguish "never existed" from "already reviewed".
        None => match RequestRepo::find_by_id(&state.pool, request_id).await? {
            Some(_) => Err(AppError::Core(CoreError::Conflict(
                "Request has already been reviewed".into(),
            ))),
            None => Err(AppError::Core(CoreError::NotFound {
                entity: "ChangelogRequest",
                id: request_id,
            })),
        },
    }
}
