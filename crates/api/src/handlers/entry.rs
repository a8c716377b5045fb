//! Handlers for the `/projects/{project_id}/changelog` resource.
//!
//! The status (PATCH) and delete (DELETE) handlers implement the
//! publication workflow: the permission classifier decides whether the
//! caller's action executes directly, is queued as a pending request for
//! admin approval, or is denied; the repositories carry out the decision.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use changerawr_core::error::CoreError;
use changerawr_core::publication::{classify, Decision, EntryAction};
use changerawr_core::types::DbId;
use changerawr_db::models::entry::{ChangelogEntry, CreateEntry, UpdateEntry};
use changerawr_db::models::request::SubmitRequest;
use changerawr_db::repositories::{EntryRepo, ProjectRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/changelog`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,
    #[validate(length(max = 50, message = "Version must be at most 50 characters"))]
    pub version: Option<String>,
}

/// Request body for `PUT /projects/{project_id}/changelog/{entry_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,
    #[validate(length(max = 50, message = "Version must be at most 50 characters"))]
    pub version: Option<String>,
}

/// Request body for `PATCH /projects/{project_id}/changelog/{entry_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub action: String,
}

fn entry_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ChangelogEntry",
        id,
    })
}

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/projects/{project_id}/changelog
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<ChangelogEntry>)> {
    input.validate()?;
    let create = CreateEntry {
        title: input.title,
        content: input.content,
        version: input.version,
    };
    let entry = EntryRepo::create(&state.pool, project_id, &create)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/projects/{project_id}/changelog
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ChangelogEntry>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;
    let entries = EntryRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(entries))
}

/// GET /api/projects/{project_id}/changelog/{entry_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((project_id, entry_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ChangelogEntry>> {
    let entry = EntryRepo::find_by_id(&state.pool, project_id, entry_id)
        .await?
        .ok_or_else(|| entry_not_found(entry_id))?;
    Ok(Json(entry))
}

/// PUT /api/projects/{project_id}/changelog/{entry_id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path((project_id, entry_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateEntryRequest>,
) -> AppResult<Json<ChangelogEntry>> {
    input.validate()?;
    let update = UpdateEntry {
        title: input.title,
        content: input.content,
        version: input.version,
    };
    let entry = EntryRepo::update(&state.pool, project_id, entry_id, &update)
        .await?
        .ok_or_else(|| entry_not_found(entry_id))?;
    Ok(Json(entry))
}

/// PATCH /api/projects/{project_id}/changelog/{entry_id}
///
/// Body: `{ "action": "publish" | "unpublish" }`. Returns 200 with the
/// mutated entry when executed directly, or 202 with the created pending
/// request when queued for approval.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, entry_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Response> {
    let action = match input.action.as_str() {
        "publish" => EntryAction::Publish,
        "unpublish" => EntryAction::Unpublish,
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid action: {other}. Expected publish or unpublish"
            ))))
        }
    };

    run_workflow(&state, &user, project_id, entry_id, action).await
}

/// DELETE /api/projects/{project_id}/changelog/{entry_id}
///
/// Returns 200 with the removed entry when executed directly (admin), or
/// 202 with the created pending request when queued (staff).
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, entry_id)): Path<(DbId, DbId)>,
) -> AppResult<Response> {
    run_workflow(&state, &user, project_id, entry_id, EntryAction::Delete).await
}

/// Common workflow dispatch for status changes and deletes.
async fn run_workflow(
    state: &AppState,
    user: &AuthUser,
    project_id: DbId,
    entry_id: DbId,
    action: EntryAction,
) -> AppResult<Response> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))?;

    match classify(user.role, action, project.policy()) {
        Decision::Deny(reason) => Err(AppError::Core(CoreError::Forbidden(reason.into()))),

        Decision::ExecuteDirect => {
            let applied = match action {
                EntryAction::Publish => {
                    EntryRepo::publish(&state.pool, project_id, entry_id).await
                }
                EntryAction::Unpublish => {
                    EntryRepo::unpublish(&state.pool, project_id, entry_id).await
                }
                EntryAction::Delete => {
                    EntryRepo::delete_entry(&state.pool, project_id, entry_id).await
                }
            }?
            .ok_or_else(|| entry_not_found(entry_id))?;

            tracing::info!(
                user_id = user.user_id,
                entry_id,
                ?action,
                "entry mutation executed directly"
            );
            Ok(Json(applied).into_response())
        }

        Decision::QueueRequest(request_type) => {
            // The entry must exist before a request against it is queued.
            EntryRepo::find_by_id(&state.pool, project_id, entry_id)
                .await?
                .ok_or_else(|| entry_not_found(entry_id))?;

            let submit = SubmitRequest {
                request_type,
                staff_id: user.user_id,
                project_id,
                changelog_entry_id: entry_id,
            };
            let request = RequestRepo::submit(&state.pool, &submit, state.config.dedup_scope)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::DuplicateRequest(
                        "A pending request already exists for this entry".into(),
                    ))
                })?;

            tracing::info!(
                user_id = user.user_id,
                entry_id,
                request_id = request.id,
                ?request_type,
                "entry mutation queued for approval"
            );
            Ok((StatusCode::ACCEPTED, Json(request)).into_response())
        }
    }
}
