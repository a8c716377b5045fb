//! Handlers for project tags and entry/tag associations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use changerawr_core::error::CoreError;
use changerawr_core::types::DbId;
use changerawr_db::models::tag::{CreateTag, Tag};
use changerawr_db::repositories::{EntryRepo, ProjectRepo, TagRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Request body for `POST /projects/{project_id}/tags`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "Tag name must be 1-50 characters"))]
    pub name: String,
}

/// Request body for `PUT /projects/{p}/changelog/{e}/tags`.
#[derive(Debug, Deserialize)]
pub struct SetEntryTagsRequest {
    pub tag_ids: Vec<DbId>,
}

/// GET /api/projects/{project_id}/tags
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Tag>>> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let tags = TagRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(tags))
}

/// POST /api/projects/{project_id}/tags
///
/// Duplicate names within a project surface as 409 via
/// `uq_tags_project_id_name`.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTagRequest>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    input.validate()?;
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    let tag = TagRepo::create(&state.pool, project_id, &CreateTag { name: input.name }).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT /api/projects/{project_id}/changelog/{entry_id}/tags
pub async fn set_entry_tags(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path((project_id, entry_id)): Path<(DbId, DbId)>,
    Json(input): Json<SetEntryTagsRequest>,
) -> AppResult<Json<Vec<Tag>>> {
    EntryRepo::find_by_id(&state.pool, project_id, entry_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ChangelogEntry",
            id: entry_id,
        }))?;
    let tags =
        TagRepo::replace_entry_tags(&state.pool, project_id, entry_id, &input.tag_ids).await?;
    Ok(Json(tags))
}
