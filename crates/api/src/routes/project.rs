//! Route definitions for projects and their nested changelog resources.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{entry, project, request, tag};
use crate::state::AppState;

/// ```text
/// POST   /                                      create (admin)
/// GET    /                                      list
/// GET    /{project_id}                          get
/// PATCH  /{project_id}                          update (admin)
/// DELETE /{project_id}                          delete (admin)
///
/// GET    /{project_id}/changelog                list entries
/// POST   /{project_id}/changelog                create entry (staff|admin)
/// GET    /{project_id}/changelog/{entry_id}     get entry
/// PUT    /{project_id}/changelog/{entry_id}     update entry (staff|admin)
/// PATCH  /{project_id}/changelog/{entry_id}     publish/unpublish workflow
/// DELETE /{project_id}/changelog/{entry_id}     delete workflow
/// PUT    /{project_id}/changelog/{entry_id}/tags  replace entry tags
///
/// GET    /{project_id}/tags                     list tags
/// POST   /{project_id}/tags                     create tag (staff|admin)
///
/// GET    /{project_id}/requests                 pending queue (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{project_id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .route(
            "/{project_id}/changelog",
            get(entry::list).post(entry::create),
        )
        .route(
            "/{project_id}/changelog/{entry_id}",
            get(entry::get_by_id)
                .put(entry::update)
                .patch(entry::update_status)
                .delete(entry::delete),
        )
        .route(
            "/{project_id}/changelog/{entry_id}/tags",
            put(tag::set_entry_tags),
        )
        .route("/{project_id}/tags", get(tag::list).post(tag::create))
        .route("/{project_id}/requests", get(request::list_pending))
}
