pub mod admin;
pub mod auth;
pub mod health;
pub mod project;
pub mod request;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/setup                                  first admin (public, once)
/// /auth/login                                  login (public)
/// /auth/me                                     current user
///
/// /admin/users                                 create user (admin)
///
/// /projects                                    list, create
/// /projects/{id}                               get, update, delete
/// /projects/{id}/changelog                     list, create entries
/// /projects/{id}/changelog/{entry}             get, update, status, delete
/// /projects/{id}/changelog/{entry}/tags        replace entry tags
/// /projects/{id}/tags                          list, create tags
/// /projects/{id}/requests                      pending request queue (admin)
///
/// /requests/{id}/approve                       consume request (admin)
/// /requests/{id}/reject                        reject request (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/projects", project::router())
        .nest("/requests", request::router())
}
