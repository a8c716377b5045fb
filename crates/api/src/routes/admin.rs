//! Route definitions for admin-only user management.

use axum::routing::post;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// POST   /users     create user account (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/users", post(users::create))
}
