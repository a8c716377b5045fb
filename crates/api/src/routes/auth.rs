//! Route definitions for authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST   /setup     first-admin bootstrap (public while users table empty)
/// POST   /login     login (public)
/// GET    /me        current user (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/setup", post(auth::setup))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
}
