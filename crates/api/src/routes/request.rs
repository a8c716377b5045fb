//! Route definitions for change-request review.

use axum::routing::post;
use axum::Router;

use crate::handlers::request;
use crate::state::AppState;

/// ```text
/// POST   /{request_id}/approve    consume request, apply mutation (admin)
/// POST   /{request_id}/reject     consume request, leave entry alone (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{request_id}/approve", post(request::approve))
        .route("/{request_id}/reject", post(request::reject))
}
