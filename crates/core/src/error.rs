use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A pending change request of the relevant kind already exists for the
    /// target entry. Surfaced to callers as 400, not 409.
    #[error("Duplicate request: {0}")]
    DuplicateRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
