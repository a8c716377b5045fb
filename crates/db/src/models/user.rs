//! User account models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use changerawr_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// The password hash never leaves the server; it is skipped on
/// serialization rather than relying on handlers to strip it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new user. The hash is produced by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
}
