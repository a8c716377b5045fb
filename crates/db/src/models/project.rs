//! Project and changelog models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use changerawr_core::publication::ApprovalPolicy;
use changerawr_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub require_approval: bool,
    pub allow_auto_publish: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The project's publication policy as a value object, for the
    /// permission classifier.
    pub fn policy(&self) -> ApprovalPolicy {
        ApprovalPolicy {
            require_approval: self.require_approval,
            allow_auto_publish: self.allow_auto_publish,
        }
    }
}

/// A row from the `changelogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Changelog {
    pub id: DbId,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project. Policy flags default to the schema defaults
/// (approval required, auto-publish off) when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub require_approval: Option<bool>,
    pub allow_auto_publish: Option<bool>,
}

/// DTO for a partial project update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub require_approval: Option<bool>,
    pub allow_auto_publish: Option<bool>,
}
