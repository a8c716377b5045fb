//! The closed set of user roles.
//!
//! Roles are stored as TEXT in the `users` table and carried as a string in
//! JWT claims; inside the application they are always this enum so an
//! unknown role cannot flow past the deserialization boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A user's role, controlling direct-vs-queued-vs-denied access to
/// changelog mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access: all mutations execute directly.
    Admin,
    /// Can create and edit entries; publish/delete may be queued for
    /// approval depending on project policy.
    Staff,
    /// Read-only access. Any mutation attempt is denied.
    Viewer,
}

impl Role {
    /// The canonical string form used in the database and JWT claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Staff => "STAFF",
            Role::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "STAFF" => Ok(Role::Staff),
            "VIEWER" => Ok(Role::Viewer),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}
