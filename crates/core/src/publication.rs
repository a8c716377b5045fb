//! Publication workflow domain types and the permission classifier.
//!
//! The classifier is a pure function: given a role, a requested action, and
//! a project's publication policy it decides whether the action runs
//! directly, must be queued as a pending request for admin approval, or is
//! denied. All persistence happens elsewhere; this module
//! never touches the database, which is what makes the decision table
//! exhaustively testable.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// A mutation attempted against a changelog entry's publication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryAction {
    Publish,
    Unpublish,
    Delete,
}

/// The kind of a queued change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    AllowPublish,
    DeleteEntry,
}

impl RequestType {
    /// The string form stored in the `changelog_requests.type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::AllowPublish => "ALLOW_PUBLISH",
            RequestType::DeleteEntry => "DELETE_ENTRY",
        }
    }
}

/// Lifecycle status of a queued change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// The string form stored in the `changelog_requests.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

/// A project's publication policy flags, read once per request and passed
/// in as a value so the classifier stays free of ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalPolicy {
    /// Staff publishes must be approved by an admin.
    pub require_approval: bool,
    /// Staff may publish directly without approval.
    pub allow_auto_publish: bool,
}

/// How the pending-request duplicate check is scoped.
///
/// The invariant is "at most one pending request per entry"; this controls
/// whether that is counted per request type or across all types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupScope {
    /// A pending request of any type blocks new requests for the entry.
    PerEntry,
    /// A pending request only blocks new requests of the same type.
    #[default]
    PerEntryAndType,
}

/// Outcome of classifying a `(role, action, policy)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The caller may mutate the entry immediately.
    ExecuteDirect,
    /// The action must be recorded as a pending request of the given type.
    QueueRequest(RequestType),
    /// The action is forbidden; the message is surfaced as a 403.
    Deny(&'static str),
}

/// Classify an entry mutation attempt.
///
/// Decision table:
///
/// | role   | action      | policy                                | result          |
/// |--------|-------------|---------------------------------------|-----------------|
/// | VIEWER | any         | any                                   | Deny            |
/// | ADMIN  | any         | any                                   | ExecuteDirect   |
/// | STAFF  | unpublish   | any                                   | ExecuteDirect   |
/// | STAFF  | publish     | `allow_auto_publish`                  | ExecuteDirect   |
/// | STAFF  | publish     | `!allow_auto_publish && require_approval` | QueueRequest |
/// | STAFF  | publish     | both flags false                      | Deny            |
/// | STAFF  | delete      | any                                   | QueueRequest    |
pub fn classify(role: Role, action: EntryAction, policy: ApprovalPolicy) -> Decision {
    match (role, action) {
        (Role::Viewer, _) => Decision::Deny("Viewers cannot modify changelog entries"),

        (Role::Admin, _) => Decision::ExecuteDirect,

        (Role::Staff, EntryAction::Unpublish) => Decision::ExecuteDirect,

        (Role::Staff, EntryAction::Publish) => {
            if policy.allow_auto_publish {
                Decision::ExecuteDirect
            } else if policy.require_approval {
                Decision::QueueRequest(RequestType::AllowPublish)
            } else {
                Decision::Deny("Publishing is disabled for this project")
            }
        }

        (Role::Staff, EntryAction::Delete) => Decision::QueueRequest(RequestType::DeleteEntry),
    }
}
