//! Shared fixtures for repository tests.

use sqlx::PgPool;

use changerawr_core::types::DbId;
use changerawr_db::models::entry::CreateEntry;
use changerawr_db::models::project::CreateProject;
use changerawr_db::models::user::CreateUser;
use changerawr_db::repositories::entry_repo::EntryRepo;
use changerawr_db::repositories::project_repo::ProjectRepo;
use changerawr_db::repositories::user_repo::UserRepo;

/// Insert a staff user and return its id. The hash is a placeholder; the
/// repository layer never inspects it.
pub async fn seed_staff(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: "Test Staff".to_string(),
            password_hash: "$argon2id$test".to_string(),
            role: "STAFF".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert a project (with its changelog) and return its id.
pub async fn seed_project(pool: &PgPool, name: &str) -> DbId {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: name.to_string(),
            require_approval: None,
            allow_auto_publish: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert a draft entry into the project's changelog and return its id.
pub async fn seed_entry(pool: &PgPool, project_id: DbId, title: &str) -> DbId {
    EntryRepo::create(
        pool,
        project_id,
        &CreateEntry {
            title: title.to_string(),
            content: "Entry body".to_string(),
            version: None,
        },
    )
    .await
    .unwrap()
    .expect("project should exist")
    .id
}
