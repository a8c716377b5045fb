//! Repository for the `projects` and `changelogs` tables.

use sqlx::PgPool;

use changerawr_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list for projects queries.
const PROJECT_COLUMNS: &str =
    "id, name, require_approval, allow_auto_publish, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and its changelog in one transaction, returning
    /// the created project.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, require_approval, allow_auto_publish)
             VALUES ($1, COALESCE($2, TRUE), COALESCE($3, FALSE))
             RETURNING {PROJECT_COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(input.require_approval)
            .bind(input.allow_auto_publish)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO changelogs (project_id) VALUES ($1)")
            .bind(project.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// List all projects, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Find a project by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a partial update, returning the updated row or `None` if the
    /// project does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET name = COALESCE($2, name),
                 require_approval = COALESCE($3, require_approval),
                 allow_auto_publish = COALESCE($4, allow_auto_publish),
                 updated_at = now()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.require_approval)
            .bind(input.allow_auto_publish)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project. The changelog, entries, tags, and requests cascade
    /// at the storage layer. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
