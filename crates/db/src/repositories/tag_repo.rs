//! Repository for the `tags` and `changelog_entry_tags` tables.

use sqlx::PgPool;

use changerawr_core::types::DbId;

use crate::models::tag::{CreateTag, Tag};

/// Column list for tags queries, qualified for joins.
const TAG_COLUMNS: &str = "t.id, t.project_id, t.name, t.created_at, t.updated_at";

/// Provides CRUD and entry-association operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a new tag for a project, returning the created row.
    ///
    /// Duplicate names within a project violate `uq_tags_project_id_name`
    /// and surface as a conflict.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTag,
    ) -> Result<Tag, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (project_id, name)
             VALUES ($1, $2)
             RETURNING id, project_id, name, created_at, updated_at",
        )
        .bind(project_id)
        .bind(&input.name)
        .fetch_one(pool)
        .await
    }

    /// List a project's tags, ordered by name.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags t
             WHERE t.project_id = $1
             ORDER BY t.name ASC"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List the tags attached to an entry, ordered by name.
    pub async fn list_for_entry(pool: &PgPool, entry_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags t
             JOIN changelog_entry_tags et ON et.tag_id = t.id
             WHERE et.entry_id = $1
             ORDER BY t.name ASC"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(entry_id)
            .fetch_all(pool)
            .await
    }

    /// Replace an entry's tag set with the given tag ids.
    ///
    /// Only tags belonging to the same project are attached; ids from other
    /// projects are silently dropped by the join. Returns the resulting tag
    /// list.
    pub async fn replace_entry_tags(
        pool: &PgPool,
        project_id: DbId,
        entry_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM changelog_entry_tags WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO changelog_entry_tags (entry_id, tag_id)
             SELECT $1, t.id
             FROM tags t
             WHERE t.project_id = $2 AND t.id = ANY($3)",
        )
        .bind(entry_id)
        .bind(project_id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags t
             JOIN changelog_entry_tags et ON et.tag_id = t.id
             WHERE et.entry_id = $1
             ORDER BY t.name ASC"
        );
        let tags = sqlx::query_as::<_, Tag>(&query)
            .bind(entry_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(tags)
    }
}
