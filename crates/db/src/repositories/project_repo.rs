//! Repository for the `projects` table.

use sqlx::PgPool;
use verkefni_core::error::CoreError;
use verkefni_core::patch::Patch;
use verkefni_core::project::{validate_fields, validate_new, ProjectInput};
use verkefni_core::types::{DbId, Timestamp};

use crate::error::RepoError;
use crate::models::project::{Project, SortOrder};

/// Column list shared across queries to avoid repetition.
/// `position` is quoted — it is a SQL keyword.
const COLUMNS: &str = r#"id, title, due, "position", completed, created, updated"#;

const ENTITY: &str = "Project";

/// A value bound into a dynamically assembled statement. The columns
/// of a partial update are heterogeneously typed, so the bind list
/// cannot be a single-type slice.
#[derive(Debug)]
enum SqlValue {
    Text(String),
    Timestamp(Timestamp),
    Int(i32),
    Bool(bool),
}

/// Provides CRUD operations for projects.
///
/// `create` and `update` run validation before touching storage; a
/// validation failure performs no statement at all.
pub struct ProjectRepo;

impl ProjectRepo {
    /// List all projects ordered by `id`, optionally filtered on the
    /// `completed` flag.
    pub async fn list(
        pool: &PgPool,
        order: SortOrder,
        completed: Option<bool>,
    ) -> Result<Vec<Project>, RepoError> {
        let dir = order.as_sql();
        let rows = match completed {
            Some(completed) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM projects WHERE completed = $1 ORDER BY id {dir}"
                );
                sqlx::query_as::<_, Project>(&query)
                    .bind(completed)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id {dir}");
                sqlx::query_as::<_, Project>(&query).fetch_all(pool).await?
            }
        };
        Ok(rows)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Fetch a project by ID, failing with `NotFound` if absent.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Project, RepoError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or(RepoError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }

    /// Validate and insert a new project, returning the created row.
    ///
    /// A single `INSERT ... RETURNING` — the created row comes back
    /// atomically, never via a trailing "latest row" read.
    pub async fn create(pool: &PgPool, input: &ProjectInput) -> Result<Project, RepoError> {
        let new = validate_new(input).map_err(CoreError::Validation)?;

        let query = format!(
            r#"INSERT INTO projects (title, due, "position", completed)
               VALUES ($1, $2, $3, $4)
               RETURNING {COLUMNS}"#
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&new.title)
            .bind(new.due)
            .bind(new.position)
            .bind(new.completed)
            .fetch_one(pool)
            .await?;
        Ok(project)
    }

    /// Validate and apply a partial update, returning the row as it
    /// stands afterwards.
    ///
    /// The write happens in two phases because a single assignment
    /// list cannot uniformly express "set to NULL" and "set to value":
    /// each cleared column gets its own `SET col = NULL` statement,
    /// then all assigned columns go into one statement covering
    /// exactly the changed columns (omitted when nothing is set).
    pub async fn update(pool: &PgPool, id: DbId, input: &ProjectInput) -> Result<Project, RepoError> {
        Self::get(pool, id).await?;

        let patch = validate_fields(input).map_err(CoreError::Validation)?;

        let mut clears: Vec<&'static str> = Vec::new();
        let mut sets: Vec<(&'static str, SqlValue)> = Vec::new();

        if let Patch::Set(title) = patch.title {
            sets.push(("title", SqlValue::Text(title)));
        }
        match patch.due {
            Patch::Clear => clears.push("due"),
            Patch::Set(ts) => sets.push(("due", SqlValue::Timestamp(ts))),
            Patch::Unset => {}
        }
        match patch.position {
            Patch::Clear => clears.push(r#""position""#),
            Patch::Set(p) => sets.push((r#""position""#, SqlValue::Int(p))),
            Patch::Unset => {}
        }
        if let Patch::Set(completed) = patch.completed {
            sets.push(("completed", SqlValue::Bool(completed)));
        }

        for column in clears {
            let query =
                format!("UPDATE projects SET {column} = NULL, updated = NOW() WHERE id = $1");
            sqlx::query(&query).bind(id).execute(pool).await?;
        }

        if !sets.is_empty() {
            let assignments: Vec<String> = sets
                .iter()
                .enumerate()
                .map(|(i, (column, _))| format!("{column} = ${}", i + 2))
                .collect();
            let query = format!(
                "UPDATE projects SET {}, updated = NOW() WHERE id = $1",
                assignments.join(", ")
            );
            tracing::debug!(id, %query, "applying partial update");

            let mut statement = sqlx::query(&query).bind(id);
            for (_, value) in sets {
                statement = match value {
                    SqlValue::Text(s) => statement.bind(s),
                    SqlValue::Timestamp(ts) => statement.bind(ts),
                    SqlValue::Int(i) => statement.bind(i),
                    SqlValue::Bool(b) => statement.bind(b),
                };
            }
            statement.execute(pool).await?;
        }

        // Re-read as the authoritative post-update state.
        Self::get(pool, id).await
    }

    /// Delete a project by ID, failing with `NotFound` if absent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), RepoError> {
        Self::get(pool, id).await?;

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
