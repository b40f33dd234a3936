//! Catalog record queries.
//!
//! All queries target the single `files` table.

use crate::models::{FileKind, FileRecord};
use crate::{Error, Result};

use super::DbPool;

/// Input for creating a new record.
#[derive(Debug, Clone)]
pub struct CreateFile {
    pub title: String,
    pub description: String,
    pub kind: FileKind,
    pub content: String,
    pub filename: String,
    pub date: String,
}

/// Insert a record and return it with its assigned id.
pub async fn create_file(pool: &DbPool, input: CreateFile) -> Result<FileRecord> {
    sqlx::query_as::<_, FileRecord>(
        r#"
        INSERT INTO files (title, description, type, content, filename, date)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.kind.as_str())
    .bind(&input.content)
    .bind(&input.filename)
    .bind(&input.date)
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// List every record, newest id first.
pub async fn list_files(pool: &DbPool) -> Result<Vec<FileRecord>> {
    sqlx::query_as::<_, FileRecord>("SELECT * FROM files ORDER BY id DESC")
        .fetch_all(pool)
        .await
        .map_err(Error::Database)
}

/// Get a record by id.
pub async fn get_file(pool: &DbPool, id: i64) -> Result<FileRecord> {
    get_file_optional(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("File not found: {}", id)))
}

/// Get a record by id (optional).
pub async fn get_file_optional(pool: &DbPool, id: i64) -> Result<Option<FileRecord>> {
    sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Overwrite a record's description. Returns the number of rows touched,
/// which is zero for an unknown id.
pub async fn update_file_description(pool: &DbPool, id: i64, description: &str) -> Result<u64> {
    let result = sqlx::query("UPDATE files SET description = ? WHERE id = ?")
        .bind(description)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete a record row. The backing file, if any, is the caller's concern.
pub async fn delete_file(pool: &DbPool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM files WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Count records.
pub async fn count_files(pool: &DbPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
