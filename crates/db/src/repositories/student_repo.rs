//! Repository for the `students` table.

use chrono::Utc;
use sqlx::SqlitePool;
use students_core::types::{DbId, Timestamp};
use students_core::validate;

use crate::error::DbError;
use crate::models::student::{CreateStudent, StudentRow, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, surnames, birthday, website, number_of_dogs, created_at, updated_at";

/// Provides CRUD operations for students, with validating variants of the
/// write paths.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student without validating it, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateStudent) -> Result<StudentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO students
                (name, surnames, birthday, website, number_of_dogs, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(&input.name)
            .bind(&input.surnames)
            .bind(input.birthday)
            .bind(&input.website)
            .bind(input.number_of_dogs)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Validate `input` as of `now`, then insert it.
    ///
    /// An invalid student is not written; the error carries every violation.
    pub async fn save(
        pool: &SqlitePool,
        input: &CreateStudent,
        now: Timestamp,
    ) -> Result<StudentRow, DbError> {
        let result = validate(&input.snapshot(), now);
        if !result.is_valid {
            tracing::warn!(fields = ?result.fields(), "Refusing to save invalid student");
        }
        result.into_result()?;

        let row = Self::create(pool, input).await?;
        tracing::info!(id = row.id, "Student saved");
        Ok(row)
    }

    /// Find a student by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = ?1");
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied, and
    /// the merged record must pass validation as of `now`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateStudent,
        now: Timestamp,
    ) -> Result<Option<StudentRow>, DbError> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let mut merged = existing.snapshot();
        input.apply_to(&mut merged);
        let result = validate(&merged, now);
        if !result.is_valid {
            tracing::warn!(id, fields = ?result.fields(), "Refusing to update invalid student");
        }
        result.into_result()?;

        let query = format!(
            "UPDATE students SET
                name = ?2,
                surnames = ?3,
                birthday = ?4,
                website = ?5,
                number_of_dogs = ?6,
                updated_at = ?7
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .bind(&merged.name)
            .bind(&merged.surnames)
            .bind(merged.birthday)
            .bind(&merged.website)
            .bind(merged.number_of_dogs)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Permanently delete a student by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
