use students_core::error::CoreError;

/// Errors raised by repository operations that validate before writing.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error from `students_core`, typically a failed
    /// validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
