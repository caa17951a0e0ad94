use crate::types::DbId;
use crate::validation::rules::ValidationResult;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A record failed one or more field rules. Carries every violation.
    #[error("Validation failed: {}", .0.full_messages().join(", "))]
    Invalid(ValidationResult),
}
