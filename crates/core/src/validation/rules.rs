//! Validation violation and result types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Aggregated result of evaluating every rule against one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Violations in rule evaluation order.
    pub errors: Vec<FieldViolation>,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Error key. Usually a column name; composite rules use their own key.
    pub field: String,
    pub rule_type: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, rule_type: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            rule_type: rule_type.to_string(),
            message: message.to_string(),
        }
    }

    /// Human sentence for this violation, e.g. `"Number of dogs must be
    /// greater than 0"`.
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(&self.field), self.message)
    }
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<FieldViolation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Messages recorded against `field`, in evaluation order.
    pub fn errors_on(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    pub fn has_error_on(&self, field: &str) -> bool {
        self.errors.iter().any(|v| v.field == field)
    }

    /// Distinct error keys, first occurrence first.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for v in &self.errors {
            if !fields.contains(&v.field.as_str()) {
                fields.push(&v.field);
            }
        }
        fields
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(FieldViolation::full_message).collect()
    }

    /// `Ok(())` when valid, otherwise [`CoreError::Invalid`] carrying `self`.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CoreError::Invalid(self))
        }
    }
}

/// `number_of_dogs` -> `Number of dogs`.
fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
