pub mod error;
pub mod student;
pub mod types;
pub mod validation;

pub use student::Student;
pub use validation::evaluator::{validate, validate_now};
pub use validation::rules::{FieldViolation, ValidationResult};
