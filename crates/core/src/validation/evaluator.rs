//! Rule evaluator — pure logic, no database access.
//!
//! Every rule in [`STUDENT_RULES`] runs on every call; a failing rule adds
//! one violation and never stops the rules after it.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;

use super::rules::{FieldViolation, ValidationResult};
use crate::student::{
    Student, AGE_MINIMUM_YEARS, DOG_AGE_MINIMUM_DAYS, DOG_MAXIMUM, REJECTED_NAME,
};
use crate::types::Timestamp;

static WEBSITE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\Ahttp:").expect("valid regex"));

/// A rule inspects a snapshot at a reference instant and reports at most one
/// violation.
pub type RuleFn = fn(&Student, Timestamp) -> Option<FieldViolation>;

/// A named entry in the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub check: RuleFn,
}

/// Student rules in evaluation order.
pub static STUDENT_RULES: &[Rule] = &[
    Rule { name: "name_presence", check: name_presence },
    Rule { name: "surnames_presence", check: surnames_presence },
    Rule { name: "website_format", check: website_format },
    Rule { name: "number_of_dogs_numericality", check: number_of_dogs_numericality },
    Rule { name: "proper_age", check: proper_age },
    Rule { name: "complete_name", check: complete_name },
    Rule { name: "dog_age_correctness", check: dog_age_correctness },
];

/// Evaluate every student rule against `student` as of `now`.
pub fn validate(student: &Student, now: Timestamp) -> ValidationResult {
    let errors = STUDENT_RULES
        .iter()
        .filter_map(|rule| (rule.check)(student, now))
        .collect();
    ValidationResult::from_errors(errors)
}

/// [`validate`] against the current wall clock, read once.
pub fn validate_now(student: &Student) -> ValidationResult {
    validate(student, Utc::now())
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

fn name_presence(student: &Student, _now: Timestamp) -> Option<FieldViolation> {
    is_blank(student.name.as_deref())
        .then(|| FieldViolation::new("name", "presence", "can't be blank"))
}

fn surnames_presence(student: &Student, _now: Timestamp) -> Option<FieldViolation> {
    is_blank(student.surnames.as_deref())
        .then(|| FieldViolation::new("surnames", "presence", "can't be blank"))
}

fn website_format(student: &Student, _now: Timestamp) -> Option<FieldViolation> {
    match student.website.as_deref() {
        Some(url) if WEBSITE_FORMAT.is_match(url) => None,
        _ => Some(FieldViolation::new("website", "format", "is invalid")),
    }
}

fn number_of_dogs_numericality(student: &Student, _now: Timestamp) -> Option<FieldViolation> {
    match student.number_of_dogs {
        None => Some(FieldViolation::new(
            "number_of_dogs",
            "numericality",
            "is not a number",
        )),
        Some(dogs) if dogs <= 0 => Some(
            FieldViolation::new("number_of_dogs", "numericality", "must be greater than 0"),
        ),
        Some(_) => None,
    }
}

fn proper_age(student: &Student, now: Timestamp) -> Option<FieldViolation> {
    match student.is_older_than_years(AGE_MINIMUM_YEARS, now) {
        Some(true) => None,
        Some(false) => Some(FieldViolation::new("birthday", "proper_age", "is too young")),
        None => Some(FieldViolation::new("birthday", "proper_age", "can't be blank")),
    }
}

fn complete_name(student: &Student, _now: Timestamp) -> Option<FieldViolation> {
    if student.name.is_some() && student.surnames.is_some() {
        None
    } else {
        Some(FieldViolation::new(
            "complete_name",
            "complete_name",
            "name is incomplete",
        ))
    }
}

/// Passes only for a non-Xavier student with at most one dog who is older
/// than the day threshold. Unknown dogs or birthday count as false.
fn dog_age_correctness(student: &Student, now: Timestamp) -> Option<FieldViolation> {
    let not_rejected_name = student.name.as_deref() != Some(REJECTED_NAME);
    let few_dogs = student.number_of_dogs.is_some_and(|dogs| dogs <= DOG_MAXIMUM);
    let old_enough = student
        .is_older_than_days(DOG_AGE_MINIMUM_DAYS, now)
        .unwrap_or(false);

    if not_rejected_name && few_dogs && old_enough {
        None
    } else {
        Some(FieldViolation::new(
            "dog_age_correctness",
            "dog_age_correctness",
            "student is not correct",
        ))
    }
}
