//! Student entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use students_core::types::{DbId, Timestamp};
use students_core::Student;

/// A student row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentRow {
    pub id: DbId,
    pub name: Option<String>,
    pub surnames: Option<String>,
    pub birthday: Option<Timestamp>,
    pub website: Option<String>,
    pub number_of_dogs: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StudentRow {
    /// The row's domain fields, ready for validation.
    pub fn snapshot(&self) -> Student {
        Student {
            name: self.name.clone(),
            surnames: self.surnames.clone(),
            birthday: self.birthday,
            website: self.website.clone(),
            number_of_dogs: self.number_of_dogs,
        }
    }
}

/// Birthday as accepted on input: an RFC 3339 timestamp or a bare date.
#[derive(Deserialize)]
#[serde(untagged)]
enum BirthdayInput {
    Timestamp(Timestamp),
    Date(NaiveDate),
}

/// A bare date is taken as midnight UTC.
fn deserialize_birthday<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = Option::<BirthdayInput>::deserialize(deserializer)?;
    Ok(input.map(|b| match b {
        BirthdayInput::Timestamp(ts) => ts,
        BirthdayInput::Date(date) => date.and_time(chrono::NaiveTime::MIN).and_utc(),
    }))
}

/// DTO for creating a new student. Any field may be omitted; `save`
/// rejects incomplete input, `create` does not.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStudent {
    pub name: Option<String>,
    pub surnames: Option<String>,
    #[serde(default, deserialize_with = "deserialize_birthday")]
    pub birthday: Option<Timestamp>,
    pub website: Option<String>,
    pub number_of_dogs: Option<i32>,
}

impl CreateStudent {
    pub fn snapshot(&self) -> Student {
        Student {
            name: self.name.clone(),
            surnames: self.surnames.clone(),
            birthday: self.birthday,
            website: self.website.clone(),
            number_of_dogs: self.number_of_dogs,
        }
    }
}

impl From<Student> for CreateStudent {
    fn from(student: Student) -> Self {
        Self {
            name: student.name,
            surnames: student.surnames,
            birthday: student.birthday,
            website: student.website,
            number_of_dogs: student.number_of_dogs,
        }
    }
}

/// DTO for updating an existing student. All fields are optional; `None`
/// keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub surnames: Option<String>,
    #[serde(default, deserialize_with = "deserialize_birthday")]
    pub birthday: Option<Timestamp>,
    pub website: Option<String>,
    pub number_of_dogs: Option<i32>,
}

impl UpdateStudent {
    /// Overlay the provided fields onto `student`.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(name) = &self.name {
            student.name = Some(name.clone());
        }
        if let Some(surnames) = &self.surnames {
            student.surnames = Some(surnames.clone());
        }
        if let Some(birthday) = self.birthday {
            student.birthday = Some(birthday);
        }
        if let Some(website) = &self.website {
            student.website = Some(website.clone());
        }
        if let Some(dogs) = self.number_of_dogs {
            student.number_of_dogs = Some(dogs);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn update_overlays_only_given_fields() {
        let mut student = Student {
            name: Some("Joe".to_string()),
            surnames: Some("Ironhack".to_string()),
            number_of_dogs: Some(1),
            ..Default::default()
        };
        let patch = UpdateStudent {
            number_of_dogs: Some(2),
            website: Some("http://example.com".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut student);

        assert_eq!(student.name.as_deref(), Some("Joe"));
        assert_eq!(student.number_of_dogs, Some(2));
        assert_eq!(student.website.as_deref(), Some("http://example.com"));
        assert_eq!(student.birthday, None);
    }

    #[test]
    fn create_dto_deserializes_partial_json() {
        let input: CreateStudent =
            serde_json::from_str(r#"{"name": "Joe", "number_of_dogs": 1}"#).unwrap();
        let snapshot = input.snapshot();
        assert_eq!(snapshot.name.as_deref(), Some("Joe"));
        assert_eq!(snapshot.number_of_dogs, Some(1));
        assert!(snapshot.surnames.is_none());
    }

    #[test]
    fn birthday_accepts_timestamp_or_bare_date() {
        let input: CreateStudent =
            serde_json::from_str(r#"{"birthday": "2006-05-01T08:15:00Z"}"#).unwrap();
        assert_eq!(
            input.birthday,
            Some(Utc.with_ymd_and_hms(2006, 5, 1, 8, 15, 0).unwrap())
        );

        let input: CreateStudent = serde_json::from_str(r#"{"birthday": "2006-05-01"}"#).unwrap();
        assert_eq!(
            input.birthday,
            Some(Utc.with_ymd_and_hms(2006, 5, 1, 0, 0, 0).unwrap())
        );

        let patch: UpdateStudent = serde_json::from_str(r#"{"birthday": "2006-05-01"}"#).unwrap();
        assert_eq!(patch.birthday, input.birthday);
    }

    #[test]
    fn birthday_may_be_null_or_absent() {
        let input: CreateStudent = serde_json::from_str(r#"{"birthday": null}"#).unwrap();
        assert!(input.birthday.is_none());
        let input: CreateStudent = serde_json::from_str("{}").unwrap();
        assert!(input.birthday.is_none());
    }

    #[test]
    fn birthday_rejects_other_strings() {
        assert!(serde_json::from_str::<CreateStudent>(r#"{"birthday": "May 1st"}"#).is_err());
    }
}
