//! # Drafts & Field Validation
//!
//! A draft is the user-supplied form of a record, without an id. Calling
//! `clean()` trims every text field, collapses empty optionals to `None`,
//! and checks lengths, ranges and formats. Rules that need the rest of the
//! data (uniqueness, references) live in the registry.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::EmploymentType;

pub const ROOM_NUMBER_MAX: usize = 10;
pub const DISCIPLINE_NAME_MAX: usize = 200;
pub const WORK_TYPE_NAME_MAX: usize = 100;
pub const PERSON_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 254;
pub const PHONE_MAX: usize = 20;
pub const POSITION_MAX: usize = 100;
pub const DEGREE_MAX: usize = 100;

pub const SEMESTER_RANGE: (i32, i32) = (1, 12);
pub const CLASSROOM_CAPACITY_RANGE: (i32, i32) = (1, 10_000);
/// A teacher's workplace is a personal office.
pub const OFFICE_CAPACITY_RANGE: (i32, i32) = (1, 20);
pub const DISCIPLINE_HOURS_RANGE: (i32, i32) = (1, 10_000);
pub const WEEKLY_HOURS_RANGE: (i32, i32) = (1, 168);

pub const RATE_MIN_EXCLUSIVE: f64 = 0.1;
pub const RATE_MAX: f64 = 1.0;

fn default_classroom_capacity() -> i32 {
    25
}

fn default_office_capacity() -> i32 {
    1
}

fn default_hours_per_week() -> i32 {
    2
}

fn default_rate() -> f64 {
    RATE_MAX
}

// -- Field rules --------------------------------------------------------------

fn required(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    bounded(field, value, max)
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value.to_string())
}

fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => bounded(field, v, max).map(Some),
    }
}

fn in_range(field: &'static str, value: i32, (min, max): (i32, i32)) -> Result<i32, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min: min.into(),
            max: max.into(),
            value: value.into(),
        });
    }
    Ok(value)
}

/// Check an employment rate against (0.1, 1.0].
pub fn check_rate(rate: f64) -> Result<f64, ValidationError> {
    if !rate.is_finite() || rate <= RATE_MIN_EXCLUSIVE || rate > RATE_MAX {
        return Err(ValidationError::Rate(rate));
    }
    Ok(rate)
}

/// Structural email check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
pub fn check_email(value: &str) -> Result<String, ValidationError> {
    let value = required("email", value, EMAIL_MAX)?;
    let invalid = || ValidationError::Email(value.clone());

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.rsplit_once('@').ok_or_else(invalid)?;
    if local.is_empty() || local.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(value)
}

// -- Drafts -------------------------------------------------------------------

/// Input for creating or updating a standalone classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClassroomDraft {
    pub room_number: String,
    #[serde(default = "default_classroom_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub description: String,
}

impl ClassroomDraft {
    pub fn clean(self) -> Result<Self, ValidationError> {
        Ok(Self {
            room_number: required("room_number", &self.room_number, ROOM_NUMBER_MAX)?,
            capacity: in_range("capacity", self.capacity, CLASSROOM_CAPACITY_RANGE)?,
            description: self.description.trim().to_string(),
        })
    }
}

/// Input for a discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisciplineDraft {
    pub name: String,
    pub semester: i32,
    pub hours: i32,
    #[serde(default)]
    pub description: String,
}

impl DisciplineDraft {
    pub fn clean(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", &self.name, DISCIPLINE_NAME_MAX)?,
            semester: in_range("semester", self.semester, SEMESTER_RANGE)?,
            hours: in_range("hours", self.hours, DISCIPLINE_HOURS_RANGE)?,
            description: self.description.trim().to_string(),
        })
    }
}

/// Input for an additional work type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WorkTypeDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: i32,
}

impl WorkTypeDraft {
    pub fn clean(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", &self.name, WORK_TYPE_NAME_MAX)?,
            description: self.description.trim().to_string(),
            hours_per_week: in_range("hours_per_week", self.hours_per_week, WEEKLY_HOURS_RANGE)?,
        })
    }
}

/// Teacher form: the teacher's own fields plus the workplace classroom
/// that is created or updated alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TeacherDraft {
    pub last_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub position: String,
    #[serde(default)]
    pub academic_degree: Option<String>,
    pub employment_date: NaiveDate,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default)]
    pub discipline_ids: BTreeSet<Uuid>,
    #[serde(default)]
    pub notes: String,
    /// Workplace room number.
    pub room_number: String,
    /// Workplace capacity.
    #[serde(default = "default_office_capacity")]
    pub capacity: i32,
    /// Workplace description.
    #[serde(default)]
    pub classroom_description: String,
}

impl TeacherDraft {
    pub fn clean(self) -> Result<Self, ValidationError> {
        Ok(Self {
            last_name: required("last_name", &self.last_name, PERSON_NAME_MAX)?,
            first_name: required("first_name", &self.first_name, PERSON_NAME_MAX)?,
            middle_name: optional("middle_name", self.middle_name.as_deref(), PERSON_NAME_MAX)?,
            email: check_email(&self.email)?,
            phone: required("phone", &self.phone, PHONE_MAX)?,
            position: required("position", &self.position, POSITION_MAX)?,
            academic_degree: optional(
                "academic_degree",
                self.academic_degree.as_deref(),
                DEGREE_MAX,
            )?,
            employment_date: self.employment_date,
            employment_type: self.employment_type,
            rate: check_rate(self.rate)?,
            discipline_ids: self.discipline_ids,
            notes: self.notes.trim().to_string(),
            room_number: required("room_number", &self.room_number, ROOM_NUMBER_MAX)?,
            capacity: in_range("capacity", self.capacity, OFFICE_CAPACITY_RANGE)?,
            classroom_description: self.classroom_description.trim().to_string(),
        })
    }
}

/// Input for a teacher's additional work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignmentDraft {
    pub teacher_id: Uuid,
    pub work_type_id: Uuid,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
}

impl AssignmentDraft {
    pub fn clean(self) -> Result<Self, ValidationError> {
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::DateOrder {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(Self {
            description: self.description.trim().to_string(),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn teacher_draft(room: &str) -> TeacherDraft {
        TeacherDraft {
            last_name: "Smirnov".into(),
            first_name: "Oleg".into(),
            middle_name: None,
            email: "smirnov.o@university.edu".into(),
            phone: "+7 900 123-45-67".into(),
            position: "Professor".into(),
            academic_degree: None,
            employment_date: NaiveDate::from_ymd_opt(2018, 9, 1).unwrap(),
            employment_type: EmploymentType::Full,
            rate: 1.0,
            discipline_ids: BTreeSet::new(),
            notes: String::new(),
            room_number: room.into(),
            capacity: 1,
            classroom_description: String::new(),
        }
    }

    #[test]
    fn classroom_clean_trims_room_number() {
        let draft = ClassroomDraft {
            room_number: "  214 ".into(),
            capacity: 30,
            description: " lab ".into(),
        }
        .clean()
        .unwrap();
        assert_eq!(draft.room_number, "214");
        assert_eq!(draft.description, "lab");
    }

    #[test]
    fn classroom_rejects_blank_room_number() {
        let err = ClassroomDraft {
            room_number: "   ".into(),
            capacity: 25,
            description: String::new(),
        }
        .clean()
        .unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "room_number" });
    }

    #[test]
    fn classroom_rejects_zero_capacity() {
        let err = ClassroomDraft {
            room_number: "101".into(),
            capacity: 0,
            description: String::new(),
        }
        .clean()
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "capacity", .. }));
    }

    #[test]
    fn classroom_defaults_apply_on_deserialize() {
        let draft: ClassroomDraft = serde_json::from_str(r#"{"room_number":"101"}"#).unwrap();
        assert_eq!(draft.capacity, 25);
        assert_eq!(draft.description, "");
    }

    #[test]
    fn discipline_semester_bounds() {
        let draft = |semester| DisciplineDraft {
            name: "Databases".into(),
            semester,
            hours: 72,
            description: String::new(),
        };
        assert!(draft(1).clean().is_ok());
        assert!(draft(12).clean().is_ok());
        assert!(draft(0).clean().is_err());
        assert!(draft(13).clean().is_err());
    }

    #[test]
    fn work_type_default_hours() {
        let draft: WorkTypeDraft = serde_json::from_str(r#"{"name":"Curatorship"}"#).unwrap();
        assert_eq!(draft.hours_per_week, 2);
        assert!(draft.clean().is_ok());
    }

    #[test]
    fn rate_bounds_are_half_open() {
        assert!(check_rate(0.1).is_err());
        assert!(check_rate(0.11).is_ok());
        assert!(check_rate(1.0).is_ok());
        assert!(check_rate(1.01).is_err());
        assert!(check_rate(f64::NAN).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(check_email("a.b@dept.university.edu").is_ok());
        assert!(check_email("no-at-sign").is_err());
        assert!(check_email("@domain.edu").is_err());
        assert!(check_email("user@localhost").is_err());
        assert!(check_email("user@dept..edu").is_err());
        assert!(check_email("us er@dept.edu").is_err());
    }

    #[test]
    fn teacher_clean_collapses_empty_optionals() {
        let mut draft = teacher_draft("301");
        draft.middle_name = Some("  ".into());
        draft.academic_degree = Some("".into());
        let cleaned = draft.clean().unwrap();
        assert_eq!(cleaned.middle_name, None);
        assert_eq!(cleaned.academic_degree, None);
    }

    #[test]
    fn teacher_office_capacity_limited() {
        let mut draft = teacher_draft("301");
        draft.capacity = 21;
        let err = draft.clean().unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "capacity", max: 20, .. }));
    }

    #[test]
    fn teacher_room_number_required() {
        let err = teacher_draft("").clean().unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "room_number" });
    }

    #[test]
    fn teacher_draft_defaults_on_deserialize() {
        let draft: TeacherDraft = serde_json::from_value(serde_json::json!({
            "last_name": "Orlova",
            "first_name": "Maria",
            "email": "orlova.m@university.edu",
            "phone": "555-0101",
            "position": "Assistant",
            "employment_date": "2021-02-01",
            "room_number": "405"
        }))
        .unwrap();
        assert_eq!(draft.employment_type, EmploymentType::Full);
        assert_eq!(draft.rate, 1.0);
        assert_eq!(draft.capacity, 1);
        assert!(draft.discipline_ids.is_empty());
    }

    #[test]
    fn assignment_end_before_start_rejected() {
        let draft = AssignmentDraft {
            teacher_id: Uuid::new_v4(),
            work_type_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31),
            description: String::new(),
        };
        assert!(matches!(draft.clean(), Err(ValidationError::DateOrder { .. })));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Ten Cyrillic characters are twenty bytes.
        let draft = ClassroomDraft {
            room_number: "аудитория1".into(),
            capacity: 1,
            description: String::new(),
        };
        assert!(draft.clean().is_ok());
    }

    proptest! {
        #[test]
        fn rate_inside_interval_accepted(rate in 0.1001f64..=1.0) {
            prop_assert!(check_rate(rate).is_ok());
        }

        #[test]
        fn rate_at_or_below_floor_rejected(rate in -10.0f64..=0.1) {
            prop_assert!(check_rate(rate).is_err());
        }

        #[test]
        fn room_numbers_up_to_ten_chars_accepted(room in "[0-9A-Za-z]{1,10}") {
            let draft = ClassroomDraft { room_number: room.clone(), capacity: 1, description: String::new() };
            prop_assert_eq!(draft.clean().unwrap().room_number, room);
        }

        #[test]
        fn room_numbers_over_ten_chars_rejected(room in "[0-9A-Za-z]{11,30}") {
            let draft = ClassroomDraft { room_number: room, capacity: 1, description: String::new() };
            let rejected = matches!(draft.clean(), Err(ValidationError::TooLong { field: "room_number", max: 10 }));
            prop_assert!(rejected);
        }
    }
}
