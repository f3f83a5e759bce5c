//! # Records
//!
//! The five stored entity types. Records are plain data; every mutation
//! goes through [`crate::registry::Registry`], which owns the uniqueness
//! and referential rules.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ValidationError;

/// A room that can serve as a teacher's workplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Classroom {
    pub id: Uuid,
    /// Globally unique, at most 10 characters.
    pub room_number: String,
    pub capacity: i32,
    pub description: String,
}

/// A taught course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Discipline {
    pub id: Uuid,
    pub name: String,
    /// 1 through 12.
    pub semester: i32,
    pub hours: i32,
    pub description: String,
}

/// A category of supplementary duty (advising, committee work, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdditionalWorkType {
    pub id: Uuid,
    /// Unique, compared case-insensitively.
    pub name: String,
    pub description: String,
    pub hours_per_week: i32,
}

/// Full-time or part-time position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    Full,
    Part,
}

impl EmploymentType {
    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Part => "part",
        }
    }

    /// Human-readable label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Full => "Full-time",
            Self::Part => "Part-time",
        }
    }
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full" => Ok(Self::Full),
            "part" => Ok(Self::Part),
            other => Err(ValidationError::Choice {
                field: "employment_type",
                value: other.to_string(),
                expected: "full, part",
            }),
        }
    }
}

/// A member of the teaching staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub academic_degree: Option<String>,
    pub employment_date: NaiveDate,
    pub employment_type: EmploymentType,
    /// Fraction of a full position, in (0.1, 1.0].
    pub rate: f64,
    /// Exclusive to this teacher when set.
    pub workplace_id: Option<Uuid>,
    pub discipline_ids: BTreeSet<Uuid>,
    pub notes: String,
}

impl Teacher {
    /// `"{last} {first} {middle}"`, trimmed.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.last_name,
            self.first_name,
            self.middle_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

/// Join record between a teacher and an additional work type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeacherAdditionalWork {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub work_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub description: String,
}
