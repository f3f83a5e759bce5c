//! # Error Types
//!
//! Two layers of failure, both derived with `thiserror`:
//!
//! - [`ValidationError`]: a single field of a draft violates its rule.
//!   Raised before the registry is consulted.
//! - [`RegistryError`]: the operation conflicts with the stored data
//!   (uniqueness, dangling references, unknown ids).
//!
//! A failed operation never leaves a partial mutation behind.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// A draft field failed its rule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is empty after trimming.
    #[error("{field} must not be empty")]
    Required { field: &'static str },

    /// Text field exceeds its maximum length (in characters).
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Integer field outside its inclusive range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// Employment rate outside (0.1, 1.0].
    #[error("rate must be greater than 0.1 and at most 1.0, got {0}")]
    Rate(f64),

    /// Malformed email address.
    #[error("invalid email address: {0:?}")]
    Email(String),

    /// Value not in the allowed set of choices.
    #[error("{field} has invalid value {value:?} (expected one of: {expected})")]
    Choice {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// End date precedes start date.
    #[error("end_date {end} precedes start_date {start}")]
    DateOrder { start: NaiveDate, end: NaiveDate },
}

impl ValidationError {
    /// Name of the draft field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Choice { field, .. } => field,
            Self::Rate(_) => "rate",
            Self::Email(_) => "email",
            Self::DateOrder { .. } => "end_date",
        }
    }
}

/// An operation conflicts with the current contents of the registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// A draft failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The addressed record does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    /// A referenced record does not exist.
    #[error("referenced {kind} {id} does not exist")]
    UnknownReference { kind: &'static str, id: Uuid },

    /// Room number already belongs to another classroom.
    #[error("classroom {room_number} is already taken (occupied by: {occupant})")]
    DuplicateRoomNumber {
        room_number: String,
        occupant: String,
    },

    /// Two disciplines may not share a name (case-insensitive) within a semester.
    #[error("discipline {name:?} already exists in semester {semester}")]
    DuplicateDiscipline { name: String, semester: i32 },

    /// Work type names are unique case-insensitively.
    #[error("additional work type {name:?} already exists")]
    DuplicateWorkTypeName { name: String },

    /// A teacher holds each work type at most once.
    #[error("teacher {teacher_id} already has additional work of type {work_type_id}")]
    DuplicateAssignment { teacher_id: Uuid, work_type_id: Uuid },

    /// Requested page lies past the end of the result set.
    #[error("page {page} out of range (last page is {pages})")]
    PageOutOfRange { page: usize, pages: usize },

    /// Loaded data violates a registry invariant.
    #[error("registry invariant violated: {0}")]
    Integrity(String),
}

impl RegistryError {
    /// Whether this error is a uniqueness conflict with an existing record.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateRoomNumber { .. }
                | Self::DuplicateDiscipline { .. }
                | Self::DuplicateWorkTypeName { .. }
                | Self::DuplicateAssignment { .. }
        )
    }
}
