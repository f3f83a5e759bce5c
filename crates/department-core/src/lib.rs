//! # department-core: Domain Model for the Department Registry
//!
//! Records, validation rules, and the in-memory store for a university
//! department: teachers, the classrooms they work in, the disciplines they
//! teach, and their additional work.
//!
//! ## Layout
//!
//! - [`model`]: the five record types.
//! - [`validation`]: drafts (user input) and field rules.
//! - [`registry`]: the store. Owns uniqueness, references, and the
//!   teacher/workplace co-creation rule. Journals every change.
//! - [`query`]: lists with filters, search and pagination; detail views;
//!   dashboard counters.
//! - [`seed`]: deterministic demo data.
//!
//! ## Crate Policy
//!
//! - No I/O. Persistence replays the registry journal elsewhere.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod model;
pub mod query;
pub mod registry;
pub mod seed;
pub mod validation;

pub use error::{RegistryError, ValidationError};
pub use model::{
    AdditionalWorkType, Classroom, Discipline, EmploymentType, Teacher, TeacherAdditionalWork,
};
pub use query::{
    AdditionalWorkDetail, AssignmentRow, ClassroomDetail, ClassroomFilter, ClassroomList,
    ClassroomRow, Dashboard, DisciplineDetail, DisciplineFilter, DisciplineList, DisciplineRow,
    PageInfo, TeacherDetail, TeacherFilter, TeacherList, TeacherRow, TeacherStats, PAGE_SIZE,
};
pub use registry::{Change, Registry, SavedTeacher, Snapshot};
pub use validation::{
    AssignmentDraft, ClassroomDraft, DisciplineDraft, TeacherDraft, WorkTypeDraft,
};
