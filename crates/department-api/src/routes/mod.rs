//! # API Route Modules
//!
//! One router per record type, merged in [`crate::app`].

pub mod assignments;
pub mod classrooms;
pub mod dashboard;
pub mod disciplines;
pub mod teachers;
pub mod work_types;
