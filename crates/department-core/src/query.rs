//! # Queries
//!
//! Read-side views over the [`Registry`]: filtered and paginated lists with
//! their summary figures, detail views that resolve references, and the
//! dashboard counters.
//!
//! Lists are paged [`PAGE_SIZE`] rows at a time with 1-based page numbers.
//! Search is a case-insensitive substring match; an empty search term means
//! no search.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::RegistryError;
use crate::model::{
    AdditionalWorkType, Classroom, Discipline, EmploymentType, Teacher, TeacherAdditionalWork,
};
use crate::registry::Registry;

/// Rows per list page.
pub const PAGE_SIZE: usize = 10;

/// Position of a page within a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub page: usize,
    pub pages: usize,
    pub per_page: usize,
    /// Rows matching the filter, across all pages.
    pub total: usize,
}

/// Cut one page out of `items`. `None` means the first page. A list always
/// has at least one (possibly empty) page.
pub fn paginate<T>(
    items: Vec<T>,
    page: Option<usize>,
) -> Result<(Vec<T>, PageInfo), RegistryError> {
    let total = items.len();
    let pages = total.div_ceil(PAGE_SIZE).max(1);
    let page = page.unwrap_or(1);
    if page == 0 || page > pages {
        return Err(RegistryError::PageOutOfRange { page, pages });
    }
    let rows = items
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();
    Ok((
        rows,
        PageInfo {
            page,
            pages,
            per_page: PAGE_SIZE,
            total,
        },
    ))
}

fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// -- Filters ------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherFilter {
    pub employment_type: Option<EmploymentType>,
    /// Matched against last, first and middle name and position.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomFilter {
    /// Matched against room number and description.
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisciplineFilter {
    pub semester: Option<i32>,
    /// Matched against name and description.
    pub search: Option<String>,
}

// -- Rows ---------------------------------------------------------------------

/// A teacher as shown in lists.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TeacherRow {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub full_name: String,
    pub employment_type_display: String,
    /// Room number of the workplace, if any.
    pub room_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TeacherStats {
    pub total_count: usize,
    pub full_time_count: usize,
    pub part_time_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TeacherList {
    pub teachers: Vec<TeacherRow>,
    pub page: PageInfo,
    /// Counts over all teachers, independent of the filter.
    pub stats: TeacherStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClassroomRow {
    #[serde(flatten)]
    pub classroom: Classroom,
    pub teacher_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClassroomList {
    pub classrooms: Vec<ClassroomRow>,
    pub page: PageInfo,
    /// Summed over the filtered set.
    pub total_capacity: i64,
    pub total_teachers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisciplineRow {
    #[serde(flatten)]
    pub discipline: Discipline,
    pub teacher_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisciplineList {
    pub disciplines: Vec<DisciplineRow>,
    pub page: PageInfo,
    /// Summed over the filtered set.
    pub total_hours: i64,
    pub total_teachers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AssignmentRow {
    #[serde(flatten)]
    pub assignment: TeacherAdditionalWork,
    pub teacher_name: String,
    pub work_type_name: String,
}

// -- Details ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdditionalWorkDetail {
    #[serde(flatten)]
    pub assignment: TeacherAdditionalWork,
    pub work_type: AdditionalWorkType,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TeacherDetail {
    #[serde(flatten)]
    pub teacher: TeacherRow,
    pub workplace: Option<Classroom>,
    pub disciplines: Vec<Discipline>,
    pub additional_works: Vec<AdditionalWorkDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClassroomDetail {
    #[serde(flatten)]
    pub classroom: ClassroomRow,
    pub teachers: Vec<TeacherRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DisciplineDetail {
    #[serde(flatten)]
    pub discipline: DisciplineRow,
    pub teachers: Vec<TeacherRow>,
}

/// Home page counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    pub total_teachers: usize,
    pub full_time_teachers: usize,
    pub part_time_teachers: usize,
    pub total_classrooms: usize,
    pub total_disciplines: usize,
}

// -- Queries ------------------------------------------------------------------

impl Registry {
    fn teacher_row(&self, teacher: &Teacher) -> TeacherRow {
        TeacherRow {
            teacher: teacher.clone(),
            full_name: teacher.full_name(),
            employment_type_display: teacher.employment_type.display_name().to_string(),
            room_number: teacher
                .workplace_id
                .and_then(|id| self.classroom(id))
                .map(|c| c.room_number.clone()),
        }
    }

    fn sorted_teachers<'a>(&'a self, keep: impl Fn(&Teacher) -> bool) -> Vec<&'a Teacher> {
        let mut teachers: Vec<&Teacher> = self.teachers().filter(|t| keep(t)).collect();
        teachers.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        teachers
    }

    fn discipline_teacher_counts(&self) -> HashMap<Uuid, usize> {
        let mut counts = HashMap::new();
        for teacher in self.teachers() {
            for id in &teacher.discipline_ids {
                *counts.entry(*id).or_insert(0) += 1;
            }
        }
        counts
    }

    fn classroom_row(&self, classroom: &Classroom) -> ClassroomRow {
        ClassroomRow {
            classroom: classroom.clone(),
            teacher_count: self
                .teachers()
                .filter(|t| t.workplace_id == Some(classroom.id))
                .count(),
        }
    }

    pub fn teacher_stats(&self) -> TeacherStats {
        let full_time_count = self
            .teachers()
            .filter(|t| t.employment_type == EmploymentType::Full)
            .count();
        let part_time_count = self
            .teachers()
            .filter(|t| t.employment_type == EmploymentType::Part)
            .count();
        TeacherStats {
            total_count: self.teachers().count(),
            full_time_count,
            part_time_count,
        }
    }

    pub fn list_teachers(
        &self,
        filter: &TeacherFilter,
        page: Option<usize>,
    ) -> Result<TeacherList, RegistryError> {
        let term = search_term(filter.search.as_deref());
        let rows: Vec<TeacherRow> = self
            .sorted_teachers(|t| {
                let type_ok = filter.employment_type.map_or(true, |e| t.employment_type == e);
                let search_ok = term.as_deref().map_or(true, |q| {
                    contains(&t.last_name, q)
                        || contains(&t.first_name, q)
                        || t.middle_name.as_deref().is_some_and(|m| contains(m, q))
                        || contains(&t.position, q)
                });
                type_ok && search_ok
            })
            .into_iter()
            .map(|t| self.teacher_row(t))
            .collect();

        let (teachers, page) = paginate(rows, page)?;
        Ok(TeacherList {
            teachers,
            page,
            stats: self.teacher_stats(),
        })
    }

    pub fn list_classrooms(
        &self,
        filter: &ClassroomFilter,
        page: Option<usize>,
    ) -> Result<ClassroomList, RegistryError> {
        let term = search_term(filter.search.as_deref());
        let mut classrooms: Vec<&Classroom> = self
            .classrooms()
            .filter(|c| {
                term.as_deref()
                    .map_or(true, |q| contains(&c.room_number, q) || contains(&c.description, q))
            })
            .collect();
        classrooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));

        let rows: Vec<ClassroomRow> = classrooms.into_iter().map(|c| self.classroom_row(c)).collect();
        let total_capacity = rows.iter().map(|r| i64::from(r.classroom.capacity)).sum();
        let total_teachers = rows.iter().map(|r| r.teacher_count).sum();

        let (classrooms, page) = paginate(rows, page)?;
        Ok(ClassroomList {
            classrooms,
            page,
            total_capacity,
            total_teachers,
        })
    }

    pub fn list_disciplines(
        &self,
        filter: &DisciplineFilter,
        page: Option<usize>,
    ) -> Result<DisciplineList, RegistryError> {
        let term = search_term(filter.search.as_deref());
        let counts = self.discipline_teacher_counts();
        let mut disciplines: Vec<&Discipline> = self
            .disciplines()
            .filter(|d| filter.semester.map_or(true, |s| d.semester == s))
            .filter(|d| {
                term.as_deref()
                    .map_or(true, |q| contains(&d.name, q) || contains(&d.description, q))
            })
            .collect();
        disciplines.sort_by(|a, b| (a.semester, &a.name, a.id).cmp(&(b.semester, &b.name, b.id)));

        let rows: Vec<DisciplineRow> = disciplines
            .into_iter()
            .map(|d| DisciplineRow {
                discipline: d.clone(),
                teacher_count: counts.get(&d.id).copied().unwrap_or(0),
            })
            .collect();
        let total_hours = rows.iter().map(|r| i64::from(r.discipline.hours)).sum();
        let total_teachers = rows.iter().map(|r| r.teacher_count).sum();

        let (disciplines, page) = paginate(rows, page)?;
        Ok(DisciplineList {
            disciplines,
            page,
            total_hours,
            total_teachers,
        })
    }

    /// All work types, ordered by name.
    pub fn list_work_types(&self) -> Vec<AdditionalWorkType> {
        let mut work_types: Vec<AdditionalWorkType> = self.work_types().cloned().collect();
        work_types.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        work_types
    }

    fn assignment_row(&self, assignment: &TeacherAdditionalWork) -> AssignmentRow {
        AssignmentRow {
            assignment: assignment.clone(),
            teacher_name: self
                .teacher(assignment.teacher_id)
                .map(Teacher::full_name)
                .unwrap_or_default(),
            work_type_name: self
                .work_type(assignment.work_type_id)
                .map(|w| w.name.clone())
                .unwrap_or_default(),
        }
    }

    /// All teacher additional work, newest start date first.
    pub fn list_assignments(&self) -> Vec<AssignmentRow> {
        let mut assignments: Vec<&TeacherAdditionalWork> = self.assignments().collect();
        assignments.sort_by_key(|a| (Reverse(a.start_date), a.id));
        assignments.into_iter().map(|a| self.assignment_row(a)).collect()
    }

    pub fn assignment_detail(&self, id: Uuid) -> Result<AssignmentRow, RegistryError> {
        self.assignment(id)
            .map(|a| self.assignment_row(a))
            .ok_or(RegistryError::NotFound {
                kind: "teacher additional work",
                id,
            })
    }

    pub fn teacher_detail(&self, id: Uuid) -> Result<TeacherDetail, RegistryError> {
        let teacher = self
            .teacher(id)
            .ok_or(RegistryError::NotFound { kind: "teacher", id })?;

        let mut disciplines: Vec<Discipline> = teacher
            .discipline_ids
            .iter()
            .filter_map(|d| self.discipline(*d).cloned())
            .collect();
        disciplines.sort_by(|a, b| (a.semester, &a.name).cmp(&(b.semester, &b.name)));

        let mut additional_works: Vec<AdditionalWorkDetail> = self
            .assignments()
            .filter(|a| a.teacher_id == id)
            .filter_map(|a| {
                self.work_type(a.work_type_id).map(|w| AdditionalWorkDetail {
                    assignment: a.clone(),
                    work_type: w.clone(),
                })
            })
            .collect();
        additional_works.sort_by_key(|w| (Reverse(w.assignment.start_date), w.assignment.id));

        Ok(TeacherDetail {
            teacher: self.teacher_row(teacher),
            workplace: teacher.workplace_id.and_then(|c| self.classroom(c)).cloned(),
            disciplines,
            additional_works,
        })
    }

    pub fn classroom_detail(&self, id: Uuid) -> Result<ClassroomDetail, RegistryError> {
        let classroom = self
            .classroom(id)
            .ok_or(RegistryError::NotFound { kind: "classroom", id })?;
        let teachers = self
            .sorted_teachers(|t| t.workplace_id == Some(id))
            .into_iter()
            .map(|t| self.teacher_row(t))
            .collect();
        Ok(ClassroomDetail {
            classroom: self.classroom_row(classroom),
            teachers,
        })
    }

    pub fn discipline_detail(&self, id: Uuid) -> Result<DisciplineDetail, RegistryError> {
        let discipline = self
            .discipline(id)
            .ok_or(RegistryError::NotFound { kind: "discipline", id })?;
        let teachers: Vec<TeacherRow> = self
            .sorted_teachers(|t| t.discipline_ids.contains(&id))
            .into_iter()
            .map(|t| self.teacher_row(t))
            .collect();
        Ok(DisciplineDetail {
            discipline: DisciplineRow {
                discipline: discipline.clone(),
                teacher_count: teachers.len(),
            },
            teachers,
        })
    }

    pub fn dashboard(&self) -> Dashboard {
        let stats = self.teacher_stats();
        Dashboard {
            total_teachers: stats.total_count,
            full_time_teachers: stats.full_time_count,
            part_time_teachers: stats.part_time_count,
            total_classrooms: self.classrooms().count(),
            total_disciplines: self.disciplines().count(),
        }
    }
}
