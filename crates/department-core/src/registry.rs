//! # Registry: In-Memory Transactional Store
//!
//! Holds every record and enforces the cross-record rules:
//!
//! - room numbers are unique across all classrooms;
//! - a classroom is the workplace of at most one teacher;
//! - (lower(name), semester) is unique across disciplines;
//! - work type names are unique case-insensitively;
//! - a teacher holds each work type at most once;
//! - every reference points at an existing record.
//!
//! Every operation validates completely before touching any map, so a
//! failed call leaves the registry exactly as it was. Successful calls
//! append [`Change`] entries to a journal; the persistence layer drains it
//! with [`Registry::take_changes`] and replays the same unit of work inside
//! one database transaction.
//!
//! ## Saving a teacher
//!
//! [`Registry::save_teacher`] writes the teacher and its workplace
//! classroom together. When the teacher already has a workplace, that
//! classroom is updated in place; otherwise a new classroom is created and
//! assigned. The requested room number must not belong to any classroom
//! other than the teacher's current workplace.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::RegistryError;
use crate::model::{AdditionalWorkType, Classroom, Discipline, Teacher, TeacherAdditionalWork};
use crate::validation::{
    AssignmentDraft, ClassroomDraft, DisciplineDraft, TeacherDraft, WorkTypeDraft,
};

/// One journaled mutation.
///
/// Deletes are recorded for the primary record only. Dependent effects
/// (clearing a workplace, dropping join rows) follow the referential
/// actions declared in the database schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "record", rename_all = "snake_case")]
pub enum Change {
    UpsertClassroom(Classroom),
    DeleteClassroom(Uuid),
    UpsertDiscipline(Discipline),
    DeleteDiscipline(Uuid),
    UpsertWorkType(AdditionalWorkType),
    DeleteWorkType(Uuid),
    UpsertTeacher(Teacher),
    DeleteTeacher(Uuid),
    UpsertAssignment(TeacherAdditionalWork),
    DeleteAssignment(Uuid),
}

/// Result of [`Registry::save_teacher`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SavedTeacher {
    pub teacher: Teacher,
    pub workplace: Classroom,
    /// `true` when the classroom was created by this save.
    pub workplace_created: bool,
}

/// Flat dump of every record, used for loading and exporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub classrooms: Vec<Classroom>,
    pub disciplines: Vec<Discipline>,
    pub work_types: Vec<AdditionalWorkType>,
    pub teachers: Vec<Teacher>,
    pub assignments: Vec<TeacherAdditionalWork>,
}

/// The department's records.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    classrooms: HashMap<Uuid, Classroom>,
    disciplines: HashMap<Uuid, Discipline>,
    work_types: HashMap<Uuid, AdditionalWorkType>,
    teachers: HashMap<Uuid, Teacher>,
    assignments: HashMap<Uuid, TeacherAdditionalWork>,
    journal: Vec<Change>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Loading & export -----------------------------------------------------

    /// Rebuild a registry from stored records, rejecting data that breaks
    /// any invariant. The journal starts empty.
    pub fn restore(snapshot: Snapshot) -> Result<Self, RegistryError> {
        let registry = Self::from_snapshot(snapshot);
        if let Some(first) = registry.violations().into_iter().next() {
            return Err(RegistryError::Integrity(first));
        }
        Ok(registry)
    }

    /// Load stored records as they are, without checking invariants.
    ///
    /// For inspection only: [`Registry::violations`] reports what is wrong.
    /// Mutating a registry built this way may not restore consistency.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            classrooms: snapshot.classrooms.into_iter().map(|r| (r.id, r)).collect(),
            disciplines: snapshot.disciplines.into_iter().map(|r| (r.id, r)).collect(),
            work_types: snapshot.work_types.into_iter().map(|r| (r.id, r)).collect(),
            teachers: snapshot.teachers.into_iter().map(|r| (r.id, r)).collect(),
            assignments: snapshot.assignments.into_iter().map(|r| (r.id, r)).collect(),
            journal: Vec::new(),
        }
    }

    /// Every record, in a stable order suitable for replay.
    pub fn snapshot(&self) -> Snapshot {
        fn sorted<T: Clone>(map: &HashMap<Uuid, T>) -> Vec<T> {
            let mut ids: Vec<&Uuid> = map.keys().collect();
            ids.sort();
            ids.into_iter().filter_map(|id| map.get(id).cloned()).collect()
        }
        Snapshot {
            classrooms: sorted(&self.classrooms),
            disciplines: sorted(&self.disciplines),
            work_types: sorted(&self.work_types),
            teachers: sorted(&self.teachers),
            assignments: sorted(&self.assignments),
        }
    }

    /// Drain the change journal.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.journal)
    }

    /// Changes recorded since the last drain.
    pub fn pending_changes(&self) -> &[Change] {
        &self.journal
    }

    // -- Read access ----------------------------------------------------------

    pub fn classroom(&self, id: Uuid) -> Option<&Classroom> {
        self.classrooms.get(&id)
    }

    pub fn discipline(&self, id: Uuid) -> Option<&Discipline> {
        self.disciplines.get(&id)
    }

    pub fn work_type(&self, id: Uuid) -> Option<&AdditionalWorkType> {
        self.work_types.get(&id)
    }

    pub fn teacher(&self, id: Uuid) -> Option<&Teacher> {
        self.teachers.get(&id)
    }

    pub fn assignment(&self, id: Uuid) -> Option<&TeacherAdditionalWork> {
        self.assignments.get(&id)
    }

    pub fn classrooms(&self) -> impl Iterator<Item = &Classroom> {
        self.classrooms.values()
    }

    pub fn disciplines(&self) -> impl Iterator<Item = &Discipline> {
        self.disciplines.values()
    }

    pub fn work_types(&self) -> impl Iterator<Item = &AdditionalWorkType> {
        self.work_types.values()
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.values()
    }

    pub fn assignments(&self) -> impl Iterator<Item = &TeacherAdditionalWork> {
        self.assignments.values()
    }

    /// Classroom with exactly this room number.
    pub fn classroom_by_room_number(&self, room_number: &str) -> Option<&Classroom> {
        self.classrooms.values().find(|c| c.room_number == room_number)
    }

    /// Teacher whose workplace is this classroom.
    pub fn occupant(&self, classroom_id: Uuid) -> Option<&Teacher> {
        self.teachers
            .values()
            .find(|t| t.workplace_id == Some(classroom_id))
    }

    // -- Classrooms -----------------------------------------------------------

    pub fn create_classroom(&mut self, draft: ClassroomDraft) -> Result<Classroom, RegistryError> {
        let draft = draft.clean()?;
        self.ensure_room_free(&draft.room_number, None)?;

        let classroom = Classroom {
            id: Uuid::new_v4(),
            room_number: draft.room_number,
            capacity: draft.capacity,
            description: draft.description,
        };
        self.put_classroom(classroom.clone());
        tracing::debug!(classroom_id = %classroom.id, room_number = %classroom.room_number, "classroom created");
        Ok(classroom)
    }

    pub fn update_classroom(
        &mut self,
        id: Uuid,
        draft: ClassroomDraft,
    ) -> Result<Classroom, RegistryError> {
        self.require_classroom(id)?;
        let draft = draft.clean()?;
        self.ensure_room_free(&draft.room_number, Some(id))?;

        let classroom = Classroom {
            id,
            room_number: draft.room_number,
            capacity: draft.capacity,
            description: draft.description,
        };
        self.put_classroom(classroom.clone());
        Ok(classroom)
    }

    /// Remove a classroom. The teacher working there loses its workplace.
    pub fn delete_classroom(&mut self, id: Uuid) -> Result<Classroom, RegistryError> {
        let classroom = self
            .classrooms
            .remove(&id)
            .ok_or(RegistryError::NotFound { kind: "classroom", id })?;
        for teacher in self.teachers.values_mut() {
            if teacher.workplace_id == Some(id) {
                teacher.workplace_id = None;
                tracing::info!(teacher_id = %teacher.id, classroom_id = %id, "workplace cleared by classroom deletion");
            }
        }
        self.journal.push(Change::DeleteClassroom(id));
        Ok(classroom)
    }

    // -- Disciplines ----------------------------------------------------------

    pub fn create_discipline(&mut self, draft: DisciplineDraft) -> Result<Discipline, RegistryError> {
        let draft = draft.clean()?;
        self.ensure_discipline_unique(&draft.name, draft.semester, None)?;

        let discipline = Discipline {
            id: Uuid::new_v4(),
            name: draft.name,
            semester: draft.semester,
            hours: draft.hours,
            description: draft.description,
        };
        self.put_discipline(discipline.clone());
        Ok(discipline)
    }

    pub fn update_discipline(
        &mut self,
        id: Uuid,
        draft: DisciplineDraft,
    ) -> Result<Discipline, RegistryError> {
        if !self.disciplines.contains_key(&id) {
            return Err(RegistryError::NotFound { kind: "discipline", id });
        }
        let draft = draft.clean()?;
        self.ensure_discipline_unique(&draft.name, draft.semester, Some(id))?;

        let discipline = Discipline {
            id,
            name: draft.name,
            semester: draft.semester,
            hours: draft.hours,
            description: draft.description,
        };
        self.put_discipline(discipline.clone());
        Ok(discipline)
    }

    /// Remove a discipline and drop it from every teacher's set.
    pub fn delete_discipline(&mut self, id: Uuid) -> Result<Discipline, RegistryError> {
        let discipline = self
            .disciplines
            .remove(&id)
            .ok_or(RegistryError::NotFound { kind: "discipline", id })?;
        for teacher in self.teachers.values_mut() {
            teacher.discipline_ids.remove(&id);
        }
        self.journal.push(Change::DeleteDiscipline(id));
        Ok(discipline)
    }

    // -- Additional work types ------------------------------------------------

    pub fn create_work_type(
        &mut self,
        draft: WorkTypeDraft,
    ) -> Result<AdditionalWorkType, RegistryError> {
        let draft = draft.clean()?;
        self.ensure_work_type_unique(&draft.name, None)?;

        let work_type = AdditionalWorkType {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            hours_per_week: draft.hours_per_week,
        };
        self.put_work_type(work_type.clone());
        Ok(work_type)
    }

    pub fn update_work_type(
        &mut self,
        id: Uuid,
        draft: WorkTypeDraft,
    ) -> Result<AdditionalWorkType, RegistryError> {
        if !self.work_types.contains_key(&id) {
            return Err(RegistryError::NotFound {
                kind: "additional work type",
                id,
            });
        }
        let draft = draft.clean()?;
        self.ensure_work_type_unique(&draft.name, Some(id))?;

        let work_type = AdditionalWorkType {
            id,
            name: draft.name,
            description: draft.description,
            hours_per_week: draft.hours_per_week,
        };
        self.put_work_type(work_type.clone());
        Ok(work_type)
    }

    /// Remove a work type together with every assignment of it.
    pub fn delete_work_type(&mut self, id: Uuid) -> Result<AdditionalWorkType, RegistryError> {
        let work_type = self.work_types.remove(&id).ok_or(RegistryError::NotFound {
            kind: "additional work type",
            id,
        })?;
        self.assignments.retain(|_, a| a.work_type_id != id);
        self.journal.push(Change::DeleteWorkType(id));
        Ok(work_type)
    }

    // -- Teachers -------------------------------------------------------------

    /// Create (`id == None`) or update a teacher together with its
    /// workplace classroom.
    pub fn save_teacher(
        &mut self,
        id: Option<Uuid>,
        draft: TeacherDraft,
    ) -> Result<SavedTeacher, RegistryError> {
        let draft = draft.clean()?;

        let current_workplace = match id {
            Some(id) => {
                let teacher = self
                    .teachers
                    .get(&id)
                    .ok_or(RegistryError::NotFound { kind: "teacher", id })?;
                teacher
                    .workplace_id
                    .filter(|cid| self.classrooms.contains_key(cid))
            }
            None => None,
        };

        if let Some(missing) = draft
            .discipline_ids
            .iter()
            .find(|d| !self.disciplines.contains_key(d))
        {
            return Err(RegistryError::UnknownReference {
                kind: "discipline",
                id: *missing,
            });
        }

        // The room number may only match the teacher's own workplace.
        if let Some(existing) = self.classroom_by_room_number(&draft.room_number) {
            if Some(existing.id) != current_workplace {
                return Err(self.room_taken(existing));
            }
        }

        let (workplace, workplace_created) = match current_workplace {
            Some(classroom_id) => (
                Classroom {
                    id: classroom_id,
                    room_number: draft.room_number,
                    capacity: draft.capacity,
                    description: draft.classroom_description,
                },
                false,
            ),
            None => (
                Classroom {
                    id: Uuid::new_v4(),
                    room_number: draft.room_number,
                    capacity: draft.capacity,
                    description: draft.classroom_description,
                },
                true,
            ),
        };

        let teacher = Teacher {
            id: id.unwrap_or_else(Uuid::new_v4),
            last_name: draft.last_name,
            first_name: draft.first_name,
            middle_name: draft.middle_name,
            email: draft.email,
            phone: draft.phone,
            position: draft.position,
            academic_degree: draft.academic_degree,
            employment_date: draft.employment_date,
            employment_type: draft.employment_type,
            rate: draft.rate,
            workplace_id: Some(workplace.id),
            discipline_ids: draft.discipline_ids,
            notes: draft.notes,
        };

        self.put_classroom(workplace.clone());
        self.teachers.insert(teacher.id, teacher.clone());
        self.journal.push(Change::UpsertTeacher(teacher.clone()));

        tracing::info!(
            teacher_id = %teacher.id,
            classroom_id = %workplace.id,
            room_number = %workplace.room_number,
            workplace_created,
            "teacher saved with workplace"
        );

        Ok(SavedTeacher {
            teacher,
            workplace,
            workplace_created,
        })
    }

    /// Remove a teacher and its additional work. The workplace classroom
    /// stays and becomes free.
    pub fn delete_teacher(&mut self, id: Uuid) -> Result<Teacher, RegistryError> {
        let teacher = self
            .teachers
            .remove(&id)
            .ok_or(RegistryError::NotFound { kind: "teacher", id })?;
        self.assignments.retain(|_, a| a.teacher_id != id);
        self.journal.push(Change::DeleteTeacher(id));
        Ok(teacher)
    }

    /// Edit form for an existing teacher, pre-filled from its workplace.
    pub fn teacher_form(&self, id: Uuid) -> Result<TeacherDraft, RegistryError> {
        let teacher = self
            .teachers
            .get(&id)
            .ok_or(RegistryError::NotFound { kind: "teacher", id })?;
        let workplace = teacher.workplace_id.and_then(|cid| self.classrooms.get(&cid));

        Ok(TeacherDraft {
            last_name: teacher.last_name.clone(),
            first_name: teacher.first_name.clone(),
            middle_name: teacher.middle_name.clone(),
            email: teacher.email.clone(),
            phone: teacher.phone.clone(),
            position: teacher.position.clone(),
            academic_degree: teacher.academic_degree.clone(),
            employment_date: teacher.employment_date,
            employment_type: teacher.employment_type,
            rate: teacher.rate,
            discipline_ids: teacher.discipline_ids.clone(),
            notes: teacher.notes.clone(),
            room_number: workplace.map(|c| c.room_number.clone()).unwrap_or_default(),
            capacity: workplace.map(|c| c.capacity).unwrap_or(1),
            classroom_description: workplace.map(|c| c.description.clone()).unwrap_or_default(),
        })
    }

    // -- Teacher additional work ----------------------------------------------

    pub fn create_assignment(
        &mut self,
        draft: AssignmentDraft,
    ) -> Result<TeacherAdditionalWork, RegistryError> {
        let draft = draft.clean()?;
        self.check_assignment(&draft, None)?;

        let assignment = TeacherAdditionalWork {
            id: Uuid::new_v4(),
            teacher_id: draft.teacher_id,
            work_type_id: draft.work_type_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            description: draft.description,
        };
        self.put_assignment(assignment.clone());
        Ok(assignment)
    }

    pub fn update_assignment(
        &mut self,
        id: Uuid,
        draft: AssignmentDraft,
    ) -> Result<TeacherAdditionalWork, RegistryError> {
        if !self.assignments.contains_key(&id) {
            return Err(RegistryError::NotFound {
                kind: "teacher additional work",
                id,
            });
        }
        let draft = draft.clean()?;
        self.check_assignment(&draft, Some(id))?;

        let assignment = TeacherAdditionalWork {
            id,
            teacher_id: draft.teacher_id,
            work_type_id: draft.work_type_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            description: draft.description,
        };
        self.put_assignment(assignment.clone());
        Ok(assignment)
    }

    pub fn delete_assignment(&mut self, id: Uuid) -> Result<TeacherAdditionalWork, RegistryError> {
        let assignment = self.assignments.remove(&id).ok_or(RegistryError::NotFound {
            kind: "teacher additional work",
            id,
        })?;
        self.journal.push(Change::DeleteAssignment(id));
        Ok(assignment)
    }

    // -- Invariants -----------------------------------------------------------

    /// Describe every broken invariant. Empty when the data is consistent.
    pub fn violations(&self) -> Vec<String> {
        let mut out = Vec::new();

        let mut rooms = HashSet::new();
        for c in self.classrooms.values() {
            if !rooms.insert(c.room_number.as_str()) {
                out.push(format!("room number {} is used by several classrooms", c.room_number));
            }
        }

        let mut workplaces = HashSet::new();
        for t in self.teachers.values() {
            if let Some(cid) = t.workplace_id {
                if !self.classrooms.contains_key(&cid) {
                    out.push(format!("teacher {} references missing classroom {cid}", t.id));
                }
                if !workplaces.insert(cid) {
                    out.push(format!("classroom {cid} is the workplace of several teachers"));
                }
            }
            for d in &t.discipline_ids {
                if !self.disciplines.contains_key(d) {
                    out.push(format!("teacher {} references missing discipline {d}", t.id));
                }
            }
        }

        let mut disciplines = HashSet::new();
        for d in self.disciplines.values() {
            if !disciplines.insert((d.name.to_lowercase(), d.semester)) {
                out.push(format!("discipline {:?} is duplicated in semester {}", d.name, d.semester));
            }
        }

        let mut names = HashSet::new();
        for w in self.work_types.values() {
            if !names.insert(w.name.to_lowercase()) {
                out.push(format!("additional work type {:?} is duplicated", w.name));
            }
        }

        let mut pairs = HashSet::new();
        for a in self.assignments.values() {
            if !self.teachers.contains_key(&a.teacher_id) {
                out.push(format!("assignment {} references missing teacher {}", a.id, a.teacher_id));
            }
            if !self.work_types.contains_key(&a.work_type_id) {
                out.push(format!(
                    "assignment {} references missing work type {}",
                    a.id, a.work_type_id
                ));
            }
            if !pairs.insert((a.teacher_id, a.work_type_id)) {
                out.push(format!(
                    "teacher {} holds work type {} more than once",
                    a.teacher_id, a.work_type_id
                ));
            }
        }

        out
    }

    // -- Internals ------------------------------------------------------------

    fn require_classroom(&self, id: Uuid) -> Result<&Classroom, RegistryError> {
        self.classrooms
            .get(&id)
            .ok_or(RegistryError::NotFound { kind: "classroom", id })
    }

    fn room_taken(&self, classroom: &Classroom) -> RegistryError {
        RegistryError::DuplicateRoomNumber {
            room_number: classroom.room_number.clone(),
            occupant: self
                .occupant(classroom.id)
                .map(Teacher::full_name)
                .unwrap_or_else(|| "none".to_string()),
        }
    }

    fn ensure_room_free(&self, room_number: &str, except: Option<Uuid>) -> Result<(), RegistryError> {
        match self.classroom_by_room_number(room_number) {
            Some(existing) if Some(existing.id) != except => Err(self.room_taken(existing)),
            _ => Ok(()),
        }
    }

    fn ensure_discipline_unique(
        &self,
        name: &str,
        semester: i32,
        except: Option<Uuid>,
    ) -> Result<(), RegistryError> {
        let key = name.to_lowercase();
        let clash = self.disciplines.values().any(|d| {
            Some(d.id) != except && d.semester == semester && d.name.to_lowercase() == key
        });
        if clash {
            return Err(RegistryError::DuplicateDiscipline {
                name: name.to_string(),
                semester,
            });
        }
        Ok(())
    }

    fn ensure_work_type_unique(&self, name: &str, except: Option<Uuid>) -> Result<(), RegistryError> {
        let key = name.to_lowercase();
        if self
            .work_types
            .values()
            .any(|w| Some(w.id) != except && w.name.to_lowercase() == key)
        {
            return Err(RegistryError::DuplicateWorkTypeName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_assignment(
        &self,
        draft: &AssignmentDraft,
        except: Option<Uuid>,
    ) -> Result<(), RegistryError> {
        if !self.teachers.contains_key(&draft.teacher_id) {
            return Err(RegistryError::UnknownReference {
                kind: "teacher",
                id: draft.teacher_id,
            });
        }
        if !self.work_types.contains_key(&draft.work_type_id) {
            return Err(RegistryError::UnknownReference {
                kind: "additional work type",
                id: draft.work_type_id,
            });
        }
        let duplicate = self.assignments.values().any(|a| {
            Some(a.id) != except
                && a.teacher_id == draft.teacher_id
                && a.work_type_id == draft.work_type_id
        });
        if duplicate {
            return Err(RegistryError::DuplicateAssignment {
                teacher_id: draft.teacher_id,
                work_type_id: draft.work_type_id,
            });
        }
        Ok(())
    }

    fn put_classroom(&mut self, classroom: Classroom) {
        self.classrooms.insert(classroom.id, classroom.clone());
        self.journal.push(Change::UpsertClassroom(classroom));
    }

    fn put_discipline(&mut self, discipline: Discipline) {
        self.disciplines.insert(discipline.id, discipline.clone());
        self.journal.push(Change::UpsertDiscipline(discipline));
    }

    fn put_work_type(&mut self, work_type: AdditionalWorkType) {
        self.work_types.insert(work_type.id, work_type.clone());
        self.journal.push(Change::UpsertWorkType(work_type));
    }

    fn put_assignment(&mut self, assignment: TeacherAdditionalWork) {
        self.assignments.insert(assignment.id, assignment.clone());
        self.journal.push(Change::UpsertAssignment(assignment));
    }
}
