//! # Demo Department
//!
//! Builds a populated registry for development and demos: 25 personal
//! offices spread over five floors, the standard course catalogue, eight
//! kinds of additional work, and 25 teachers (15 full-time, 10 part-time),
//! each in an office of its own.
//!
//! Everything goes through the regular registry operations, so the result
//! satisfies every invariant and its journal can be replayed into a store.
//! The same seed always yields the same department.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::RegistryError;
use crate::model::EmploymentType;
use crate::registry::Registry;
use crate::validation::{AssignmentDraft, DisciplineDraft, TeacherDraft, WorkTypeDraft};

pub const FLOORS: usize = 5;
pub const OFFICE_COUNT: usize = 25;
pub const FULL_TIME_COUNT: usize = 15;

const DISCIPLINES: [&str; 19] = [
    "Introduction to IT",
    "Internet Programming",
    "Computer Science 1.2",
    "Probability Theory",
    "Programming",
    "Databases",
    "Operating Systems",
    "DevOps",
    "Neural Networks and Deep Learning",
    "Web Development",
    "Calculus",
    "Linear Algebra",
    "Discrete Mathematics",
    "Computer Networks",
    "Artificial Intelligence",
    "Mobile Development",
    "Software Testing",
    "Computer Architecture",
    "Cybersecurity",
];

const WORK_TYPES: [&str; 8] = [
    "Curatorship",
    "Coursework Supervision",
    "Student Research Supervision",
    "Thesis Supervision",
    "Research Activity",
    "Methodological Work",
    "Committee Work",
    "Internship Supervision",
];

const LAST_NAMES: [&str; 25] = [
    "Ivanov", "Petrov", "Sidorov", "Smirnov", "Kuznetsov", "Popov", "Vasiliev", "Fedorov",
    "Morozov", "Volkov", "Alekseev", "Lebedev", "Semenov", "Egorov", "Pavlov", "Kozlova",
    "Stepanova", "Nikolaeva", "Orlova", "Andreeva", "Makarova", "Nikitina", "Zakharova",
    "Zaitseva", "Solovieva",
];

const FIRST_NAMES: [&str; 25] = [
    "Alexander", "Alexey", "Andrey", "Dmitry", "Evgeny", "Ivan", "Maxim", "Mikhail", "Sergey",
    "Yuri", "Vyacheslav", "Vladislav", "Viktor", "Vladimir", "Konstantin", "Svetlana", "Tatiana",
    "Natalia", "Ekaterina", "Yulia", "Anna", "Olga", "Maria", "Irina", "Elena",
];

const MIDDLE_NAMES: [&str; 25] = [
    "Alexandrovich", "Alekseevich", "Andreevich", "Dmitrievich", "Viktorovich", "Evgenievich",
    "Ivanovich", "Mikhailovich", "Sergeevich", "Sabitovich", "Vyacheslavovich", "Gennadievich",
    "Alekseevich", "Alexandrovich", "Davidovich", "Evgenievna", "Ivanovna", "Mikhailovna",
    "Sergeevna", "Vyacheslavovna", "Alexandrovna", "Alekseevna", "Andreevna", "Dmitrievna",
    "Artemovna",
];

const POSITIONS: [&str; 6] = [
    "Professor",
    "Associate Professor",
    "Senior Lecturer",
    "Assistant",
    "Director",
    "Head of Department",
];

const DEGREES: [&str; 5] = [
    "Doctor of Sciences",
    "Candidate of Technical Sciences",
    "Candidate of Physical and Mathematical Sciences",
    "Candidate of Pedagogical Sciences",
    "",
];

/// Record counts of a generated department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub classrooms: usize,
    pub disciplines: usize,
    pub work_types: usize,
    pub teachers: usize,
    pub assignments: usize,
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, RegistryError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| RegistryError::Integrity(format!("invalid date {year}-{month}-{day}")))
}

/// Office numbers `{floor}{nn}`, floors assigned round-robin.
pub fn office_numbers() -> Vec<(usize, String)> {
    (1..=OFFICE_COUNT)
        .map(|i| {
            let floor = (i - 1) % FLOORS + 1;
            (floor, format!("{floor}{i:02}"))
        })
        .collect()
}

/// Generate a complete demo department from `seed`.
pub fn demo_department(seed: u64) -> Result<(Registry, SeedSummary), RegistryError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut registry = Registry::new();

    let mut offices = office_numbers();
    offices.shuffle(&mut rng);

    let mut disciplines = Vec::with_capacity(DISCIPLINES.len());
    for name in DISCIPLINES {
        let discipline = registry.create_discipline(DisciplineDraft {
            name: name.to_string(),
            semester: rng.gen_range(1..=8),
            hours: rng.gen_range(36..=144),
            description: format!("Course in {name}"),
        })?;
        disciplines.push(discipline.id);
    }

    let mut work_types = Vec::with_capacity(WORK_TYPES.len());
    for name in WORK_TYPES {
        let work_type = registry.create_work_type(WorkTypeDraft {
            name: name.to_string(),
            description: format!("Additional work: {name}"),
            hours_per_week: rng.gen_range(1..=5),
        })?;
        work_types.push(work_type);
    }

    let mut assignments = 0;
    for (i, (floor, room_number)) in offices.into_iter().enumerate() {
        let (employment_type, rate) = if i < FULL_TIME_COUNT {
            (EmploymentType::Full, 1.0)
        } else {
            let rate: f64 = rng.gen_range(0.25..=0.75);
            (EmploymentType::Part, (rate * 100.0).round() / 100.0)
        };

        let last = LAST_NAMES[i];
        let first = FIRST_NAMES[i];
        let initial = first.chars().next().map(|c| c.to_lowercase().to_string()).unwrap_or_default();
        let degree = DEGREES.choose(&mut rng).copied().unwrap_or_default();
        let discipline_count = rng.gen_range(1..=5);

        let draft = TeacherDraft {
            last_name: last.to_string(),
            first_name: first.to_string(),
            middle_name: Some(MIDDLE_NAMES[i].to_string()),
            email: format!("{}.{initial}@university.edu", last.to_lowercase()),
            phone: format!(
                "+7(9{})-{}-{}-{}",
                rng.gen_range(10..=99),
                rng.gen_range(100..=999),
                rng.gen_range(10..=99),
                rng.gen_range(10..=99)
            ),
            position: POSITIONS.choose(&mut rng).copied().unwrap_or("Assistant").to_string(),
            academic_degree: (!degree.is_empty()).then(|| degree.to_string()),
            employment_date: date(2015 + (i % 10) as i32, 1 + (i % 11) as u32, 1 + (i % 28) as u32)?,
            employment_type,
            rate,
            discipline_ids: disciplines
                .choose_multiple(&mut rng, discipline_count)
                .copied()
                .collect(),
            notes: if i % 5 == 0 {
                format!("Teacher #{}. Senior staff member.", i + 1)
            } else {
                format!("Teacher #{}.", i + 1)
            },
            room_number,
            capacity: 1,
            classroom_description: format!("Staff office, floor {floor}"),
        };
        let saved = registry.save_teacher(None, draft)?;

        if rng.gen::<f64>() > 0.3 {
            let count = rng.gen_range(1..=3);
            let picked: Vec<_> = work_types.choose_multiple(&mut rng, count).cloned().collect();
            for work_type in picked {
                let end_date = if rng.gen_bool(0.5) {
                    Some(date(2024, 6, 30)?)
                } else {
                    None
                };
                registry.create_assignment(AssignmentDraft {
                    teacher_id: saved.teacher.id,
                    work_type_id: work_type.id,
                    start_date: date(2023, 1, 1)?,
                    end_date,
                    description: format!("Assigned: {}", work_type.name),
                })?;
                assignments += 1;
            }
        }
    }

    let summary = SeedSummary {
        classrooms: registry.classrooms().count(),
        disciplines: registry.disciplines().count(),
        work_types: registry.work_types().count(),
        teachers: registry.teachers().count(),
        assignments,
    };
    tracing::info!(?summary, seed, "demo department generated");
    Ok((registry, summary))
}
