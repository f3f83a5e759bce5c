//! Teacher persistence operations.
//!
//! A teacher spans two tables: `teachers` holds the scalar fields and the
//! workplace reference, `teacher_disciplines` the discipline set. Upserts
//! rewrite the discipline set wholesale.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use department_core::{EmploymentType, Teacher};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Insert or overwrite a teacher and its discipline set.
pub async fn upsert(conn: &mut PgConnection, record: &Teacher) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO teachers (id, last_name, first_name, middle_name, email, phone,
             position, academic_degree, employment_date, employment_type, rate,
             workplace_id, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         ON CONFLICT (id) DO UPDATE SET
             last_name = EXCLUDED.last_name,
             first_name = EXCLUDED.first_name,
             middle_name = EXCLUDED.middle_name,
             email = EXCLUDED.email,
             phone = EXCLUDED.phone,
             position = EXCLUDED.position,
             academic_degree = EXCLUDED.academic_degree,
             employment_date = EXCLUDED.employment_date,
             employment_type = EXCLUDED.employment_type,
             rate = EXCLUDED.rate,
             workplace_id = EXCLUDED.workplace_id,
             notes = EXCLUDED.notes",
    )
    .bind(record.id)
    .bind(&record.last_name)
    .bind(&record.first_name)
    .bind(&record.middle_name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.position)
    .bind(&record.academic_degree)
    .bind(record.employment_date)
    .bind(record.employment_type.as_str())
    .bind(record.rate)
    .bind(record.workplace_id)
    .bind(&record.notes)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM teacher_disciplines WHERE teacher_id = $1")
        .bind(record.id)
        .execute(&mut *conn)
        .await?;

    if !record.discipline_ids.is_empty() {
        let ids: Vec<Uuid> = record.discipline_ids.iter().copied().collect();
        sqlx::query(
            "INSERT INTO teacher_disciplines (teacher_id, discipline_id)
             SELECT $1, unnest($2::uuid[])",
        )
        .bind(record.id)
        .bind(&ids)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Delete a teacher; discipline links and additional work cascade.
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM teachers WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Load all teachers with their discipline sets.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Teacher>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeacherRow>(
        "SELECT id, last_name, first_name, middle_name, email, phone, position,
         academic_degree, employment_date, employment_type, rate, workplace_id, notes
         FROM teachers ORDER BY last_name, first_name",
    )
    .fetch_all(pool)
    .await?;

    let links = sqlx::query_as::<_, (Uuid, Uuid)>(
        "SELECT teacher_id, discipline_id FROM teacher_disciplines",
    )
    .fetch_all(pool)
    .await?;

    let mut disciplines: HashMap<Uuid, BTreeSet<Uuid>> = HashMap::new();
    for (teacher_id, discipline_id) in links {
        disciplines.entry(teacher_id).or_default().insert(discipline_id);
    }

    rows.into_iter()
        .map(|row| {
            let ids = disciplines.remove(&row.id).unwrap_or_default();
            row.into_record(ids)
        })
        .collect()
}

#[derive(sqlx::FromRow)]
struct TeacherRow {
    id: Uuid,
    last_name: String,
    first_name: String,
    middle_name: Option<String>,
    email: String,
    phone: String,
    position: String,
    academic_degree: Option<String>,
    employment_date: NaiveDate,
    employment_type: String,
    rate: f64,
    workplace_id: Option<Uuid>,
    notes: String,
}

impl TeacherRow {
    fn into_record(self, discipline_ids: BTreeSet<Uuid>) -> Result<Teacher, sqlx::Error> {
        let employment_type: EmploymentType = self.employment_type.parse().map_err(|e| {
            tracing::error!(teacher_id = %self.id, value = %self.employment_type, "invalid employment_type in teachers table");
            sqlx::Error::Decode(Box::new(e))
        })?;

        Ok(Teacher {
            id: self.id,
            last_name: self.last_name,
            first_name: self.first_name,
            middle_name: self.middle_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            academic_degree: self.academic_degree,
            employment_date: self.employment_date,
            employment_type,
            rate: self.rate,
            workplace_id: self.workplace_id,
            discipline_ids,
            notes: self.notes,
        })
    }
}
