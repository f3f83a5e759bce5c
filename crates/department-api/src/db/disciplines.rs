//! Discipline persistence operations on the `disciplines` table.

use department_core::Discipline;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Insert or overwrite a discipline.
pub async fn upsert(conn: &mut PgConnection, record: &Discipline) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO disciplines (id, name, semester, hours, description)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (id) DO UPDATE SET
             name = EXCLUDED.name,
             semester = EXCLUDED.semester,
             hours = EXCLUDED.hours,
             description = EXCLUDED.description",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(record.semester)
    .bind(record.hours)
    .bind(&record.description)
    .execute(conn)
    .await?;

    Ok(())
}

/// Delete a discipline; `teacher_disciplines` rows cascade.
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM disciplines WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn load_all(pool: &PgPool) -> Result<Vec<Discipline>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DisciplineRow>(
        "SELECT id, name, semester, hours, description FROM disciplines ORDER BY semester, name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DisciplineRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct DisciplineRow {
    id: Uuid,
    name: String,
    semester: i32,
    hours: i32,
    description: String,
}

impl DisciplineRow {
    fn into_record(self) -> Discipline {
        Discipline {
            id: self.id,
            name: self.name,
            semester: self.semester,
            hours: self.hours,
            description: self.description,
        }
    }
}
