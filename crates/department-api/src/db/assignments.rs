//! Teacher additional work persistence on the `teacher_additional_works` table.

use chrono::NaiveDate;
use department_core::TeacherAdditionalWork;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn upsert(
    conn: &mut PgConnection,
    record: &TeacherAdditionalWork,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO teacher_additional_works
             (id, teacher_id, work_type_id, start_date, end_date, description)
         VALUES ($1, $2, $3, $4, $5, $6)
         ON CONFLICT (id) DO UPDATE SET
             teacher_id = EXCLUDED.teacher_id,
             work_type_id = EXCLUDED.work_type_id,
             start_date = EXCLUDED.start_date,
             end_date = EXCLUDED.end_date,
             description = EXCLUDED.description",
    )
    .bind(record.id)
    .bind(record.teacher_id)
    .bind(record.work_type_id)
    .bind(record.start_date)
    .bind(record.end_date)
    .bind(&record.description)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM teacher_additional_works WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn load_all(pool: &PgPool) -> Result<Vec<TeacherAdditionalWork>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AssignmentRow>(
        "SELECT id, teacher_id, work_type_id, start_date, end_date, description
         FROM teacher_additional_works ORDER BY start_date DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(AssignmentRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    teacher_id: Uuid,
    work_type_id: Uuid,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    description: String,
}

impl AssignmentRow {
    fn into_record(self) -> TeacherAdditionalWork {
        TeacherAdditionalWork {
            id: self.id,
            teacher_id: self.teacher_id,
            work_type_id: self.work_type_id,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
        }
    }
}
