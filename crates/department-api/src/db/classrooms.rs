//! Classroom persistence operations on the `classrooms` table.

use department_core::Classroom;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Insert or overwrite a classroom.
pub async fn upsert(conn: &mut PgConnection, record: &Classroom) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO classrooms (id, room_number, capacity, description)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (id) DO UPDATE SET
             room_number = EXCLUDED.room_number,
             capacity = EXCLUDED.capacity,
             description = EXCLUDED.description",
    )
    .bind(record.id)
    .bind(&record.room_number)
    .bind(record.capacity)
    .bind(&record.description)
    .execute(conn)
    .await?;

    Ok(())
}

/// Delete a classroom. Teachers working there keep their row with a NULL workplace.
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM classrooms WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Load all classrooms on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Classroom>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ClassroomRow>(
        "SELECT id, room_number, capacity, description FROM classrooms ORDER BY room_number",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ClassroomRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct ClassroomRow {
    id: Uuid,
    room_number: String,
    capacity: i32,
    description: String,
}

impl ClassroomRow {
    fn into_record(self) -> Classroom {
        Classroom {
            id: self.id,
            room_number: self.room_number,
            capacity: self.capacity,
            description: self.description,
        }
    }
}
