//! Additional work type persistence on the `additional_work_types` table.

use department_core::AdditionalWorkType;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub async fn upsert(
    conn: &mut PgConnection,
    record: &AdditionalWorkType,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO additional_work_types (id, name, description, hours_per_week)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (id) DO UPDATE SET
             name = EXCLUDED.name,
             description = EXCLUDED.description,
             hours_per_week = EXCLUDED.hours_per_week",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.description)
    .bind(record.hours_per_week)
    .execute(conn)
    .await?;

    Ok(())
}

/// Delete a work type; its assignments cascade.
pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM additional_work_types WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn load_all(pool: &PgPool) -> Result<Vec<AdditionalWorkType>, sqlx::Error> {
    let rows = sqlx::query_as::<_, WorkTypeRow>(
        "SELECT id, name, description, hours_per_week FROM additional_work_types ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(WorkTypeRow::into_record).collect())
}

#[derive(sqlx::FromRow)]
struct WorkTypeRow {
    id: Uuid,
    name: String,
    description: String,
    hours_per_week: i32,
}

impl WorkTypeRow {
    fn into_record(self) -> AdditionalWorkType {
        AdditionalWorkType {
            id: self.id,
            name: self.name,
            description: self.description,
            hours_per_week: self.hours_per_week,
        }
    }
}
