//! # Database Persistence Layer
//!
//! Optional Postgres persistence via SQLx.
//!
//! ## Architecture
//!
//! The in-memory [`Registry`](department_core::Registry) is the source of
//! truth while the process runs. When `DATABASE_URL` is set, every
//! successful registry operation is replayed here from its change journal
//! inside a single transaction, and the registry is rebuilt from these
//! tables on startup. When absent, the API runs in memory only.
//!
//! Deletes replay the primary record only; the schema's `ON DELETE`
//! actions (`SET NULL` for workplaces, `CASCADE` for join rows) perform the
//! same dependent effects the registry applies in memory.

pub mod assignments;
pub mod classrooms;
pub mod disciplines;
pub mod teachers;
pub mod work_types;

use department_core::{Change, Snapshot};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set, running in-memory only mode. \
                 Records will not survive restarts."
            );
            return Ok(None);
        }
    };

    connect(&url).await.map(Some)
}

/// Connect to `url` and apply pending migrations.
pub async fn connect(url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Replay one unit of work in a single transaction.
pub async fn apply_changes(pool: &PgPool, changes: &[Change]) -> Result<(), sqlx::Error> {
    if changes.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for change in changes {
        match change {
            Change::UpsertClassroom(record) => classrooms::upsert(&mut tx, record).await?,
            Change::DeleteClassroom(id) => classrooms::delete(&mut tx, *id).await?,
            Change::UpsertDiscipline(record) => disciplines::upsert(&mut tx, record).await?,
            Change::DeleteDiscipline(id) => disciplines::delete(&mut tx, *id).await?,
            Change::UpsertWorkType(record) => work_types::upsert(&mut tx, record).await?,
            Change::DeleteWorkType(id) => work_types::delete(&mut tx, *id).await?,
            Change::UpsertTeacher(record) => teachers::upsert(&mut tx, record).await?,
            Change::DeleteTeacher(id) => teachers::delete(&mut tx, *id).await?,
            Change::UpsertAssignment(record) => assignments::upsert(&mut tx, record).await?,
            Change::DeleteAssignment(id) => assignments::delete(&mut tx, *id).await?,
        }
    }
    tx.commit().await?;

    tracing::debug!(changes = changes.len(), "unit of work persisted");
    Ok(())
}

/// Read every table into a snapshot.
pub async fn load_snapshot(pool: &PgPool) -> Result<Snapshot, sqlx::Error> {
    Ok(Snapshot {
        classrooms: classrooms::load_all(pool).await?,
        disciplines: disciplines::load_all(pool).await?,
        work_types: work_types::load_all(pool).await?,
        teachers: teachers::load_all(pool).await?,
        assignments: assignments::load_all(pool).await?,
    })
}

/// Replace the whole database with `snapshot` in one transaction.
pub async fn replace_all(pool: &PgPool, snapshot: &Snapshot) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "TRUNCATE teacher_additional_works, teacher_disciplines, teachers,
         additional_work_types, disciplines, classrooms",
    )
    .execute(&mut *tx)
    .await?;

    for record in &snapshot.classrooms {
        classrooms::upsert(&mut tx, record).await?;
    }
    for record in &snapshot.disciplines {
        disciplines::upsert(&mut tx, record).await?;
    }
    for record in &snapshot.work_types {
        work_types::upsert(&mut tx, record).await?;
    }
    for record in &snapshot.teachers {
        teachers::upsert(&mut tx, record).await?;
    }
    for record in &snapshot.assignments {
        assignments::upsert(&mut tx, record).await?;
    }
    tx.commit().await?;

    tracing::info!(
        classrooms = snapshot.classrooms.len(),
        disciplines = snapshot.disciplines.len(),
        work_types = snapshot.work_types.len(),
        teachers = snapshot.teachers.len(),
        assignments = snapshot.assignments.len(),
        "database contents replaced"
    );
    Ok(())
}

/// Liveness check for the readiness probe.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
