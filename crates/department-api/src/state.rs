//! # Application State
//!
//! Shared state for the Axum application. The in-memory [`Registry`] is
//! the source of truth for reads; writes go through [`AppState::transact`],
//! which runs the operation on a working copy, persists the resulting
//! change journal (when a database is configured), and only then publishes
//! the copy. A failed operation or a failed commit leaves the published
//! registry untouched.

use std::sync::Arc;

use department_core::{Registry, RegistryError};
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use sqlx::PgPool;

use crate::db;
use crate::error::AppError;

/// Application configuration.
///
/// Custom `Debug` redacts the auth token.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. `None` disables authentication.
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
        }
    }
}

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<RwLock<Registry>>,
    /// Serializes writers so each sees the previous writer's result.
    write_gate: Arc<tokio::sync::Mutex<()>>,
    /// Postgres pool. `None` runs in memory only.
    pub db_pool: Option<PgPool>,
    pub config: AppConfig,
    /// Installed Prometheus recorder, if any.
    pub metrics_handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("db", &self.db_pool.is_some())
            .field("metrics_handle", &self.metrics_handle.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty in-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::new())),
            write_gate: Arc::new(tokio::sync::Mutex::new(())),
            db_pool,
            config,
            metrics_handle: None,
        }
    }

    /// In-memory state preloaded with `registry`. Pending journal entries
    /// are discarded.
    pub fn with_registry(mut registry: Registry) -> Self {
        registry.take_changes();
        let state = Self::new();
        *state.registry.write() = registry;
        state
    }

    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Run a read-only closure against the published registry.
    pub fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.registry.read())
    }

    /// Run a mutating registry operation as one unit of work.
    pub async fn transact<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Registry) -> Result<T, RegistryError>,
    {
        let _gate = self.write_gate.lock().await;

        let mut working = self.registry.read().clone();
        let value = op(&mut working)?;
        let changes = working.take_changes();

        if let Some(pool) = &self.db_pool {
            if let Err(e) = db::apply_changes(pool, &changes).await {
                tracing::error!(
                    changes = changes.len(),
                    error = %e,
                    "failed to persist registry changes"
                );
                return Err(AppError::Internal(format!("persistence failed: {e}")));
            }
        }

        *self.registry.write() = working;
        Ok(value)
    }

    /// Load all records from the database into the registry.
    ///
    /// No-op when running in memory only. Fails if the stored data breaks
    /// a registry invariant.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let Some(pool) = &self.db_pool else {
            return Ok(());
        };

        let snapshot = db::load_snapshot(pool)
            .await
            .map_err(|e| format!("failed to load records: {e}"))?;
        let counts = (
            snapshot.classrooms.len(),
            snapshot.disciplines.len(),
            snapshot.work_types.len(),
            snapshot.teachers.len(),
            snapshot.assignments.len(),
        );
        let registry =
            Registry::restore(snapshot).map_err(|e| format!("stored records rejected: {e}"))?;

        *self.registry.write() = registry;
        tracing::info!(
            classrooms = counts.0,
            disciplines = counts.1,
            work_types = counts.2,
            teachers = counts.3,
            assignments = counts.4,
            "registry hydrated from database"
        );
        Ok(())
    }

    /// Whether the backing store (if any) is reachable.
    pub async fn ready(&self) -> bool {
        match &self.db_pool {
            Some(pool) => db::ping(pool).await.is_ok(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use department_core::ClassroomDraft;

    fn lecture_hall(room: &str) -> ClassroomDraft {
        ClassroomDraft {
            room_number: room.into(),
            capacity: 60,
            description: "Lecture hall".into(),
        }
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = AppConfig {
            port: 9000,
            auth_token: Some("hunter2".into()),
        };
        let out = format!("{config:?}");
        assert!(out.contains("9000"));
        assert!(!out.contains("hunter2"));
    }

    #[tokio::test]
    async fn transact_publishes_successful_work() {
        let state = AppState::new();
        let created = state
            .transact(|reg| reg.create_classroom(lecture_hall("101")))
            .await
            .unwrap();
        assert!(state.read(|reg| reg.classroom(created.id).is_some()));
        assert!(state.read(|reg| reg.pending_changes().is_empty()));
    }

    #[tokio::test]
    async fn transact_discards_failed_work() {
        let state = AppState::new();
        state
            .transact(|reg| reg.create_classroom(lecture_hall("101")))
            .await
            .unwrap();

        // The first create succeeds on the working copy, the second
        // conflicts; nothing from the closure may be published.
        let err = state
            .transact(|reg| {
                reg.create_classroom(lecture_hall("102"))?;
                reg.create_classroom(lecture_hall("101"))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(state.read(|reg| reg.classroom_by_room_number("102").is_none()));
        assert_eq!(state.read(|reg| reg.classrooms().count()), 1);
    }

    #[tokio::test]
    async fn hydrate_without_db_is_noop() {
        let state = AppState::new();
        state.hydrate_from_db().await.unwrap();
        assert!(state.ready().await);
    }
}
