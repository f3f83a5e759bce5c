//! # department-cli: Command-Line Tools for the Department Registry
//!
//! Provides the `department` command.
//!
//! ## Subcommands
//!
//! - `department seed`: generate the demo department and load it into
//!   Postgres, or dump it as JSON.
//! - `department stats`: counters and invariant checks for a stored or
//!   generated department.
//!
//! ```bash
//! department seed --seed 42 --out demo.json
//! DATABASE_URL=postgres://localhost/department department seed
//! department stats -v
//! ```

pub mod seed;
pub mod stats;

use anyhow::{Context, Result};
use department_core::Registry;

/// Where a command reads its department from.
#[derive(Debug, Clone)]
pub enum Source {
    Database(String),
    Seed(u64),
}

impl Source {
    pub fn new(database_url: Option<String>, seed: u64) -> Self {
        match database_url.filter(|u| !u.is_empty()) {
            Some(url) => Self::Database(url),
            None => Self::Seed(seed),
        }
    }
}

/// Load the registry from `source`.
///
/// Stored records are taken as they are, so that inconsistent data can
/// still be inspected; see [`Registry::violations`].
pub async fn load_registry(source: &Source) -> Result<Registry> {
    match source {
        Source::Database(url) => {
            let pool = department_api::db::connect(url)
                .await
                .context("failed to connect to the database")?;
            let snapshot = department_api::db::load_snapshot(&pool)
                .await
                .context("failed to read records")?;
            Ok(Registry::from_snapshot(snapshot))
        }
        Source::Seed(seed) => {
            let (registry, _) = department_core::seed::demo_department(*seed)
                .context("demo data generation failed")?;
            Ok(registry)
        }
    }
}
