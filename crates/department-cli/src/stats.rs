//! # Stats Subcommand
//!
//! Prints dashboard counters and record counts as JSON, followed by any
//! invariant violations found in the data.

use anyhow::Result;
use clap::Args;
use department_core::{Dashboard, Registry};
use serde::Serialize;

use crate::{load_registry, Source};

/// Arguments for the `department stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Generate from this seed when no database is given.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Read records from this database.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub dashboard: Dashboard,
    pub work_types: usize,
    pub assignments: usize,
    /// Classrooms no teacher works in.
    pub free_classrooms: usize,
    pub violations: Vec<String>,
}

impl StatsReport {
    pub fn from_registry(registry: &Registry) -> Self {
        let free_classrooms = registry
            .classrooms()
            .filter(|c| registry.occupant(c.id).is_none())
            .count();
        Self {
            dashboard: registry.dashboard(),
            work_types: registry.work_types().count(),
            assignments: registry.assignments().count(),
            free_classrooms,
            violations: registry.violations(),
        }
    }
}

/// Execute the stats subcommand. Exit code 1 when violations exist.
pub async fn run_stats(args: &StatsArgs) -> Result<u8> {
    let source = Source::new(args.database_url.clone(), args.seed);
    tracing::debug!(
        from_database = matches!(source, Source::Database(_)),
        seed = args.seed,
        "loading department"
    );
    let registry = load_registry(&source).await?;
    print_report(&StatsReport::from_registry(&registry))
}

/// Print `report` as JSON and log its violations. Exit code 1 when any exist.
fn print_report(report: &StatsReport) -> Result<u8> {
    println!("{}", serde_json::to_string_pretty(report)?);

    if report.violations.is_empty() {
        Ok(0)
    } else {
        for v in &report.violations {
            tracing::error!(violation = %v, "invariant violated");
        }
        Ok(1)
    }
}
