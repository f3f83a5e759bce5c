//! # Seed Subcommand
//!
//! Generates the demo department and either replaces the database contents
//! with it or writes it as a JSON snapshot.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use department_core::seed::{demo_department, SeedSummary};
use department_core::Snapshot;

/// Arguments for the `department seed` subcommand.
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// RNG seed; the same seed always yields the same department.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Target database. Its current contents are replaced.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Write the snapshot here instead of stdout (ignored with a database).
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Execute the seed subcommand. Returns the process exit code.
pub async fn run_seed(args: &SeedArgs) -> Result<u8> {
    let (registry, summary) =
        demo_department(args.seed).context("demo data generation failed")?;
    let snapshot = registry.snapshot();

    match args.database_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => {
            let pool = department_api::db::connect(url)
                .await
                .context("failed to connect to the database")?;
            department_api::db::replace_all(&pool, &snapshot)
                .await
                .context("failed to write demo data")?;
            print_summary(&summary);
        }
        None => {
            let json = render_snapshot(&snapshot)?;
            match &args.out {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!(path = %path.display(), "snapshot written");
                    print_summary(&summary);
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(json.as_bytes())?;
                    stdout.write_all(b"\n")?;
                }
            }
        }
    }
    Ok(0)
}

fn render_snapshot(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")
}

fn print_summary(summary: &SeedSummary) {
    println!(
        "Seeded {} classrooms, {} disciplines, {} work types, {} teachers, {} assignments",
        summary.classrooms,
        summary.disciplines,
        summary.work_types,
        summary.teachers,
        summary.assignments
    );
}
