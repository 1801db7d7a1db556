//! Service bootstrap manifest tool.
//!
//! # Architecture Overview
//!
//! ```text
//!     manifest.toml
//!         │
//!         ▼
//!   ┌───────────┐    ┌──────────────────────────────────────────────┐
//!   │  config   │───▶│                 lifecycle                    │
//!   │  loader + │    │  validation → locator → startup → service    │
//!   │ validation│    │                    │                         │
//!   └───────────┘    │                    ▼                         │
//!                    │              config_path                     │
//!                    └──────────────────────────────────────────────┘
//!                         ▲                         ▲
//!                   ┌─────┴──────┐          ┌───────┴───────┐
//!                   │  registry  │          │ observability │
//!                   │ (locators) │          │ logs, metrics │
//!                   └────────────┘          └───────────────┘
//! ```
//!
//! The binary never runs services: `check` validates a manifest and
//! `plan` shows which keys each entry would use and which config key
//! would resolve against the manifest's `[config]` table.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use service_bootstrap::config::{load_manifest, Manifest};
use service_bootstrap::lifecycle::{ConfigPathResolver, PlannedEntry};
use service_bootstrap::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "service-bootstrap")]
#[command(about = "Inspect service bootstrap manifests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest and summarize its bootstrap map
    Check {
        /// Path to the manifest (TOML)
        manifest: PathBuf,
    },
    /// Print the ordered lookup plan as JSON
    Plan {
        /// Path to the manifest (TOML)
        manifest: PathBuf,
    },
}

#[derive(Serialize)]
struct PlanRow {
    #[serde(flatten)]
    entry: PlannedEntry,
    /// Config key that matched in the manifest, if any.
    resolved_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest } => {
            let manifest = open(&manifest)?;
            let plan = manifest.bootstrapper().plan()?;
            let active = plan.iter().filter(|entry| entry.active).count();

            tracing::info!(
                label = %manifest.settings.label,
                entries = plan.len(),
                active,
                "Manifest is valid"
            );
            println!(
                "ok: {} entries ({} active, {} skipped), {} config keys",
                plan.len(),
                active,
                plan.len() - active,
                manifest.config.len()
            );
        }
        Commands::Plan { manifest } => {
            let manifest = open(&manifest)?;
            let rows = plan_rows(&manifest).await?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

fn open(path: &Path) -> Result<Manifest, Box<dyn std::error::Error>> {
    match load_manifest(path) {
        Ok(manifest) => {
            init_logging(Some(&manifest.settings.log_level));
            tracing::debug!(path = %path.display(), "Manifest loaded");
            Ok(manifest)
        }
        Err(e) => {
            init_logging(None);
            tracing::error!(path = %path.display(), "Failed to load manifest: {}", e);
            Err(e.into())
        }
    }
}

async fn plan_rows(manifest: &Manifest) -> Result<Vec<PlanRow>, Box<dyn std::error::Error>> {
    let resolver = ConfigPathResolver::new(
        manifest.config_table().locator().normalize(),
        manifest.settings.namespace(),
    );

    let mut rows = Vec::new();
    for entry in manifest.bootstrapper().plan()? {
        let resolved_key = match &entry.config_key {
            Some(key) => resolver.resolve(key).await.map_err(|e| e.to_string())?.key,
            None => None,
        };
        rows.push(PlanRow {
            entry,
            resolved_key,
        });
    }
    Ok(rows)
}
