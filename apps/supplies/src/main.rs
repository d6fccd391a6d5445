mod config;
mod errors;
mod inventory;
mod layout;
mod models;
mod render;
mod reports;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::inventory::read_inventory;
use crate::render::Typesetter;
use crate::reports::ReportRunner;

fn main() -> Result<()> {
    let config = Config::from_args()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting supplies v{}", env!("CARGO_PKG_VERSION"));

    let rows = read_inventory(&config.inventory_path).context("Failed to load inventory")?;
    info!(
        path = %config.inventory_path.display(),
        rows = rows.len(),
        "Inventory read"
    );

    let typesetter = config.latex_command.as_deref().map(Typesetter::new);
    if let Some(t) = &typesetter {
        info!(program = t.program(), "Typesetting enabled");
    }
    let runner = ReportRunner::new(config.catalog.clone(), config.output_dir.clone(), typesetter);

    if config.list_reports {
        for name in runner.report_names(&rows) {
            println!("{name}");
        }
        return Ok(());
    }

    let outputs = runner
        .run(&rows, &config.reports)
        .map_err(|e| {
            tracing::error!(code = e.code(), "Report generation failed: {e}");
            e
        })
        .context("Report generation failed")?;

    for output in &outputs {
        info!(
            report = %output.name,
            path = %output.tex_path.display(),
            pages = output.stats.grids,
            typeset = ?output.typeset,
            "Report finished"
        );
    }
    info!(reports = outputs.len(), "Done");
    Ok(())
}
