use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::reports::ReportCatalog;

/// Command-line surface. Every option can also come from the environment (or a `.env` file).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "supplies",
    version,
    about = "Typeset supplies and corresponding shopping lists"
)]
pub struct Cli {
    /// The inventory filename
    #[arg(
        short = 'i',
        long = "inventory",
        env = "SUPPLIES_INVENTORY",
        default_value = "../resources/inventory.csv"
    )]
    pub inventory: PathBuf,

    /// Directory receiving the .tex files and the compiler output
    #[arg(
        short = 'o',
        long = "output-dir",
        env = "SUPPLIES_OUTPUT_DIR",
        default_value = "../documents"
    )]
    pub output_dir: PathBuf,

    /// JSON report catalog replacing the built-in group orderings
    #[arg(short = 'c', long = "catalog", env = "SUPPLIES_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Report to produce (`supplies` or a store name); repeatable, default all
    #[arg(short = 'r', long = "report")]
    pub reports: Vec<String>,

    /// LaTeX compiler command, program first then fixed arguments
    #[arg(long = "latex-command", env = "SUPPLIES_LATEX", default_value = "pdflatex")]
    pub latex_command: String,

    /// Write .tex files without running the compiler
    #[arg(long = "no-compile")]
    pub no_compile: bool,

    /// Print the names of the reports the inventory can produce, then exit
    #[arg(long = "list-reports")]
    pub list_reports: bool,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub inventory_path: PathBuf,
    pub output_dir: PathBuf,
    pub catalog: ReportCatalog,
    pub reports: Vec<String>,
    /// `None` when compilation is disabled.
    pub latex_command: Option<String>,
    pub list_reports: bool,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env` if present, then parses the process arguments.
    pub fn from_args() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let catalog = match &cli.catalog {
            Some(path) => ReportCatalog::load(path)
                .with_context(|| format!("Failed to load report catalog '{}'", path.display()))?,
            None => ReportCatalog::default(),
        };

        Ok(Config {
            inventory_path: cli.inventory,
            output_dir: cli.output_dir,
            catalog,
            reports: cli.reports,
            latex_command: (!cli.no_compile).then_some(cli.latex_command),
            list_reports: cli.list_reports,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["supplies"]).unwrap();
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.latex_command.as_deref(), Some("pdflatex"));
        assert!(config.reports.is_empty());
        assert!(!config.list_reports);
        assert_eq!(config.catalog, ReportCatalog::default());
    }

    #[test]
    fn test_flags_parsed() {
        let cli = Cli::try_parse_from([
            "supplies",
            "-i",
            "inv.csv",
            "-o",
            "out",
            "-r",
            "supplies",
            "--report",
            "trader joe's",
            "--no-compile",
        ])
        .unwrap();
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.inventory_path, PathBuf::from("inv.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.reports, vec!["supplies", "trader joe's"]);
        assert!(config.latex_command.is_none());
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("catalog.json");
        let cli = Cli::try_parse_from(["supplies", "-c", missing.to_str().unwrap()]).unwrap();
        let err = Config::from_cli(cli).unwrap_err();
        assert!(err.to_string().contains("Failed to load report catalog"));
    }
}
