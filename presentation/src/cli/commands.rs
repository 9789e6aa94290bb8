//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot query results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Colored per-category tables
    Table,
    /// JSON array of tidy rows
    Json,
    /// CSV on stdout
    Csv,
}

/// CLI arguments for phenoscope
#[derive(Parser, Debug)]
#[command(name = "phenoscope")]
#[command(author, version, about = "Explore ExPheWAS gene/phenotype associations from the terminal")]
#[command(long_about = r#"
phenoscope queries the ExPheWAS association service for one or more genes,
filters the results by phenotype category, and renders tables and a chart.

With gene arguments it runs a single query and prints the result; without
genes (or with --interactive) it starts the interactive TUI.

Configuration files are loaded from (in priority order):
1. PHENOSCOPE_* environment variables
2. --config <path>       Explicit config file
3. ./phenoscope.toml     Project-level config
4. ~/.config/phenoscope/config.toml   Global config

Example:
  phenoscope PCSK9
  phenoscope -C cv -C phecodes --threshold 0.01 PCSK9 METTL2A
  phenoscope --subset female-only --output json BRCA1
  phenoscope --interactive
"#)]
pub struct Cli {
    /// Genes to query (symbols or ENSG ids); omit to start the TUI
    pub genes: Vec<String>,

    /// Start the interactive TUI even when genes are given
    #[arg(short, long)]
    pub interactive: bool,

    /// Analysis subset: both, female-only, or male-only
    #[arg(short, long, value_name = "SUBSET")]
    pub subset: Option<String>,

    /// Phenotype category filter (repeatable); empty = all categories
    #[arg(short = 'C', long = "category", value_name = "KIND")]
    pub categories: Vec<String>,

    /// Metric for thresholding and sorting: p or q
    #[arg(short, long, value_name = "METRIC")]
    pub metric: Option<String>,

    /// Significance threshold (rows with metric >= threshold are hidden)
    #[arg(short, long, value_name = "CUTOFF")]
    pub threshold: Option<f64>,

    /// Max rows per gene per category
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format for one-shot mode (default from config, else table)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Also write the combined table as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Upstream host (composes https://HOST[:PORT]/v1/api)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Upstream port
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Full upstream API base URL (overrides --host/--port)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_shot() {
        let cli = Cli::parse_from(["phenoscope", "PCSK9", "METTL2A", "-C", "cv", "-t", "0.01"]);
        assert_eq!(cli.genes, vec!["PCSK9", "METTL2A"]);
        assert_eq!(cli.categories, vec!["cv"]);
        assert_eq!(cli.threshold, Some(0.01));
        assert!(!cli.interactive);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_output_format() {
        let cli = Cli::parse_from(["phenoscope", "-o", "json", "PCSK9"]);
        assert!(matches!(cli.output, Some(OutputFormat::Json)));
    }

    #[test]
    fn test_parse_no_genes_defaults() {
        let cli = Cli::parse_from(["phenoscope"]);
        assert!(cli.genes.is_empty());
        assert_eq!(cli.verbose, 0);
        assert!(cli.export.is_none());
    }

    #[test]
    fn test_parse_upstream_overrides() {
        let cli = Cli::parse_from([
            "phenoscope",
            "--host",
            "localhost",
            "--port",
            "8000",
            "BRCA1",
        ]);
        assert_eq!(cli.host.as_deref(), Some("localhost"));
        assert_eq!(cli.port, Some(8000));
    }
}
