//! CLI entrypoint for phenoscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection: config → ExPheWAS client → use cases → TUI or
//! one-shot output.

use anyhow::{Result, bail};
use clap::Parser;
use phenoscope_application::{
    ExportTableUseCase, LoadPhenotypesError, LoadPhenotypesInput, LoadPhenotypesUseCase,
    NoQueryLogger, NoQueryProgress, QueryLogger,
};
use phenoscope_domain::parse_gene_list;
use phenoscope_infrastructure::{
    ConfigLoader, CsvTableWriter, ExphewasClient, FileConfig, JsonlQueryLogger,
};
use phenoscope_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, TuiApp, TuiOptions,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration and apply CLI overrides
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    let interactive = cli.interactive || cli.genes.is_empty();

    // Initialize logging based on verbosity level. In TUI mode logs go to
    // a file — stderr would corrupt the alternate screen.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    let _log_guard = if interactive {
        let path = config
            .logging
            .app_log
            .clone()
            .unwrap_or_else(|| PathBuf::from("phenoscope.log"));
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "phenoscope.log".into());
        let appender = tracing_appender::rolling::never(directory, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        None
    };

    info!("Starting phenoscope");

    // === Dependency Injection ===
    let api_url = config.upstream.effective_api_url();
    info!("Upstream API: {}", api_url);
    let gateway = Arc::new(ExphewasClient::new(api_url.as_str())?.with_timeouts(
        Duration::from_secs(config.upstream.lookup_timeout_secs),
        Duration::from_secs(config.upstream.results_timeout_secs),
    ));

    let query_logger: Arc<dyn QueryLogger> = match &config.logging.query_log {
        Some(path) => match JsonlQueryLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoQueryLogger),
        },
        None => Arc::new(NoQueryLogger),
    };

    let use_case = LoadPhenotypesUseCase::new(gateway).with_query_logger(query_logger);
    let exporter = Arc::new(CsvTableWriter::new());

    let params = config.query.to_query_params(&config.tui)?;
    let subset = config.query.parse_subset()?;
    let categories = config.query.parse_categories()?;

    // Interactive mode
    if interactive {
        let options = TuiOptions {
            genes_text: config.query.genes.join(", "),
            subset,
            categories,
            params,
            export_path: config.output.export_path.clone(),
            tick: Duration::from_millis(config.tui.tick_ms.max(50)),
        };
        let mut app = TuiApp::new(use_case, exporter, options);
        app.run().await?;
        return Ok(());
    }

    // One-shot mode
    let genes = parse_gene_list(&cli.genes.join(","));
    let input = LoadPhenotypesInput::new(genes, subset, categories);
    let cancel = CancellationToken::new();

    let result = if cli.quiet {
        use_case.execute(input, &NoQueryProgress, &cancel).await
    } else {
        let progress = ProgressReporter::new();
        let result = use_case.execute(input, &progress, &cancel).await;
        progress.finish();
        result
    };

    let report = match result {
        Ok(report) => report,
        Err(LoadPhenotypesError::Input(error)) => bail!("{error}"),
        Err(LoadPhenotypesError::Cancelled) => bail!("Query cancelled"),
    };

    let format = cli
        .output
        .unwrap_or_else(|| output_format_from_config(&config.output.format));
    let output = match format {
        OutputFormat::Table => ConsoleFormatter::format_table(&report, &params),
        OutputFormat::Json => ConsoleFormatter::format_json(&report, &params),
        OutputFormat::Csv => ConsoleFormatter::format_csv(&report),
    };
    println!("{output}");

    if let Some(path) = &cli.export {
        let export = ExportTableUseCase::new(exporter);
        match export.execute(&report.table, path) {
            Ok(outcome) => eprintln!("{}", outcome.notice()),
            Err(error) => eprintln!("{error}"),
        }
    }

    if report.is_upstream_failure() {
        bail!("Upstream failure: no gene could be loaded");
    }

    Ok(())
}

/// `[output] format` from the config file; anything unrecognized falls
/// back to the table view.
fn output_format_from_config(format: &str) -> OutputFormat {
    match format.trim().to_ascii_lowercase().as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        _ => OutputFormat::Table,
    }
}

/// Command-line flags trump every config file source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(host) = &cli.host {
        config.upstream.host = host.clone();
        config.upstream.api_url = None;
    }
    if let Some(port) = cli.port {
        config.upstream.port = port;
        config.upstream.api_url = None;
    }
    if let Some(url) = &cli.api_url {
        config.upstream.api_url = Some(url.clone());
    }
    if let Some(subset) = &cli.subset {
        config.query.subset = subset.clone();
    }
    if !cli.categories.is_empty() {
        config.query.categories = cli.categories.clone();
    }
    if let Some(metric) = &cli.metric {
        config.query.metric = metric.clone();
    }
    if let Some(threshold) = cli.threshold {
        config.query.threshold = threshold;
    }
    if let Some(limit) = cli.limit {
        config.query.limit = limit;
    }
    if !cli.genes.is_empty() {
        config.query.genes = cli.genes.clone();
    }
    if let Some(path) = &cli.export {
        config.output.export_path = path.clone();
    }
}
