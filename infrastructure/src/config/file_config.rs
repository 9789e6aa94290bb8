//! Raw TOML configuration data types.
//!
//! These structs represent the exact structure of the TOML config file.
//! String-typed fields are parsed into domain enums through the `parse_*`
//! helpers so a typo surfaces as one clear `InputError` at startup.

use phenoscope_application::QueryParams;
use phenoscope_domain::{AnalysisKind, AnalysisSubset, InputError, Metric, validate_threshold};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Upstream endpoint settings
    pub upstream: FileUpstreamConfig,
    /// Default query settings
    pub query: FileQueryConfig,
    /// One-shot output settings
    pub output: FileOutputConfig,
    /// TUI settings
    pub tui: FileTuiConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Parse every string-typed field once, surfacing the first problem.
    pub fn validate(&self) -> Result<(), InputError> {
        self.query.parse_subset()?;
        self.query.parse_metric()?;
        self.query.parse_categories()?;
        validate_threshold(self.query.threshold)?;
        Ok(())
    }
}

/// `[upstream]` — where the ExPheWAS service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    pub host: String,
    pub port: u16,
    /// Full base-URL override; when set, host/port are ignored.
    pub api_url: Option<String>,
    pub lookup_timeout_secs: u64,
    pub results_timeout_secs: u64,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            host: "exphewas.statgen.org".to_string(),
            port: 443,
            api_url: None,
            lookup_timeout_secs: 30,
            results_timeout_secs: 60,
        }
    }
}

impl FileUpstreamConfig {
    /// Effective API base URL: explicit override, else composed from
    /// host/port with the fixed `/v1/api` path (port 443 is left implicit).
    pub fn effective_api_url(&self) -> String {
        if let Some(url) = &self.api_url
            && !url.trim().is_empty()
        {
            return url.trim().trim_end_matches('/').to_string();
        }
        if self.port == 443 {
            format!("https://{}/v1/api", self.host)
        } else {
            format!("https://{}:{}/v1/api", self.host, self.port)
        }
    }
}

/// `[query]` — defaults applied when the user does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    pub genes: Vec<String>,
    pub subset: String,
    pub categories: Vec<String>,
    pub limit: usize,
    pub metric: String,
    pub threshold: f64,
}

impl Default for FileQueryConfig {
    fn default() -> Self {
        Self {
            genes: vec!["METTL2A".to_string(), "PCSK9".to_string()],
            subset: "BOTH".to_string(),
            categories: Vec::new(),
            limit: 1_000_000,
            metric: "p".to_string(),
            threshold: 0.05,
        }
    }
}

impl FileQueryConfig {
    pub fn parse_subset(&self) -> Result<AnalysisSubset, InputError> {
        self.subset.parse()
    }

    pub fn parse_metric(&self) -> Result<Metric, InputError> {
        self.metric.parse()
    }

    pub fn parse_categories(&self) -> Result<BTreeSet<AnalysisKind>, InputError> {
        self.categories.iter().map(|c| c.parse()).collect()
    }

    /// Display parameters for the application layer.
    pub fn to_query_params(&self, tui: &FileTuiConfig) -> Result<QueryParams, InputError> {
        let params = QueryParams::default()
            .with_limit(self.limit)
            .with_metric(self.parse_metric()?)
            .with_threshold(self.threshold)
            .with_log_scale(tui.log_scale)
            .with_show_legend(tui.show_legend);
        params.validate()?;
        Ok(params)
    }
}

/// `[output]` — one-shot mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `table`, `json`, or `csv`.
    pub format: String,
    pub export_path: PathBuf,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            export_path: PathBuf::from("phenoscope_results.csv"),
        }
    }
}

/// `[tui]` — interactive mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTuiConfig {
    /// Render the chart y axis as −log10(metric).
    pub log_scale: bool,
    pub show_legend: bool,
    /// Render tick in milliseconds.
    pub tick_ms: u64,
}

impl Default for FileTuiConfig {
    fn default() -> Self {
        Self {
            log_scale: true,
            show_legend: true,
            tick_ms: 250,
        }
    }
}

/// `[logging]` — optional log files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL query log; disabled when unset.
    pub query_log: Option<PathBuf>,
    /// tracing log file used in TUI mode (stderr is not visible there).
    pub app_log: Option<PathBuf>,
}
