//! Infrastructure layer for phenoscope
//!
//! Adapters for the application ports: the ExPheWAS HTTP client, layered
//! configuration loading, the JSONL query logger, and the CSV table writer.

pub mod config;
pub mod export;
pub mod exphewas;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use export::CsvTableWriter;
pub use exphewas::ExphewasClient;
pub use logging::JsonlQueryLogger;
