//! Presentation layer for phenoscope
//!
//! This crate contains CLI definitions, output formatters, the per-gene
//! progress reporter, and the interactive TUI.

pub mod cli;
pub mod output;
pub mod progress;
pub mod tui;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use tui::{TuiApp, TuiOptions};
