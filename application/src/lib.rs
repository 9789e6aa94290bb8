//! Application layer for phenoscope
//!
//! Use cases orchestrate the domain against ports; adapters for the ports
//! live in the infrastructure layer. Nothing here touches the network or
//! the filesystem directly.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::QueryParams;
pub use ports::{
    phewas_gateway::{PhewasGateway, UpstreamError},
    query_logger::{NoQueryLogger, QueryEvent, QueryLogger},
    query_progress::{NoQueryProgress, QueryProgressNotifier},
    table_export::{ExportError, TableExportPort},
};
pub use use_cases::{
    export_table::{ExportOutcome, ExportTableUseCase},
    load_phenotypes::{
        GeneOutcome, LoadPhenotypesError, LoadPhenotypesInput, LoadPhenotypesUseCase, QueryReport,
    },
};
