//! Domain layer for phenoscope
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Phenotype query
//!
//! A query names one or more genes (symbols or Ensembl ids), an analysis
//! subset (cohort selector) and an optional set of phenotype categories.
//! Queries are built fresh per interaction and discarded once the matching
//! results arrive.
//!
//! ## Association table
//!
//! The combined per-gene results from the upstream service, with pure
//! filter/sort/limit operations. An empty category filter is the identity:
//! it returns the full unfiltered table.

pub mod analysis;
pub mod association;
pub mod catalog;
pub mod core;
pub mod gene;
pub mod plot;
pub mod query;
pub mod util;

// Re-export commonly used types
pub use analysis::{AnalysisKind, AnalysisSubset, Metric, THRESHOLD_PRESETS, validate_threshold};
pub use association::{
    entities::{Association, TidyRow},
    table::ResultTable,
};
pub use catalog::{OutcomeCatalog, OutcomeInfo};
pub use core::error::InputError;
pub use gene::{ResolvedGene, is_ensembl_id, parse_gene_list};
pub use plot::{GeneSeries, PlotData, PlotPoint};
pub use query::PhenotypeQuery;
pub use util::truncate;
