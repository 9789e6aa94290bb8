//! File export adapters.

mod csv;

pub use csv::CsvTableWriter;
