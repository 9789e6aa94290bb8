//! Log file adapters.

mod jsonl_logger;

pub use jsonl_logger::JsonlQueryLogger;
