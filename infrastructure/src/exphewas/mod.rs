//! ExPheWAS REST adapter.

mod client;
mod dto;

pub use client::{DEFAULT_API_URL, ExphewasClient};
