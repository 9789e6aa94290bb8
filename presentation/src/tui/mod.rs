//! Interactive TUI.
//!
//! Architecture (actor pattern):
//!
//! ```text
//! TuiApp (select! loop)                controller_task (tokio::spawn)
//!   ├─ crossterm EventStream             ├─ cmd_rx.recv()
//!   ├─ event_rx (TuiEvent)               ├─ supersede in-flight query
//!   └─ tick_interval                     └─ spawn LoadPhenotypes task
//!        └── cmd_tx ──────────────>──────┘
//! ```
//!
//! Every submitted query gets a monotonically increasing [`event::QueryId`];
//! the state discards events tagged with anything older than the newest id,
//! so a superseded query can never overwrite newer results.

pub mod app;
pub mod controller;
pub mod event;
pub mod mode;
pub mod state;
pub mod widgets;

pub use app::{TuiApp, TuiOptions};
pub use event::{QueryId, TuiCommand, TuiEvent};
pub use state::{TuiState, ViewPhase};
