//! `va-output`: agent status traces for the voxel_agents engine.
//!
//! [`StatusObserver`] implements `va_sim::SimObserver` and feeds any
//! [`StatusWriter`]; [`CsvStatusWriter`] is the bundled backend:
//!
//! | File                 | One row per                               |
//! |----------------------|-------------------------------------------|
//! | `agent_status.csv`   | agent per snapshot (behavior, action, …)  |
//! | `tick_summaries.csv` | tick (agents driven, behavior switches)   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use va_output::{CsvStatusWriter, StatusObserver};
//!
//! let writer = CsvStatusWriter::new(Path::new("./trace"))?;
//! let mut obs = StatusObserver::new(writer, config.agents.tick_duration_ms);
//! sim.run_ticks(1_200, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvStatusWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatusObserver;
pub use row::{AgentStatusRow, TickSummaryRow};
pub use writer::StatusWriter;
