//! # tsagg Core Library
//!
//! Shared data model and error types for the tsagg aggregation functions.
//!
//! ## Features
//!
//! - **Data Types**: Samples, time series, and join-keyed grouped series
//! - **Errors**: A single error taxonomy for configuration and precondition failures
//!
//! ## Architecture
//!
//! Series are plain in-memory containers owned by the caller. Loading them
//! from storage, filtering by time range, and parsing queries all happen
//! outside this workspace.

pub mod error;
pub mod join_key;
pub mod series;

// Re-export commonly used types
pub use error::{TsaggError, TsaggResult};
pub use join_key::JoinKey;
pub use series::{GroupedSeries, Sample, TimeSeries};

/// Version information for tsagg
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
