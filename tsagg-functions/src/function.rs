//! Aggregation function contract
//!
//! Every function reduces one or more time series to a single scalar and
//! writes it into a [`ResultSink`]. Functions come in two arities:
//!
//! - [`SeriesAggregation`]: one series in, one value out, keyed by the
//!   function identity.
//! - [`GroupedAggregation`]: a batch of join-keyed series in, one value per
//!   element out, keyed by (function identity, join key).
//!
//! Functions carry no per-instance state, so identity is the
//! [`AggregationKind`] discriminator rather than the instance.

use serde::{Deserialize, Serialize};
use std::fmt;

use tsagg_core::{GroupedSeries, TimeSeries};

use crate::sink::ResultSink;

/// Identity of an aggregation function, used as the result key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AggregationKind {
    #[serde(rename = "dev")]
    StdDev,

    #[serde(rename = "sdiff")]
    SignedDifference,
}

/// Category of series a function applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionType {
    /// Numeric metric series
    Metric,
}

/// Input shape a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A single series, result keyed by identity only
    Single,
    /// A batch of join-keyed series, one result per element
    Grouped,
}

impl AggregationKind {
    /// All known functions
    pub const ALL: [AggregationKind; 2] =
        [AggregationKind::StdDev, AggregationKind::SignedDifference];

    /// Name the function is looked up by
    pub fn query_name(&self) -> &'static str {
        match self {
            AggregationKind::StdDev => "dev",
            AggregationKind::SignedDifference => "sdiff",
        }
    }

    /// Look a function up by its query name
    pub fn from_query_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.query_name() == name)
    }

    /// Category of series the function applies to
    pub fn function_type(&self) -> FunctionType {
        match self {
            AggregationKind::StdDev | AggregationKind::SignedDifference => FunctionType::Metric,
        }
    }

    /// Input shape the function accepts
    pub fn arity(&self) -> Arity {
        match self {
            AggregationKind::StdDev => Arity::Single,
            AggregationKind::SignedDifference => Arity::Grouped,
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_name())
    }
}

impl FunctionType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionType::Metric => "metric",
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata shared by every aggregation function
pub trait AggregationFunction: fmt::Debug + Send + Sync {
    /// Identity used as the result key
    fn kind(&self) -> AggregationKind;

    /// Name the function is registered under
    fn query_name(&self) -> &'static str {
        self.kind().query_name()
    }

    /// Category of series the function applies to
    fn function_type(&self) -> FunctionType {
        self.kind().function_type()
    }

    /// Declared arguments; empty when the function takes no parameters
    fn arguments(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A function computing one value from one series.
///
/// Implementations must not mutate the series and must record exactly one
/// value, `NaN` for an empty series.
pub trait SeriesAggregation: AggregationFunction {
    fn execute(&self, series: &TimeSeries, sink: &mut dyn ResultSink);
}

/// A function computing one value per join-keyed series.
///
/// The batch is borrowed exclusively for the call, so implementations may
/// reorder samples in place; callers observe the reordering afterwards. An
/// empty element records `NaN` under its join key and never stops the batch.
pub trait GroupedAggregation: AggregationFunction {
    fn execute(&self, batch: &mut [GroupedSeries], sink: &mut dyn ResultSink);
}
