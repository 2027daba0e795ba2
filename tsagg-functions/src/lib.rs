//! tsagg Aggregation Functions
//!
//! This library provides the pluggable aggregation-function protocol: the
//! function contract, result sinks, the standard deviation and signed
//! difference functions, and a registry resolving functions by query name.
//!
//! ```
//! use tsagg_core::TimeSeries;
//! use tsagg_functions::{AggregationKind, FunctionValueMap, SeriesAggregation, StdDev};
//!
//! let series = TimeSeries::from_samples("cpu", vec![(0, 1.0), (1, 3.0)]);
//! let mut results = FunctionValueMap::new();
//! StdDev.execute(&series, &mut results);
//! assert_eq!(results.value(AggregationKind::StdDev), Some(1.0));
//! ```

// Core modules
pub mod aggregations;
pub mod config;
pub mod function;
pub mod math;
pub mod registry;
pub mod sink;

// Re-export commonly used types
pub use aggregations::{SignedDifference, StdDev};
pub use config::FunctionsConfig;
pub use function::{
    AggregationFunction, AggregationKind, Arity, FunctionType, GroupedAggregation,
    SeriesAggregation,
};
pub use registry::{FunctionRegistry, ResolvedFunction};
pub use sink::{FunctionValue, FunctionValueMap, JoinKeyedSink, ResultSink};
