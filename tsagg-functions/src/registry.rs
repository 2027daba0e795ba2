//! Name-based lookup of aggregation functions
//!
//! Callers resolve a function by query name and the argument list they
//! parsed for it. Argument checks happen here, at setup time, so a bad
//! request fails before any series is touched.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use tsagg_core::{GroupedSeries, JoinKey, TimeSeries, TsaggError, TsaggResult};

use crate::aggregations::{SignedDifference, StdDev};
use crate::config::FunctionsConfig;
use crate::function::{
    AggregationKind, Arity, FunctionType, GroupedAggregation, SeriesAggregation,
};
use crate::sink::{JoinKeyedSink, ResultSink};

/// A function resolved from the registry, tagged with its arity
#[derive(Debug, Clone)]
pub enum ResolvedFunction {
    Series(Arc<dyn SeriesAggregation>),
    Grouped(Arc<dyn GroupedAggregation>),
}

/// Registry of the functions callers may resolve by query name
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, ResolvedFunction>,
}

impl ResolvedFunction {
    /// Instantiate the function behind `kind`
    pub fn for_kind(kind: AggregationKind) -> Self {
        match kind {
            AggregationKind::StdDev => ResolvedFunction::Series(Arc::new(StdDev)),
            AggregationKind::SignedDifference => {
                ResolvedFunction::Grouped(Arc::new(SignedDifference))
            }
        }
    }

    /// Identity used as the result key
    pub fn kind(&self) -> AggregationKind {
        match self {
            ResolvedFunction::Series(function) => function.kind(),
            ResolvedFunction::Grouped(function) => function.kind(),
        }
    }

    /// Name the function is registered under
    pub fn query_name(&self) -> &'static str {
        match self {
            ResolvedFunction::Series(function) => function.query_name(),
            ResolvedFunction::Grouped(function) => function.query_name(),
        }
    }

    /// Category of series the function applies to
    pub fn function_type(&self) -> FunctionType {
        match self {
            ResolvedFunction::Series(function) => function.function_type(),
            ResolvedFunction::Grouped(function) => function.function_type(),
        }
    }

    /// Declared arguments
    pub fn arguments(&self) -> Vec<String> {
        match self {
            ResolvedFunction::Series(function) => function.arguments(),
            ResolvedFunction::Grouped(function) => function.arguments(),
        }
    }

    /// Input shape the function accepts
    pub fn arity(&self) -> Arity {
        match self {
            ResolvedFunction::Series(_) => Arity::Single,
            ResolvedFunction::Grouped(_) => Arity::Grouped,
        }
    }

    /// The single-series function, if this is one
    pub fn as_series(&self) -> Option<&dyn SeriesAggregation> {
        match self {
            ResolvedFunction::Series(function) => Some(function.as_ref()),
            ResolvedFunction::Grouped(_) => None,
        }
    }

    /// The grouped function, if this is one
    pub fn as_grouped(&self) -> Option<&dyn GroupedAggregation> {
        match self {
            ResolvedFunction::Series(_) => None,
            ResolvedFunction::Grouped(function) => Some(function.as_ref()),
        }
    }

    /// Run the function over a single series.
    ///
    /// Grouped functions see a batch of one keyed by `join_key`; the
    /// series may be reordered.
    pub fn execute_series(
        &self,
        series: &mut TimeSeries,
        join_key: &JoinKey,
        sink: &mut dyn ResultSink,
    ) {
        match self {
            ResolvedFunction::Series(function) => function.execute(series, sink),
            ResolvedFunction::Grouped(function) => {
                let mut batch = [GroupedSeries::new(
                    join_key.clone(),
                    std::mem::take(series),
                )];
                function.execute(&mut batch, sink);
                let [grouped] = batch;
                *series = grouped.into_parts().1;
            }
        }
    }

    /// Run the function over a batch, one result per element keyed by its join key.
    ///
    /// Single-series functions run once per element with their result
    /// recorded under that element's join key.
    pub fn execute_batch(&self, batch: &mut [GroupedSeries], sink: &mut dyn ResultSink) {
        match self {
            ResolvedFunction::Series(function) => {
                for grouped in batch.iter() {
                    let mut keyed = JoinKeyedSink::new(&mut *sink, grouped.join_key());
                    function.execute(grouped.series(), &mut keyed);
                }
            }
            ResolvedFunction::Grouped(function) => function.execute(batch, sink),
        }
    }
}

impl PartialEq for ResolvedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
    }
}

impl Eq for ResolvedFunction {}

impl FunctionRegistry {
    /// Create a registry holding every known function
    pub fn new() -> Self {
        Self::with_kinds(AggregationKind::ALL)
    }

    /// Create a registry holding only the functions `config` enables
    pub fn from_config(config: &FunctionsConfig) -> TsaggResult<Self> {
        config.validate().map_err(|e| {
            warn!("Rejected function configuration: {}", e);
            TsaggError::configuration(e.to_string())
        })?;

        Ok(Self::with_kinds(config.enabled_kinds()))
    }

    fn with_kinds<I: IntoIterator<Item = AggregationKind>>(kinds: I) -> Self {
        let functions: HashMap<_, _> = kinds
            .into_iter()
            .map(|kind| (kind.query_name(), ResolvedFunction::for_kind(kind)))
            .collect();

        info!("Function registry initialized with {} functions", functions.len());
        Self { functions }
    }

    /// Resolve a function by query name, checking the supplied arguments
    pub fn resolve<S: AsRef<str>>(&self, name: &str, args: &[S]) -> TsaggResult<ResolvedFunction> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| TsaggError::function_not_found(name))?;

        let declared = function.arguments();
        if args.len() != declared.len() {
            let supplied: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
            warn!(
                "Function '{}' declares {} arguments, got {:?}",
                name,
                declared.len(),
                supplied
            );
            return Err(TsaggError::configuration(if declared.is_empty() {
                format!(
                    "Function '{}' takes no arguments, got [{}]",
                    name,
                    supplied.join(", ")
                )
            } else {
                format!(
                    "Function '{}' expects {} arguments, got {}",
                    name,
                    declared.len(),
                    args.len()
                )
            }));
        }

        debug!("Resolved function '{}'", name);
        Ok(function.clone())
    }

    /// Check if a function is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered query names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered functions applying to series of `function_type`
    pub fn kinds_for_type(&self, function_type: FunctionType) -> Vec<AggregationKind> {
        let mut kinds: Vec<_> = self
            .functions
            .values()
            .filter(|function| function.function_type() == function_type)
            .map(ResolvedFunction::kind)
            .collect();
        kinds.sort();
        kinds
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
