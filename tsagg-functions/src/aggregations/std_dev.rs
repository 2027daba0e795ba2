use tracing::debug;

use tsagg_core::TimeSeries;

use crate::function::{AggregationFunction, AggregationKind, SeriesAggregation};
use crate::math::{self, Estimator};
use crate::sink::ResultSink;

/// Population standard deviation over all values of a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StdDev;

impl StdDev {
    /// Create a new standard deviation function
    pub fn new() -> Self {
        Self
    }

    /// Standard deviation of the series values, `NaN` when empty
    pub fn compute(series: &TimeSeries) -> f64 {
        if series.is_empty() {
            return f64::NAN;
        }
        let values: Vec<f64> = series.values().collect();
        math::std_dev(&values, Estimator::Population)
    }
}

impl AggregationFunction for StdDev {
    fn kind(&self) -> AggregationKind {
        AggregationKind::StdDev
    }
}

impl SeriesAggregation for StdDev {
    fn execute(&self, series: &TimeSeries, sink: &mut dyn ResultSink) {
        if series.is_empty() {
            debug!("Series '{}' is empty, recording NaN for dev", series.name());
        }
        sink.add(self.kind(), Self::compute(series));
    }
}
