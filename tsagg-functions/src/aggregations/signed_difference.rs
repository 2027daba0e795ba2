use tracing::debug;

use tsagg_core::{GroupedSeries, TimeSeries};

use crate::function::{AggregationFunction, AggregationKind, GroupedAggregation};
use crate::sink::ResultSink;

/// Difference between the last and the first value of each series.
///
/// The result is negative when the series ends below where it started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignedDifference;

impl SignedDifference {
    /// Create a new signed difference function
    pub fn new() -> Self {
        Self
    }

    /// Sort `series` by timestamp and return `last - first`, `NaN` when empty
    pub fn difference(series: &mut TimeSeries) -> f64 {
        series.sort();
        match (series.first(), series.last()) {
            (Some(first), Some(last)) => last.value - first.value,
            _ => f64::NAN,
        }
    }
}

impl AggregationFunction for SignedDifference {
    fn kind(&self) -> AggregationKind {
        AggregationKind::SignedDifference
    }
}

impl GroupedAggregation for SignedDifference {
    fn execute(&self, batch: &mut [GroupedSeries], sink: &mut dyn ResultSink) {
        for grouped in batch.iter_mut() {
            if grouped.series().is_empty() {
                debug!(
                    "Series '{}' ({}) is empty, recording NaN for sdiff",
                    grouped.series().name(),
                    grouped.join_key()
                );
                sink.add_with_join_key(self.kind(), f64::NAN, grouped.join_key().clone());
                continue;
            }

            let value = Self::difference(grouped.series_mut());
            sink.add_with_join_key(self.kind(), value, grouped.join_key().clone());
        }
    }
}
