//! Time series samples and containers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{TsaggError, TsaggResult};
use crate::join_key::JoinKey;

/// A single (timestamp, value) measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    /// The measured value
    pub value: f64,
}

/// A named, ordered sequence of samples.
///
/// Samples keep insertion order until [`TimeSeries::sort`] is called. An
/// empty series is a valid state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Metric name
    name: String,

    /// Free-form attributes describing the series
    #[serde(default)]
    attributes: BTreeMap<String, String>,

    /// Samples in their current order
    #[serde(default)]
    samples: Vec<Sample>,
}

/// A time series paired with the join key its result is recorded under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedSeries {
    join_key: JoinKey,
    series: TimeSeries,
}

impl Sample {
    /// Create a new sample
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl From<(i64, f64)> for Sample {
    fn from((timestamp, value): (i64, f64)) -> Self {
        Self { timestamp, value }
    }
}

impl TimeSeries {
    /// Create a new empty series
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            samples: Vec::new(),
        }
    }

    /// Create a series from samples, keeping their order
    pub fn from_samples<S, I>(name: S, samples: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<Sample>,
    {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            samples: samples.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a series from parallel timestamp and value columns
    pub fn from_columns<S: Into<String>>(
        name: S,
        timestamps: &[i64],
        values: &[f64],
    ) -> TsaggResult<Self> {
        if timestamps.len() != values.len() {
            return Err(TsaggError::precondition(format!(
                "Column length mismatch: {} timestamps, {} values",
                timestamps.len(),
                values.len()
            )));
        }

        Ok(Self::from_samples(
            name,
            timestamps
                .iter()
                .zip(values)
                .map(|(&timestamp, &value)| Sample::new(timestamp, value)),
        ))
    }

    /// Add an attribute to this series
    pub fn with_attribute<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append a sample
    pub fn add(&mut self, timestamp: i64, value: f64) {
        self.samples.push(Sample::new(timestamp, value));
    }

    /// Append several samples
    pub fn add_all<I>(&mut self, samples: I)
    where
        I: IntoIterator,
        I::Item: Into<Sample>,
    {
        self.samples.extend(samples.into_iter().map(Into::into));
    }

    /// Get the metric name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the series attributes
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Number of samples
    pub fn size(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Value at `index` in the current order
    pub fn value(&self, index: usize) -> Option<f64> {
        self.samples.get(index).map(|s| s.value)
    }

    /// Timestamp at `index` in the current order
    pub fn timestamp(&self, index: usize) -> Option<i64> {
        self.samples.get(index).map(|s| s.timestamp)
    }

    /// First sample in the current order
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Last sample in the current order
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Iterate over values in the current order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }

    /// Iterate over timestamps in the current order
    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().map(|s| s.timestamp)
    }

    /// All samples in the current order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sort samples by timestamp, ascending.
    ///
    /// The sort is stable: samples sharing a timestamp keep their relative
    /// insertion order.
    pub fn sort(&mut self) {
        self.samples.sort_by_key(|s| s.timestamp);
    }

    /// Check if samples are in ascending timestamp order
    pub fn is_sorted(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }

    /// Remove all samples, keeping name and attributes
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl GroupedSeries {
    /// Pair a series with its join key
    pub fn new<K: Into<JoinKey>>(join_key: K, series: TimeSeries) -> Self {
        Self {
            join_key: join_key.into(),
            series,
        }
    }

    /// Get the join key
    pub fn join_key(&self) -> &JoinKey {
        &self.join_key
    }

    /// Get the series
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Get mutable access to the series
    pub fn series_mut(&mut self) -> &mut TimeSeries {
        &mut self.series
    }

    /// Split into join key and series
    pub fn into_parts(self) -> (JoinKey, TimeSeries) {
        (self.join_key, self.series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_creation() {
        let series = TimeSeries::from_samples("cpu.load", vec![(1000, 1.5), (2000, 2.5)])
            .with_attribute("host", "server1");

        assert_eq!(series.name(), "cpu.load");
        assert_eq!(series.size(), 2);
        assert_eq!(series.attributes().get("host").unwrap(), "server1");
        assert_eq!(series.value(1), Some(2.5));
        assert_eq!(series.timestamp(0), Some(1000));
        assert_eq!(series.value(2), None);
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = TimeSeries::new("empty");
        assert_eq!(series.size(), 0);
        assert!(series.is_empty());
        assert!(series.is_sorted());
        assert!(series.first().is_none());
    }

    #[test]
    fn test_sort_by_timestamp() {
        let mut series = TimeSeries::from_samples("m", vec![(5, 10.0), (1, 3.0), (3, 7.0)]);
        assert!(!series.is_sorted());

        series.sort();

        assert!(series.is_sorted());
        assert_eq!(series.timestamps().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![3.0, 7.0, 10.0]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut series =
            TimeSeries::from_samples("m", vec![(2, 1.0), (1, 9.0), (2, 2.0), (1, 8.0)]);
        series.sort();

        assert_eq!(series.values().collect::<Vec<_>>(), vec![9.0, 8.0, 1.0, 2.0]);
    }

    #[test]
    fn test_from_columns() {
        let series = TimeSeries::from_columns("m", &[1, 2, 3], &[0.5, 1.5, 2.5]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().unwrap(), &Sample::new(3, 2.5));

        let err = TimeSeries::from_columns("m", &[1, 2], &[0.5]).unwrap_err();
        assert!(matches!(err, TsaggError::Precondition(_)));
    }

    #[test]
    fn test_add_and_clear() {
        let mut series = TimeSeries::new("m").with_attribute("dc", "west");
        series.add(10, 1.0);
        series.add_all(vec![Sample::new(20, 2.0), Sample::new(30, 3.0)]);
        assert_eq!(series.len(), 3);

        series.clear();
        assert!(series.is_empty());
        assert_eq!(series.attributes().len(), 1);
    }

    #[test]
    fn test_grouped_series_gives_mutable_access() {
        let mut grouped = GroupedSeries::new(
            "host=a",
            TimeSeries::from_samples("m", vec![(2, 2.0), (1, 1.0)]),
        );

        grouped.series_mut().sort();
        assert!(grouped.series().is_sorted());
        assert_eq!(grouped.join_key(), &JoinKey::from("host=a"));

        let (key, series) = grouped.into_parts();
        assert_eq!(key, "host=a");
        assert_eq!(series.value(0), Some(1.0));
    }

    #[test]
    fn test_series_json_shape() {
        let json = r#"{"name":"m","samples":[{"timestamp":1,"value":2.0}]}"#;
        let series: TimeSeries = serde_json::from_str(json).unwrap();

        assert_eq!(series.len(), 1);
        assert!(series.attributes().is_empty());
        assert_eq!(series.first().unwrap().value, 2.0);
    }
}
