//! Result sinks collecting function output

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use tsagg_core::JoinKey;

use crate::function::AggregationKind;

/// Append-only write surface for aggregation results.
///
/// Every call appends a new entry; repeated writes for the same key are
/// kept side by side, never merged.
pub trait ResultSink {
    /// Record a value computed by a single-series function
    fn add(&mut self, function: AggregationKind, value: f64);

    /// Record a value computed for one element of a grouped batch
    fn add_with_join_key(&mut self, function: AggregationKind, value: f64, join_key: JoinKey);
}

/// A single recorded result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionValue {
    /// Function that produced the value
    pub function: AggregationKind,

    /// Join key of the input series, for grouped functions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_key: Option<JoinKey>,

    /// The computed value; `NaN` when the input series was empty
    pub value: OrderedFloat<f64>,
}

/// In-memory result sink preserving insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionValueMap {
    entries: Vec<FunctionValue>,
}

/// Adapter recording every value under a fixed join key.
///
/// Lets a single-series function run inside a grouped batch while its
/// results stay correlated with their input series.
pub struct JoinKeyedSink<'a> {
    inner: &'a mut dyn ResultSink,
    join_key: &'a JoinKey,
}

impl FunctionValue {
    /// Get the value as a plain float
    pub fn value(&self) -> f64 {
        self.value.into_inner()
    }
}

impl FunctionValueMap {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[FunctionValue] {
        &self.entries
    }

    /// All values recorded for a function, in insertion order
    pub fn values_for(&self, function: AggregationKind) -> Vec<f64> {
        self.entries
            .iter()
            .filter(|entry| entry.function == function)
            .map(FunctionValue::value)
            .collect()
    }

    /// First value recorded for a function without a join key
    pub fn value(&self, function: AggregationKind) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.function == function && entry.join_key.is_none())
            .map(FunctionValue::value)
    }

    /// First value recorded for a function under a join key
    pub fn value_for_key(&self, function: AggregationKind, join_key: &JoinKey) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.function == function && entry.join_key.as_ref() == Some(join_key))
            .map(FunctionValue::value)
    }

    /// Join keys recorded for a function, in insertion order
    pub fn join_keys(&self, function: AggregationKind) -> Vec<&JoinKey> {
        self.entries
            .iter()
            .filter(|entry| entry.function == function)
            .filter_map(|entry| entry.join_key.as_ref())
            .collect()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &FunctionValue> {
        self.entries.iter()
    }
}

impl ResultSink for FunctionValueMap {
    fn add(&mut self, function: AggregationKind, value: f64) {
        self.entries.push(FunctionValue {
            function,
            join_key: None,
            value: OrderedFloat(value),
        });
    }

    fn add_with_join_key(&mut self, function: AggregationKind, value: f64, join_key: JoinKey) {
        self.entries.push(FunctionValue {
            function,
            join_key: Some(join_key),
            value: OrderedFloat(value),
        });
    }
}

impl IntoIterator for FunctionValueMap {
    type Item = FunctionValue;
    type IntoIter = std::vec::IntoIter<FunctionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> JoinKeyedSink<'a> {
    /// Wrap a sink so every write lands under `join_key`
    pub fn new(inner: &'a mut dyn ResultSink, join_key: &'a JoinKey) -> Self {
        Self { inner, join_key }
    }
}

impl ResultSink for JoinKeyedSink<'_> {
    fn add(&mut self, function: AggregationKind, value: f64) {
        self.inner
            .add_with_join_key(function, value, self.join_key.clone());
    }

    fn add_with_join_key(&mut self, function: AggregationKind, value: f64, join_key: JoinKey) {
        self.inner.add_with_join_key(function, value, join_key);
    }
}
