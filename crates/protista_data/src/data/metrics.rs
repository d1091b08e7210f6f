use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

/// Name of a numeric measure tracked on every tree node.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricKind(String);

impl MetricKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MetricKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetricKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MetricKind {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Per-kind totals or averages held by a node.
pub type MetricMap = BTreeMap<MetricKind, f64>;

/// One round of observed metric values reported back into a node.
pub type MetricDelta = BTreeMap<MetricKind, f64>;

/// Builds a [`MetricDelta`] from `(name, value)` pairs.
pub fn metric_delta<I, K>(pairs: I) -> MetricDelta
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<MetricKind>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// The recognized metric kinds, in declaration order and without duplicates.
///
/// Every node built from the same set shares the same metric key domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet {
    kinds: Vec<MetricKind>,
}

impl MetricSet {
    /// Creates a set from names; later duplicates are dropped.
    pub fn new<I, K>(kinds: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<MetricKind>,
    {
        let mut unique: Vec<MetricKind> = Vec::new();
        for kind in kinds.into_iter().map(Into::into) {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    pub fn kinds(&self) -> &[MetricKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.iter().any(|k| k.as_str() == name)
    }

    /// Every kind mapped to `0.0`.
    pub fn zeroed(&self) -> MetricMap {
        self.kinds.iter().map(|k| (k.clone(), 0.0)).collect()
    }
}
