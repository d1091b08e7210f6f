//! Error types for protista_core.
//!
//! The nominal tree operations never fail; these errors come from the
//! checked `try_` variants and from the tree pool.

use crate::pool::TreeId;
use thiserror::Error;

/// Main error type for decision-tree operations.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Stats reported for a metric the node was not built with
    #[error("Unknown metric kind: {0}")]
    UnknownMetric(String),

    /// A population change would take some node below zero
    #[error("Population of '{identity}' would become negative ({count} {change:+})")]
    NegativePopulation {
        identity: String,
        count: i64,
        change: i64,
    },

    /// Handle not present in the pool
    #[error("Tree not found in pool: {0}")]
    UnknownTree(TreeId),

    /// Child access on an action leaf
    #[error("Node '{0}' is an action and has no children")]
    NotACondition(String),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<TreeError>,
    },
}

/// Result type alias for protista_core operations.
pub type Result<T> = std::result::Result<T, TreeError>;

impl TreeError {
    /// Creates a new unknown metric error.
    #[must_use]
    pub fn unknown_metric<S: Into<String>>(kind: S) -> Self {
        Self::UnknownMetric(kind.into())
    }

    /// Creates a new negative population error.
    #[must_use]
    pub fn negative_population<S: Into<String>>(identity: S, count: i64, change: i64) -> Self {
        Self::NegativePopulation {
            identity: identity.into(),
            count,
            change,
        }
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
