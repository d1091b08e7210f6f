//! # Protista Core
//!
//! The decision-tree engine behind protist behavior.
//!
//! This crate contains:
//! - Tree construction, canonical identities and stale tracking
//! - Per-node metric ledgers with running averages
//! - Population usage propagation across shared trees
//! - A handle-based pool that owns trees shared by many organisms
//! - Reports, Graphviz export, configuration and structured logging
//!
//! ## Example
//!
//! ```
//! use protista_core::tree::TreeLogic;
//! use protista_data::{metric_delta, MetricSet, TreeNode};
//!
//! let metrics = MetricSet::new(["energy"]);
//! let mut root: TreeNode<&str, &str> = TreeNode::from_condition(
//!     "isHungry",
//!     TreeNode::from_action("eat", &metrics),
//!     TreeNode::from_action("rest", &metrics),
//!     &metrics,
//! );
//! assert_eq!(root.update_node_ids(), "isHungry-eat-rest");
//!
//! root.update_stats(&metric_delta([("energy", 5.0)]));
//! root.update_stats(&metric_delta([("energy", 1.0)]));
//! assert_eq!(root.metrics_average["energy"], 3.0);
//! ```

/// Configuration management for engine parameters
pub mod config;
/// Error types and result aliases for tree operations
pub mod error;
/// Tracing subscriber setup
pub mod logging;
/// Handle-based arena of trees shared across organisms
pub mod pool;
/// Population summaries and DOT export
pub mod report;
/// Decision tree logic: construction, identity, stats, population, walks
pub mod tree;

pub use config::EngineConfig;
pub use error::{Result, TreeError};
pub use logging::init_logging;
pub use pool::{TreeId, TreePool};
pub use report::{identity_digest, to_dot, PoolReport, TreeSummary};
pub use tree::{Decision, TreeLogic};
