//! # Protista
//!
//! Decision-tree engine for evolving protists, plus the `protista` command
//! line tool for inspecting saved trees and pools.

pub mod cli;

pub use protista_core::{
    config, error, pool, report, tree, EngineConfig, PoolReport, Result, TreeError, TreeId,
    TreeLogic, TreePool,
};
pub use protista_data::{
    metric_delta, Branch, MetricDelta, MetricKind, MetricSet, NodeKind, ProtistAction,
    ProtistCondition, ProtistTree, TreeNode,
};
