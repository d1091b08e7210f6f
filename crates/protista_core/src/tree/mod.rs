pub mod build;
pub mod identity;
pub mod population;
pub mod stats;
pub mod walk;

pub use protista_data::{Branch, MetricDelta, MetricSet, NodeKind, TreeNode};
use std::fmt::Display;

pub use identity::ID_SEPARATOR;
pub use walk::Decision;

use crate::error::Result;

/// Trait defining the engine logic for protist decision trees.
pub trait TreeLogic: Sized {
    type Action;
    type Condition;

    /// Wraps a single action into a fresh leaf with a zeroed ledger.
    fn from_action(action: Self::Action, metrics: &MetricSet) -> Self;

    /// Wires two built subtrees under a condition.
    fn from_condition(value: Self::Condition, yes: Self, no: Self, metrics: &MetricSet) -> Self;

    /// Records one round of observed metric values on this node.
    fn update_stats(&mut self, delta: &MetricDelta);
    /// Like [`TreeLogic::update_stats`] but rejects keys outside the node's domain.
    fn try_update_stats(&mut self, delta: &MetricDelta) -> Result<()>;
    /// Records a round on the root and on every node along `path`.
    fn update_stats_along(&mut self, path: &[Branch], delta: &MetricDelta);

    /// Re-derives the identity of every node in the subtree, returning the root's.
    fn update_node_ids(&mut self) -> &str;
    fn is_identity_stale(&self) -> bool;
    /// Returns the identity, re-deriving it first if any node is stale.
    fn fresh_identity(&mut self) -> &str;

    /// Adds `change` to the population of every node in the subtree.
    fn update_num_organisms_using(&mut self, change: i64);
    /// Like [`TreeLogic::update_num_organisms_using`] but refuses to go below zero.
    fn try_update_num_organisms_using(&mut self, change: i64) -> Result<()>;

    /// Swaps in a new subtree under `branch` and returns the old one.
    fn replace_child(&mut self, branch: Branch, subtree: Self) -> Result<Self>;
    /// Mutable access to both children; marks this node's identity stale.
    fn children_mut(&mut self) -> Option<(&mut Self, &mut Self)>;

    /// Walks from the root using `test` to pick branches.
    fn decide<F>(&mut self, test: F) -> Decision<'_, Self::Action>
    where
        F: FnMut(&Self::Condition) -> bool;

    fn node_count(&self) -> usize;
    fn depth(&self) -> usize;
}

impl<A: Display, C: Display> TreeLogic for TreeNode<A, C> {
    type Action = A;
    type Condition = C;

    fn from_action(action: A, metrics: &MetricSet) -> Self {
        build::tree_from_action(action, metrics)
    }

    fn from_condition(value: C, yes: Self, no: Self, metrics: &MetricSet) -> Self {
        build::tree_from_condition(value, yes, no, metrics)
    }

    fn update_stats(&mut self, delta: &MetricDelta) {
        stats::update_stats(self, delta)
    }

    fn try_update_stats(&mut self, delta: &MetricDelta) -> Result<()> {
        stats::try_update_stats(self, delta)
    }

    fn update_stats_along(&mut self, path: &[Branch], delta: &MetricDelta) {
        stats::update_stats_along(self, path, delta)
    }

    fn update_node_ids(&mut self) -> &str {
        identity::update_node_ids(self)
    }

    fn is_identity_stale(&self) -> bool {
        identity::is_identity_stale(self)
    }

    fn fresh_identity(&mut self) -> &str {
        identity::fresh_identity(self)
    }

    fn update_num_organisms_using(&mut self, change: i64) {
        population::update_num_organisms_using(self, change)
    }

    fn try_update_num_organisms_using(&mut self, change: i64) -> Result<()> {
        population::try_update_num_organisms_using(self, change)
    }

    fn replace_child(&mut self, branch: Branch, subtree: Self) -> Result<Self> {
        build::replace_child(self, branch, subtree)
    }

    fn children_mut(&mut self) -> Option<(&mut Self, &mut Self)> {
        build::children_mut(self)
    }

    fn decide<F>(&mut self, test: F) -> Decision<'_, A>
    where
        F: FnMut(&C) -> bool,
    {
        walk::decide(self, test)
    }

    fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Action(_) => 1,
            NodeKind::Condition { yes, no, .. } => 1 + yes.node_count() + no.node_count(),
        }
    }

    fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Action(_) => 1,
            NodeKind::Condition { yes, no, .. } => 1 + yes.depth().max(no.depth()),
        }
    }
}
