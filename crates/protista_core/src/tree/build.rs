use super::identity::update_node_ids;
use crate::error::{Result, TreeError};
use protista_data::{Branch, MetricSet, NodeKind, Rgba, TreeNode};
use std::fmt::Display;

fn blank_node<A, C>(kind: NodeKind<A, C>, metrics: &MetricSet) -> TreeNode<A, C> {
    TreeNode {
        kind,
        identity: String::new(),
        identity_stale: true,
        metrics_total: metrics.zeroed(),
        metrics_average: metrics.zeroed(),
        usage_count: 0,
        population: 0,
        complexity: 0,
        used_yes: false,
        used_no: false,
        color: Rgba::default(),
    }
}

pub fn tree_from_action<A: Display, C: Display>(
    action: A,
    metrics: &MetricSet,
) -> TreeNode<A, C> {
    let mut node = blank_node(NodeKind::Action(action), metrics);
    update_node_ids(&mut node);
    node
}

pub fn tree_from_condition<A: Display, C: Display>(
    value: C,
    yes: TreeNode<A, C>,
    no: TreeNode<A, C>,
    metrics: &MetricSet,
) -> TreeNode<A, C> {
    let kind = NodeKind::Condition {
        value,
        yes: Box::new(yes),
        no: Box::new(no),
    };
    let mut node = blank_node(kind, metrics);
    update_node_ids(&mut node);
    node
}

pub fn replace_child<A, C>(
    node: &mut TreeNode<A, C>,
    branch: Branch,
    subtree: TreeNode<A, C>,
) -> Result<TreeNode<A, C>> {
    let slot = match &mut node.kind {
        NodeKind::Action(_) => return Err(TreeError::NotACondition(node.identity.clone())),
        NodeKind::Condition { yes, no, .. } => match branch {
            Branch::Yes => yes,
            Branch::No => no,
        },
    };
    let previous = std::mem::replace(&mut **slot, subtree);
    node.identity_stale = true;
    Ok(previous)
}

pub fn children_mut<A, C>(
    node: &mut TreeNode<A, C>,
) -> Option<(&mut TreeNode<A, C>, &mut TreeNode<A, C>)> {
    match &mut node.kind {
        NodeKind::Action(_) => None,
        NodeKind::Condition { yes, no, .. } => {
            node.identity_stale = true;
            Some((&mut **yes, &mut **no))
        }
    }
}
