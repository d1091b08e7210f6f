//! Canonical identity strings for decision trees.
//!
//! An action renders as its value; a condition renders as
//! `value-<yes identity>-<no identity>`. Given value renderings that are
//! unique and never contain the separator, two trees share an identity
//! exactly when they share shape and values.

use protista_data::{NodeKind, TreeNode};
use std::fmt::Display;

pub const ID_SEPARATOR: char = '-';

/// Overwrites the identity of every node in the subtree and clears stale flags.
pub fn update_node_ids<A: Display, C: Display>(node: &mut TreeNode<A, C>) -> &str {
    let identity = match &mut node.kind {
        NodeKind::Action(action) => action.to_string(),
        NodeKind::Condition { value, yes, no } => {
            let mut id = value.to_string();
            id.push(ID_SEPARATOR);
            id.push_str(update_node_ids(&mut **yes));
            id.push(ID_SEPARATOR);
            id.push_str(update_node_ids(&mut **no));
            id
        }
    };
    tracing::trace!(identity = %identity, "Derived node identity");
    node.identity = identity;
    node.identity_stale = false;
    &node.identity
}

pub fn is_identity_stale<A, C>(node: &TreeNode<A, C>) -> bool {
    if node.identity_stale {
        return true;
    }
    match &node.kind {
        NodeKind::Action(_) => false,
        NodeKind::Condition { yes, no, .. } => {
            is_identity_stale(&**yes) || is_identity_stale(&**no)
        }
    }
}

pub fn fresh_identity<A: Display, C: Display>(node: &mut TreeNode<A, C>) -> &str {
    if is_identity_stale(node) {
        tracing::debug!(previous = %node.identity, "Re-deriving stale tree identity");
        return update_node_ids(node);
    }
    &node.identity
}
