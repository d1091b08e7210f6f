use crate::error::{Result, TreeError};
use protista_data::{NodeKind, TreeNode};

/// Adds `change` to the population of the node and all of its descendants.
///
/// Callers pair every `+1` at acquisition with one `-1` at release on the
/// same root. Unbalanced releases drive counts negative.
pub fn update_num_organisms_using<A, C>(node: &mut TreeNode<A, C>, change: i64) {
    node.population += change;
    if let NodeKind::Condition { yes, no, .. } = &mut node.kind {
        update_num_organisms_using(&mut **yes, change);
        update_num_organisms_using(&mut **no, change);
    }
}

/// Lowest population found anywhere in the subtree, with that node's identity.
fn lowest_population<A, C>(node: &TreeNode<A, C>) -> (i64, &str) {
    let here = (node.population, node.identity.as_str());
    match &node.kind {
        NodeKind::Action(_) => here,
        NodeKind::Condition { yes, no, .. } => {
            [here, lowest_population(&**yes), lowest_population(&**no)]
                .into_iter()
                .min_by_key(|(count, _)| *count)
                .unwrap_or(here)
        }
    }
}

/// Applies `change` only if no node in the subtree would drop below zero.
///
/// Increases are always accepted, even on a subtree that is already negative.
pub fn try_update_num_organisms_using<A, C>(
    node: &mut TreeNode<A, C>,
    change: i64,
) -> Result<()> {
    let (lowest, identity) = lowest_population(node);
    let drops_below_zero = change < 0 && lowest.checked_add(change).map_or(true, |n| n < 0);
    if drops_below_zero {
        tracing::warn!(
            identity = %identity,
            count = lowest,
            change,
            "Rejected population change below zero"
        );
        return Err(TreeError::negative_population(identity, lowest, change));
    }
    update_num_organisms_using(node, change);
    Ok(())
}
