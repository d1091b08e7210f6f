use crate::error::{Result, TreeError};
use protista_data::{Branch, MetricDelta, MetricKind, NodeKind, TreeNode};

/// Counts one use and folds each reported value into the node's ledger.
///
/// `delta` holds this round's observed value per metric, not a change to the
/// running total: the average is `(avg * (n - 1) + value) / n` with `n` the
/// count after this call. Kinds missing from the node are inserted on the fly
/// with a zero base, which skews their average.
pub fn update_stats<A, C>(node: &mut TreeNode<A, C>, delta: &MetricDelta) {
    node.usage_count += 1;
    let uses = node.usage_count as f64;
    for (kind, &value) in delta {
        if !node.metrics_average.contains_key(kind) {
            tracing::warn!(
                metric = %kind,
                identity = %node.identity,
                "Stats reported for metric outside the node's domain"
            );
        }
        *node.metrics_total.entry(kind.clone()).or_insert(0.0) += value;
        let average = node.metrics_average.entry(kind.clone()).or_insert(0.0);
        *average = (*average * (uses - 1.0) + value) / uses;
    }
}

pub fn try_update_stats<A, C>(node: &mut TreeNode<A, C>, delta: &MetricDelta) -> Result<()> {
    let outside_domain = |kind: &&MetricKind| {
        !node.metrics_average.contains_key(*kind) || !node.metrics_total.contains_key(*kind)
    };
    if let Some(kind) = delta.keys().find(outside_domain) {
        return Err(TreeError::unknown_metric(kind.as_str()));
    }
    update_stats(node, delta);
    Ok(())
}

pub fn update_stats_along<A, C>(
    node: &mut TreeNode<A, C>,
    path: &[Branch],
    delta: &MetricDelta,
) {
    update_stats(node, delta);
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    if let NodeKind::Condition { yes, no, .. } = &mut node.kind {
        let child = match first {
            Branch::Yes => yes,
            Branch::No => no,
        };
        update_stats_along(&mut **child, rest, delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeLogic;
    use protista_data::{metric_delta, MetricSet};

    type Tree = TreeNode<&'static str, &'static str>;

    fn energy() -> MetricSet {
        MetricSet::new(["energy"])
    }

    #[test]
    fn test_scenario_two_rounds() {
        let m = energy();
        let mut root = Tree::from_condition(
            "isHungry",
            Tree::from_action("eat", &m),
            Tree::from_action("rest", &m),
            &m,
        );

        root.update_stats(&metric_delta([("energy", 5.0)]));
        assert_eq!(root.metrics_total["energy"], 5.0);
        assert_eq!(root.metrics_average["energy"], 5.0);
        assert_eq!(root.usage_count, 1);

        root.update_stats(&metric_delta([("energy", 1.0)]));
        assert_eq!(root.metrics_total["energy"], 6.0);
        assert_eq!(root.metrics_average["energy"], 3.0);
        assert_eq!(root.usage_count, 2);
    }

    #[test]
    fn test_empty_delta_still_counts_a_use() {
        let mut leaf = Tree::from_action("eat", &energy());
        leaf.update_stats(&MetricDelta::new());
        assert_eq!(leaf.usage_count, 1);
        assert_eq!(leaf.metrics_average["energy"], 0.0);
    }

    #[test]
    fn test_unreported_kinds_are_untouched_but_diluted_later() {
        let m = MetricSet::new(["health", "food"]);
        let mut leaf = Tree::from_action("eat", &m);
        leaf.update_stats(&metric_delta([("health", 4.0)]));
        leaf.update_stats(&metric_delta([("food", 2.0)]));
        assert_eq!(leaf.metrics_total["health"], 4.0);
        assert_eq!(leaf.metrics_average["health"], 4.0);
        assert_eq!(leaf.metrics_total["food"], 2.0);
        // food was absent from round one, so its mean is over two uses
        assert_eq!(leaf.metrics_average["food"], 1.0);
    }

    #[test]
    fn test_unknown_kind_is_inserted_by_nominal_update() {
        let mut leaf = Tree::from_action("eat", &energy());
        leaf.update_stats(&metric_delta([("energy", 2.0)]));
        leaf.update_stats(&metric_delta([("warmth", 8.0)]));
        assert_eq!(leaf.metrics_total["warmth"], 8.0);
        assert_eq!(leaf.metrics_average["warmth"], 4.0);
        assert_eq!(
            leaf.metrics_total.keys().collect::<Vec<_>>(),
            leaf.metrics_average.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_try_update_rejects_unknown_kind_without_mutation() {
        let mut leaf = Tree::from_action("eat", &energy());
        let before = leaf.clone();
        let err = leaf
            .try_update_stats(&metric_delta([("energy", 1.0), ("warmth", 1.0)]))
            .unwrap_err();
        assert!(matches!(err, TreeError::UnknownMetric(ref k) if k == "warmth"));
        assert_eq!(leaf, before);

        leaf.try_update_stats(&metric_delta([("energy", 1.0)])).unwrap();
        assert_eq!(leaf.usage_count, 1);
    }

    #[test]
    fn test_update_along_path_only_touches_visited_nodes() {
        let m = energy();
        let mut root = Tree::from_condition(
            "isCold",
            Tree::from_action("cover", &m),
            Tree::from_condition(
                "isHungry",
                Tree::from_action("eat", &m),
                Tree::from_action("rest", &m),
                &m,
            ),
            &m,
        );
        let delta = metric_delta([("energy", 3.0)]);
        root.update_stats_along(&[Branch::No, Branch::Yes], &delta);

        assert_eq!(root.usage_count, 1);
        assert_eq!(root.yes().unwrap().usage_count, 0);
        let hungry = root.no().unwrap();
        assert_eq!(hungry.usage_count, 1);
        assert_eq!(hungry.yes().unwrap().metrics_total["energy"], 3.0);
        assert_eq!(hungry.no().unwrap().usage_count, 0);
    }
}
