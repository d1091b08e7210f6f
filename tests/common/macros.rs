/// Asserts that every node in a tree reports the given population.
#[macro_export]
macro_rules! assert_population_everywhere {
    ($tree:expr, $expected:expr) => {{
        fn walk<A, C>(node: &protista_lib::TreeNode<A, C>, expected: i64) {
            assert_eq!(
                node.population, expected,
                "Node population {} differs from {}",
                node.population, expected
            );
            if let (Some(yes), Some(no)) = (node.yes(), node.no()) {
                walk(yes, expected);
                walk(no, expected);
            }
        }
        walk(&$tree, $expected);
    }};
}

/// Asserts a running average for one metric kind, within float tolerance.
#[macro_export]
macro_rules! assert_average {
    ($node:expr, $kind:expr, $expected:expr) => {
        let actual = $node.metrics_average[$kind];
        assert!(
            (actual - $expected).abs() < 1e-9,
            "Average of {} is {} but expected {}",
            $kind,
            actual,
            $expected
        );
    };
}
