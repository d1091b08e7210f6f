//! Population summaries and Graphviz export for decision trees.

use crate::pool::{TreeId, TreePool};
use crate::tree::TreeLogic;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use protista_data::{Branch, MetricMap, NodeKind, TreeNode};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::{self, Display};

const DIGEST_LEN: usize = 12;

/// Short hex digest of an identity string, for compact display.
#[must_use]
pub fn identity_digest(identity: &str) -> String {
    let hash = Sha256::digest(identity.as_bytes());
    let mut digest = hex::encode(hash);
    digest.truncate(DIGEST_LEN);
    digest
}

/// Reporting view of one pooled tree.
#[derive(Serialize, Debug, Clone)]
pub struct TreeSummary {
    pub id: TreeId,
    pub identity: String,
    pub digest: String,
    pub population: i64,
    pub usage_count: u64,
    pub complexity: u32,
    pub nodes: usize,
    pub depth: usize,
    pub metrics_average: MetricMap,
}

impl TreeSummary {
    pub fn new<A: Display, C: Display>(id: TreeId, tree: &TreeNode<A, C>) -> Self {
        Self {
            id,
            identity: tree.identity.clone(),
            digest: identity_digest(&tree.identity),
            population: tree.population,
            usage_count: tree.usage_count,
            complexity: tree.complexity,
            nodes: tree.node_count(),
            depth: tree.depth(),
            metrics_average: tree.metrics_average.clone(),
        }
    }
}

/// Snapshot of which behaviors the population currently relies on.
#[derive(Serialize, Debug, Clone, Default)]
pub struct PoolReport {
    /// Most used first.
    pub trees: Vec<TreeSummary>,
    pub total_population: i64,
    /// Trees in the pool, including any cut by [`PoolReport::top`].
    pub tree_count: usize,
}

impl PoolReport {
    pub fn from_pool<A: Display, C: Display>(pool: &TreePool<A, C>) -> Self {
        let mut trees: Vec<TreeSummary> = pool
            .iter()
            .map(|(id, tree)| TreeSummary::new(id, tree))
            .collect();
        trees.sort_by(|a, b| b.population.cmp(&a.population).then(a.id.cmp(&b.id)));
        Self {
            tree_count: trees.len(),
            trees,
            total_population: pool.total_population(),
        }
    }

    /// Keeps only the `count` most populated trees.
    #[must_use]
    pub fn top(mut self, count: usize) -> Self {
        self.trees.truncate(count);
        self
    }
}

impl fmt::Display for PoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} organisms across {} trees",
            self.total_population, self.tree_count
        )?;
        if self.trees.len() < self.tree_count {
            writeln!(f, "showing top {}", self.trees.len())?;
        }
        for t in &self.trees {
            write!(
                f,
                "{} {} pop={:<4} uses={:<6} nodes={:<3}",
                t.id, t.digest, t.population, t.usage_count, t.nodes
            )?;
            for (kind, avg) in &t.metrics_average {
                write!(f, " {kind}={avg:.2}")?;
            }
            writeln!(f, "  {}", t.identity)?;
        }
        Ok(())
    }
}

struct DotNode {
    label: String,
    is_action: bool,
    population: i64,
    usage_count: u64,
}

struct DotEdge {
    branch: Branch,
    used: bool,
}

/// Escapes a label for a double-quoted DOT string.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn add_subtree<A: Display, C: Display>(
    graph: &mut DiGraph<DotNode, DotEdge>,
    node: &TreeNode<A, C>,
) -> NodeIndex {
    let label = match &node.kind {
        NodeKind::Action(action) => action.to_string(),
        NodeKind::Condition { value, .. } => value.to_string(),
    };
    let idx = graph.add_node(DotNode {
        label: escape_label(&label),
        is_action: node.is_action(),
        population: node.population,
        usage_count: node.usage_count,
    });
    if let NodeKind::Condition { yes, no, .. } = &node.kind {
        for (branch, child) in [(Branch::Yes, &**yes), (Branch::No, &**no)] {
            let child_idx = add_subtree(graph, child);
            let used = node.used(branch);
            graph.add_edge(idx, child_idx, DotEdge { branch, used });
        }
    }
    idx
}

/// Export a decision tree to Graphviz DOT format.
///
/// Conditions are diamonds, actions boxes; branches never taken are dashed.
pub fn to_dot<A: Display, C: Display>(tree: &TreeNode<A, C>) -> String {
    let mut graph = DiGraph::new();
    add_subtree(&mut graph, tree);

    let mut dot = String::from("digraph DecisionTree {\n");
    dot.push_str("  node [fontname=\"Arial\"];\n");
    for idx in graph.node_indices() {
        let node = &graph[idx];
        let shape = if node.is_action { "box" } else { "diamond" };
        dot.push_str(&format!(
            "  n{} [shape={}, label=\"{}\\npop={} uses={}\"];\n",
            idx.index(),
            shape,
            node.label,
            node.population,
            node.usage_count
        ));
    }
    for edge in graph.edge_references() {
        let weight = edge.weight();
        let label = match weight.branch {
            Branch::Yes => "yes",
            Branch::No => "no",
        };
        let style = if weight.used { "solid" } else { "dashed" };
        dot.push_str(&format!(
            "  n{} -> n{} [label=\"{}\", style={}];\n",
            edge.source().index(),
            edge.target().index(),
            label,
            style
        ));
    }
    dot.push_str("}\n");
    dot
}
