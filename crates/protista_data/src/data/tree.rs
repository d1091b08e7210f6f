use crate::data::metrics::MetricMap;
use serde::{Deserialize, Serialize};

/// Cosmetic display tag carried by every node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Outcome of evaluating a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// The condition held.
    Yes,
    /// The condition did not hold.
    No,
}

/// What a node does: act, or test and branch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeKind<A, C> {
    /// Terminal behavior.
    Action(A),
    /// Boolean test with both outcomes wired to a subtree.
    Condition {
        value: C,
        yes: Box<TreeNode<A, C>>,
        no: Box<TreeNode<A, C>>,
    },
}

fn stale_on_load() -> bool {
    true
}

/// A node of a protist decision tree together with its performance ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<A, C> {
    /// Action leaf or Condition with children.
    pub kind: NodeKind<A, C>,
    /// Canonical serialization of the subtree rooted here.
    pub identity: String,
    /// Set when the subtree changed shape since `identity` was derived.
    #[serde(skip, default = "stale_on_load")]
    pub identity_stale: bool,
    /// Accumulated totals per metric kind.
    pub metrics_total: MetricMap,
    /// Running mean per metric kind.
    pub metrics_average: MetricMap,
    /// Number of stats reports received.
    pub usage_count: u64,
    /// Live organisms whose tree currently includes this node.
    pub population: i64,
    /// Externally assigned structural cost.
    pub complexity: u32,
    /// Whether the yes branch was ever taken.
    pub used_yes: bool,
    /// Whether the no branch was ever taken.
    pub used_no: bool,
    pub color: Rgba,
}

impl<A, C> TreeNode<A, C> {
    pub fn is_action(&self) -> bool {
        matches!(self.kind, NodeKind::Action(_))
    }

    pub fn is_condition(&self) -> bool {
        matches!(self.kind, NodeKind::Condition { .. })
    }

    pub fn action(&self) -> Option<&A> {
        match &self.kind {
            NodeKind::Action(action) => Some(action),
            NodeKind::Condition { .. } => None,
        }
    }

    pub fn condition(&self) -> Option<&C> {
        match &self.kind {
            NodeKind::Action(_) => None,
            NodeKind::Condition { value, .. } => Some(value),
        }
    }

    pub fn child(&self, branch: Branch) -> Option<&TreeNode<A, C>> {
        match (&self.kind, branch) {
            (NodeKind::Action(_), _) => None,
            (NodeKind::Condition { yes, .. }, Branch::Yes) => Some(&**yes),
            (NodeKind::Condition { no, .. }, Branch::No) => Some(&**no),
        }
    }

    pub fn yes(&self) -> Option<&TreeNode<A, C>> {
        self.child(Branch::Yes)
    }

    pub fn no(&self) -> Option<&TreeNode<A, C>> {
        self.child(Branch::No)
    }

    /// Whether `branch` was ever taken. Always false on actions.
    pub fn used(&self, branch: Branch) -> bool {
        if self.is_action() {
            return false;
        }
        match branch {
            Branch::Yes => self.used_yes,
            Branch::No => self.used_no,
        }
    }
}
