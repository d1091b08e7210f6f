pub mod data;

pub use data::metrics::{metric_delta, MetricDelta, MetricKind, MetricMap, MetricSet};
pub use data::protist::{ProtistAction, ProtistCondition, ProtistTree, MAX_PARAM};
pub use data::tree::{Branch, NodeKind, Rgba, TreeNode};
