pub mod macros;

use protista_lib::{MetricSet, TreeLogic, TreeNode};

/// Trees over plain strings keep the tests independent of the protist vocabulary.
pub type StrTree = TreeNode<String, String>;

#[allow(dead_code)]
pub fn energy() -> MetricSet {
    MetricSet::new(["energy"])
}

#[allow(dead_code)]
pub fn leaf(action: &str) -> StrTree {
    StrTree::from_action(action.to_owned(), &energy())
}

#[allow(dead_code)]
pub fn cond(value: &str, yes: StrTree, no: StrTree) -> StrTree {
    StrTree::from_condition(value.to_owned(), yes, no, &energy())
}

/// `isHungry ? eat : (isTired ? sleep : play)`
#[allow(dead_code)]
pub fn hungry_tree() -> StrTree {
    cond(
        "isHungry",
        leaf("eat"),
        cond("isTired", leaf("sleep"), leaf("play")),
    )
}

/// A unique scratch file under the system temp directory.
#[allow(dead_code)]
pub fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("protista_{}_{}", uuid::Uuid::new_v4(), name))
}
