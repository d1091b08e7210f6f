use protista_data::{Branch, NodeKind, TreeNode};

/// The action a walk ended on and the branches taken to reach it.
#[derive(Debug, PartialEq)]
pub struct Decision<'a, A> {
    pub action: &'a A,
    pub path: Vec<Branch>,
}

/// Follows the branch chosen by `test` at each condition, flagging it as used.
pub fn decide<A, C, F>(node: &mut TreeNode<A, C>, mut test: F) -> Decision<'_, A>
where
    F: FnMut(&C) -> bool,
{
    let mut path = Vec::new();
    let action = descend(node, &mut test, &mut path);
    Decision { action, path }
}

fn descend<'a, A, C, F>(
    node: &'a mut TreeNode<A, C>,
    test: &mut F,
    path: &mut Vec<Branch>,
) -> &'a A
where
    F: FnMut(&C) -> bool,
{
    match &mut node.kind {
        NodeKind::Action(action) => &*action,
        NodeKind::Condition { value, yes, no } => {
            if test(&*value) {
                node.used_yes = true;
                path.push(Branch::Yes);
                descend(&mut **yes, test, path)
            } else {
                node.used_no = true;
                path.push(Branch::No);
                descend(&mut **no, test, path)
            }
        }
    }
}
