use num_traits::Float;

/// A node of the merge tree. Leaves hold the index of the observation they stand for,
/// internal nodes hold the arena indices of the two clusters they merged.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeNode<T> {
    Leaf {
        observation_index: usize,
    },
    Internal {
        left: usize,
        right: usize,
        height: T,
        size: usize,
    },
}

/// One agglomeration step, in the order it was performed.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge<T> {
    pub left: usize,
    pub right: usize,
    pub height: T,
    pub size: usize,
}

/// The binary merge tree produced by AGNES, stored as an arena.
///
/// Nodes `0..n_leaves` are the leaves in observation order, node `n_leaves + k` is the
/// cluster formed by the `k`-th merge, so the root is always the last node. Children
/// always have lower indices than their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTree<T> {
    nodes: Vec<MergeNode<T>>,
    n_leaves: usize,
}

impl<T: Float> MergeTree<T> {
    pub(crate) fn with_leaves(n_leaves: usize) -> Self {
        let mut nodes = Vec::with_capacity((2 * n_leaves).saturating_sub(1));
        nodes.extend((0..n_leaves).map(|observation_index| MergeNode::Leaf { observation_index }));
        MergeTree { nodes, n_leaves }
    }

    /// Appends an internal node and returns its arena index.
    pub(crate) fn push_merge(&mut self, left: usize, right: usize, height: T) -> usize {
        let size = self.size(left) + self.size(right);
        self.nodes.push(MergeNode::Internal {
            left,
            right,
            height,
            size,
        });
        self.nodes.len() - 1
    }

    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn node(&self, node_id: usize) -> Option<&MergeNode<T>> {
        self.nodes.get(node_id)
    }

    pub fn is_leaf(&self, node_id: usize) -> bool {
        node_id < self.n_leaves
    }

    /// Merge height of the node; leaves sit at height zero.
    pub fn height(&self, node_id: usize) -> T {
        match self.nodes[node_id] {
            MergeNode::Leaf { .. } => T::zero(),
            MergeNode::Internal { height, .. } => height,
        }
    }

    /// Number of leaves beneath the node.
    pub fn size(&self, node_id: usize) -> usize {
        match self.nodes[node_id] {
            MergeNode::Leaf { .. } => 1,
            MergeNode::Internal { size, .. } => size,
        }
    }

    pub fn children(&self, node_id: usize) -> Option<(usize, usize)> {
        match self.nodes[node_id] {
            MergeNode::Leaf { .. } => None,
            MergeNode::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// The agglomeration steps in the order they were performed.
    pub fn merges(&self) -> Vec<Merge<T>> {
        self.nodes
            .iter()
            .filter_map(|node| match *node {
                MergeNode::Leaf { .. } => None,
                MergeNode::Internal {
                    left,
                    right,
                    height,
                    size,
                } => Some(Merge {
                    left,
                    right,
                    height,
                    size,
                }),
            })
            .collect()
    }

    /// Observation indices in depth first pre-order, children visited in stored order.
    pub fn leaf_order(&self) -> Vec<usize> {
        let mut leaves = Vec::with_capacity(self.n_leaves);
        let mut stack = vec![self.root()];
        while let Some(node_id) = stack.pop() {
            match self.nodes[node_id] {
                MergeNode::Leaf { observation_index } => leaves.push(observation_index),
                MergeNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        leaves
    }

    /// The display row order: the pre-order leaf sequence reversed, so the first
    /// visited leaf is drawn last.
    pub fn display_order(&self) -> Vec<usize> {
        let mut order = self.leaf_order();
        order.reverse();
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_leaf_tree() -> MergeTree<f64> {
        let mut tree = MergeTree::with_leaves(3);
        let pair = tree.push_merge(1, 0, 0.0);
        tree.push_merge(pair, 2, 14.0);
        tree
    }

    #[test]
    fn arena_indices() {
        let tree = three_leaf_tree();
        assert_eq!(3, tree.n_leaves());
        assert_eq!(5, tree.n_nodes());
        assert_eq!(4, tree.root());
        assert_eq!(3, tree.size(4));
        assert_eq!(Some((3, 2)), tree.children(4));
        assert_eq!(None, tree.children(2));
        assert_eq!(14.0, tree.height(4));
        assert_eq!(0.0, tree.height(1));
    }

    #[test]
    fn leaf_order_is_pre_order() {
        let tree = three_leaf_tree();
        assert_eq!(vec![1, 0, 2], tree.leaf_order());
        assert_eq!(vec![2, 0, 1], tree.display_order());
    }

    #[test]
    fn merges_in_order() {
        let tree = three_leaf_tree();
        let merges = tree.merges();
        assert_eq!(2, merges.len());
        assert_eq!(
            Merge {
                left: 1,
                right: 0,
                height: 0.0,
                size: 2
            },
            merges[0]
        );
        assert_eq!(3, merges[1].size);
    }
}
