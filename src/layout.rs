use crate::data_wrappers::MergeTree;
use crate::highlight::{self, HighlightedGenes};
use crate::AgnesError;
use num_traits::Float;
use serde::Serialize;
use std::collections::BTreeSet;

/// Horizontal pixels per unit of merge height used when none is configured.
pub const DEFAULT_SCALE: f64 = 100.0;

// A scale must be finite and positive; anything else is replaced by the default.
pub(crate) fn valid_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        tracing::warn!(
            scale,
            "scale must be finite and greater than zero. Set to {DEFAULT_SCALE}."
        );
        DEFAULT_SCALE
    }
}

/// Coordinates of one merge tree node in the dendrogram drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePosition<T> {
    pub x: T,
    pub y: T,
    pub parent: Option<usize>,
}

/// The gene a dendrogram leaf stands for, with its raw series for the aligned heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafPayload<T> {
    pub gene_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_name: Option<String>,
    pub expressions: Vec<T>,
}

/// A drawable dendrogram node. `parent` is a lookup index into the same arena, never
/// an owning link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationNode<T> {
    pub node_index: usize,
    pub x: T,
    pub y: T,
    pub parent: Option<usize>,
    #[serde(flatten)]
    pub gene: Option<LeafPayload<T>>,
}

impl<T> PresentationNode<T> {
    pub fn is_leaf(&self) -> bool {
        self.gene.is_some()
    }

    pub fn gene_id(&self) -> Option<&str> {
        self.gene.as_ref().map(|gene| gene.gene_id.as_str())
    }
}

/// Flattened, laid-out merge tree.
///
/// `nodes[i].node_index == i` for every exposed node: leaves are `0..m`, internal nodes
/// `m..2m-2` in merge order. The root (`2m - 2`) has no parent edge to draw and is left
/// out of `nodes`, but its index is kept so highlight queries can refer to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dendrogram<T> {
    #[serde(rename = "clusterNodes")]
    pub nodes: Vec<PresentationNode<T>>,
    /// Gene ids in display row order.
    pub order: Vec<String>,
    #[serde(skip)]
    pub root_index: usize,
}

/// Assigns coordinates to every node of the tree, root included.
///
/// Leaves sit at `x = root height * scale` and on the row given by the reversed
/// pre-order leaf sequence. An internal node sits at `x = (root height - height) * scale`
/// and halfway between its two children vertically. A non-finite or non-positive scale
/// falls back to `DEFAULT_SCALE`.
pub fn layout_tree<T: Float>(tree: &MergeTree<T>, scale: f64) -> Vec<NodePosition<T>> {
    let scale = T::from(valid_scale(scale))
        .unwrap_or_else(|| T::from(DEFAULT_SCALE).unwrap_or_else(T::one));
    let x_origin = tree.height(tree.root()) * scale;

    let mut rows = vec![0; tree.n_leaves()];
    for (row, observation) in tree.display_order().into_iter().enumerate() {
        rows[observation] = row;
    }

    let mut positions: Vec<NodePosition<T>> = Vec::with_capacity(tree.n_nodes());
    for node_id in 0..tree.n_nodes() {
        let y = match tree.children(node_id) {
            None => T::from(rows[node_id]).unwrap_or_else(T::zero),
            // Children precede their parent in the arena, so both are placed already
            Some((left, right)) => {
                let two = T::one() + T::one();
                (positions[left].y + positions[right].y) / two
            }
        };
        positions.push(NodePosition {
            x: x_origin - tree.height(node_id) * scale,
            y,
            parent: None,
        });
    }
    for node_id in tree.n_leaves()..tree.n_nodes() {
        if let Some((left, right)) = tree.children(node_id) {
            positions[left].parent = Some(node_id);
            positions[right].parent = Some(node_id);
        }
    }
    positions
}

impl<T: Float> Dendrogram<T> {
    /// Lays out the tree and attaches one payload per observation, in observation order.
    ///
    /// # Returns
    /// * The dendrogram, or `AgnesError::WrongDimension` if the number of payloads does
    ///   not match the number of leaves.
    pub fn from_tree(
        tree: &MergeTree<T>,
        scale: f64,
        payloads: Vec<LeafPayload<T>>,
    ) -> Result<Self, AgnesError> {
        if payloads.len() != tree.n_leaves() {
            return Err(AgnesError::WrongDimension(format!(
                "{} leaf payloads for a tree with {} leaves",
                payloads.len(),
                tree.n_leaves()
            )));
        }
        let order = tree
            .display_order()
            .into_iter()
            .map(|observation| payloads[observation].gene_id.clone())
            .collect();

        let root_index = tree.root();
        let mut payloads = payloads.into_iter();
        let nodes = layout_tree(tree, scale)
            .into_iter()
            .enumerate()
            .filter(|(node_index, _)| *node_index != root_index)
            .map(|(node_index, position)| PresentationNode {
                node_index,
                x: position.x,
                y: position.y,
                parent: position.parent,
                gene: if tree.is_leaf(node_index) {
                    payloads.next()
                } else {
                    None
                },
            })
            .collect();

        Ok(Dendrogram {
            nodes,
            order,
            root_index,
        })
    }

    /// The highlighted leaves plus every ancestor whose children are all highlighted.
    pub fn highlight_upward<S: AsRef<str>>(&self, highlighted_genes: &[S]) -> BTreeSet<usize> {
        highlight::highlight_upward(&self.nodes, highlighted_genes)
    }

    /// Every node under the selected ones and the genes at their leaves.
    pub fn highlight_downward(&self, selected: &[usize]) -> Result<HighlightedGenes, AgnesError> {
        highlight::highlight_downward(&self.nodes, self.root_index, selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Observations [[0,0],[0,0],[10,10]] under Euclidean distance and average linkage.
    fn three_leaf_tree() -> MergeTree<f64> {
        let mut tree = MergeTree::with_leaves(3);
        let pair = tree.push_merge(1, 0, 0.0);
        tree.push_merge(pair, 2, 200f64.sqrt());
        tree
    }

    fn payload(gene_id: &str) -> LeafPayload<f64> {
        LeafPayload {
            gene_id: gene_id.to_string(),
            gene_name: None,
            expressions: vec![1.0, 2.0],
        }
    }

    #[test]
    fn leaves_follow_reversed_leaf_order() {
        let positions = layout_tree(&three_leaf_tree(), DEFAULT_SCALE);
        // Pre-order visits leaves 1, 0, 2
        assert_eq!(2.0, positions[1].y);
        assert_eq!(1.0, positions[0].y);
        assert_eq!(0.0, positions[2].y);
    }

    #[test]
    fn internal_nodes_sit_between_children() {
        let positions = layout_tree(&three_leaf_tree(), DEFAULT_SCALE);
        assert_eq!(1.5, positions[3].y);
        assert_eq!(0.75, positions[4].y);
        assert_eq!(Some(3), positions[0].parent);
        assert_eq!(Some(4), positions[3].parent);
        assert_eq!(None, positions[4].parent);
    }

    #[test]
    fn x_is_distance_from_root_height() {
        let positions = layout_tree(&three_leaf_tree(), 10.0);
        let x_origin = 200f64.sqrt() * 10.0;
        assert_eq!(x_origin, positions[0].x);
        assert_eq!(x_origin, positions[3].x);
        assert_eq!(0.0, positions[4].x);
    }

    #[test]
    fn invalid_scale_falls_back_to_default() {
        let expected = layout_tree(&three_leaf_tree(), DEFAULT_SCALE);
        for scale in [f64::NAN, f64::INFINITY, -10.0, 0.0] {
            assert_eq!(expected, layout_tree(&three_leaf_tree(), scale));
        }

        let payloads = vec![payload("a"), payload("b"), payload("c")];
        let dendrogram = Dendrogram::from_tree(&three_leaf_tree(), -1.0, payloads).unwrap();
        assert_eq!(expected[0].x, dendrogram.nodes[0].x);
        assert!(dendrogram.nodes.iter().all(|node| node.x.is_finite() && node.x >= 0.0));
    }

    #[test]
    fn dendrogram_excludes_root() {
        let payloads = vec![payload("a"), payload("b"), payload("c")];
        let dendrogram =
            Dendrogram::from_tree(&three_leaf_tree(), DEFAULT_SCALE, payloads).unwrap();
        assert_eq!(4, dendrogram.nodes.len());
        assert_eq!(4, dendrogram.root_index);
        assert_eq!(vec!["c", "a", "b"], dendrogram.order);
        for (i, node) in dendrogram.nodes.iter().enumerate() {
            assert_eq!(i, node.node_index);
        }
        assert_eq!(Some("b"), dendrogram.nodes[1].gene_id());
        assert!(!dendrogram.nodes[3].is_leaf());
    }

    #[test]
    fn payload_count_must_match_leaves() {
        let result = Dendrogram::from_tree(&three_leaf_tree(), DEFAULT_SCALE, vec![payload("a")]);
        assert!(matches!(result, Err(AgnesError::WrongDimension(..))));
    }
}
