//! Reconciles leaf level highlight state with the rest of the dendrogram.
//!
//! Highlighting flows two ways. Upward: once every child of a node is highlighted the
//! node itself is, level by level up to the root. Downward: selecting a node, leaf or
//! internal, selects its whole subtree and therefore the genes at its leaves. Both
//! directions are pure functions over the immutable node list.

use crate::layout::PresentationNode;
use crate::AgnesError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Result of expanding a node selection down to its leaves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightedGenes {
    /// Selected nodes and all of their descendants.
    pub nodes: BTreeSet<usize>,
    /// Gene ids of the leaves among `nodes`, in node index order.
    pub genes: Vec<String>,
}

fn children_by_parent<T>(nodes: &[PresentationNode<T>]) -> BTreeMap<usize, Vec<usize>> {
    let mut children: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for node in nodes {
        if let Some(parent) = node.parent {
            children.entry(parent).or_default().push(node.node_index);
        }
    }
    children
}

/// Upward closure of a set of highlighted genes.
///
/// # Parameters
/// * `nodes` - the dendrogram node list.
/// * `highlighted_genes` - ids of the externally highlighted genes. Ids with no leaf in
///   the dendrogram are ignored.
///
/// # Returns
/// * The node indices of the highlighted leaves plus every ancestor all of whose direct
///   children are highlighted. The root index is included when both of its children
///   end up highlighted.
pub fn highlight_upward<T, S: AsRef<str>>(
    nodes: &[PresentationNode<T>],
    highlighted_genes: &[S],
) -> BTreeSet<usize> {
    let wanted: HashSet<&str> = highlighted_genes.iter().map(|id| id.as_ref()).collect();
    let children = children_by_parent(nodes);
    let parent_of: BTreeMap<usize, usize> = nodes
        .iter()
        .filter_map(|node| node.parent.map(|parent| (node.node_index, parent)))
        .collect();

    let mut highlighted: BTreeSet<usize> = nodes
        .iter()
        .filter(|node| node.gene_id().is_some_and(|id| wanted.contains(id)))
        .map(|node| node.node_index)
        .collect();

    let mut frontier: Vec<usize> = highlighted.iter().copied().collect();
    while !frontier.is_empty() {
        let candidates: BTreeSet<usize> = frontier
            .iter()
            .filter_map(|node_index| parent_of.get(node_index).copied())
            .filter(|parent| !highlighted.contains(parent))
            .collect();

        frontier = candidates
            .into_iter()
            .filter(|parent| {
                children.get(parent).is_some_and(|kids| {
                    kids.iter().all(|child| highlighted.contains(child))
                })
            })
            .collect();
        highlighted.extend(frontier.iter().copied());
    }
    highlighted
}

/// Downward closure of a set of selected nodes.
///
/// # Parameters
/// * `nodes` - the dendrogram node list.
/// * `root_index` - index of the root, which is not part of `nodes` but may be selected.
/// * `selected` - the selected (for instance clicked) node indices.
///
/// # Returns
/// * Every selected node and all of its descendants, with the gene ids found at the
///   leaves among them, or `AgnesError::UnknownNode` if a selected index is not part of
///   the dendrogram.
pub fn highlight_downward<T>(
    nodes: &[PresentationNode<T>],
    root_index: usize,
    selected: &[usize],
) -> Result<HighlightedGenes, AgnesError> {
    let known: HashSet<usize> = nodes.iter().map(|node| node.node_index).collect();
    if let Some(unknown) = selected
        .iter()
        .find(|node_index| **node_index != root_index && !known.contains(*node_index))
    {
        return Err(AgnesError::UnknownNode(*unknown));
    }

    let children = children_by_parent(nodes);
    let mut process_queue: VecDeque<usize> = selected.iter().copied().collect();
    let mut collected = BTreeSet::new();

    while let Some(node_index) = process_queue.pop_front() {
        if !collected.insert(node_index) {
            continue;
        }
        if let Some(kids) = children.get(&node_index) {
            process_queue.extend(kids.iter().copied());
        }
    }

    let mut subtree: Vec<&PresentationNode<T>> = nodes
        .iter()
        .filter(|node| collected.contains(&node.node_index))
        .collect();
    subtree.sort_by_key(|node| node.node_index);
    let genes = subtree
        .into_iter()
        .filter_map(|node| node.gene_id().map(String::from))
        .collect();

    Ok(HighlightedGenes {
        nodes: collected,
        genes,
    })
}
