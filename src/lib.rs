//! Agglomerative hierarchical clustering ("AGNES") of expression series, with dendrogram
//! layout and highlight propagation. Generic over floating point numeric types.
//!
//! A clustering run goes through these steps:
//!  1. Genes are partitioned into those without values (empty, missing or non-finite
//!     entries), those with constant values and the usable rest;
//!  2. A full distance matrix is computed between the usable series (Euclidean, Pearson
//!     or Spearman distance); and
//!  3. The closest pair of clusters is merged again and again, with the distance from
//!     the merged cluster to the others given by the linkage function (single, average
//!     or complete), until a single root remains.
//!
//! The merge tree is then flattened into a list of drawable nodes: leaves are placed on
//! rows in the (reversed) depth first leaf order and every node is placed horizontally by
//! its merge height. Highlighting a full set of sibling genes highlights their parent,
//! and selecting an internal node selects every gene beneath it.
//!
//! Every run is a pure, single threaded recomputation from scratch. The agglomeration
//! is `O(m³)` in the number of usable genes.
//!
//! # Examples
//! ```
//!use agnes::{cluster_genes, AgnesHyperParams, GeneSeries};
//!
//!let genes: Vec<GeneSeries<f64>> = vec![
//!    GeneSeries { gene_id: "g1".into(), gene_name: None, series: vec![0.0, 1.0] },
//!    GeneSeries { gene_id: "g2".into(), gene_name: None, series: vec![0.0, 1.0] },
//!    GeneSeries { gene_id: "g3".into(), gene_name: None, series: vec![10.0, 11.0] },
//!];
//!let hp = AgnesHyperParams::from_names("euclidean", "average").unwrap();
//!let result = cluster_genes(&genes, &hp).unwrap();
//!let dendrogram = result.dendrogram.unwrap();
//!assert_eq!(4, dendrogram.nodes.len());
//!assert_eq!(vec!["g3", "g1", "g2"], dendrogram.order);
//! ```
//!
//! # References
//! * [Kaufman, L.; Rousseeuw, P.J. Finding Groups in Data: An Introduction to Cluster Analysis.](https://onlinelibrary.wiley.com/doi/book/10.1002/9780470316801)
//! * [Lance, G.N.; Williams, W.T. A general theory of classificatory sorting strategies.](https://academic.oup.com/comjnl/article/9/4/373/390598)

pub use crate::agnes::Agnes;
pub use crate::data_wrappers::{Merge, MergeNode, MergeTree};
pub use crate::distance::{euclidean_distance, pearson_distance, spearman_distance, DistanceMetric};
pub use crate::error::AgnesError;
pub use crate::gene_clustering::{cluster_genes, GeneClustering};
pub use crate::highlight::{highlight_downward, highlight_upward, HighlightedGenes};
pub use crate::hyper_parameters::{AgnesHyperParams, HyperParamBuilder};
pub use crate::layout::{layout_tree, Dendrogram, LeafPayload, NodePosition, PresentationNode};
pub use crate::linkage::Linkage;
pub use crate::partition::{
    classify, group_by_gene, partition_genes, ExpressionRecord, GeneSeries, Partition, Validity,
};

mod agnes;
mod data_wrappers;
mod distance;
mod error;
mod gene_clustering;
mod highlight;
mod hyper_parameters;
mod layout;
mod linkage;
mod partition;
mod validation;
