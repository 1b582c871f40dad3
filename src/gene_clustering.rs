use crate::layout::{Dendrogram, LeafPayload};
use crate::partition::{partition_genes, GeneSeries};
use crate::{Agnes, AgnesError, AgnesHyperParams};
use num_traits::Float;
use serde::Serialize;
use std::collections::HashMap;

/// Output of one clustering run over a set of genes.
///
/// Serialises to `{ clusterNodes, order, withoutValues, constantValues }`, or to just
/// `{ withoutValues, constantValues }` when fewer than two genes were usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneClustering<T> {
    #[serde(flatten)]
    pub dendrogram: Option<Dendrogram<T>>,
    pub without_values: Vec<String>,
    pub constant_values: Vec<String>,
}

impl<T> GeneClustering<T> {
    /// False when there were not enough usable genes to build a tree. This is not an
    /// error: the partition buckets are still reported.
    pub fn is_clustered(&self) -> bool {
        self.dendrogram.is_some()
    }

    /// Gene ids in display row order, empty when not clustered.
    pub fn order(&self) -> &[String] {
        self.dendrogram
            .as_ref()
            .map(|dendrogram| dendrogram.order.as_slice())
            .unwrap_or(&[])
    }
}

/// Partitions the genes, clusters the usable ones and lays out the resulting tree.
///
/// # Parameters
/// * `genes` - one series per gene, all of the same length.
/// * `hyper_params` - distance metric, linkage and layout scale.
///
/// # Returns
/// * The dendrogram and partition buckets. Fewer than two usable genes produce no
///   dendrogram rather than an error. Usable series of different lengths are reported
///   as `AgnesError::WrongDimension`.
///
/// # Examples
/// ```
///use agnes::{cluster_genes, AgnesHyperParams, GeneSeries};
///
///let gene = |id: &str, series: Vec<f64>| GeneSeries {
///    gene_id: id.to_string(),
///    gene_name: None,
///    series,
///};
///let genes = vec![
///    gene("a", vec![0.0, 0.0, 1.0]),
///    gene("b", vec![0.0, 0.1, 1.0]),
///    gene("c", vec![5.0, 5.0, 5.0]),
///    gene("d", vec![9.0, 3.0, 1.0]),
///];
///let result = cluster_genes(&genes, &AgnesHyperParams::default()).unwrap();
///assert_eq!(vec!["c"], result.constant_values);
///assert_eq!(3, result.order().len());
/// ```
pub fn cluster_genes<T: Float>(
    genes: &[GeneSeries<T>],
    hyper_params: &AgnesHyperParams,
) -> Result<GeneClustering<T>, AgnesError> {
    let partition = partition_genes(genes);
    tracing::debug!(
        n_genes = genes.len(),
        usable = partition.usable.len(),
        without_values = partition.without_values.len(),
        constant_values = partition.constant_values.len(),
        "partitioned genes"
    );

    if partition.usable.len() < 2 {
        tracing::debug!("fewer than 2 usable genes, clustering not applicable");
        return Ok(GeneClustering {
            dendrogram: None,
            without_values: partition.without_values,
            constant_values: partition.constant_values,
        });
    }

    let mut by_id: HashMap<&str, &GeneSeries<T>> = HashMap::with_capacity(genes.len());
    for gene in genes {
        by_id.entry(gene.gene_id.as_str()).or_insert(gene);
    }
    let usable: Vec<&GeneSeries<T>> = partition
        .usable
        .iter()
        .filter_map(|gene_id| by_id.get(gene_id.as_str()).copied())
        .collect();

    let data: Vec<Vec<T>> = usable.iter().map(|gene| gene.series.clone()).collect();
    let tree = Agnes::new(&data, hyper_params.clone()).cluster()?;

    let payloads = usable
        .into_iter()
        .map(|gene| LeafPayload {
            gene_id: gene.gene_id.clone(),
            gene_name: gene.gene_name.clone(),
            expressions: gene.series.clone(),
        })
        .collect();
    let dendrogram = Dendrogram::from_tree(&tree, hyper_params.scale(), payloads)?;

    Ok(GeneClustering {
        dendrogram: Some(dendrogram),
        without_values: partition.without_values,
        constant_values: partition.constant_values,
    })
}
