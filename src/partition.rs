use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The expression series of one gene across samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneSeries<T> {
    pub gene_id: String,
    #[serde(default)]
    pub gene_name: Option<String>,
    pub series: Vec<T>,
}

/// One measured (or missing) expression value, as delivered by the data layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionRecord<T> {
    pub gene_id: String,
    #[serde(default)]
    pub gene_name: Option<String>,
    pub value: Option<T>,
}

/// Which bucket a gene's series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Empty, or contains a missing or non-finite value.
    WithoutValues,
    /// Every entry is the same number.
    Constant,
    Usable,
}

/// Gene ids split by whether their series can be clustered. Each bucket keeps the input
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub without_values: Vec<String>,
    pub constant_values: Vec<String>,
    #[serde(skip)]
    pub usable: Vec<String>,
}

impl<T: Float> GeneSeries<T> {
    pub fn validity(&self) -> Validity {
        classify(&self.series)
    }
}

pub fn classify<T: Float>(series: &[T]) -> Validity {
    match series.first() {
        None => Validity::WithoutValues,
        Some(_) if series.iter().any(|value| !value.is_finite()) => Validity::WithoutValues,
        Some(first) if series.iter().all(|value| value == first) => Validity::Constant,
        Some(_) => Validity::Usable,
    }
}

/// Groups flat records into one series per gene, in the order genes are first seen.
/// A missing value becomes NaN, which later sorts the gene into `without_values`.
pub fn group_by_gene<T, I>(records: I) -> Vec<GeneSeries<T>>
where
    T: Float,
    I: IntoIterator<Item = ExpressionRecord<T>>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut genes: Vec<GeneSeries<T>> = Vec::new();

    for record in records {
        let value = record.value.unwrap_or_else(T::nan);
        match positions.get(&record.gene_id) {
            Some(&position) => {
                let gene = &mut genes[position];
                gene.series.push(value);
                if gene.gene_name.is_none() {
                    gene.gene_name = record.gene_name;
                }
            }
            None => {
                positions.insert(record.gene_id.clone(), genes.len());
                genes.push(GeneSeries {
                    gene_id: record.gene_id,
                    gene_name: record.gene_name,
                    series: vec![value],
                });
            }
        }
    }
    genes
}

/// Sorts genes into the three validity buckets. Gene ids are expected to be unique; a
/// repeated id is only classified on its first occurrence.
pub fn partition_genes<T: Float>(genes: &[GeneSeries<T>]) -> Partition {
    let mut seen: HashSet<&str> = HashSet::with_capacity(genes.len());
    let mut partition = Partition::default();

    for gene in genes {
        if !seen.insert(gene.gene_id.as_str()) {
            tracing::warn!(gene_id = %gene.gene_id, "duplicate gene id ignored");
            continue;
        }
        let bucket = match gene.validity() {
            Validity::WithoutValues => &mut partition.without_values,
            Validity::Constant => &mut partition.constant_values,
            Validity::Usable => &mut partition.usable,
        };
        bucket.push(gene.gene_id.clone());
    }
    partition
}
