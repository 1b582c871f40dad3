use thiserror::Error;

/// Possible errors that arise from invalid AGNES input data or configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgnesError {
    /// Agglomeration needs at least two observations.
    #[error("At least 2 observations are required for clustering, got {0}")]
    TooFewObservations(usize),

    #[error("Input vectors have mismatched dimensions: {0}")]
    WrongDimension(String),

    #[error("Non finite value: {0}")]
    NonFiniteValue(String),

    /// The linkage name is not one of single, average or complete.
    #[error("Undefined linkage method: {0}")]
    UnknownLinkage(String),

    #[error("Undefined distance measure: {0}")]
    UnknownDistanceMetric(String),

    /// A highlight query named a node index that is not part of the tree.
    #[error("No node with index {0} in the dendrogram")]
    UnknownNode(usize),
}
