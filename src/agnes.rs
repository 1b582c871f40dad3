use crate::data_wrappers::MergeTree;
use crate::distance::get_dist_func;
use crate::validation::DataValidator;
use crate::{AgnesError, AgnesHyperParams};
use num_traits::Float;

type DistanceMatrix<T> = Vec<Vec<T>>;

/// The AGNES (agglomerative nesting) hierarchical clustering algorithm. Generic over
/// floating point numeric types.
#[derive(Debug, Clone, PartialEq)]
pub struct Agnes<'a, T> {
    data: &'a [Vec<T>],
    n_samples: usize,
    hp: AgnesHyperParams,
}

impl<'a, T: Float> Agnes<'a, T> {
    /// Creates an instance of the AGNES clustering model using a custom hyper parameter
    /// configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the observations to cluster. The vectors must all be of
    ///            the same length and contain only finite values.
    /// * `hyper_params` - the hyper parameter configuration.
    ///
    /// # Examples
    /// ```
    ///use agnes::{Agnes, AgnesHyperParams, DistanceMetric, Linkage};
    ///
    ///let data: Vec<Vec<f64>> = vec![
    ///    vec![1.0, 2.0, 3.0],
    ///    vec![2.0, 4.0, 6.5],
    ///    vec![3.0, 1.0, 0.0],
    ///];
    ///let config = AgnesHyperParams::builder()
    ///    .dist_metric(DistanceMetric::Pearson)
    ///    .linkage(Linkage::Complete)
    ///    .build();
    ///let clusterer = Agnes::new(&data, config);
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: AgnesHyperParams) -> Self {
        Agnes {
            data,
            n_samples: data.len(),
            hp: hyper_params,
        }
    }

    /// Creates an instance of the AGNES clustering model using the default hyper
    /// parameters: Euclidean distance and average linkage.
    pub fn default_hyper_params(data: &'a [Vec<T>]) -> Agnes<'a, T> {
        Agnes::new(data, AgnesHyperParams::default())
    }

    pub fn hyper_params(&self) -> &AgnesHyperParams {
        &self.hp
    }

    /// Performs clustering on the observations passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the binary merge tree with one leaf per
    ///   observation and one internal node per merge. An error is returned if fewer than
    ///   two observations were passed, if their lengths are mismatched or if any of them
    ///   contains non-finite values.
    ///
    /// # Examples
    /// ```
    ///use agnes::Agnes;
    ///
    ///let data: Vec<Vec<f64>> = vec![
    ///    vec![0.0, 0.0],
    ///    vec![0.0, 0.0],
    ///    vec![10.0, 10.0],
    ///];
    ///let tree = Agnes::default_hyper_params(&data).cluster().unwrap();
    ///let merges = tree.merges();
    ///assert_eq!(0.0, merges[0].height);
    ///assert!((merges[1].height - 200f64.sqrt()).abs() < 1e-9);
    /// ```
    pub fn cluster(&self) -> Result<MergeTree<T>, AgnesError> {
        DataValidator::new(self.data).validate_input_data()?;
        tracing::debug!(
            n_samples = self.n_samples,
            dist_metric = %self.hp.dist_metric,
            linkage = %self.hp.linkage,
            "agglomerating observations"
        );

        let mut dist_matrix = self.distance_matrix();
        let mut tree = MergeTree::with_leaves(self.n_samples);
        let mut clusters: Vec<usize> = (0..self.n_samples).collect();

        while clusters.len() > 1 {
            let (row, column, height) = self.find_closest_pair(&dist_matrix);
            let (row_node, column_node) = (clusters[row], clusters[column]);
            let (row_size, column_size) = (tree.size(row_node), tree.size(column_node));
            let merged = tree.push_merge(row_node, column_node, height);
            tracing::trace!(
                node = merged,
                left = row_node,
                right = column_node,
                height = height.to_f64(),
                "merged clusters"
            );

            dist_matrix =
                self.reduce_distance_matrix(&dist_matrix, row, column, row_size, column_size);
            clusters = clusters
                .iter()
                .enumerate()
                .filter(|(k, _)| *k != row && *k != column)
                .map(|(_, node_id)| *node_id)
                .chain(std::iter::once(merged))
                .collect();
        }

        Ok(tree)
    }

    /// The full symmetric distance matrix between the observations, with one call of the
    /// distance metric per unordered pair.
    pub fn distance_matrix(&self) -> Vec<Vec<T>> {
        let dist_func = get_dist_func(&self.hp.dist_metric);
        let mut dist_matrix = vec![vec![T::zero(); self.n_samples]; self.n_samples];
        for i in 1..self.n_samples {
            for j in 0..i {
                let dist = dist_func(&self.data[i], &self.data[j]);
                dist_matrix[i][j] = dist;
                dist_matrix[j][i] = dist;
            }
        }
        dist_matrix
    }

    // Scans the lower triangle row by row. Only a strictly smaller distance replaces the
    // current pair, so the first pair found wins ties.
    fn find_closest_pair(&self, dist_matrix: &DistanceMatrix<T>) -> (usize, usize, T) {
        let mut closest = (1, 0, dist_matrix[1][0]);
        for (i, row) in dist_matrix.iter().enumerate().skip(1) {
            for (j, dist) in row.iter().take(i).enumerate() {
                if *dist < closest.2 {
                    closest = (i, j, *dist);
                }
            }
        }
        closest
    }

    // Drops the two merged clusters and appends their union as the last row/column.
    fn reduce_distance_matrix(
        &self,
        dist_matrix: &DistanceMatrix<T>,
        row: usize,
        column: usize,
        row_size: usize,
        column_size: usize,
    ) -> DistanceMatrix<T> {
        let remaining: Vec<usize> = (0..dist_matrix.len())
            .filter(|k| *k != row && *k != column)
            .collect();
        let merged = remaining.len();

        let mut reduced = vec![vec![T::zero(); merged + 1]; merged + 1];
        for (a, &old_a) in remaining.iter().enumerate() {
            for (b, &old_b) in remaining.iter().enumerate() {
                reduced[a][b] = dist_matrix[old_a][old_b];
            }
            let dist = self.hp.linkage.merged_distance(
                dist_matrix[old_a][row],
                dist_matrix[old_a][column],
                row_size,
                column_size,
            );
            reduced[a][merged] = dist;
            reduced[merged][a] = dist;
        }
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DistanceMetric, Linkage};

    fn agnes_with(data: &[Vec<f64>], linkage: Linkage) -> Agnes<'_, f64> {
        let hp = AgnesHyperParams::builder().linkage(linkage).build();
        Agnes::new(data, hp)
    }

    #[test]
    fn distance_matrix_is_symmetric() {
        let data = vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![6.0, 8.0]];
        let matrix = Agnes::default_hyper_params(&data).distance_matrix();
        assert_eq!(vec![0.0, 5.0, 10.0], matrix[0]);
        assert_eq!(vec![5.0, 0.0, 5.0], matrix[1]);
        assert_eq!(vec![10.0, 5.0, 0.0], matrix[2]);
    }

    #[test]
    fn ties_keep_first_pair_in_scan_order() {
        let data = vec![vec![0.0], vec![1.0], vec![2.0]];
        let clusterer = Agnes::default_hyper_params(&data);
        let matrix = clusterer.distance_matrix();
        // d(1,0) == d(2,1) == 1, row 1 is scanned first
        assert_eq!((1, 0, 1.0), clusterer.find_closest_pair(&matrix));
    }

    #[test]
    fn reduced_matrix_appends_merged_cluster() {
        let data = vec![vec![0.0], vec![1.0], vec![5.0], vec![9.0]];
        let clusterer = agnes_with(&data, Linkage::Single);
        let matrix = clusterer.distance_matrix();
        let reduced = clusterer.reduce_distance_matrix(&matrix, 1, 0, 1, 1);
        // Remaining clusters 2 and 3, then the merged {0, 1}
        assert_eq!(vec![0.0, 4.0, 4.0], reduced[0]);
        assert_eq!(vec![4.0, 0.0, 8.0], reduced[1]);
        assert_eq!(vec![4.0, 8.0, 0.0], reduced[2]);
    }

    #[test]
    fn linkages_differ_on_merge_heights() {
        let data = vec![vec![0.0], vec![1.0], vec![5.0]];
        let heights = |linkage| {
            agnes_with(&data, linkage)
                .cluster()
                .unwrap()
                .merges()
                .iter()
                .map(|merge| merge.height)
                .collect::<Vec<_>>()
        };
        assert_eq!(vec![1.0, 4.0], heights(Linkage::Single));
        assert_eq!(vec![1.0, 5.0], heights(Linkage::Complete));
        assert_eq!(vec![1.0, 4.5], heights(Linkage::Average));
    }

    #[test]
    fn average_linkage_weights_by_cluster_size() {
        let data = vec![vec![0.0], vec![0.0], vec![10.0], vec![22.0]];
        let tree = agnes_with(&data, Linkage::Average).cluster().unwrap();
        let merges = tree.merges();
        assert_eq!(3, merges.len());
        assert_eq!(10.0, merges[1].height);
        assert_eq!(3, merges[1].size);
        // 22 against {0, 0, 10}: (2/3) * 22 + (1/3) * 12, not the plain mean of 17
        assert!((merges[2].height - 56.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_clusters_correlated_profiles() {
        let data = vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![4.0, 3.0, 2.0, 1.0],
            vec![2.0, 4.0, 6.0, 8.1],
        ];
        let hp = AgnesHyperParams::builder()
            .dist_metric(DistanceMetric::Pearson)
            .build();
        let tree = Agnes::new(&data, hp).cluster().unwrap();
        assert_eq!(Some((2, 0)), tree.children(3));
    }

    #[test]
    fn too_few_observations() {
        let data = vec![vec![1.0, 2.0]];
        let result = Agnes::default_hyper_params(&data).cluster();
        assert_eq!(Err(AgnesError::TooFewObservations(1)), result);
    }
}
