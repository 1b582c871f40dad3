use crate::AgnesError;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Possible distance measures that can be used by AGNES when building the initial
/// distance matrix between observations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// L2 norm of the difference vector.
    Euclidean,
    /// `1 - r` where `r` is the Pearson correlation, rounded to 5 decimal places.
    Pearson,
    /// Spearman rank distance, `6 * sum(d^2) / (n * (n^2 - 1))`.
    Spearman,
}

impl DistanceMetric {
    fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Pearson => "pearson",
            Self::Spearman => "spearman",
        }
    }
}

impl Display for DistanceMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = AgnesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            _ => Err(AgnesError::UnknownDistanceMetric(s.to_string())),
        }
    }
}

pub(crate) fn get_dist_func<T: Float>(metric: &DistanceMetric) -> fn(&[T], &[T]) -> T {
    match metric {
        DistanceMetric::Euclidean => euclidean_distance,
        DistanceMetric::Pearson => pearson_distance,
        DistanceMetric::Spearman => spearman_distance,
    }
}

/// Straight line distance between two vectors.
pub fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| ((*x) - (*y)) * ((*x) - (*y)))
        .fold(T::zero(), std::ops::Add::add)
        .sqrt()
}

/// One minus the Pearson correlation of the two vectors, rounded to 5 decimal places.
///
/// A constant vector has no defined correlation; the distance is then `0` so that the
/// function stays total over finite input.
pub fn pearson_distance<T: Float>(a: &[T], b: &[T]) -> T {
    let n = a.len().min(b.len());
    if n == 0 {
        return T::zero();
    }
    let mean_a = mean(&a[..n]);
    let mean_b = mean(&b[..n]);

    let (mut covariance, mut var_a, mut var_b) = (T::zero(), T::zero(), T::zero());
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = *x - mean_a;
        let dy = *y - mean_b;
        covariance = covariance + dx * dy;
        var_a = var_a + dx * dx;
        var_b = var_b + dy * dy;
    }

    let denominator = var_a.sqrt() * var_b.sqrt();
    if denominator == T::zero() {
        return T::zero();
    }
    let correlation = covariance / denominator;
    round_to_places(T::one() - correlation, 5).max(T::zero())
}

/// Spearman rank distance of the two vectors.
///
/// Tied values are ranked by first occurrence, so equal entries receive consecutive
/// ranks in input order rather than their averaged (fractional) rank.
pub fn spearman_distance<T: Float>(a: &[T], b: &[T]) -> T {
    let n = a.len().min(b.len());
    if n < 2 {
        return T::zero();
    }
    let ranks_a = ordinal_ranks(&a[..n]);
    let ranks_b = ordinal_ranks(&b[..n]);

    let sum_sq_diff = ranks_a
        .iter()
        .zip(ranks_b.iter())
        .map(|(ra, rb)| {
            let d = *ra as f64 - *rb as f64;
            d * d
        })
        .sum::<f64>();
    let n = n as f64;
    let distance = 6.0 * sum_sq_diff / (n * (n * n - 1.0));
    T::from(distance).unwrap_or_else(T::zero)
}

fn mean<T: Float>(values: &[T]) -> T {
    let sum = values.iter().fold(T::zero(), |acc, v| acc + *v);
    sum / T::from(values.len()).unwrap_or_else(T::one)
}

fn round_to_places<T: Float>(value: T, places: i32) -> T {
    let factor = T::from(10f64.powi(places)).unwrap_or_else(T::one);
    (value * factor).round() / factor
}

/// 1-based ranks; a stable sort keeps ties in input order.
fn ordinal_ranks<T: Float>(values: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].partial_cmp(&values[j]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0; values.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        ranks[idx] = rank + 1;
    }
    ranks
}
