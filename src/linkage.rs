use crate::AgnesError;
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The linkage function deciding the distance between a freshly merged cluster and
/// every other remaining cluster.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Nearest member distance, `min(d_ki, d_kj)`.
    Single,
    /// Size weighted mean of the two merged distances (UPGMA).
    Average,
    /// Farthest member distance, `max(d_ki, d_kj)`.
    Complete,
}

impl Linkage {
    /// Lance-Williams update for the distance between cluster `k` and the union of
    /// clusters `i` and `j`, holding `size_i` and `size_j` observations.
    pub(crate) fn merged_distance<T: Float>(
        &self,
        d_ki: T,
        d_kj: T,
        size_i: usize,
        size_j: usize,
    ) -> T {
        match *self {
            Self::Single => d_ki.min(d_kj),
            Self::Complete => d_ki.max(d_kj),
            Self::Average => {
                let n_i = T::from(size_i).unwrap_or_else(T::one);
                let n_j = T::from(size_j).unwrap_or_else(T::one);
                let total = n_i + n_j;
                (n_i / total) * d_ki + (n_j / total) * d_kj
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Average => "average",
            Self::Complete => "complete",
        }
    }
}

impl Display for Linkage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Linkage {
    type Err = AgnesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "average" => Ok(Self::Average),
            "complete" => Ok(Self::Complete),
            _ => Err(AgnesError::UnknownLinkage(s.to_string())),
        }
    }
}
