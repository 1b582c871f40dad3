use crate::distance::DistanceMetric;
use crate::error::AgnesError;
use crate::layout::{valid_scale, DEFAULT_SCALE};
use crate::linkage::Linkage;

// Defaults for parameters
const DISTANCE_METRIC_DEFAULT: DistanceMetric = DistanceMetric::Euclidean;
const LINKAGE_DEFAULT: Linkage = Linkage::Average;
const SCALE_DEFAULT: f64 = DEFAULT_SCALE;

/// A wrapper around the parameters used in AGNES clustering and dendrogram layout.
/// Only use if you want to change them. Otherwise use `Agnes::default_hyper_params()` to
/// instantiate the model with the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AgnesHyperParams {
    pub(crate) dist_metric: DistanceMetric,
    pub(crate) linkage: Linkage,
    pub(crate) scale: f64,
}

/// Builder object to set custom hyper parameters.
pub struct HyperParamBuilder {
    dist_metric: Option<DistanceMetric>,
    linkage: Option<Linkage>,
    scale: Option<f64>,
}

impl Default for AgnesHyperParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AgnesHyperParams {
    /// Enters the builder pattern, allowing custom hyper parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn builder() -> HyperParamBuilder {
        HyperParamBuilder {
            dist_metric: None,
            linkage: None,
            scale: None,
        }
    }

    /// Builds a configuration from the names a caller selected, e.g. `"pearson"` and
    /// `"complete"`, with the default layout scale. The linkage name is checked first.
    ///
    /// # Returns
    /// * the configuration, or `AgnesError::UnknownLinkage` /
    ///   `AgnesError::UnknownDistanceMetric` for a name that is not recognised.
    pub fn from_names(dist_metric: &str, linkage: &str) -> Result<Self, AgnesError> {
        let linkage: Linkage = linkage.parse()?;
        let dist_metric: DistanceMetric = dist_metric.parse()?;
        Ok(Self::builder()
            .dist_metric(dist_metric)
            .linkage(linkage)
            .build())
    }

    pub fn dist_metric(&self) -> DistanceMetric {
        self.dist_metric
    }

    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Horizontal pixels per unit of merge height in the dendrogram layout.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl HyperParamBuilder {
    /// Sets the distance metric used to build the initial distance matrix between
    /// observations. Defaults to Euclidean.
    ///
    /// # Parameters
    /// * dist_metric - the distance metric
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> HyperParamBuilder {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Sets the linkage function, which decides the distance between a merged cluster
    /// and the remaining clusters. Defaults to average.
    ///
    /// # Parameters
    /// * linkage - the linkage function
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn linkage(mut self, linkage: Linkage) -> HyperParamBuilder {
        self.linkage = Some(linkage);
        self
    }

    /// Sets the layout scale: the x coordinate of a node is
    /// `(root height - node height) * scale`. Must be finite and positive. Defaults to 100.
    ///
    /// # Parameters
    /// * scale - the layout scale
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn scale(mut self, scale: f64) -> HyperParamBuilder {
        self.scale = Some(valid_scale(scale));
        self
    }

    /// Finishes the building of the hyper parameter configuration. A call to this method is
    /// required to exit the builder pattern and complete the construction of the hyper parameters.
    ///
    /// # Returns
    /// * The completed AGNES hyper parameter configuration.
    pub fn build(self) -> AgnesHyperParams {
        AgnesHyperParams {
            dist_metric: self.dist_metric.unwrap_or(DISTANCE_METRIC_DEFAULT),
            linkage: self.linkage.unwrap_or(LINKAGE_DEFAULT),
            scale: self.scale.unwrap_or(SCALE_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let hp = AgnesHyperParams::default();
        assert_eq!(DistanceMetric::Euclidean, hp.dist_metric());
        assert_eq!(Linkage::Average, hp.linkage());
        assert_eq!(100.0, hp.scale());
    }

    #[test]
    fn from_names() {
        let hp = AgnesHyperParams::from_names("Spearman", "single").unwrap();
        assert_eq!(DistanceMetric::Spearman, hp.dist_metric());
        assert_eq!(Linkage::Single, hp.linkage());
        assert_eq!(
            Err(AgnesError::UnknownLinkage(String::from("ward"))),
            AgnesHyperParams::from_names("bogus", "ward")
        );
        assert!(matches!(
            AgnesHyperParams::from_names("bogus", "average"),
            Err(AgnesError::UnknownDistanceMetric(..))
        ));
    }

    #[test]
    fn invalid_scale_falls_back_to_default() {
        let hp = AgnesHyperParams::builder().scale(-3.0).build();
        assert_eq!(SCALE_DEFAULT, hp.scale());
        let hp = AgnesHyperParams::builder().scale(f64::NAN).build();
        assert_eq!(SCALE_DEFAULT, hp.scale());
        let hp = AgnesHyperParams::builder()
            .scale(10.0)
            .linkage(Linkage::Single)
            .dist_metric(DistanceMetric::Spearman)
            .build();
        assert_eq!(10.0, hp.scale());
        assert_eq!(Linkage::Single, hp.linkage());
        assert_eq!(DistanceMetric::Spearman, hp.dist_metric());
    }
}
