//! Pipeline Module: Point Cloud → Landmarks → Witness Filtration → Barcodes
//!
//! Each stage borrows the output of the previous one and returns a new
//! immutable value; nothing is mutated after construction. Parameters are
//! validated before any work starts, so a bad characteristic fails before
//! landmark selection.

mod config;

pub use config::PipelineConfig;

use tracing::{info, warn};

use crate::error::Result;
use crate::geometry::PointCloud;
use crate::landmarks::{LandmarkSelector, LandmarkSet};
use crate::persistence::{BarcodeCollection, PersistenceEngine};
use crate::topology::{Filtration, WitnessFiltrationBuilder};

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub landmarks: LandmarkSet,
    /// Scale ceiling the filtration was built with
    pub max_filtration_value: f64,
    pub filtration: Filtration,
    pub barcodes: BarcodeCollection,
}

/// Landmark-witness persistence driver
#[derive(Debug, Clone)]
pub struct WitnessPipeline {
    config: PipelineConfig,
}

impl WitnessPipeline {
    /// Validate `config` and wrap it
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage on `cloud`
    pub fn run(&self, cloud: &PointCloud) -> Result<PipelineOutput> {
        let config = &self.config;
        let field = config.field()?;

        let landmarks = config
            .landmarks
            .select(cloud, &config.metric, config.num_landmarks)?;

        let max_filtration_value = config
            .max_filtration_value
            .unwrap_or(landmarks.max_landmark_distance() * config.filtration_ratio);
        if max_filtration_value == 0.0 {
            warn!("scale ceiling is 0; only simplices witnessed at 0 will enter");
        }
        info!(
            points = cloud.len(),
            landmarks = landmarks.len(),
            cover_radius = landmarks.max_landmark_distance(),
            max_filtration_value,
            "landmarks selected"
        );

        let filtration = WitnessFiltrationBuilder::new(
            config.max_dimension,
            max_filtration_value,
            config.num_divisions,
            config.mode,
        )?
        .with_lazy_nu(config.lazy_nu)
        .build(cloud, &landmarks, &config.metric)?;

        let barcodes = PersistenceEngine::new()
            .keep_zero_length(config.keep_zero_length)
            .compute_intervals(&filtration, field)?;

        Ok(PipelineOutput {
            landmarks,
            max_filtration_value,
            filtration,
            barcodes,
        })
    }
}

/// Run the pipeline once and keep only the barcodes
pub fn compute_barcodes(cloud: &PointCloud, config: &PipelineConfig) -> Result<BarcodeCollection> {
    WitnessPipeline::new(config.clone())?
        .run(cloud)
        .map(|output| output.barcodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::datasets;
    use ndarray::array;

    #[test]
    fn test_bad_characteristic_fails_before_selection() {
        let config = PipelineConfig {
            characteristic: 4,
            num_landmarks: 1000,
            ..Default::default()
        };
        let err = WitnessPipeline::new(config).unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
    }

    #[test]
    fn test_too_many_landmarks() {
        let cloud = PointCloud::new(array![[0.0], [1.0]]).unwrap();
        let config = PipelineConfig { num_landmarks: 3, ..Default::default() };
        let err = compute_barcodes(&cloud, &config).unwrap_err();
        assert_eq!(err.kind(), "InvalidParameter");
    }

    #[test]
    fn test_circle_has_one_long_loop() {
        let cloud = datasets::noisy_circle(200, 1.0, 0.02, 11).unwrap();
        let config = PipelineConfig {
            num_landmarks: 30,
            filtration_ratio: 2.0,
            num_divisions: 40,
            ..Default::default()
        };
        let output = WitnessPipeline::new(config).unwrap().run(&cloud).unwrap();

        assert_eq!(output.landmarks.len(), 30);
        assert_eq!(output.barcodes.essential(0).len(), 1);
        let longest = output.barcodes.longest_finite(1).map(|i| i.persistence());
        let essential_loops = output.barcodes.essential(1).len();
        assert!(
            essential_loops == 1 || longest.is_some_and(|p| p > output.max_filtration_value / 4.0),
            "no dominant loop: {:?}",
            output.barcodes.dim(1)
        );
    }
}
