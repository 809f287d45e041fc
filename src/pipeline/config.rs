//! Pipeline configuration
//!
//! Every field has a default, so a JSON document only needs the values it
//! changes. The scale ceiling is `max_landmark_distance × filtration_ratio`
//! unless `max_filtration_value` pins it explicitly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TdaError};
use crate::geometry::Metric;
use crate::landmarks::LandmarkStrategy;
use crate::persistence::CoefficientField;
use crate::topology::{WitnessMode, DEFAULT_LAZY_NU};

/// Parameters of one landmark-witness persistence run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 0 for rational coefficients, otherwise a prime modulus
    pub characteristic: u64,
    pub num_landmarks: usize,
    /// Largest simplex dimension built
    pub max_dimension: usize,
    /// Fraction of the landmark cover radius used as the scale ceiling
    pub filtration_ratio: f64,
    pub num_divisions: usize,
    pub mode: WitnessMode,
    /// Nearest-landmark offset for lazy edges
    pub lazy_nu: usize,
    pub metric: Metric,
    pub landmarks: LandmarkStrategy,
    /// Absolute scale ceiling, overriding `filtration_ratio`
    pub max_filtration_value: Option<f64>,
    /// Report intervals with birth == death
    pub keep_zero_length: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            characteristic: 0,
            num_landmarks: 100,
            max_dimension: 2,
            filtration_ratio: 0.4,
            num_divisions: 20,
            mode: WitnessMode::Strict,
            lazy_nu: DEFAULT_LAZY_NU,
            metric: Metric::Euclidean,
            landmarks: LandmarkStrategy::default(),
            max_filtration_value: None,
            keep_zero_length: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TdaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Coefficient field named by `characteristic`
    pub fn field(&self) -> Result<CoefficientField> {
        CoefficientField::from_characteristic(self.characteristic)
    }

    /// Reject values no run could use
    pub fn validate(&self) -> Result<()> {
        self.field()?;
        if self.num_landmarks == 0 {
            return Err(TdaError::invalid("num_landmarks", "must be at least 1"));
        }
        if !self.filtration_ratio.is_finite() || self.filtration_ratio < 0.0 {
            return Err(TdaError::invalid(
                "filtration_ratio",
                format!("must be finite and non-negative, got {}", self.filtration_ratio),
            ));
        }
        if self.num_divisions == 0 {
            return Err(TdaError::invalid("num_divisions", "must be at least 1"));
        }
        if let Some(value) = self.max_filtration_value {
            if !value.is_finite() || value < 0.0 {
                return Err(TdaError::invalid(
                    "max_filtration_value",
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}
