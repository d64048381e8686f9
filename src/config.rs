use thiserror::Error;

use crate::data::model::Feature;

// ---------------------------------------------------------------------------
// Presentation configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("histogram bin count must be at least 1")]
    NoBins,
    #[error("slider step must be a positive number, got {0}")]
    InvalidStep(f64),
    #[error("feature {0} has more than one range control")]
    DuplicateRangeFeature(Feature),
}

/// Everything about the dashboard that is fixed at start-up.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Bins per histogram.
    pub histogram_bins: usize,
    /// Granularity of the range sliders.
    pub slider_step: f64,
    /// Features exposed through a range control, in panel order.
    pub range_features: Vec<Feature>,
    /// x / y of the 2D scatter.
    pub scatter_axes: [Feature; 2],
    /// x / y / z of the 3D scatter.
    pub scatter_3d_axes: [Feature; 3],
    pub chart_height: f32,
    pub table_max_height: f32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            window_size: [1280.0, 900.0],
            min_window_size: [720.0, 480.0],
            histogram_bins: 20,
            slider_step: 0.1,
            range_features: vec![Feature::Alcohol, Feature::MalicAcid],
            scatter_axes: [Feature::Alcohol, Feature::MalicAcid],
            scatter_3d_axes: [Feature::Alcohol, Feature::MalicAcid, Feature::Ash],
            chart_height: 320.0,
            table_max_height: 420.0,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.histogram_bins == 0 {
            return Err(ConfigError::NoBins);
        }
        if !(self.slider_step.is_finite() && self.slider_step > 0.0) {
            return Err(ConfigError::InvalidStep(self.slider_step));
        }
        for (i, feature) in self.range_features.iter().enumerate() {
            if self.range_features[..i].contains(feature) {
                return Err(ConfigError::DuplicateRangeFeature(*feature));
            }
        }
        Ok(())
    }
}
