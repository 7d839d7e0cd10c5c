//! Engine configuration surface exposed to callers.

use crate::error::EtiquetaError;
use serde::{Deserialize, Serialize};

fn default_dpi() -> f32 {
    300.0
}

fn default_zoom_cap() -> f32 {
    8.0
}

fn default_batch_max() -> usize {
    1000
}

/// Caller-facing knobs: reference dpi for raster output, the hard cap on
/// preview zoom (prevents runaway canvas sizes), and the per-call batch
/// quantity ceiling. Larger runs must be split by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    #[serde(default = "default_zoom_cap")]
    pub zoom_cap_max: f32,
    #[serde(default = "default_batch_max")]
    pub batch_quantity_max: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            zoom_cap_max: default_zoom_cap(),
            batch_quantity_max: default_batch_max(),
        }
    }
}

impl EngineConfig {
    /// Validate before any layout or rendering runs.
    pub fn validate(&self) -> Result<(), EtiquetaError> {
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(EtiquetaError::Config(format!(
                "dpi must be a positive finite number, got {}",
                self.dpi
            )));
        }
        if !self.zoom_cap_max.is_finite() || self.zoom_cap_max <= 0.0 {
            return Err(EtiquetaError::Config(format!(
                "zoom_cap_max must be a positive finite number, got {}",
                self.zoom_cap_max
            )));
        }
        if self.batch_quantity_max == 0 {
            return Err(EtiquetaError::Config(
                "batch_quantity_max must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
