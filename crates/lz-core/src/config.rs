//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{LzError, LzResult};

/// Minimum fill percentage a truck must reach before it is chosen.
pub const DEFAULT_FILL_THRESHOLD: f64 = 80.0;

/// How much of a truck the engine considers free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityMode {
    /// Compare batches against the full truck volume, ignoring earlier loads.
    #[default]
    Nominal,
    /// Subtract the volume already loaded before checking whether a batch fits.
    Residual,
}

/// Configuration for the assignment engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fill percentage (0, 100] a candidate truck must reach.
    pub fill_threshold: f64,
    /// Free space model.
    pub capacity: CapacityMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fill_threshold: DEFAULT_FILL_THRESHOLD,
            capacity: CapacityMode::Nominal,
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill threshold.
    pub fn with_fill_threshold(mut self, threshold: f64) -> Self {
        self.fill_threshold = threshold;
        self
    }

    /// Set the capacity mode.
    pub fn with_capacity(mut self, capacity: CapacityMode) -> Self {
        self.capacity = capacity;
        self
    }

    /// Reject thresholds outside (0, 100].
    pub fn validate(&self) -> LzResult<()> {
        let t = self.fill_threshold;
        if t.is_finite() && t > 0.0 && t <= 100.0 {
            Ok(())
        } else {
            Err(LzError::InvalidConfig(format!(
                "fill threshold must be in (0, 100], got {t}"
            )))
        }
    }
}
