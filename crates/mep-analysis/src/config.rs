//! Configuration for the detection pipeline

use mep_core::{MepError, MepResult};
use serde::{Deserialize, Serialize};

/// Tunable parameters of the detection pipeline
///
/// Defaults reproduce the recruitment-curve acquisition setup: a 0.05 mV
/// prominence threshold and a ±50-sample amplitude window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum peak prominence (mV) for a deflection to qualify
    pub prominence_threshold: f32,
    /// Half-width, in samples, of the amplitude window around the MEP peak
    pub mep_window_half_width: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            prominence_threshold: 0.05,
            mep_window_half_width: 50,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration values
    pub fn validate(&self) -> MepResult<()> {
        if !self.prominence_threshold.is_finite() || self.prominence_threshold <= 0.0 {
            return Err(MepError::ConfigurationError {
                message: "Prominence threshold must be positive and finite".to_string(),
            });
        }

        if self.mep_window_half_width == 0 {
            return Err(MepError::ConfigurationError {
                message: "Amplitude window half-width must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> MepResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MepError::ConfigurationError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> MepResult<Self> {
        serde_json::from_str(json).map_err(|e| MepError::ConfigurationError {
            message: format!("Failed to deserialize configuration: {}", e),
        })
    }
}
