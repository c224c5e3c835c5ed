//! Localization of the TMS stimulation artifact within a trial

use crate::config::AnalysisConfig;
use crate::peaks::find_peaks;
use mep_core::{MepError, MepResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Polarity in which the stimulation artifact qualified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// A located stimulation artifact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseArtifact {
    /// Sample index of the artifact deflection
    pub index: usize,
    /// Polarity in which the deflection was found
    pub polarity: Polarity,
}

/// Finds the TMS pulse artifact in single-trial EMG recordings
pub struct PulseLocator {
    config: AnalysisConfig,
}

impl PulseLocator {
    /// Create a locator with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        PulseLocator { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Locate the stimulation artifact
    ///
    /// The artifact is taken to be the first qualifying peak of the signal.
    /// Recordings with an inverted electrode montage show the artifact as a
    /// trough, so the negated signal is searched when the positive pass
    /// finds nothing. If neither polarity yields a qualifying peak the trial
    /// has no detectable pulse and an explicit error is returned.
    pub fn locate(&self, samples: &[f32]) -> MepResult<PulseArtifact> {
        let threshold = self.config.prominence_threshold;

        let peaks = find_peaks(samples, threshold);
        if let Some(first) = peaks.first() {
            trace!(index = first.index, "pulse artifact found in positive polarity");
            return Ok(PulseArtifact {
                index: first.index,
                polarity: Polarity::Positive,
            });
        }

        let negated: Vec<f32> = samples.iter().map(|s| -s).collect();
        let troughs = find_peaks(&negated, threshold);
        match troughs.first() {
            Some(first) => {
                trace!(index = first.index, "pulse artifact found as a trough");
                Ok(PulseArtifact {
                    index: first.index,
                    polarity: Polarity::Negative,
                })
            }
            None => Err(MepError::NoPulseDetected),
        }
    }
}
