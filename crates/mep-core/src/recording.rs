//! Recording metadata for TMS-EMG trials

use crate::error::{MepError, MepResult};
use serde::{Deserialize, Serialize};

/// Muscle the EMG electrodes record from
///
/// Distal hand muscles dominate motor-cortex stimulation work because of
/// their low thresholds and large cortical representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MuscleSite {
    FirstDorsalInterosseous,
    AbductorPollicisBrevis,
    AbductorDigitiMinimi,
    ExtensorCarpiRadialis,
    TibialisAnterior,
    Other(u8), // For extensibility
}

/// Per-trial recording metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Target muscle of the EMG montage
    pub muscle: MuscleSite,
    /// Sampling rate in Hz
    pub sampling_rate: f32,
    /// Length of the recording window in seconds
    pub duration: f32,
    /// Acquisition timestamp (ms since epoch)
    pub timestamp: u64,
}

impl RecordingMetadata {
    /// Create new recording metadata
    pub fn new(muscle: MuscleSite, sampling_rate: f32, duration: f32) -> MepResult<Self> {
        Self::validate_sampling_rate(sampling_rate)?;

        if duration <= 0.0 {
            return Err(MepError::InvalidSignalData {
                reason: "Duration must be positive".to_string(),
            });
        }

        Ok(RecordingMetadata {
            muscle,
            sampling_rate,
            duration,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_millis() as u64,
        })
    }

    /// Validate sampling rate for TMS-EMG recordings
    pub fn validate_sampling_rate(rate: f32) -> MepResult<()> {
        const MIN_RATE: f32 = 500.0;
        const MAX_RATE: f32 = 10_000.0;

        if rate < MIN_RATE || rate > MAX_RATE {
            Err(MepError::InvalidSamplingRate {
                rate,
                valid_range: format!("{}-{}Hz", MIN_RATE, MAX_RATE),
            })
        } else {
            Ok(())
        }
    }

    /// Get expected number of samples for this recording window
    pub fn expected_samples(&self) -> usize {
        (self.sampling_rate * self.duration).round() as usize
    }
}

impl Default for RecordingMetadata {
    fn default() -> Self {
        RecordingMetadata {
            muscle: MuscleSite::FirstDorsalInterosseous,
            sampling_rate: 1000.0,
            duration: 0.5,
            timestamp: 0,
        }
    }
}

impl std::fmt::Display for MuscleSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MuscleSite::FirstDorsalInterosseous => write!(f, "FDI"),
            MuscleSite::AbductorPollicisBrevis => write!(f, "APB"),
            MuscleSite::AbductorDigitiMinimi => write!(f, "ADM"),
            MuscleSite::ExtensorCarpiRadialis => write!(f, "ECR"),
            MuscleSite::TibialisAnterior => write!(f, "TA"),
            MuscleSite::Other(id) => write!(f, "Other({})", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_creation() {
        let metadata =
            RecordingMetadata::new(MuscleSite::FirstDorsalInterosseous, 2000.0, 0.5).unwrap();

        assert_eq!(metadata.sampling_rate, 2000.0);
        assert_eq!(metadata.expected_samples(), 1000);
    }

    #[test]
    fn test_sampling_rate_validation() {
        assert!(RecordingMetadata::validate_sampling_rate(1000.0).is_ok());
        assert!(RecordingMetadata::validate_sampling_rate(100.0).is_err());
        assert!(RecordingMetadata::validate_sampling_rate(20_000.0).is_err());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result = RecordingMetadata::new(MuscleSite::AbductorPollicisBrevis, 1000.0, -1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_muscle_display() {
        assert_eq!(format!("{}", MuscleSite::FirstDorsalInterosseous), "FDI");
        assert_eq!(format!("{}", MuscleSite::Other(3)), "Other(3)");
    }
}
