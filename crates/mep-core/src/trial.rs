//! Trial containers for single-pulse EMG recordings

use crate::error::{MepError, MepResult};
use crate::recording::RecordingMetadata;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One trial's EMG recording around a single TMS pulse
///
/// Samples are millivolts. The container is immutable once constructed;
/// analysis code only reads it.
#[derive(Debug, Clone)]
pub struct TrialSignal {
    /// Unique identifier for this trial
    pub id: Uuid,
    /// EMG samples in mV, one recording window around one pulse
    samples: Vec<f32>,
    /// Recording metadata
    pub metadata: RecordingMetadata,
}

impl TrialSignal {
    /// Create a new trial from samples and metadata
    pub fn new(samples: Vec<f32>, metadata: RecordingMetadata) -> MepResult<Self> {
        let expected = metadata.expected_samples();
        if samples.len() != expected {
            return Err(MepError::InvalidSignalData {
                reason: format!(
                    "Sample count {} doesn't match expected {} samples",
                    samples.len(),
                    expected
                ),
            });
        }

        Ok(TrialSignal {
            id: Uuid::new_v4(),
            samples,
            metadata,
        })
    }

    /// Number of samples in the recording window
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the trial is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get sampling rate
    pub fn sampling_rate(&self) -> f32 {
        self.metadata.sampling_rate
    }

    /// Get window duration in seconds
    pub fn duration(&self) -> f32 {
        self.metadata.duration
    }

    /// Get time vector for plotting
    pub fn time_vector(&self) -> Vec<f32> {
        let dt = 1.0 / self.metadata.sampling_rate;

        (0..self.samples.len()).map(|i| i as f32 * dt).collect()
    }

    /// Calculate basic statistics over the whole window
    pub fn stats(&self) -> SignalStats {
        SignalStats::calculate(&self.samples)
    }
}

/// Basic statistics for a trial window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalStats {
    pub mean: f32,
    pub rms: f32,
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    pub peak_to_peak: f32,
}

impl SignalStats {
    pub fn calculate(data: &[f32]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                rms: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                peak_to_peak: 0.0,
            };
        }

        let sum: f32 = data.iter().sum();
        let mean = sum / data.len() as f32;

        let sum_sq: f32 = data.iter().map(|x| x * x).sum();
        let rms = (sum_sq / data.len() as f32).sqrt();

        let variance: f32 =
            data.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / data.len() as f32;
        let std_dev = variance.sqrt();

        let min = data.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let peak_to_peak = max - min;

        Self {
            mean,
            rms,
            std_dev,
            min,
            max,
            peak_to_peak,
        }
    }
}

/// Ordered trials of one stimulation session
///
/// Columns of the acquisition table, in experiment order. All trials must
/// share the same window length and sampling rate.
#[derive(Debug, Clone)]
pub struct TrialSet {
    trials: Vec<TrialSignal>,
}

impl TrialSet {
    /// Build a trial set, validating that all trials are homogeneous
    pub fn new(trials: Vec<TrialSignal>) -> MepResult<Self> {
        if let Some(first) = trials.first() {
            for trial in &trials[1..] {
                if trial.len() != first.len() {
                    return Err(MepError::InvalidSignalData {
                        reason: format!(
                            "All trials must share a time index: found windows of {} and {} samples",
                            first.len(),
                            trial.len()
                        ),
                    });
                }
                if trial.sampling_rate() != first.sampling_rate() {
                    return Err(MepError::InvalidSignalData {
                        reason: format!(
                            "All trials must share a sampling rate: found {}Hz and {}Hz",
                            first.sampling_rate(),
                            trial.sampling_rate()
                        ),
                    });
                }
            }
        }

        Ok(TrialSet { trials })
    }

    /// Number of trials in the session
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Get a trial by its positional (column) index
    pub fn get(&self, index: usize) -> Option<&TrialSignal> {
        self.trials.get(index)
    }

    /// Iterate trials in column order
    pub fn iter(&self) -> impl Iterator<Item = &TrialSignal> {
        self.trials.iter()
    }

    /// All trials as a slice
    pub fn trials(&self) -> &[TrialSignal] {
        &self.trials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::MuscleSite;

    fn metadata(rate: f32, duration: f32) -> RecordingMetadata {
        RecordingMetadata::new(MuscleSite::FirstDorsalInterosseous, rate, duration).unwrap()
    }

    #[test]
    fn test_trial_creation() {
        let trial = TrialSignal::new(vec![0.0; 500], metadata(1000.0, 0.5)).unwrap();

        assert_eq!(trial.len(), 500);
        assert_eq!(trial.sampling_rate(), 1000.0);
        assert!(!trial.is_empty());
    }

    #[test]
    fn test_sample_count_mismatch() {
        let result = TrialSignal::new(vec![0.0; 123], metadata(1000.0, 0.5));
        assert!(result.is_err());
    }

    #[test]
    fn test_time_vector() {
        let trial = TrialSignal::new(vec![0.0; 500], metadata(1000.0, 0.5)).unwrap();
        let time = trial.time_vector();

        assert_eq!(time.len(), 500);
        assert_eq!(time[0], 0.0);
        assert!((time[499] - 0.499).abs() < 1e-6);
    }

    #[test]
    fn test_signal_stats() {
        let stats = SignalStats::calculate(&[1.0, -1.0, 1.0, -1.0]);

        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.rms, 1.0);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 1.0);
        assert_eq!(stats.peak_to_peak, 2.0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = SignalStats::calculate(&[]);
        assert_eq!(stats.peak_to_peak, 0.0);
    }

    #[test]
    fn test_trial_set_homogeneity() {
        let a = TrialSignal::new(vec![0.0; 500], metadata(1000.0, 0.5)).unwrap();
        let b = TrialSignal::new(vec![0.0; 300], metadata(1000.0, 0.3)).unwrap();

        let result = TrialSet::new(vec![a, b]);
        assert!(result.is_err());
    }

    #[test]
    fn test_trial_set_order_preserved() {
        let mut trials = Vec::new();
        for i in 0..4 {
            let mut samples = vec![0.0; 500];
            samples[0] = i as f32;
            trials.push(TrialSignal::new(samples, metadata(1000.0, 0.5)).unwrap());
        }

        let set = TrialSet::new(trials).unwrap();
        assert_eq!(set.len(), 4);
        for (i, trial) in set.iter().enumerate() {
            assert_eq!(trial.samples()[0], i as f32);
        }
    }
}
