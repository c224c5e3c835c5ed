//! MEP presence classification and peak-to-peak measurement

use crate::config::AnalysisConfig;
use crate::peaks::{find_peaks, Peak};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// A motor evoked potential detected within one trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MepEvent {
    /// Sample index of the response peak
    pub peak_index: usize,
    /// Half-open amplitude window around the peak, clipped to the signal
    pub window: Range<usize>,
    /// Peak-to-peak amplitude within the window, in mV
    pub peak_to_peak_mv: f32,
}

/// Classifies and measures motor evoked potentials in single-trial signals
///
/// The first qualifying peak of a trial is presumed to be the stimulation
/// artifact; a second qualifying peak is taken as evidence of an evoked
/// response and marks its location. No latency or amplitude plausibility
/// bounds are applied, so a strong movement artifact after the pulse can be
/// misclassified as a response.
pub struct MepDetector {
    config: AnalysisConfig,
}

impl MepDetector {
    /// Create a detector with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        MepDetector { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn qualifying_peaks(&self, samples: &[f32]) -> Vec<Peak> {
        find_peaks(samples, self.config.prominence_threshold)
    }

    /// True iff the trial contains a valid MEP: at least one qualifying
    /// peak beyond the stimulation artifact
    pub fn has_mep(&self, samples: &[f32]) -> bool {
        self.qualifying_peaks(samples).len() > 1
    }

    /// Sample index of the response peak
    ///
    /// `None` when no MEP is present. A weak or absent motor response is an
    /// expected experimental outcome, not an error.
    pub fn timing(&self, samples: &[f32]) -> Option<usize> {
        let peaks = self.qualifying_peaks(samples);
        if peaks.len() > 1 {
            Some(peaks[1].index)
        } else {
            debug!("no MEP detected");
            None
        }
    }

    /// Measure the MEP around its detected peak
    ///
    /// The amplitude window is `[t - w, t + w)` for half-width `w`, clipped
    /// to the signal bounds near the edges. The peak-to-peak amplitude is
    /// max minus min over that window, so it is invariant under a constant
    /// offset of the whole signal.
    pub fn measure(&self, samples: &[f32]) -> Option<MepEvent> {
        let peak_index = self.timing(samples)?;
        let half = self.config.mep_window_half_width;

        let start = peak_index.saturating_sub(half);
        let end = (peak_index + half).min(samples.len());
        let window = &samples[start..end];

        let max = window.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let min = window.iter().fold(f32::INFINITY, |a, &b| a.min(b));

        Some(MepEvent {
            peak_index,
            window: start..end,
            peak_to_peak_mv: max - min,
        })
    }

    /// Peak-to-peak amplitude of the MEP in mV, `None` when absent
    pub fn peak_to_peak(&self, samples: &[f32]) -> Option<f32> {
        self.measure(samples).map(|event| event.peak_to_peak_mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> MepDetector {
        MepDetector::new(AnalysisConfig::default())
    }

    fn two_spike_signal() -> Vec<f32> {
        // Stimulation artifact at 50, evoked response at 150
        let mut samples = vec![0.0; 200];
        samples[50] = 1.0;
        samples[150] = 0.5;
        samples
    }

    #[test]
    fn test_single_peak_is_not_a_mep() {
        let mut samples = vec![0.0; 200];
        samples[50] = 1.0;

        let d = detector();
        assert!(!d.has_mep(&samples));
        assert_eq!(d.timing(&samples), None);
        assert_eq!(d.measure(&samples), None);
    }

    #[test]
    fn test_flat_signal_is_not_a_mep() {
        assert!(!detector().has_mep(&vec![0.0; 200]));
    }

    #[test]
    fn test_second_peak_marks_the_response() {
        let samples = two_spike_signal();

        let d = detector();
        assert!(d.has_mep(&samples));
        assert_eq!(d.timing(&samples), Some(150));
    }

    #[test]
    fn test_peak_to_peak_within_window() {
        let event = detector().measure(&two_spike_signal()).unwrap();

        assert_eq!(event.peak_index, 150);
        assert_eq!(event.window, 100..200);
        assert!((event.peak_to_peak_mv - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_amplitude_invariant_under_offset() {
        let samples = two_spike_signal();
        let shifted: Vec<f32> = samples.iter().map(|s| s + 3.2).collect();

        let d = detector();
        let original = d.peak_to_peak(&samples).unwrap();
        let offset = d.peak_to_peak(&shifted).unwrap();
        assert!((original - offset).abs() < 1e-5);
    }

    #[test]
    fn test_window_clipped_at_signal_start() {
        let mut samples = vec![0.0; 200];
        samples[10] = 1.0;
        samples[30] = 0.5;

        let event = detector().measure(&samples).unwrap();
        assert_eq!(event.peak_index, 30);
        assert_eq!(event.window, 0..80);
        // The artifact falls inside the clipped window
        assert!((event.peak_to_peak_mv - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_clipped_at_signal_end() {
        let mut samples = vec![0.0; 200];
        samples[50] = 1.0;
        samples[190] = 0.5;

        let event = detector().measure(&samples).unwrap();
        assert_eq!(event.peak_index, 190);
        assert_eq!(event.window, 140..200);
        assert!((event.peak_to_peak_mv - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_negative_trough_widens_amplitude() {
        let mut samples = vec![0.0; 300];
        samples[50] = 2.0;
        samples[150] = 0.8;
        samples[160] = -0.2;

        let size = detector().peak_to_peak(&samples).unwrap();
        assert!((size - 1.0).abs() < 1e-6);
    }
}
