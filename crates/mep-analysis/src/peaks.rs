//! Prominence-based peak detection over sampled signals
//!
//! The primitive underneath pulse localization and MEP detection. Pure
//! function of its input: same samples, same peaks.

use serde::{Deserialize, Serialize};

/// A local maximum that stands out from its surroundings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Sample index of the peak (plateau midpoint for flat tops)
    pub index: usize,
    /// Vertical distance between the peak and its lowest contour line
    pub prominence: f32,
}

/// Find all local maxima whose prominence is at least `prominence_threshold`,
/// ordered by increasing sample index
///
/// The prominence of a peak is its height above the higher of the two
/// interval minima found by walking outward until a strictly taller sample
/// or the signal edge is reached. The threshold is inclusive.
pub fn find_peaks(samples: &[f32], prominence_threshold: f32) -> Vec<Peak> {
    local_maxima(samples)
        .into_iter()
        .map(|index| Peak {
            index,
            prominence: prominence(samples, index),
        })
        .filter(|peak| peak.prominence >= prominence_threshold)
        .collect()
}

/// Indices of local maxima, with flat tops resolved to their midpoint
///
/// The first and last samples never qualify; a plateau touching the signal
/// edge is not a peak.
fn local_maxima(samples: &[f32]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if samples.len() < 3 {
        return maxima;
    }

    let last = samples.len() - 1;
    let mut i = 1;
    while i < last {
        if samples[i - 1] < samples[i] {
            // Scan past a possible plateau of equal samples
            let mut ahead = i + 1;
            while ahead < last && samples[ahead] == samples[i] {
                ahead += 1;
            }
            if samples[ahead] < samples[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    maxima
}

/// Prominence of the peak at `peak`
///
/// Walks left and right from the peak until a strictly taller sample or the
/// signal edge terminates the interval; the peak height above the higher of
/// the two interval minima is the prominence.
fn prominence(samples: &[f32], peak: usize) -> f32 {
    let height = samples[peak];

    let mut left_min = height;
    let mut i = peak;
    while i > 0 && samples[i - 1] <= height {
        i -= 1;
        if samples[i] < left_min {
            left_min = samples[i];
        }
    }

    let mut right_min = height;
    let mut i = peak;
    while i + 1 < samples.len() && samples[i + 1] <= height {
        i += 1;
        if samples[i] < right_min {
            right_min = samples[i];
        }
    }

    height - left_min.max(right_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike_signal() -> Vec<f32> {
        // 200 zero samples with deflections of 1.0 at index 50 and 0.5 at 150
        let mut samples = vec![0.0; 200];
        samples[50] = 1.0;
        samples[150] = 0.5;
        samples
    }

    #[test]
    fn test_two_spikes() {
        let peaks = find_peaks(&spike_signal(), 0.05);

        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].index, 50);
        assert_eq!(peaks[1].index, 150);
        assert!((peaks[0].prominence - 1.0).abs() < 1e-6);
        assert!((peaks[1].prominence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_excludes_small_peaks() {
        let mut samples = vec![0.0; 100];
        samples[40] = 0.01;

        assert!(find_peaks(&samples, 0.05).is_empty());
        assert_eq!(find_peaks(&samples, 0.01).len(), 1);
    }

    #[test]
    fn test_plateau_midpoint() {
        let samples = vec![0.0, 1.0, 1.0, 1.0, 0.0];
        let peaks = find_peaks(&samples, 0.05);

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 2);
    }

    #[test]
    fn test_edge_plateau_not_a_peak() {
        // Rises and stays flat until the signal edge
        let samples = vec![0.0, 1.0, 1.0, 1.0];
        assert!(find_peaks(&samples, 0.05).is_empty());
    }

    #[test]
    fn test_flat_signal_has_no_peaks() {
        assert!(find_peaks(&[0.0; 100], 0.05).is_empty());
    }

    #[test]
    fn test_short_signal_has_no_peaks() {
        assert!(find_peaks(&[], 0.05).is_empty());
        assert!(find_peaks(&[1.0, 2.0], 0.05).is_empty());
    }

    #[test]
    fn test_monotone_signal_has_no_peaks() {
        let samples: Vec<f32> = (0..50).map(|i| i as f32).collect();
        assert!(find_peaks(&samples, 0.05).is_empty());
    }

    #[test]
    fn test_peaks_ordered_by_index() {
        let mut samples = vec![0.0; 300];
        samples[30] = 0.2;
        samples[120] = 0.9;
        samples[250] = 0.4;

        let peaks = find_peaks(&samples, 0.05);
        let indices: Vec<usize> = peaks.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![30, 120, 250]);
    }

    #[test]
    fn test_prominence_bounded_by_taller_neighbor() {
        // The smaller peak's contour interval ends at the taller peak, so
        // its prominence is measured from the valley floor between them.
        let samples = vec![0.0, 2.0, 0.5, 1.0, 0.0];
        let peaks = find_peaks(&samples, 0.05);

        assert_eq!(peaks.len(), 2);
        assert!((peaks[0].prominence - 2.0).abs() < 1e-6);
        assert!((peaks[1].prominence - 0.5).abs() < 1e-6);
    }
}
