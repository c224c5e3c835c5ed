//! Recruitment-curve aggregation across a multi-intensity session
//!
//! Trials are grouped by position according to the stimulation protocol;
//! per-trial MEP sizes are averaged within each intensity group.

use crate::config::AnalysisConfig;
use crate::mep::MepDetector;
use mep_core::{MepError, MepResult, StimulationProtocol, TrialSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Mean MEP amplitude at one stimulation intensity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentPoint {
    /// Stimulation intensity in %RMT
    pub intensity_pct: u16,
    /// Mean peak-to-peak amplitude of the responding trials, in mV.
    /// `None` when no trial in the group produced a response.
    pub mean_amplitude_mv: Option<f32>,
    /// Number of trials delivered at this intensity
    pub trial_count: usize,
    /// Number of trials with a detected response
    pub responder_count: usize,
}

/// Full outcome of a recruitment-curve analysis
///
/// `trial_sizes` preserves the per-trial results in dataset column order
/// for downstream reporting and plotting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentOutcome {
    /// One point per intensity block, in protocol order
    pub points: Vec<RecruitmentPoint>,
    /// Per-trial amplitude in mV, `None` for trials without a response
    pub trial_sizes: Vec<Option<f32>>,
}

/// Computes recruitment curves from multi-trial sessions
pub struct RecruitmentAggregator {
    detector: MepDetector,
    protocol: StimulationProtocol,
}

impl RecruitmentAggregator {
    /// Create an aggregator for the given protocol
    pub fn new(config: AnalysisConfig, protocol: StimulationProtocol) -> MepResult<Self> {
        config.validate()?;
        protocol.validate()?;

        Ok(RecruitmentAggregator {
            detector: MepDetector::new(config),
            protocol,
        })
    }

    /// The protocol trials are grouped against
    pub fn protocol(&self) -> &StimulationProtocol {
        &self.protocol
    }

    /// Measure every trial and aggregate group means
    ///
    /// The dataset must contain exactly the trial count the protocol
    /// prescribes, in delivery order; grouping is purely positional. Trials
    /// without a response stay in the output as `None` and are excluded
    /// from their group's mean.
    pub fn aggregate(&self, trials: &TrialSet) -> MepResult<RecruitmentOutcome> {
        let expected = self.protocol.total_trials();
        if trials.len() != expected {
            return Err(MepError::ProtocolMismatch {
                expected,
                actual: trials.len(),
            });
        }

        let mut trial_sizes = Vec::with_capacity(trials.len());
        for (index, trial) in trials.iter().enumerate() {
            let size = self.detector.peak_to_peak(trial.samples());
            match size {
                Some(mv) => debug!(trial = index, amplitude_mv = mv, "measured response"),
                None => debug!(trial = index, "no response"),
            }
            trial_sizes.push(size);
        }

        let mut points = Vec::with_capacity(self.protocol.blocks().len());
        for (block, range) in self
            .protocol
            .blocks()
            .iter()
            .zip(self.protocol.group_ranges())
        {
            let group = &trial_sizes[range];
            let present: Vec<f32> = group.iter().flatten().copied().collect();

            let mean_amplitude_mv = if present.is_empty() {
                warn!(
                    intensity_pct = block.intensity_pct,
                    "no responses in intensity group"
                );
                None
            } else {
                Some(present.iter().sum::<f32>() / present.len() as f32)
            };

            points.push(RecruitmentPoint {
                intensity_pct: block.intensity_pct,
                mean_amplitude_mv,
                trial_count: block.trial_count,
                responder_count: present.len(),
            });
        }

        Ok(RecruitmentOutcome {
            points,
            trial_sizes,
        })
    }
}
