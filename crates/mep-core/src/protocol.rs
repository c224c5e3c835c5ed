//! Stimulation protocol descriptions for multi-intensity sessions
//!
//! Trials are mapped to intensities purely by position, so the protocol is
//! the single source of truth for how a session's columns are grouped.

use crate::error::{MepError, MepResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A run of consecutive trials delivered at one stimulation intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityBlock {
    /// Stimulation intensity in percent of resting motor threshold
    pub intensity_pct: u16,
    /// Number of consecutive trials delivered at this intensity
    pub trial_count: usize,
}

/// Ordered description of a stimulation session
///
/// Lists which intensities were delivered and how many trials each, in
/// dataset column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StimulationProtocol {
    blocks: Vec<IntensityBlock>,
}

impl StimulationProtocol {
    /// Build a protocol from explicit intensity blocks
    pub fn new(blocks: Vec<IntensityBlock>) -> MepResult<Self> {
        let protocol = StimulationProtocol { blocks };
        protocol.validate()?;
        Ok(protocol)
    }

    /// The standard recruitment-curve session: 12 trials at 100 %RMT
    /// followed by 6 trials at each of 110, 120, 130, 140 and 150 %RMT
    pub fn recruitment_curve() -> Self {
        let mut blocks = vec![IntensityBlock {
            intensity_pct: 100,
            trial_count: 12,
        }];
        blocks.extend((1..=5u16).map(|step| IntensityBlock {
            intensity_pct: 100 + step * 10,
            trial_count: 6,
        }));

        StimulationProtocol { blocks }
    }

    /// Intensity blocks in delivery order
    pub fn blocks(&self) -> &[IntensityBlock] {
        &self.blocks
    }

    /// Total number of trials the protocol prescribes
    pub fn total_trials(&self) -> usize {
        self.blocks.iter().map(|b| b.trial_count).sum()
    }

    /// Positional trial ranges, one per block, in protocol order
    pub fn group_ranges(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.blocks.len());
        let mut start = 0;
        for block in &self.blocks {
            ranges.push(start..start + block.trial_count);
            start += block.trial_count;
        }
        ranges
    }

    /// Validate the protocol shape
    pub fn validate(&self) -> MepResult<()> {
        if self.blocks.is_empty() {
            return Err(MepError::ConfigurationError {
                message: "Protocol has no intensity blocks".to_string(),
            });
        }

        for block in &self.blocks {
            if block.trial_count == 0 {
                return Err(MepError::ConfigurationError {
                    message: format!(
                        "Intensity block at {}%RMT has zero trials",
                        block.intensity_pct
                    ),
                });
            }
        }

        Ok(())
    }
}
