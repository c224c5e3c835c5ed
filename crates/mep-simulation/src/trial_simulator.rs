//! Synthetic single-pulse trial generation

use crate::response_patterns::ResponsePattern;
use mep_core::{
    MepError, MepResult, MuscleSite, RecordingMetadata, StimulationProtocol, TrialSet, TrialSignal,
};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Noise added on top of the deterministic trial content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Gaussian noise standard deviation in mV (0.0 = noiseless)
    pub gaussian_std: f32,
    /// Slow baseline wander amplitude in mV
    pub baseline_wander: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            gaussian_std: 0.005,
            baseline_wander: 0.002,
        }
    }
}

/// Configuration for one simulated recording window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Muscle the simulated montage records from
    pub muscle: MuscleSite,
    /// Sampling rate in Hz
    pub sampling_rate: f32,
    /// Total window length in seconds
    pub duration: f32,
    /// Pulse delivery time within the window, in seconds
    pub pulse_time: f32,
    /// Stimulation artifact amplitude in mV
    pub artifact_amplitude: f32,
    /// Artifact polarity (false simulates an inverted electrode montage)
    pub artifact_positive: bool,
    /// Noise configuration
    pub noise: NoiseConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            muscle: MuscleSite::FirstDorsalInterosseous,
            sampling_rate: 1000.0,
            duration: 0.5,
            pulse_time: 0.1,
            artifact_amplitude: 2.0,
            artifact_positive: true,
            noise: NoiseConfig::default(),
            seed: None,
        }
    }
}

/// Single-pulse trial simulator
pub struct TrialSimulator {
    config: TrialConfig,
    rng: rand::rngs::StdRng,
    normal_dist: Normal<f32>,
}

impl TrialSimulator {
    /// Create new trial simulator with configuration
    pub fn new(config: TrialConfig) -> MepResult<Self> {
        RecordingMetadata::validate_sampling_rate(config.sampling_rate)?;

        if config.pulse_time < 0.0 || config.pulse_time >= config.duration {
            return Err(MepError::SimulationError {
                message: format!(
                    "Pulse time {}s outside the {}s recording window",
                    config.pulse_time, config.duration
                ),
            });
        }

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs()
        });

        let rng = rand::rngs::StdRng::seed_from_u64(seed);
        let normal_dist = Normal::new(0.0, config.noise.gaussian_std).map_err(|e| {
            MepError::SimulationError {
                message: format!("Failed to create noise distribution: {}", e),
            }
        })?;

        Ok(TrialSimulator {
            config,
            rng,
            normal_dist,
        })
    }

    /// Generate one trial with the given evoked response
    pub fn generate(&mut self, response: ResponsePattern) -> MepResult<TrialSignal> {
        let sample_count = (self.config.duration * self.config.sampling_rate).round() as usize;
        let pulse_index = (self.config.pulse_time * self.config.sampling_rate).round() as usize;
        let dt = 1.0 / self.config.sampling_rate;

        let mut samples = Vec::with_capacity(sample_count);
        for i in 0..sample_count {
            let t = i as f32 * dt;
            let mut value = 0.0;

            if i == pulse_index {
                value += if self.config.artifact_positive {
                    self.config.artifact_amplitude
                } else {
                    -self.config.artifact_amplitude
                };
            }

            if t > self.config.pulse_time {
                value += response.value_at(t - self.config.pulse_time);
            }

            value += self.sample_noise(t);
            samples.push(value);
        }

        let metadata = RecordingMetadata::new(
            self.config.muscle,
            self.config.sampling_rate,
            self.config.duration,
        )?;

        TrialSignal::new(samples, metadata)
    }

    /// Generate a full session: one block of trials per protocol entry,
    /// using the response pattern supplied for that block
    pub fn generate_protocol(
        &mut self,
        protocol: &StimulationProtocol,
        responses: &[ResponsePattern],
    ) -> MepResult<TrialSet> {
        if responses.len() != protocol.blocks().len() {
            return Err(MepError::SimulationError {
                message: format!(
                    "{} response patterns supplied for {} intensity blocks",
                    responses.len(),
                    protocol.blocks().len()
                ),
            });
        }

        let mut trials = Vec::with_capacity(protocol.total_trials());
        for (block, response) in protocol.blocks().iter().zip(responses) {
            for _ in 0..block.trial_count {
                trials.push(self.generate(*response)?);
            }
        }

        TrialSet::new(trials)
    }

    /// Get current configuration
    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    fn sample_noise(&mut self, t: f32) -> f32 {
        let mut noise = self.normal_dist.sample(&mut self.rng);

        // Slow drift at 0.5 Hz
        noise += self.config.noise.baseline_wander * (2.0 * PI * 0.5 * t).sin();

        noise
    }
}
