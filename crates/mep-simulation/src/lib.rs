//! MEP-Simulation: Synthetic single-pulse TMS-EMG trials
//!
//! Generates recording windows with a stimulation artifact, a configurable
//! evoked-response waveform, and noise. Used for tests and demos in place
//! of real acquisition hardware.

pub mod response_patterns;
pub mod trial_simulator;

pub use response_patterns::ResponsePattern;
pub use trial_simulator::{NoiseConfig, TrialConfig, TrialSimulator};
