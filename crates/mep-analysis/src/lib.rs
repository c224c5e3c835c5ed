//! MEP-Analysis: Event detection pipeline for TMS-EMG recordings
//!
//! Pulse-artifact localization, motor evoked potential classification and
//! measurement, and recruitment-curve aggregation over multi-intensity
//! stimulation sessions.

pub mod config;
pub mod mep;
pub mod peaks;
pub mod pulse;
pub mod recruitment;

pub use config::AnalysisConfig;
pub use mep::{MepDetector, MepEvent};
pub use peaks::{find_peaks, Peak};
pub use pulse::{Polarity, PulseArtifact, PulseLocator};
pub use recruitment::{RecruitmentAggregator, RecruitmentOutcome, RecruitmentPoint};
