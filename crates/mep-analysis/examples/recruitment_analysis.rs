//! Recruitment-curve walkthrough on simulated data
//!
//! Simulates a full 42-trial stimulation session, runs the detection
//! pipeline over every trial, and prints the resulting recruitment curve.

use anyhow::Result;
use mep_analysis::{AnalysisConfig, PulseLocator, RecruitmentAggregator};
use mep_core::StimulationProtocol;
use mep_simulation::{NoiseConfig, ResponsePattern, TrialConfig, TrialSimulator};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let protocol = StimulationProtocol::recruitment_curve();

    let mut trial_config = TrialConfig::default();
    trial_config.seed = Some(42);
    trial_config.noise = NoiseConfig {
        gaussian_std: 0.003,
        baseline_wander: 0.001,
    };
    let mut simulator = TrialSimulator::new(trial_config)?;

    // Sub-threshold baseline, then responses growing with intensity
    let responses = vec![
        ResponsePattern::Absent,
        ResponsePattern::Biphasic { latency: 0.022, amplitude: 0.2, width: 0.030 },
        ResponsePattern::Biphasic { latency: 0.021, amplitude: 0.5, width: 0.030 },
        ResponsePattern::Biphasic { latency: 0.021, amplitude: 0.9, width: 0.032 },
        ResponsePattern::Biphasic { latency: 0.020, amplitude: 1.3, width: 0.032 },
        ResponsePattern::Polyphasic { latency: 0.020, amplitude: 1.5, width: 0.040, phases: 3 },
    ];
    let trials = simulator.generate_protocol(&protocol, &responses)?;

    // Show where the pulse landed in the first trial
    let locator = PulseLocator::new(AnalysisConfig::default());
    let first = trials.get(0).expect("session is never empty");
    let artifact = locator.locate(first.samples())?;
    println!(
        "Stimulation artifact at sample {} ({:?} polarity)\n",
        artifact.index, artifact.polarity
    );

    let aggregator = RecruitmentAggregator::new(AnalysisConfig::default(), protocol)?;
    let outcome = aggregator.aggregate(&trials)?;

    println!("Intensity    Mean MEP (mV)    Responders");
    for point in &outcome.points {
        let mean = match point.mean_amplitude_mv {
            Some(mv) => format!("{:.3}", mv),
            None => "-".to_string(),
        };
        println!(
            "{:>6}%RMT    {:>12}    {:>3}/{}",
            point.intensity_pct, mean, point.responder_count, point.trial_count
        );
    }

    Ok(())
}
