//! Error handling for TMS-MEP analysis
//!
//! Distinguishes true precondition violations (no pulse artifact, malformed
//! dataset) from expected detection outcomes. The absence of a motor
//! response is never an error here; it travels through return values.

use core::fmt;

/// Result type alias for MEP analysis operations
pub type MepResult<T> = Result<T, MepError>;

/// Error type shared by all MEP analysis crates
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MepError {
    /// No stimulation artifact found in either signal polarity
    NoPulseDetected,

    /// Dataset trial count does not match the stimulation protocol
    ProtocolMismatch {
        /// Trial count the protocol prescribes
        expected: usize,
        /// Trial count found in the dataset
        actual: usize,
    },

    /// Invalid trial or dataset contents
    InvalidSignalData {
        /// Description of the data error
        reason: String,
    },

    /// Sampling rate outside the supported range
    InvalidSamplingRate {
        /// Provided sampling rate
        rate: f32,
        /// Valid range description
        valid_range: String,
    },

    /// Invalid analysis or protocol configuration
    ConfigurationError {
        /// Configuration error description
        message: String,
    },

    /// Trial simulation failure
    SimulationError {
        /// Simulation error description
        message: String,
    },
}

impl fmt::Display for MepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MepError::NoPulseDetected => {
                write!(f, "No stimulation artifact detected in either polarity")
            }
            MepError::ProtocolMismatch { expected, actual } => {
                write!(f, "Dataset has {} trials, protocol expects {}", actual, expected)
            }
            MepError::InvalidSignalData { reason } => {
                write!(f, "Invalid signal data: {}", reason)
            }
            MepError::InvalidSamplingRate { rate, valid_range } => {
                write!(f, "Invalid sampling rate: {}Hz, valid range: {}", rate, valid_range)
            }
            MepError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            MepError::SimulationError { message } => {
                write!(f, "Simulation error: {}", message)
            }
        }
    }
}

impl std::error::Error for MepError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MepError::ProtocolMismatch {
            expected: 42,
            actual: 41,
        };
        let display = format!("{}", error);
        assert!(display.contains("41"));
        assert!(display.contains("42"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = MepError::InvalidSignalData {
            reason: "test".to_string(),
        };
        let error2 = MepError::InvalidSignalData {
            reason: "test".to_string(),
        };
        assert_eq!(error1, error2);
    }

    #[test]
    fn test_no_pulse_display() {
        let display = format!("{}", MepError::NoPulseDetected);
        assert!(display.contains("stimulation artifact"));
    }
}
