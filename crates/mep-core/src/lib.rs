//! MEP-Core: Foundation types for TMS-evoked potential analysis
//!
//! Trial containers, recording metadata, stimulation protocol descriptions,
//! and the shared error taxonomy.

pub mod error;
pub mod protocol;
pub mod recording;
pub mod trial;

pub use error::{MepError, MepResult};
pub use protocol::*;
pub use recording::*;
pub use trial::*;
