//! Ad hoc probes for a translation relay's `translate` and `language` endpoints

pub mod probe;
pub mod samples;

pub use probe::RelayProbe;
pub use samples::{ProbePayload, ProbePreset};
