// ## src/telemetry/snapshot.rs

//! telemetry/snapshot.rs
//!
//! Immutable view of a context's counters, tagged with its algorithm.

use serde::{Deserialize, Serialize};

use crate::symmetric::descriptor::AlgorithmDescriptor;
use crate::telemetry::counters::CipherCounters;
use crate::types::CipherResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub cipher: String,
    pub counters: CipherCounters,
    /// bytes_out / bytes_in, 0.0 before any input.
    pub expansion_ratio: f64,
}

impl TelemetrySnapshot {
    pub fn from(algorithm: &AlgorithmDescriptor, counters: &CipherCounters) -> Self {
        let expansion_ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };

        Self {
            cipher: algorithm.long_name().to_owned(),
            counters: counters.clone(),
            expansion_ratio,
        }
    }

    // Invariants every well-formed snapshot satisfies:
    // - a final never happens without an init
    // - every wrapped key belongs to a seal
    pub fn sanity_check(&self) -> bool {
        let c = &self.counters;
        c.finals <= c.inits && (c.seals > 0 || c.keys_wrapped == 0)
    }

    pub fn to_json(&self) -> CipherResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
