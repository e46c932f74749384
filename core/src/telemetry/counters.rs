// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters kept by every cipher handle.
//!
//! Summary: counts init/update/final calls, bytes in and out, and envelope
//! activity. Converted into an immutable `TelemetrySnapshot` on demand.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherCounters {
    pub inits: u64,
    pub updates: u64,
    pub finals: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub seals: u64,
    pub opens: u64,
    pub keys_wrapped: u64,
    pub failures: u64,
}

impl CipherCounters {
    /// Record one sealed envelope and its wrapped keys.
    pub fn add_seal(&mut self, recipients: usize) {
        self.seals += 1;
        self.keys_wrapped += recipients as u64;
    }

    pub fn add_open(&mut self) {
        self.opens += 1;
    }

    pub fn add_failure(&mut self) {
        self.failures += 1;
    }

    /// Output bytes minus input bytes (padding overhead for block modes).
    pub fn overhead_bytes(&self) -> i128 {
        i128::from(self.bytes_out) - i128::from(self.bytes_in)
    }

    // Fold counters from several contexts without shared state.
    pub fn merge(&mut self, other: &CipherCounters) {
        self.inits += other.inits;
        self.updates += other.updates;
        self.finals += other.finals;
        self.bytes_in += other.bytes_in;
        self.bytes_out += other.bytes_out;
        self.seals += other.seals;
        self.opens += other.opens;
        self.keys_wrapped += other.keys_wrapped;
        self.failures += other.failures;
    }
}

impl AddAssign for CipherCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
