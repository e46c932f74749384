// Shared helpers for the integration tests.
#![allow(dead_code)]

use cipher_core::symmetric::{catalog, AlgorithmDescriptor};
use tracing_subscriber::EnvFilter;

pub const FOX: &str = "The quick brown fox jumped over the lazy dog. \
                       The quick brown fox jumped over the lazy dog. \
                       The quick brown fox jumped over the lazy dog.";

/// Route `tracing` output through the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every catalog entry except `null`.
pub fn real_ciphers() -> impl Iterator<Item = &'static AlgorithmDescriptor> {
    catalog().iter().copied().filter(|d| d.long_name() != "null")
}
