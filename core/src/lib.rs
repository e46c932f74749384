//! cipher-core
//!
//! Pure Rust symmetric cipher engine: algorithm catalog, key/IV normalization,
//! single-shot and streaming contexts, legacy key derivation and
//! multi-recipient envelopes.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;

pub mod crypto;
pub mod envelope;
pub mod symmetric;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{ContextConfig, LengthPolicy};
    pub use crate::crypto::{AsymmetricKey, KeyMaterial, MessageDigest, RsaKey};
    pub use crate::envelope::Envelope;
    pub use crate::symmetric::descriptor as ciphers;
    pub use crate::symmetric::{
        lookup_by_name, AlgorithmDescriptor, CipherContext, DecryptContext, EncryptContext,
    };
    pub use crate::types::{CipherError, CipherResult, Direction};
}
