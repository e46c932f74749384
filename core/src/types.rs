// ## 📂 File: `src/types.rs`

//! types.rs
//! Crate-wide error type and the cipher direction.
//!
//! Design notes:
//! - Lookup misses (unknown algorithm or digest name) are `Option`, never errors.
//! - Every other failure surfaces as a `CipherError` through `CipherResult<T>`.
//! - Messages carry lengths and indices, never key or IV bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which way a cipher handle transforms data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified cipher error.
#[derive(Debug, Error)]
pub enum CipherError {
    #[error("no cipher algorithm bound to the handle")]
    NoAlgorithm,

    #[error("cipher handle has no key")]
    NotInitialized,

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    #[error("invalid IV length: need at least {expected}, got {actual}")]
    InvalidIvLen { expected: usize, actual: usize },

    #[error("count {count} exceeds input length {len}")]
    CountOutOfRange { count: usize, len: usize },

    #[error("{algorithm} has no {mode} engine")]
    UnsupportedMode { algorithm: &'static str, mode: &'static str },

    #[error("data not a multiple of the block size {block_size} ({remainder} trailing bytes)")]
    NotBlockAligned { block_size: usize, remainder: usize },

    #[error("wrong final block length: expected {block_size}, got {actual}")]
    WrongFinalBlockLen { block_size: usize, actual: usize },

    #[error("bad decrypt: padding check failed")]
    BadDecrypt,

    #[error("cipher operation already finalized")]
    Finalized,

    #[error("envelope has no recipients")]
    NoRecipients,

    #[error("wrapping session key for recipient {index} failed: {source}")]
    Wrap {
        index: usize,
        #[source]
        source: Box<CipherError>,
    },

    #[error("private key required to unwrap a session key")]
    MissingPrivateKey,

    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CipherResult<T> = Result<T, CipherError>;
