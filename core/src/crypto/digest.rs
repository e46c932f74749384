// ## 📂 File: `src/crypto/digest.rs`

//! crypto/digest.rs
//! Message digests used by the legacy key derivation.
//!
//! Design notes:
//! - `MessageDigest` is a plain `Copy` selector; `DigestState` is the running
//!   hash, dispatched by enum so no trait objects are needed.
//! - Ids are the OpenSSL object ids, so a digest can be named by number too.

use md5::Md5;
use num_enum::TryFromPrimitive;
use sha1::Sha1;
use sha2::{Digest as _, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_512};

use crate::constants::digest_ids;

/// Supported digest algorithms.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum MessageDigest {
    Md5 = digest_ids::MD5,
    Sha1 = digest_ids::SHA1,
    Sha224 = digest_ids::SHA224,
    Sha256 = digest_ids::SHA256,
    Sha384 = digest_ids::SHA384,
    Sha512 = digest_ids::SHA512,
    Sha3_256 = digest_ids::SHA3_256,
    Sha3_512 = digest_ids::SHA3_512,
}

impl MessageDigest {
    pub const ALL: [MessageDigest; 8] = [
        MessageDigest::Md5,
        MessageDigest::Sha1,
        MessageDigest::Sha224,
        MessageDigest::Sha256,
        MessageDigest::Sha384,
        MessageDigest::Sha512,
        MessageDigest::Sha3_256,
        MessageDigest::Sha3_512,
    ];

    /// Case-insensitive; accepts `sha256` and `sha-256` spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL.into_iter().find(|md| md.name().replace('-', "") == wanted)
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageDigest::Md5 => "md5",
            MessageDigest::Sha1 => "sha1",
            MessageDigest::Sha224 => "sha224",
            MessageDigest::Sha256 => "sha256",
            MessageDigest::Sha384 => "sha384",
            MessageDigest::Sha512 => "sha512",
            MessageDigest::Sha3_256 => "sha3-256",
            MessageDigest::Sha3_512 => "sha3-512",
        }
    }

    /// Output length in bytes.
    pub fn size(self) -> usize {
        match self {
            MessageDigest::Md5 => 16,
            MessageDigest::Sha1 => 20,
            MessageDigest::Sha224 => 28,
            MessageDigest::Sha256 | MessageDigest::Sha3_256 => 32,
            MessageDigest::Sha384 => 48,
            MessageDigest::Sha512 | MessageDigest::Sha3_512 => 64,
        }
    }

    pub fn id(self) -> u16 {
        self as u16
    }

    /// One-shot hash of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        let mut state = DigestState::new(self);
        state.update(data);
        state.finalize()
    }
}

impl std::fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Internal hashing state.
pub enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
    Sha3_256(Sha3_256),
    Sha3_512(Sha3_512),
}

impl DigestState {
    pub fn new(alg: MessageDigest) -> Self {
        match alg {
            MessageDigest::Md5 => DigestState::Md5(Md5::new()),
            MessageDigest::Sha1 => DigestState::Sha1(Sha1::new()),
            MessageDigest::Sha224 => DigestState::Sha224(Sha224::new()),
            MessageDigest::Sha256 => DigestState::Sha256(Sha256::new()),
            MessageDigest::Sha384 => DigestState::Sha384(Sha384::new()),
            MessageDigest::Sha512 => DigestState::Sha512(Sha512::new()),
            MessageDigest::Sha3_256 => DigestState::Sha3_256(Sha3_256::new()),
            MessageDigest::Sha3_512 => DigestState::Sha3_512(Sha3_512::new()),
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Md5(h) => h.update(data),
            DigestState::Sha1(h) => h.update(data),
            DigestState::Sha224(h) => h.update(data),
            DigestState::Sha256(h) => h.update(data),
            DigestState::Sha384(h) => h.update(data),
            DigestState::Sha512(h) => h.update(data),
            DigestState::Sha3_256(h) => h.update(data),
            DigestState::Sha3_512(h) => h.update(data),
        }
    }

    #[inline]
    pub fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Md5(h) => h.finalize().to_vec(),
            DigestState::Sha1(h) => h.finalize().to_vec(),
            DigestState::Sha224(h) => h.finalize().to_vec(),
            DigestState::Sha256(h) => h.finalize().to_vec(),
            DigestState::Sha384(h) => h.finalize().to_vec(),
            DigestState::Sha512(h) => h.finalize().to_vec(),
            DigestState::Sha3_256(h) => h.finalize().to_vec(),
            DigestState::Sha3_512(h) => h.finalize().to_vec(),
        }
    }
}
