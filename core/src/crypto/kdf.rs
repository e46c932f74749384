// ## 📂 File: `src/crypto/kdf.rs`

//! crypto/kdf.rs
//! Legacy passphrase-to-key derivation (EVP_BytesToKey).
//!
//! Design:
//! - D_1 = H^count(passphrase || salt)
//! - D_i = H^count(D_{i-1} || passphrase || salt)
//! - Key bytes are taken from D_1 || D_2 || ..., then IV bytes.
//!
//! Industry notes:
//! - Kept for compatibility with `openssl enc` style payloads. It is a weak
//!   KDF (one digest per round, no memory hardness); new formats should not
//!   derive keys this way.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::PKCS5_SALT_LEN;
use crate::crypto::digest::{DigestState, MessageDigest};

/// A derived key and IV. Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

/// Derive `key_len` key bytes and `iv_len` IV bytes from `passphrase`.
///
/// - Only the first 8 bytes of `salt` are used.
/// - `count == 0` behaves as 1.
pub fn bytes_to_key(
    md: MessageDigest,
    salt: Option<&[u8]>,
    passphrase: &[u8],
    count: u32,
    key_len: usize,
    iv_len: usize,
) -> KeyMaterial {
    let salt = salt.map(|s| &s[..s.len().min(PKCS5_SALT_LEN)]);
    let mut out = KeyMaterial {
        key: Vec::with_capacity(key_len),
        iv: Vec::with_capacity(iv_len),
    };
    let mut previous: Option<Zeroizing<Vec<u8>>> = None;

    while out.key.len() < key_len || out.iv.len() < iv_len {
        let mut state = DigestState::new(md);
        if let Some(prev) = &previous {
            state.update(prev);
        }
        state.update(passphrase);
        if let Some(salt) = salt {
            state.update(salt);
        }
        let mut block = Zeroizing::new(state.finalize());
        for _ in 1..count {
            block = Zeroizing::new(md.digest(&block));
        }

        let take_key = (key_len - out.key.len()).min(block.len());
        out.key.extend_from_slice(&block[..take_key]);
        let rest = &block[take_key..];
        let take_iv = (iv_len - out.iv.len()).min(rest.len());
        out.iv.extend_from_slice(&rest[..take_iv]);

        previous = Some(block);
    }
    out
}
