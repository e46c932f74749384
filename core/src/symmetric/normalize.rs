// ## 📂 File: `src/symmetric/normalize.rs`

//! symmetric/normalize.rs
//! Fits caller-supplied keys and IVs to an algorithm's lengths.
//!
//! Design notes:
//! - Lenient normalization silently truncates or zero-pads; callers that
//!   want mismatches surfaced opt into the strict variants.
//! - Inputs that already fit are borrowed, never copied.

use std::borrow::Cow;

use crate::config::LengthPolicy;
use crate::types::{CipherError, CipherResult};

/// Fit `key` to exactly `len` bytes.
///
/// - `None` yields `len` zero bytes.
/// - An exact-length key is returned unchanged.
/// - Otherwise the first `min(key.len(), len)` bytes are copied into a
///   zero-filled buffer of `len` bytes.
pub fn normalize_key(key: Option<&[u8]>, len: usize) -> Cow<'_, [u8]> {
    match key {
        Some(key) if key.len() == len => Cow::Borrowed(key),
        Some(key) => {
            let mut real = vec![0u8; len];
            let n = key.len().min(len);
            real[..n].copy_from_slice(&key[..n]);
            Cow::Owned(real)
        }
        None => Cow::Owned(vec![0u8; len]),
    }
}

/// Zero-pad `iv` up to `len` bytes. Longer IVs are returned unchanged.
pub fn normalize_iv(iv: &[u8], len: usize) -> Cow<'_, [u8]> {
    if iv.len() < len {
        let mut real = vec![0u8; len];
        real[..iv.len()].copy_from_slice(iv);
        Cow::Owned(real)
    } else {
        Cow::Borrowed(iv)
    }
}

/// Like [`normalize_key`], but any length mismatch is an error.
/// A missing key is only accepted by algorithms that take none.
pub fn normalize_key_strict(key: Option<&[u8]>, len: usize) -> CipherResult<Cow<'_, [u8]>> {
    let actual = key.map_or(0, <[u8]>::len);
    if actual != len {
        return Err(CipherError::InvalidKeyLen { expected: len, actual });
    }
    Ok(normalize_key(key, len))
}

/// Like [`normalize_iv`], but a short IV is an error.
pub fn normalize_iv_strict(iv: &[u8], len: usize) -> CipherResult<Cow<'_, [u8]>> {
    if iv.len() < len {
        return Err(CipherError::InvalidIvLen { expected: len, actual: iv.len() });
    }
    Ok(Cow::Borrowed(iv))
}

/// XOR `iv` into the leading bytes of `key`, over `min(key.len(), iv.len())`.
///
/// Stream ciphers take no IV, so the IV is folded into the key instead.
pub fn whiten_key(key: &mut [u8], iv: &[u8]) {
    for (k, v) in key.iter_mut().zip(iv) {
        *k ^= v;
    }
}

impl LengthPolicy {
    pub fn fit_key<'a>(self, key: Option<&'a [u8]>, len: usize) -> CipherResult<Cow<'a, [u8]>> {
        match self {
            LengthPolicy::Lenient => Ok(normalize_key(key, len)),
            LengthPolicy::Strict => normalize_key_strict(key, len),
        }
    }

    pub fn fit_iv(self, iv: &[u8], len: usize) -> CipherResult<Cow<'_, [u8]>> {
        match self {
            LengthPolicy::Lenient => Ok(normalize_iv(iv, len)),
            LengthPolicy::Strict => normalize_iv_strict(iv, len),
        }
    }
}
