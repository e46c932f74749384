// ## 📂 File: `src/envelope.rs`

//! envelope.rs
//! Multi-recipient envelopes: one symmetric encryption, one wrapped key per recipient.
//!
//! Design notes:
//! - Seal draws a fresh session key and IV from the OS RNG, wraps the key for
//!   every recipient in order, then encrypts the payload once.
//! - Open unwraps with the recipient's private key, adopts the unwrapped key
//!   length (variable-length algorithms only), and decrypts.
//! - The session key only ever lives in `Zeroizing` buffers.
//!
//! Industry notes:
//! - Same shape as OpenSSL's EVP_Seal/EVP_Open and PKCS#7 enveloped data:
//!   `keys[i]` belongs to `recipients[i]`; the IV travels in the clear.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::crypto::pkey::AsymmetricKey;
use crate::symmetric::context::CipherContext;
use crate::types::{CipherError, CipherResult};

/// Sealed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Wrapped session keys, in recipient order.
    pub keys: Vec<Vec<u8>>,
    /// Empty when the algorithm takes no IV.
    pub iv: Vec<u8>,
    pub data: Vec<u8>,
}

/// Encrypt `plaintext` with `ctx`'s algorithm for every key in `recipients`.
pub fn seal<K: AsymmetricKey>(
    ctx: &mut CipherContext,
    recipients: &[K],
    plaintext: &[u8],
) -> CipherResult<Envelope> {
    let algorithm = ctx.algorithm();
    if recipients.is_empty() {
        return Err(CipherError::NoRecipients);
    }
    debug!(cipher = %algorithm, recipients = recipients.len(), len = plaintext.len(), "sealing envelope");

    let sealed = seal_payload(ctx, recipients, plaintext);

    match &sealed {
        Ok(envelope) => ctx.handle.counters_mut().add_seal(envelope.keys.len()),
        Err(err) => {
            ctx.handle.counters_mut().add_failure();
            warn!(cipher = %algorithm, error = %err, "seal failed");
        }
    }
    sealed
}

/// Decrypt `data` as the holder of `recipient`, whose wrapped key is `wrapped_key`.
pub fn open<K: AsymmetricKey + ?Sized>(
    ctx: &mut CipherContext,
    data: &[u8],
    wrapped_key: &[u8],
    iv: &[u8],
    recipient: &K,
) -> CipherResult<Vec<u8>> {
    let algorithm = ctx.algorithm();
    debug!(cipher = %algorithm, len = data.len(), "opening envelope");

    let opened = open_payload(ctx, data, wrapped_key, iv, recipient);

    match &opened {
        Ok(_) => ctx.handle.counters_mut().add_open(),
        Err(err) => {
            ctx.handle.counters_mut().add_failure();
            warn!(cipher = %algorithm, error = %err, "open failed");
        }
    }
    opened
}

fn seal_payload<K: AsymmetricKey>(
    ctx: &mut CipherContext,
    recipients: &[K],
    plaintext: &[u8],
) -> CipherResult<Envelope> {
    let algorithm = ctx.algorithm();
    let (keys, iv) = ctx.handle.seal_init(algorithm, recipients)?;
    let mut data = Vec::with_capacity(plaintext.len() + algorithm.block_size());
    ctx.handle.update(plaintext, &mut data)?;
    ctx.handle.finalize(&mut data)?;
    Ok(Envelope { keys, iv, data })
}

fn open_payload<K: AsymmetricKey + ?Sized>(
    ctx: &mut CipherContext,
    data: &[u8],
    wrapped_key: &[u8],
    iv: &[u8],
    recipient: &K,
) -> CipherResult<Vec<u8>> {
    let algorithm = ctx.algorithm();
    ctx.handle.open_init(algorithm, wrapped_key, iv, recipient)?;
    let mut out = Vec::with_capacity(data.len() + algorithm.block_size());
    ctx.handle.update(data, &mut out)?;
    ctx.handle.finalize(&mut out)?;
    Ok(out)
}
