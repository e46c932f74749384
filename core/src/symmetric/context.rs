// ## 📂 File: `src/symmetric/context.rs`

//! symmetric/context.rs
//! Single-shot cipher context bound to one algorithm.
//!
//! Design notes:
//! - Every `crypt` call re-derives everything from its arguments: key and IV
//!   are normalized, the handle is re-initialized, the whole input is
//!   processed and finalized. No state leaks between calls.
//! - Stream-mode algorithms take no IV, so the IV is XORed into the key
//!   instead. Block modes use the IV directly.
//! - A failing finalize (bad padding, misaligned input) fails the call; no
//!   partial output is returned.

use std::borrow::Cow;

use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::config::ContextConfig;
use crate::constants::KDF_DEFAULT_LEN;
use crate::crypto::digest::MessageDigest;
use crate::crypto::kdf::{self, KeyMaterial};
use crate::crypto::pkey::AsymmetricKey;
use crate::envelope::{self, Envelope};
use crate::symmetric::descriptor::AlgorithmDescriptor;
use crate::symmetric::handle::CipherHandle;
use crate::symmetric::normalize::whiten_key;
use crate::telemetry::{CipherCounters, TelemetrySnapshot};
use crate::types::{CipherError, CipherResult, Direction};

pub struct CipherContext {
    algorithm: &'static AlgorithmDescriptor,
    pub(crate) handle: CipherHandle,
    config: ContextConfig,
}

impl CipherContext {
    pub fn new(algorithm: &'static AlgorithmDescriptor) -> Self {
        Self::with_config(algorithm, ContextConfig::default())
    }

    pub fn with_config(algorithm: &'static AlgorithmDescriptor, config: ContextConfig) -> Self {
        debug!(cipher = %algorithm, ?config, "cipher context created");
        Self {
            algorithm,
            handle: CipherHandle::new(),
            config,
        }
    }

    pub fn algorithm(&self) -> &'static AlgorithmDescriptor {
        self.algorithm
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn is_stream(&self) -> bool {
        self.algorithm.is_stream()
    }

    pub fn counters(&self) -> &CipherCounters {
        self.handle.counters()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(self.algorithm, self.handle.counters())
    }

    /// Encrypt or decrypt the first `count` bytes of `input`.
    ///
    /// `padding` of `None` falls back to the context config, then to PKCS#7.
    pub fn crypt(
        &mut self,
        input: &[u8],
        count: usize,
        key: Option<&[u8]>,
        iv: &[u8],
        direction: Direction,
        padding: Option<bool>,
    ) -> CipherResult<Vec<u8>> {
        debug!(cipher = %self.algorithm, %direction, count, "crypt");
        let result = self.crypt_inner(input, count, key, iv, direction, padding);
        if let Err(err) = &result {
            self.handle.counters_mut().add_failure();
            warn!(cipher = %self.algorithm, %direction, error = %err, "crypt failed");
        }
        result
    }

    fn crypt_inner(
        &mut self,
        input: &[u8],
        count: usize,
        key: Option<&[u8]>,
        iv: &[u8],
        direction: Direction,
        padding: Option<bool>,
    ) -> CipherResult<Vec<u8>> {
        let input = input
            .get(..count)
            .ok_or(CipherError::CountOutOfRange { count, len: input.len() })?;
        let padding = padding.or(self.config.padding);
        keyed_init(&mut self.handle, self.algorithm, &self.config, key, iv, direction, padding)?;
        run(&mut self.handle, self.algorithm, input)
    }

    pub fn crypt_all(
        &mut self,
        input: &[u8],
        key: Option<&[u8]>,
        iv: &[u8],
        direction: Direction,
        padding: Option<bool>,
    ) -> CipherResult<Vec<u8>> {
        self.crypt(input, input.len(), key, iv, direction, padding)
    }

    pub fn encrypt(&mut self, input: &[u8], key: Option<&[u8]>, iv: &[u8]) -> CipherResult<Vec<u8>> {
        self.crypt_all(input, key, iv, Direction::Encrypt, None)
    }

    pub fn decrypt(&mut self, input: &[u8], key: Option<&[u8]>, iv: &[u8]) -> CipherResult<Vec<u8>> {
        self.crypt_all(input, key, iv, Direction::Decrypt, None)
    }

    pub fn encrypt_with_padding(
        &mut self,
        input: &[u8],
        key: Option<&[u8]>,
        iv: &[u8],
        padding: bool,
    ) -> CipherResult<Vec<u8>> {
        self.crypt_all(input, key, iv, Direction::Encrypt, Some(padding))
    }

    pub fn decrypt_with_padding(
        &mut self,
        input: &[u8],
        key: Option<&[u8]>,
        iv: &[u8],
        padding: bool,
    ) -> CipherResult<Vec<u8>> {
        self.crypt_all(input, key, iv, Direction::Decrypt, Some(padding))
    }

    /// Derive a key and IV sized for this context's algorithm.
    ///
    /// Lengths the algorithm reports as 0 default to 8 bytes.
    pub fn bytes_to_key(
        &self,
        md: MessageDigest,
        salt: Option<&[u8]>,
        passphrase: &[u8],
        count: u32,
    ) -> KeyMaterial {
        let or_default = |len: usize| if len == 0 { KDF_DEFAULT_LEN } else { len };
        kdf::bytes_to_key(
            md,
            salt,
            passphrase,
            count,
            or_default(self.algorithm.key_len()),
            or_default(self.algorithm.iv_len()),
        )
    }

    /// Encrypt `plaintext` once for every recipient. See [`envelope::seal`].
    pub fn seal<K: AsymmetricKey>(&mut self, recipients: &[K], plaintext: &[u8]) -> CipherResult<Envelope> {
        envelope::seal(self, recipients, plaintext)
    }

    /// Decrypt an envelope payload as one recipient. See [`envelope::open`].
    pub fn open<K: AsymmetricKey + ?Sized>(
        &mut self,
        data: &[u8],
        wrapped_key: &[u8],
        iv: &[u8],
        recipient: &K,
    ) -> CipherResult<Vec<u8>> {
        envelope::open(self, data, wrapped_key, iv, recipient)
    }
}

impl std::fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherContext")
            .field("algorithm", &self.algorithm.long_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Normalize `key`/`iv` under `config` and key `handle` for `algorithm`.
///
/// Shared by single-shot and streaming contexts.
pub(crate) fn keyed_init(
    handle: &mut CipherHandle,
    algorithm: &'static AlgorithmDescriptor,
    config: &ContextConfig,
    key: Option<&[u8]>,
    iv: &[u8],
    direction: Direction,
    padding: Option<bool>,
) -> CipherResult<()> {
    // 1️⃣ Fit key and IV to the algorithm
    let real_key = config.key_policy.fit_key(key, algorithm.key_len())?;
    let real_iv = config.iv_policy.fit_iv(iv, algorithm.iv_len())?;

    // 2️⃣ Bind algorithm and direction, then adjust key length and padding
    handle.init(Some(algorithm), None, None, Some(direction))?;
    handle.set_key_length(real_key.len())?;
    if let Some(enabled) = padding {
        handle.set_padding(enabled);
    }

    // 3️⃣ Key the handle
    if algorithm.is_stream() {
        let mut whitened = Zeroizing::new(real_key.into_owned());
        whiten_key(whitened.as_mut_slice(), iv);
        trace!(cipher = %algorithm, iv_len = iv.len(), "stream cipher: IV folded into key");
        handle.init(None, Some(whitened.as_slice()), None, None)
    } else {
        let keyed = handle.init(None, Some(&*real_key), Some(&*real_iv), None);
        if let Cow::Owned(mut padded) = real_key {
            padded.zeroize();
        }
        keyed
    }
}

/// Update over all of `input`, then finalize.
pub(crate) fn run(
    handle: &mut CipherHandle,
    algorithm: &AlgorithmDescriptor,
    input: &[u8],
) -> CipherResult<Vec<u8>> {
    let block_size = algorithm.block_size();
    let mut out = Vec::with_capacity(input.len().max(block_size) + block_size);
    handle.update(input, &mut out)?;
    handle.finalize(&mut out)?;
    Ok(out)
}
