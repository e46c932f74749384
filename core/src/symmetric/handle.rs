// ## 📂 File: `src/symmetric/handle.rs`

//! symmetric/handle.rs
//! EVP-style cipher handle: init / update / finalize over a mode engine.
//!
//! Design notes:
//! - `init` takes every argument optionally; omitted ones keep their state, so
//!   callers can bind the algorithm first, adjust key length and padding, and
//!   key the handle afterwards.
//! - Block modes buffer partial blocks and apply PKCS#7 at `finalize`. With
//!   padding on, decryption holds back the last whole block until `finalize`.
//! - The raw key sits in a `Zeroizing` buffer; buffered plaintext is wiped on drop.
//!
//! Summary: the only place that talks to mode engines. Contexts and the
//! envelope engine drive it; nothing outside the crate sees it.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use crate::constants::MAX_KEY_LENGTH;
use crate::crypto::pkey::AsymmetricKey;
use crate::symmetric::descriptor::{AlgorithmDescriptor, CipherFlags, CipherMode};
use crate::symmetric::engine::{build_engine, ModeEngine};
use crate::telemetry::CipherCounters;
use crate::types::{CipherError, CipherResult, Direction};

pub(crate) struct CipherHandle {
    algorithm: Option<&'static AlgorithmDescriptor>,
    direction: Direction,
    key_len: usize,
    padding: bool,
    key: Option<Zeroizing<Vec<u8>>>,
    iv: Vec<u8>,
    engine: Option<Box<dyn ModeEngine>>,
    engine_direction: Direction,
    pending: Vec<u8>,
    finalized: bool,
    counters: CipherCounters,
}

impl CipherHandle {
    pub(crate) fn new() -> Self {
        Self {
            algorithm: None,
            direction: Direction::Encrypt,
            key_len: 0,
            padding: true,
            key: None,
            iv: Vec::new(),
            engine: None,
            engine_direction: Direction::Encrypt,
            pending: Vec::new(),
            finalized: false,
            counters: CipherCounters::default(),
        }
    }

    pub(crate) fn counters(&self) -> &CipherCounters {
        &self.counters
    }

    pub(crate) fn counters_mut(&mut self) -> &mut CipherCounters {
        &mut self.counters
    }

    /// Forget key, IV and engine and bind `algorithm` with its defaults.
    fn reset(&mut self, algorithm: &'static AlgorithmDescriptor) {
        self.algorithm = Some(algorithm);
        self.key_len = algorithm.key_len();
        self.padding = true;
        self.key = None;
        self.iv.clear();
        self.iv.resize(algorithm.iv_len(), 0);
        self.engine = None;
    }

    /// (Re)initialize the handle.
    ///
    /// - `algorithm`: rebinds and resets every other setting.
    /// - `iv`: at least `iv_len` bytes; the first `iv_len` are kept.
    /// - `key`: exactly the current key length; keys the engine.
    /// - Without a key, a keyed handle restarts from its stored key when a new
    ///   IV is given or the direction changed. Chaining modes also restart from
    ///   the stored IV; CTR and IV-less stream ciphers keep their keystream
    ///   position.
    pub(crate) fn init(
        &mut self,
        algorithm: Option<&'static AlgorithmDescriptor>,
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        direction: Option<Direction>,
    ) -> CipherResult<()> {
        if let Some(algorithm) = algorithm {
            self.reset(algorithm);
        }
        let algorithm = self.algorithm.ok_or(CipherError::NoAlgorithm)?;
        if let Some(direction) = direction {
            self.direction = direction;
        }

        if let Some(iv) = iv {
            let iv_len = algorithm.iv_len();
            if iv.len() < iv_len {
                return Err(CipherError::InvalidIvLen { expected: iv_len, actual: iv.len() });
            }
            self.iv.clear();
            self.iv.extend_from_slice(&iv[..iv_len]);
        }

        self.pending.zeroize();
        self.finalized = false;
        self.counters.inits += 1;

        match key {
            Some(key) => {
                if key.len() != self.key_len {
                    return Err(CipherError::InvalidKeyLen { expected: self.key_len, actual: key.len() });
                }
                self.key = Some(Zeroizing::new(key.to_vec()));
                self.rekey(algorithm)
            }
            None => {
                // CTR keeps its counter running unless a new IV is bound
                let stale = self.engine.is_none() || self.engine_direction != self.direction;
                let restart = iv.is_some()
                    || (algorithm.iv_len() > 0 && algorithm.mode() != CipherMode::Ctr);
                if self.key.is_some() && (stale || restart) {
                    self.rekey(algorithm)
                } else {
                    Ok(())
                }
            }
        }
    }

    fn rekey(&mut self, algorithm: &AlgorithmDescriptor) -> CipherResult<()> {
        self.engine = None;
        let key = self.key.as_deref().ok_or(CipherError::NotInitialized)?;
        let engine = build_engine(algorithm, self.direction, key, &self.iv)?;
        trace!(cipher = %algorithm, direction = %self.direction, key_len = key.len(), "engine keyed");
        self.engine = Some(engine);
        self.engine_direction = self.direction;
        Ok(())
    }

    /// Change the key length for the next keyed `init`.
    ///
    /// Fixed-length algorithms only accept their own length.
    pub(crate) fn set_key_length(&mut self, len: usize) -> CipherResult<()> {
        let algorithm = self.algorithm.ok_or(CipherError::NoAlgorithm)?;
        if len == self.key_len {
            return Ok(());
        }
        let variable = algorithm.flags().contains(CipherFlags::VARIABLE_LENGTH);
        if variable && len > 0 && len <= MAX_KEY_LENGTH {
            self.key_len = len;
            self.key = None;
            self.engine = None;
            return Ok(());
        }
        Err(CipherError::InvalidKeyLen { expected: self.key_len, actual: len })
    }

    pub(crate) fn set_padding(&mut self, enabled: bool) {
        self.padding = enabled;
    }

    /// Transform `input`, appending whatever is ready to `out`.
    pub(crate) fn update(&mut self, input: &[u8], out: &mut Vec<u8>) -> CipherResult<usize> {
        let algorithm = self.algorithm.ok_or(CipherError::NoAlgorithm)?;
        if self.finalized {
            return Err(CipherError::Finalized);
        }
        let engine = self.engine.as_mut().ok_or(CipherError::NotInitialized)?;
        let start = out.len();
        let block_size = algorithm.block_size();

        if block_size <= 1 {
            out.extend_from_slice(input);
            engine.process(&mut out[start..]);
        } else {
            self.pending.extend_from_slice(input);
            let mut ready = self.pending.len() - self.pending.len() % block_size;
            if self.direction == Direction::Decrypt && self.padding && ready == self.pending.len() {
                ready = ready.saturating_sub(block_size);
            }
            out.extend_from_slice(&self.pending[..ready]);
            engine.process(&mut out[start..]);
            self.pending.drain(..ready);
        }

        let produced = out.len() - start;
        self.counters.updates += 1;
        self.counters.bytes_in += input.len() as u64;
        self.counters.bytes_out += produced as u64;
        Ok(produced)
    }

    /// Flush the last block: pad on encrypt, check and strip padding on decrypt.
    pub(crate) fn finalize(&mut self, out: &mut Vec<u8>) -> CipherResult<usize> {
        let algorithm = self.algorithm.ok_or(CipherError::NoAlgorithm)?;
        if self.finalized {
            return Err(CipherError::Finalized);
        }
        let engine = self.engine.as_mut().ok_or(CipherError::NotInitialized)?;
        let start = out.len();
        let block_size = algorithm.block_size();

        if block_size > 1 {
            let mut block = std::mem::take(&mut self.pending);
            let result = match (self.direction, self.padding) {
                (Direction::Encrypt, true) => {
                    let pad = block_size - block.len();
                    block.resize(block_size, pad as u8);
                    engine.process(&mut block);
                    out.extend_from_slice(&block);
                    Ok(())
                }
                (Direction::Decrypt, true) if block.len() != block_size => {
                    Err(CipherError::WrongFinalBlockLen { block_size, actual: block.len() })
                }
                (Direction::Decrypt, true) => {
                    engine.process(&mut block);
                    match strip_padding(&block) {
                        Some(plain) => {
                            out.extend_from_slice(plain);
                            Ok(())
                        }
                        None => Err(CipherError::BadDecrypt),
                    }
                }
                (_, false) if !block.is_empty() => {
                    Err(CipherError::NotBlockAligned { block_size, remainder: block.len() })
                }
                (_, false) => Ok(()),
            };
            block.zeroize();
            result?;
        }

        let produced = out.len() - start;
        self.finalized = true;
        self.counters.finals += 1;
        self.counters.bytes_out += produced as u64;
        Ok(produced)
    }

    /// Bind `algorithm` for encryption under a fresh random key and IV and wrap
    /// the key for each recipient, in order.
    ///
    /// Returns the wrapped keys and the IV (empty when the algorithm takes none).
    pub(crate) fn seal_init<K: AsymmetricKey>(
        &mut self,
        algorithm: &'static AlgorithmDescriptor,
        recipients: &[K],
    ) -> CipherResult<(Vec<Vec<u8>>, Vec<u8>)> {
        self.init(Some(algorithm), None, None, Some(Direction::Encrypt))?;

        let mut key = Zeroizing::new(vec![0u8; self.key_len]);
        OsRng.fill_bytes(key.as_mut_slice());
        let mut iv = vec![0u8; algorithm.iv_len()];
        OsRng.fill_bytes(&mut iv);

        let mut wrapped = Vec::with_capacity(recipients.len());
        for (index, recipient) in recipients.iter().enumerate() {
            let ek = recipient
                .wrap_key(&key)
                .map_err(|e| CipherError::Wrap { index, source: Box::new(e) })?;
            wrapped.push(ek);
        }

        self.init(None, Some(key.as_slice()), Some(iv.as_slice()), None)?;
        Ok((wrapped, iv))
    }

    /// Unwrap a session key with `recipient` and key the handle for decryption.
    pub(crate) fn open_init<K: AsymmetricKey + ?Sized>(
        &mut self,
        algorithm: &'static AlgorithmDescriptor,
        wrapped_key: &[u8],
        iv: &[u8],
        recipient: &K,
    ) -> CipherResult<()> {
        self.init(Some(algorithm), None, None, Some(Direction::Decrypt))?;
        let key = recipient.unwrap_key(wrapped_key)?;
        self.set_key_length(key.len())?;
        self.init(None, Some(key.as_slice()), Some(iv), None)
    }
}

impl Drop for CipherHandle {
    fn drop(&mut self) {
        self.pending.zeroize();
    }
}

/// PKCS#7: `Some(plaintext)` when every pad byte matches the pad length.
fn strip_padding(block: &[u8]) -> Option<&[u8]> {
    let pad = usize::from(*block.last()?);
    if pad == 0 || pad > block.len() {
        return None;
    }
    let (plain, padding) = block.split_at(block.len() - pad);
    padding.iter().all(|&b| usize::from(b) == pad).then_some(plain)
}
