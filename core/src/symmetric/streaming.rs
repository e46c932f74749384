// ## 📂 File: `src/symmetric/streaming.rs`

//! symmetric/streaming.rs
//! Pre-keyed contexts for repeated encryption or decryption.
//!
//! Design notes:
//! - Key and IV are normalized (and whitened, for stream ciphers) once, at
//!   construction. Each call then re-initializes without a key.
//! - Re-initializing with no IV restarts chaining modes (CBC, CFB, OFB) from
//!   the IV bound at construction. CTR and RC4 keep their keystream position,
//!   so a paired encrypt/decrypt context stays in lockstep across calls.
//! - Per-call IVs are fitted with the same `ContextConfig` as construction.
//! - Direction is a type parameter: calling `decrypt` on an `EncryptContext`
//!   does not compile.

use std::marker::PhantomData;

use tracing::debug;

use crate::config::ContextConfig;
use crate::symmetric::context::{keyed_init, run};
use crate::symmetric::descriptor::AlgorithmDescriptor;
use crate::symmetric::handle::CipherHandle;
use crate::telemetry::{CipherCounters, TelemetrySnapshot};
use crate::types::{CipherError, CipherResult, Direction};

mod sealed {
    pub trait Sealed {}
}

/// Marker for the direction a streaming context was built for.
pub trait StreamDirection: sealed::Sealed {
    const DIRECTION: Direction;
}

#[derive(Debug)]
pub enum Encrypting {}

#[derive(Debug)]
pub enum Decrypting {}

impl sealed::Sealed for Encrypting {}
impl sealed::Sealed for Decrypting {}

impl StreamDirection for Encrypting {
    const DIRECTION: Direction = Direction::Encrypt;
}

impl StreamDirection for Decrypting {
    const DIRECTION: Direction = Direction::Decrypt;
}

pub struct StreamingContext<D: StreamDirection> {
    algorithm: &'static AlgorithmDescriptor,
    handle: CipherHandle,
    config: ContextConfig,
    _direction: PhantomData<D>,
}

pub type EncryptContext = StreamingContext<Encrypting>;
pub type DecryptContext = StreamingContext<Decrypting>;

impl<D: StreamDirection> StreamingContext<D> {
    /// Normalize `key` and `iv` for `algorithm` and key the context.
    pub fn new(
        algorithm: &'static AlgorithmDescriptor,
        key: Option<&[u8]>,
        iv: &[u8],
        padding: Option<bool>,
    ) -> CipherResult<Self> {
        Self::with_config(algorithm, key, iv, padding, &ContextConfig::default())
    }

    pub fn with_config(
        algorithm: &'static AlgorithmDescriptor,
        key: Option<&[u8]>,
        iv: &[u8],
        padding: Option<bool>,
        config: &ContextConfig,
    ) -> CipherResult<Self> {
        let mut handle = CipherHandle::new();
        let padding = padding.or(config.padding);
        keyed_init(&mut handle, algorithm, config, key, iv, D::DIRECTION, padding)?;
        debug!(cipher = %algorithm, direction = %D::DIRECTION, "streaming context keyed");
        Ok(Self {
            algorithm,
            handle,
            config: config.clone(),
            _direction: PhantomData,
        })
    }

    pub fn algorithm(&self) -> &'static AlgorithmDescriptor {
        self.algorithm
    }

    pub fn direction(&self) -> Direction {
        D::DIRECTION
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn counters(&self) -> &CipherCounters {
        self.handle.counters()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(self.algorithm, self.handle.counters())
    }

    fn transform(&mut self, input: &[u8], iv: Option<&[u8]>, count: usize) -> CipherResult<Vec<u8>> {
        let input = input
            .get(..count)
            .ok_or(CipherError::CountOutOfRange { count, len: input.len() })?;
        let iv = iv
            .map(|iv| self.config.iv_policy.fit_iv(iv, self.algorithm.iv_len()))
            .transpose()?;
        self.handle.init(None, None, iv.as_deref(), None)?;
        run(&mut self.handle, self.algorithm, input)
    }
}

impl StreamingContext<Encrypting> {
    /// Encrypt the first `count` bytes of `input`.
    pub fn encrypt(&mut self, input: &[u8], count: usize) -> CipherResult<Vec<u8>> {
        self.transform(input, None, count)
    }

    /// Encrypt under a different IV; later calls without one keep using it.
    pub fn encrypt_with_iv(&mut self, input: &[u8], iv: &[u8], count: usize) -> CipherResult<Vec<u8>> {
        self.transform(input, Some(iv), count)
    }
}

impl StreamingContext<Decrypting> {
    /// Decrypt the first `count` bytes of `input`.
    pub fn decrypt(&mut self, input: &[u8], count: usize) -> CipherResult<Vec<u8>> {
        self.transform(input, None, count)
    }

    /// Decrypt under a different IV; later calls without one keep using it.
    pub fn decrypt_with_iv(&mut self, input: &[u8], iv: &[u8], count: usize) -> CipherResult<Vec<u8>> {
        self.transform(input, Some(iv), count)
    }
}

impl<D: StreamDirection> std::fmt::Debug for StreamingContext<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingContext")
            .field("algorithm", &self.algorithm.long_name())
            .field("direction", &D::DIRECTION)
            .finish_non_exhaustive()
    }
}
