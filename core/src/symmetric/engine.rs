// ## 📂 File: `src/symmetric/engine.rs`

//! symmetric/engine.rs
//! Mode engines: one keyed, IV-bound instance of a primitive in a mode.
//!
//! Design notes:
//! - Engines only ever see whole blocks (or any length, for block size 1);
//!   buffering and padding live one level up in the handle.
//! - Concrete RustCrypto types are picked by macro so every
//!   (primitive, mode, direction) triple gets a monomorphic engine.
//! - Engines are `Send` and own their key schedule; dropping one wipes nothing
//!   beyond what the primitive crates do, the raw key lives in the handle.

use cipher::consts::{U16, U5};
use cipher::generic_array::GenericArray;
use cipher::{
    BlockCipher, BlockDecryptMut, BlockEncryptMut, BlockSizeUser, InnerIvInit, InvalidLength,
    KeyInit, KeyIvInit, StreamCipher, StreamCipherCoreWrapper,
};
use rc4::Rc4;

use crate::symmetric::descriptor::{AlgorithmDescriptor, CipherMode, Primitive};
use crate::types::{CipherError, CipherResult, Direction};

/// In-place transform over data whose length the handle keeps block-aligned.
pub(crate) trait ModeEngine: Send {
    fn process(&mut self, data: &mut [u8]);
}

/// ECB, CBC and CFB8: block-at-a-time encryption.
struct EncryptBlocks<E>(E);

struct DecryptBlocks<D>(D);

/// OFB, CTR and RC4: keystream XOR, identical in both directions.
struct Keystream<S>(S);

/// Full-block CFB over arbitrary lengths.
struct CfbEncrypt<C: BlockEncryptMut + BlockCipher>(cfb_mode::BufEncryptor<C>);

struct CfbDecrypt<C: BlockEncryptMut + BlockCipher>(cfb_mode::BufDecryptor<C>);

/// The `null` cipher.
struct Passthrough;

impl<E: BlockEncryptMut + Send> ModeEngine for EncryptBlocks<E> {
    fn process(&mut self, data: &mut [u8]) {
        let block_size = <E as BlockSizeUser>::block_size();
        for block in data.chunks_exact_mut(block_size) {
            self.0.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
    }
}

impl<D: BlockDecryptMut + Send> ModeEngine for DecryptBlocks<D> {
    fn process(&mut self, data: &mut [u8]) {
        let block_size = <D as BlockSizeUser>::block_size();
        for block in data.chunks_exact_mut(block_size) {
            self.0.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
    }
}

impl<S: StreamCipher + Send> ModeEngine for Keystream<S> {
    fn process(&mut self, data: &mut [u8]) {
        self.0.apply_keystream(data);
    }
}

impl<C: BlockEncryptMut + BlockCipher + Send> ModeEngine for CfbEncrypt<C> {
    fn process(&mut self, data: &mut [u8]) {
        self.0.encrypt(data);
    }
}

impl<C: BlockEncryptMut + BlockCipher + Send> ModeEngine for CfbDecrypt<C> {
    fn process(&mut self, data: &mut [u8]) {
        self.0.decrypt(data);
    }
}

impl ModeEngine for Passthrough {
    fn process(&mut self, _data: &mut [u8]) {}
}

fn boxed<E: ModeEngine + 'static>(engine: E) -> Box<dyn ModeEngine> {
    Box::new(engine)
}

/// ECB / CBC / CFB8 / full-block CFB / OFB for one block cipher.
macro_rules! block_engine {
    ($cipher:ty, $algorithm:expr, $direction:expr, $key:expr, $iv:expr, $invalid:expr) => {
        match ($algorithm.mode(), $direction) {
            (CipherMode::Cfb, Direction::Encrypt) if $algorithm.byte_feedback => boxed(EncryptBlocks(
                <cfb8::Encryptor<$cipher> as KeyIvInit>::new_from_slices($key, $iv).map_err($invalid)?,
            )),
            (CipherMode::Cfb, Direction::Decrypt) if $algorithm.byte_feedback => boxed(DecryptBlocks(
                <cfb8::Decryptor<$cipher> as KeyIvInit>::new_from_slices($key, $iv).map_err($invalid)?,
            )),
            (CipherMode::Ecb, Direction::Encrypt) => boxed(EncryptBlocks(
                <$cipher as KeyInit>::new_from_slice($key).map_err($invalid)?,
            )),
            (CipherMode::Ecb, Direction::Decrypt) => boxed(DecryptBlocks(
                <$cipher as KeyInit>::new_from_slice($key).map_err($invalid)?,
            )),
            (CipherMode::Cbc, Direction::Encrypt) => boxed(EncryptBlocks(
                <cbc::Encryptor<$cipher> as KeyIvInit>::new_from_slices($key, $iv).map_err($invalid)?,
            )),
            (CipherMode::Cbc, Direction::Decrypt) => boxed(DecryptBlocks(
                <cbc::Decryptor<$cipher> as KeyIvInit>::new_from_slices($key, $iv).map_err($invalid)?,
            )),
            (CipherMode::Cfb, Direction::Encrypt) => boxed(CfbEncrypt(
                <cfb_mode::BufEncryptor<$cipher> as KeyIvInit>::new_from_slices($key, $iv)
                    .map_err($invalid)?,
            )),
            (CipherMode::Cfb, Direction::Decrypt) => boxed(CfbDecrypt(
                <cfb_mode::BufDecryptor<$cipher> as KeyIvInit>::new_from_slices($key, $iv)
                    .map_err($invalid)?,
            )),
            // keyed through the primitive so variable-length keys are accepted
            (CipherMode::Ofb, _) => {
                let inner = <$cipher as KeyInit>::new_from_slice($key).map_err($invalid)?;
                boxed(Keystream(StreamCipherCoreWrapper::from_core(
                    <ofb::OfbCore<$cipher> as InnerIvInit>::inner_iv_slice_init(inner, $iv)
                        .map_err($invalid)?,
                )))
            }
            (mode, _) => {
                return Err(CipherError::UnsupportedMode {
                    algorithm: $algorithm.long_name(),
                    mode: mode.as_str(),
                })
            }
        }
    };
}

/// AES adds CTR on top of the common block modes.
macro_rules! aes_engine {
    ($cipher:ty, $algorithm:expr, $direction:expr, $key:expr, $iv:expr, $invalid:expr) => {
        match ($algorithm.mode(), $direction) {
            (CipherMode::Ctr, _) => boxed(Keystream(
                <ctr::Ctr128BE<$cipher> as KeyIvInit>::new_from_slices($key, $iv).map_err($invalid)?,
            )),
            _ => block_engine!($cipher, $algorithm, $direction, $key, $iv, $invalid),
        }
    };
}

/// Key an engine for `algorithm`.
///
/// `key` must already have the handle's key length and `iv` exactly the
/// algorithm's IV length; a primitive that still refuses them reports
/// `InvalidKeyLen`.
pub(crate) fn build_engine(
    algorithm: &AlgorithmDescriptor,
    direction: Direction,
    key: &[u8],
    iv: &[u8],
) -> CipherResult<Box<dyn ModeEngine>> {
    let invalid = |_: InvalidLength| CipherError::InvalidKeyLen {
        expected: algorithm.key_len(),
        actual: key.len(),
    };

    let engine = match algorithm.primitive {
        Primitive::Null => boxed(Passthrough),
        Primitive::Rc4 => boxed(Keystream(
            <Rc4<U16> as KeyInit>::new_from_slice(key).map_err(invalid)?,
        )),
        Primitive::Rc4_40 => boxed(Keystream(
            <Rc4<U5> as KeyInit>::new_from_slice(key).map_err(invalid)?,
        )),
        Primitive::Idea => block_engine!(idea::Idea, algorithm, direction, key, iv, invalid),
        Primitive::Rc2 => block_engine!(rc2::Rc2, algorithm, direction, key, iv, invalid),
        Primitive::Des => block_engine!(des::Des, algorithm, direction, key, iv, invalid),
        Primitive::DesEde => block_engine!(des::TdesEde2, algorithm, direction, key, iv, invalid),
        Primitive::DesEde3 => block_engine!(des::TdesEde3, algorithm, direction, key, iv, invalid),
        Primitive::Blowfish => {
            block_engine!(blowfish::Blowfish, algorithm, direction, key, iv, invalid)
        }
        Primitive::Cast5 => block_engine!(cast5::Cast5, algorithm, direction, key, iv, invalid),
        Primitive::Aes128 => aes_engine!(aes::Aes128, algorithm, direction, key, iv, invalid),
        Primitive::Aes192 => aes_engine!(aes::Aes192, algorithm, direction, key, iv, invalid),
        Primitive::Aes256 => aes_engine!(aes::Aes256, algorithm, direction, key, iv, invalid),
    };
    Ok(engine)
}
