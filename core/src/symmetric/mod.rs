//! symmetric/mod.rs
//! Symmetric cipher layer: catalog, normalization, handle and contexts.

pub mod context;
pub mod descriptor;
pub mod normalize;
pub mod streaming;

pub(crate) mod engine;
pub(crate) mod handle;

pub use context::CipherContext;
pub use descriptor::{
    all_names, all_names_sorted, catalog, lookup_by_id, lookup_by_name, AlgorithmDescriptor,
    CipherFlags, CipherMode,
};
pub use normalize::*;
pub use streaming::{DecryptContext, Decrypting, EncryptContext, Encrypting, StreamDirection, StreamingContext};
