pub mod digest;
pub mod kdf;
pub mod pkey;

pub use digest::*;
pub use kdf::*;
pub use pkey::*;
