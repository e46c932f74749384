// ## 📂 File: `src/crypto/pkey.rs`

//! crypto/pkey.rs
//! Asymmetric keys that can wrap and unwrap envelope session keys.
//!
//! Design notes:
//! - `AsymmetricKey` is the only seam the envelope engine needs: a size and a
//!   wrap/unwrap pair. Anything that can do that (an HSM handle, a test
//!   double) can be a recipient.
//! - `RsaKey` wraps with RSA PKCS#1 v1.5 encryption, which is what legacy
//!   envelope formats expect. Prefer OAEP for anything new.

use std::fmt;

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::types::{CipherError, CipherResult};

pub trait AsymmetricKey {
    /// Size of a wrapped key in bytes.
    fn size(&self) -> usize;

    /// Encrypt a session key for this recipient.
    fn wrap_key(&self, secret: &[u8]) -> CipherResult<Vec<u8>>;

    /// Recover a session key. Needs private material.
    fn unwrap_key(&self, wrapped: &[u8]) -> CipherResult<Zeroizing<Vec<u8>>>;
}

impl<K: AsymmetricKey + ?Sized> AsymmetricKey for &K {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn wrap_key(&self, secret: &[u8]) -> CipherResult<Vec<u8>> {
        (**self).wrap_key(secret)
    }

    fn unwrap_key(&self, wrapped: &[u8]) -> CipherResult<Zeroizing<Vec<u8>>> {
        (**self).unwrap_key(wrapped)
    }
}

/// RSA key pair, or a public key alone.
#[derive(Clone)]
pub struct RsaKey {
    public: RsaPublicKey,
    private: Option<RsaPrivateKey>,
}

impl RsaKey {
    /// Generate a fresh key pair from the OS RNG.
    pub fn generate(bits: usize) -> CipherResult<Self> {
        let private = RsaPrivateKey::new(&mut OsRng, bits)?;
        Ok(Self::from_private(private))
    }

    pub fn from_private(private: RsaPrivateKey) -> Self {
        Self {
            public: private.to_public_key(),
            private: Some(private),
        }
    }

    pub fn from_public(public: RsaPublicKey) -> Self {
        Self { public, private: None }
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Copy without the private half.
    pub fn to_public(&self) -> Self {
        Self::from_public(self.public.clone())
    }

    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }
}

impl fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKey")
            .field("bits", &(self.public.size() * 8))
            .field("private", &self.private.is_some())
            .finish()
    }
}

impl AsymmetricKey for RsaKey {
    fn size(&self) -> usize {
        self.public.size()
    }

    fn wrap_key(&self, secret: &[u8]) -> CipherResult<Vec<u8>> {
        Ok(self.public.encrypt(&mut OsRng, Pkcs1v15Encrypt, secret)?)
    }

    fn unwrap_key(&self, wrapped: &[u8]) -> CipherResult<Zeroizing<Vec<u8>>> {
        let private = self.private.as_ref().ok_or(CipherError::MissingPrivateKey)?;
        Ok(Zeroizing::new(private.decrypt(Pkcs1v15Encrypt, wrapped)?))
    }
}
