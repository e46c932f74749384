// ## 📂 File: `src/constants.rs`

//! constants.rs
//! Numeric registry constants shared by the catalog, the normalizer and the KDF.
//!
//! Object ids and mode values follow the OpenSSL object registry so that
//! descriptors can be compared against other EVP-style tooling.

/// Cipher mode identifiers (the MODE sub-field of a descriptor's flags word).
pub mod mode_ids {
    pub const STREAM_CIPHER: u32 = 0x0;
    pub const ECB: u32           = 0x1;
    pub const CBC: u32           = 0x2;
    pub const CFB: u32           = 0x3;
    pub const OFB: u32           = 0x4;
    pub const CTR: u32           = 0x5;

    /// Mask selecting the mode out of a flags word.
    pub const MODE_MASK: u32 = 0xF0007;
}

/// Non-mode flag bits.
pub mod flag_bits {
    /// Key length may be changed with `set_key_length`.
    pub const VARIABLE_LENGTH: u32 = 0x8;
}

/// Object ids (OpenSSL NIDs) for every catalog entry.
pub mod nids {
    pub const UNDEF: u32 = 0;

    pub const RC4: u32    = 5;
    pub const RC4_40: u32 = 97;

    pub const DES_ECB: u32   = 29;
    pub const DES_CFB64: u32 = 30;
    pub const DES_CBC: u32   = 31;
    pub const DES_OFB64: u32 = 45;
    pub const DES_CFB8: u32  = 657;

    pub const DES_EDE_ECB: u32    = 32;
    pub const DES_EDE3_ECB: u32   = 33;
    pub const DES_EDE_CBC: u32    = 43;
    pub const DES_EDE3_CBC: u32   = 44;
    pub const DES_EDE_CFB64: u32  = 60;
    pub const DES_EDE3_CFB64: u32 = 61;
    pub const DES_EDE_OFB64: u32  = 62;
    pub const DES_EDE3_OFB64: u32 = 63;
    pub const DES_EDE3_CFB8: u32  = 659;

    pub const IDEA_CBC: u32   = 34;
    pub const IDEA_CFB64: u32 = 35;
    pub const IDEA_ECB: u32   = 36;
    pub const IDEA_OFB64: u32 = 46;

    pub const RC2_CBC: u32    = 37;
    pub const RC2_ECB: u32    = 38;
    pub const RC2_CFB64: u32  = 39;
    pub const RC2_OFB64: u32  = 40;
    pub const RC2_40_CBC: u32 = 98;
    pub const RC2_64_CBC: u32 = 166;

    pub const BF_CBC: u32   = 91;
    pub const BF_ECB: u32   = 92;
    pub const BF_CFB64: u32 = 93;
    pub const BF_OFB64: u32 = 94;

    pub const CAST5_CBC: u32   = 108;
    pub const CAST5_ECB: u32   = 109;
    pub const CAST5_CFB64: u32 = 110;
    pub const CAST5_OFB64: u32 = 111;

    pub const AES_128_ECB: u32    = 418;
    pub const AES_128_CBC: u32    = 419;
    pub const AES_128_OFB128: u32 = 420;
    pub const AES_128_CFB128: u32 = 421;
    pub const AES_192_ECB: u32    = 422;
    pub const AES_192_CBC: u32    = 423;
    pub const AES_192_OFB128: u32 = 424;
    pub const AES_192_CFB128: u32 = 425;
    pub const AES_256_ECB: u32    = 426;
    pub const AES_256_CBC: u32    = 427;
    pub const AES_256_OFB128: u32 = 428;
    pub const AES_256_CFB128: u32 = 429;

    pub const AES_128_CFB8: u32 = 653;
    pub const AES_192_CFB8: u32 = 654;
    pub const AES_256_CFB8: u32 = 655;

    pub const AES_128_CTR: u32 = 904;
    pub const AES_192_CTR: u32 = 905;
    pub const AES_256_CTR: u32 = 906;
}

/// Digest object ids (OpenSSL NIDs).
pub mod digest_ids {
    pub const MD5: u16      = 4;
    pub const SHA1: u16     = 64;
    pub const SHA256: u16   = 672;
    pub const SHA384: u16   = 673;
    pub const SHA512: u16   = 674;
    pub const SHA224: u16   = 675;
    pub const SHA3_256: u16 = 1097;
    pub const SHA3_512: u16 = 1099;
}

/// Salt bytes consumed by `bytes_to_key` (PKCS#5 salt length).
pub const PKCS5_SALT_LEN: usize = 8;

/// Key/IV length `bytes_to_key` derives when a descriptor reports zero.
pub const KDF_DEFAULT_LEN: usize = 8;

/// Upper bound for a variable-length key.
pub const MAX_KEY_LENGTH: usize = 64;
