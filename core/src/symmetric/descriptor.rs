// ## 📂 File: `src/symmetric/descriptor.rs`

//! symmetric/descriptor.rs
//! Immutable algorithm descriptors and the process-wide catalog.
//!
//! Design notes:
//! - Every descriptor is a `'static` item; contexts hold `&'static` references.
//! - The MODE sub-field of `flags` is the single source of truth for `is_stream`.
//! - Name lookup is case-insensitive over long name, short name and aliases,
//!   served from a lazily built index that is never mutated afterwards.
//!
//! Industry notes:
//! - Names, object ids and lengths follow the OpenSSL object registry, so
//!   `aes-128-cbc`, `AES-128-CBC` and `AES128` all resolve to one entry.

use std::collections::HashMap;
use std::fmt;

use bitflags::bitflags;
use num_enum::TryFromPrimitive;
use once_cell::sync::Lazy;

use crate::constants::{flag_bits, mode_ids, nids};

bitflags! {
    /// Descriptor flags word. Unknown bits (the mode sub-field) are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CipherFlags: u32 {
        const VARIABLE_LENGTH = flag_bits::VARIABLE_LENGTH;
    }
}

/// Chaining mode encoded in the flags word.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CipherMode {
    Stream = mode_ids::STREAM_CIPHER,
    Ecb = mode_ids::ECB,
    Cbc = mode_ids::CBC,
    Cfb = mode_ids::CFB,
    Ofb = mode_ids::OFB,
    Ctr = mode_ids::CTR,
}

impl CipherMode {
    /// Decode the mode sub-field of a flags word.
    pub fn from_flags(flags: CipherFlags) -> Option<Self> {
        Self::try_from_primitive(flags.bits() & mode_ids::MODE_MASK).ok()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CipherMode::Stream => "stream",
            CipherMode::Ecb => "ECB",
            CipherMode::Cbc => "CBC",
            CipherMode::Cfb => "CFB",
            CipherMode::Ofb => "OFB",
            CipherMode::Ctr => "CTR",
        }
    }
}

/// Block or stream primitive behind a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Primitive {
    Null,
    Des,
    DesEde,
    DesEde3,
    Rc4,
    Rc4_40,
    Idea,
    Rc2,
    Blowfish,
    Cast5,
    Aes128,
    Aes192,
    Aes256,
}

/// Static description of one symmetric cipher algorithm.
#[derive(Debug, PartialEq, Eq)]
pub struct AlgorithmDescriptor {
    id: u32,
    type_id: u32,
    block_size: usize,
    key_len: usize,
    iv_len: usize,
    flags: CipherFlags,
    long_name: &'static str,
    short_name: &'static str,
    aliases: &'static [&'static str],
    pub(crate) primitive: Primitive,
    /// CFB with 8-bit feedback rather than full-block feedback.
    pub(crate) byte_feedback: bool,
}

impl AlgorithmDescriptor {
    #[allow(clippy::too_many_arguments)]
    const fn new(
        id: u32,
        short_name: &'static str,
        long_name: &'static str,
        primitive: Primitive,
        mode: CipherMode,
        block_size: usize,
        key_len: usize,
        iv_len: usize,
    ) -> Self {
        Self {
            id,
            type_id: id,
            block_size,
            key_len,
            iv_len,
            flags: CipherFlags::from_bits_retain(mode as u32),
            long_name,
            short_name,
            aliases: &[],
            primitive,
            byte_feedback: false,
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn with_type_id(mut self, type_id: u32) -> Self {
        self.type_id = type_id;
        self
    }

    const fn with_variable_length(mut self) -> Self {
        self.flags = CipherFlags::from_bits_retain(self.flags.bits() | flag_bits::VARIABLE_LENGTH);
        self
    }

    const fn with_byte_feedback(mut self) -> Self {
        self.byte_feedback = true;
        self
    }

    /// Object id of this algorithm.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn iv_len(&self) -> usize {
        self.iv_len
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn flags(&self) -> CipherFlags {
        self.flags
    }

    pub fn mode(&self) -> CipherMode {
        CipherMode::from_flags(self.flags).unwrap_or(CipherMode::Stream)
    }

    pub fn long_name(&self) -> &'static str {
        self.long_name
    }

    pub fn short_name(&self) -> &'static str {
        self.short_name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// ASN.1 type id derived from the object id; 0 when there is none.
    pub fn cipher_type(&self) -> u32 {
        self.type_id
    }

    /// Long name of `cipher_type`, or `"undefined"`.
    pub fn type_name(&self) -> &'static str {
        lookup_by_id(self.type_id)
            .filter(|_| self.type_id != nids::UNDEF)
            .map_or("undefined", |d| d.long_name)
    }

    /// True when the MODE sub-field of `flags` is STREAM.
    pub fn is_stream(&self) -> bool {
        self.flags.bits() & mode_ids::MODE_MASK == mode_ids::STREAM_CIPHER
    }

    /// Long name, short name, then aliases.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        [self.long_name, self.short_name]
            .into_iter()
            .chain(self.aliases.iter().copied())
    }
}

impl fmt::Display for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name)
    }
}

use CipherMode::{Cbc, Cfb, Ctr, Ecb, Ofb, Stream};
use Primitive as P;

// -----------------------------------------------------------------------------
// Catalog entries
// -----------------------------------------------------------------------------

pub static NULL: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::UNDEF, "NULL", "null", P::Null, Stream, 1, 0, 0);

pub static DES_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_ECB, "DES-ECB", "des-ecb", P::Des, Ecb, 8, 8, 0);
pub static DES_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_CBC, "DES-CBC", "des-cbc", P::Des, Cbc, 8, 8, 8)
        .with_aliases(&["DES"]);
pub static DES_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_CFB64, "DES-CFB", "des-cfb", P::Des, Cfb, 1, 8, 8);
pub static DES_CFB8: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_CFB8, "DES-CFB8", "des-cfb8", P::Des, Cfb, 1, 8, 8)
        .with_byte_feedback()
        .with_type_id(nids::DES_CFB64);
pub static DES_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_OFB64, "DES-OFB", "des-ofb", P::Des, Ofb, 1, 8, 8);

pub static DES_EDE_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE_ECB, "DES-EDE", "des-ede", P::DesEde, Ecb, 8, 16, 0);
pub static DES_EDE_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE_CBC, "DES-EDE-CBC", "des-ede-cbc", P::DesEde, Cbc, 8, 16, 8);
pub static DES_EDE_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE_CFB64, "DES-EDE-CFB", "des-ede-cfb", P::DesEde, Cfb, 1, 16, 8)
        .with_type_id(nids::UNDEF);
pub static DES_EDE_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE_OFB64, "DES-EDE-OFB", "des-ede-ofb", P::DesEde, Ofb, 1, 16, 8)
        .with_type_id(nids::UNDEF);

pub static DES_EDE3_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE3_ECB, "DES-EDE3", "des-ede3", P::DesEde3, Ecb, 8, 24, 0);
pub static DES_EDE3_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE3_CBC, "DES-EDE3-CBC", "des-ede3-cbc", P::DesEde3, Cbc, 8, 24, 8)
        .with_aliases(&["DES3"]);
pub static DES_EDE3_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE3_CFB64, "DES-EDE3-CFB", "des-ede3-cfb", P::DesEde3, Cfb, 1, 24, 8)
        .with_type_id(nids::DES_CFB64);
pub static DES_EDE3_CFB8: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE3_CFB8, "DES-EDE3-CFB8", "des-ede3-cfb8", P::DesEde3, Cfb, 1, 24, 8)
        .with_byte_feedback()
        .with_type_id(nids::DES_CFB64);
pub static DES_EDE3_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::DES_EDE3_OFB64, "DES-EDE3-OFB", "des-ede3-ofb", P::DesEde3, Ofb, 1, 24, 8)
        .with_type_id(nids::UNDEF);

pub static RC4: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC4, "RC4", "rc4", P::Rc4, Stream, 1, 16, 0);
pub static RC4_40: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC4_40, "RC4-40", "rc4-40", P::Rc4_40, Stream, 1, 5, 0)
        .with_type_id(nids::RC4);

pub static IDEA_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::IDEA_ECB, "IDEA-ECB", "idea-ecb", P::Idea, Ecb, 8, 16, 0)
        .with_type_id(nids::UNDEF);
pub static IDEA_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::IDEA_CBC, "IDEA-CBC", "idea-cbc", P::Idea, Cbc, 8, 16, 8)
        .with_aliases(&["IDEA"]);
pub static IDEA_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::IDEA_CFB64, "IDEA-CFB", "idea-cfb", P::Idea, Cfb, 1, 16, 8)
        .with_type_id(nids::UNDEF);
pub static IDEA_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::IDEA_OFB64, "IDEA-OFB", "idea-ofb", P::Idea, Ofb, 1, 16, 8)
        .with_type_id(nids::UNDEF);

// RC2 effective key bits follow the key length (40 for RC2-40, 64 for RC2-64).
pub static RC2_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC2_ECB, "RC2-ECB", "rc2-ecb", P::Rc2, Ecb, 8, 16, 0)
        .with_variable_length()
        .with_type_id(nids::UNDEF);
pub static RC2_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC2_CBC, "RC2-CBC", "rc2-cbc", P::Rc2, Cbc, 8, 16, 8)
        .with_variable_length()
        .with_aliases(&["RC2"]);
pub static RC2_40_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC2_40_CBC, "RC2-40-CBC", "rc2-40-cbc", P::Rc2, Cbc, 8, 5, 8)
        .with_variable_length()
        .with_type_id(nids::RC2_CBC);
pub static RC2_64_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC2_64_CBC, "RC2-64-CBC", "rc2-64-cbc", P::Rc2, Cbc, 8, 8, 8)
        .with_variable_length()
        .with_type_id(nids::RC2_CBC);
pub static RC2_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC2_CFB64, "RC2-CFB", "rc2-cfb", P::Rc2, Cfb, 1, 16, 8)
        .with_variable_length()
        .with_type_id(nids::UNDEF);
pub static RC2_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::RC2_OFB64, "RC2-OFB", "rc2-ofb", P::Rc2, Ofb, 1, 16, 8)
        .with_variable_length()
        .with_type_id(nids::UNDEF);

pub static BF_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::BF_ECB, "BF-ECB", "bf-ecb", P::Blowfish, Ecb, 8, 16, 0)
        .with_variable_length();
pub static BF_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::BF_CBC, "BF-CBC", "bf-cbc", P::Blowfish, Cbc, 8, 16, 8)
        .with_variable_length()
        .with_aliases(&["BF", "blowfish"]);
pub static BF_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::BF_CFB64, "BF-CFB", "bf-cfb", P::Blowfish, Cfb, 1, 16, 8)
        .with_variable_length();
pub static BF_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::BF_OFB64, "BF-OFB", "bf-ofb", P::Blowfish, Ofb, 1, 16, 8)
        .with_variable_length();

pub static CAST5_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::CAST5_ECB, "CAST5-ECB", "cast5-ecb", P::Cast5, Ecb, 8, 16, 0)
        .with_variable_length();
pub static CAST5_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::CAST5_CBC, "CAST5-CBC", "cast5-cbc", P::Cast5, Cbc, 8, 16, 8)
        .with_variable_length()
        .with_aliases(&["CAST", "CAST-cbc"]);
pub static CAST5_CFB64: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::CAST5_CFB64, "CAST5-CFB", "cast5-cfb", P::Cast5, Cfb, 1, 16, 8)
        .with_variable_length();
pub static CAST5_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::CAST5_OFB64, "CAST5-OFB", "cast5-ofb", P::Cast5, Ofb, 1, 16, 8)
        .with_variable_length();

pub static AES_128_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_128_ECB, "AES-128-ECB", "aes-128-ecb", P::Aes128, Ecb, 16, 16, 0);
pub static AES_128_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_128_CBC, "AES-128-CBC", "aes-128-cbc", P::Aes128, Cbc, 16, 16, 16)
        .with_aliases(&["AES128"]);
pub static AES_128_CFB8: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_128_CFB8, "AES-128-CFB8", "aes-128-cfb8", P::Aes128, Cfb, 1, 16, 16)
        .with_byte_feedback()
        .with_type_id(nids::AES_128_CFB128);
pub static AES_128_CFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_128_CFB128, "AES-128-CFB", "aes-128-cfb", P::Aes128, Cfb, 1, 16, 16);
pub static AES_128_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_128_OFB128, "AES-128-OFB", "aes-128-ofb", P::Aes128, Ofb, 1, 16, 16);
pub static AES_128_CTR: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_128_CTR, "AES-128-CTR", "aes-128-ctr", P::Aes128, Ctr, 1, 16, 16)
        .with_type_id(nids::UNDEF);

pub static AES_192_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_192_ECB, "AES-192-ECB", "aes-192-ecb", P::Aes192, Ecb, 16, 24, 0);
pub static AES_192_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_192_CBC, "AES-192-CBC", "aes-192-cbc", P::Aes192, Cbc, 16, 24, 16)
        .with_aliases(&["AES192"]);
pub static AES_192_CFB8: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_192_CFB8, "AES-192-CFB8", "aes-192-cfb8", P::Aes192, Cfb, 1, 24, 16)
        .with_byte_feedback()
        .with_type_id(nids::AES_192_CFB128);
pub static AES_192_CFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_192_CFB128, "AES-192-CFB", "aes-192-cfb", P::Aes192, Cfb, 1, 24, 16);
pub static AES_192_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_192_OFB128, "AES-192-OFB", "aes-192-ofb", P::Aes192, Ofb, 1, 24, 16);
pub static AES_192_CTR: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_192_CTR, "AES-192-CTR", "aes-192-ctr", P::Aes192, Ctr, 1, 24, 16)
        .with_type_id(nids::UNDEF);

pub static AES_256_ECB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_256_ECB, "AES-256-ECB", "aes-256-ecb", P::Aes256, Ecb, 16, 32, 0);
pub static AES_256_CBC: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_256_CBC, "AES-256-CBC", "aes-256-cbc", P::Aes256, Cbc, 16, 32, 16)
        .with_aliases(&["AES256"]);
pub static AES_256_CFB8: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_256_CFB8, "AES-256-CFB8", "aes-256-cfb8", P::Aes256, Cfb, 1, 32, 16)
        .with_byte_feedback()
        .with_type_id(nids::AES_256_CFB128);
pub static AES_256_CFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_256_CFB128, "AES-256-CFB", "aes-256-cfb", P::Aes256, Cfb, 1, 32, 16);
pub static AES_256_OFB: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_256_OFB128, "AES-256-OFB", "aes-256-ofb", P::Aes256, Ofb, 1, 32, 16);
pub static AES_256_CTR: AlgorithmDescriptor =
    AlgorithmDescriptor::new(nids::AES_256_CTR, "AES-256-CTR", "aes-256-ctr", P::Aes256, Ctr, 1, 32, 16)
        .with_type_id(nids::UNDEF);

/// Registration order.
static CATALOG: &[&AlgorithmDescriptor] = &[
    &NULL,
    &DES_ECB, &DES_CBC, &DES_CFB64, &DES_CFB8, &DES_OFB,
    &DES_EDE_ECB, &DES_EDE_CBC, &DES_EDE_CFB64, &DES_EDE_OFB,
    &DES_EDE3_ECB, &DES_EDE3_CBC, &DES_EDE3_CFB64, &DES_EDE3_CFB8, &DES_EDE3_OFB,
    &RC4, &RC4_40,
    &IDEA_ECB, &IDEA_CBC, &IDEA_CFB64, &IDEA_OFB,
    &RC2_ECB, &RC2_CBC, &RC2_40_CBC, &RC2_64_CBC, &RC2_CFB64, &RC2_OFB,
    &BF_ECB, &BF_CBC, &BF_CFB64, &BF_OFB,
    &CAST5_ECB, &CAST5_CBC, &CAST5_CFB64, &CAST5_OFB,
    &AES_128_ECB, &AES_128_CBC, &AES_128_CFB8, &AES_128_CFB, &AES_128_OFB, &AES_128_CTR,
    &AES_192_ECB, &AES_192_CBC, &AES_192_CFB8, &AES_192_CFB, &AES_192_OFB, &AES_192_CTR,
    &AES_256_ECB, &AES_256_CBC, &AES_256_CFB8, &AES_256_CFB, &AES_256_OFB, &AES_256_CTR,
];

/// Lower-cased name -> descriptor. The first registration of a name wins.
static NAME_INDEX: Lazy<HashMap<String, &'static AlgorithmDescriptor>> = Lazy::new(|| {
    let mut index = HashMap::with_capacity(CATALOG.len() * 3);
    for &descriptor in CATALOG {
        for name in descriptor.names() {
            index.entry(name.to_ascii_lowercase()).or_insert(descriptor);
        }
    }
    index
});

/// Every descriptor, in registration order.
pub fn catalog() -> &'static [&'static AlgorithmDescriptor] {
    CATALOG
}

/// Case-insensitive lookup by long name, short name or alias.
pub fn lookup_by_name(name: &str) -> Option<&'static AlgorithmDescriptor> {
    NAME_INDEX.get(&name.to_ascii_lowercase()).copied()
}

/// First descriptor registered under object id `id`.
pub fn lookup_by_id(id: u32) -> Option<&'static AlgorithmDescriptor> {
    CATALOG.iter().copied().find(|d| d.id == id)
}

/// Long names and aliases in registration order.
pub fn all_names() -> Vec<&'static str> {
    CATALOG
        .iter()
        .flat_map(|d| std::iter::once(d.long_name).chain(d.aliases.iter().copied()))
        .collect()
}

pub fn all_names_sorted() -> Vec<&'static str> {
    let mut names = all_names();
    names.sort_unstable();
    names.dedup();
    names
}
