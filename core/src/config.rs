// ## 📂 File: `src/config.rs`

//! config.rs
//! Per-context configuration.
//!
//! Summary: chooses how caller-supplied keys and IVs are fitted to an
//! algorithm, and the padding used when a call does not say.

use serde::{Deserialize, Serialize};

use crate::types::CipherResult;

/// How a key or IV of the wrong length is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Truncate or zero-pad to the algorithm's length.
    #[default]
    Lenient,
    /// Reject anything that would need truncation or padding.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub key_policy: LengthPolicy,
    pub iv_policy: LengthPolicy,
    /// Padding applied when a call passes `None`; `None` keeps PKCS#7 on.
    pub padding: Option<bool>,
}

impl ContextConfig {
    pub fn new(
        key_policy: Option<LengthPolicy>,
        iv_policy: Option<LengthPolicy>,
        padding: Option<bool>,
    ) -> Self {
        Self {
            key_policy: key_policy.unwrap_or_default(),
            iv_policy: iv_policy.unwrap_or_default(),
            padding,
        }
    }

    /// Both key and IV must already have the algorithm's lengths.
    pub fn strict() -> Self {
        Self::new(Some(LengthPolicy::Strict), Some(LengthPolicy::Strict), None)
    }

    pub fn from_json(json: &str) -> CipherResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CipherResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
