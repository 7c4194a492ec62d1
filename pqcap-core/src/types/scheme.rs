//! Scheme identifiers and parameter sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PqError;

// ═══════════════════════════════════════════════════════════════════════════════
// CAPABILITY
// ═══════════════════════════════════════════════════════════════════════════════

/// Which capability trait a scheme implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// [`KeyEncapsulationScheme`](crate::KeyEncapsulationScheme)
    KeyEncapsulation,
    /// [`SignatureScheme`](crate::SignatureScheme)
    Signature,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::KeyEncapsulation => f.write_str("kem"),
            Capability::Signature => f.write_str("signature"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCHEME ID
// ═══════════════════════════════════════════════════════════════════════════════

/// Identifier of a supported algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemeId {
    /// ML-DSA-65 (FIPS 204) signatures.
    #[serde(rename = "ml-dsa-65")]
    MlDsa65,
    /// ML-KEM-768 (FIPS 203) key encapsulation.
    #[serde(rename = "ml-kem-768")]
    MlKem768,
    /// ML-KEM-1024 (FIPS 203) key encapsulation.
    #[serde(rename = "ml-kem-1024")]
    MlKem1024,
}

impl SchemeId {
    /// Every supported scheme, signature scheme first.
    pub const ALL: [SchemeId; 3] = [SchemeId::MlDsa65, SchemeId::MlKem768, SchemeId::MlKem1024];

    /// Canonical lowercase name, also used in golden fixture file names.
    pub const fn name(&self) -> &'static str {
        match self {
            SchemeId::MlDsa65 => "ml-dsa-65",
            SchemeId::MlKem768 => "ml-kem-768",
            SchemeId::MlKem1024 => "ml-kem-1024",
        }
    }

    /// Capability implemented by the scheme.
    pub const fn capability(&self) -> Capability {
        match self {
            SchemeId::MlDsa65 => Capability::Signature,
            SchemeId::MlKem768 | SchemeId::MlKem1024 => Capability::KeyEncapsulation,
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeId {
    type Err = PqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SchemeId::ALL
            .into_iter()
            .find(|id| id.name() == normalized)
            .ok_or_else(|| PqError::UnknownScheme(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARAMETER SET
// ═══════════════════════════════════════════════════════════════════════════════

/// Fixed buffer lengths of one scheme.
///
/// Built from the provider's associated constants; never negotiated at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeParams {
    /// The scheme these lengths belong to
    pub scheme: SchemeId,
    /// Capability of the scheme
    pub capability: Capability,
    /// Entropy consumed per keygen/encapsulation
    pub entropy_len: usize,
    /// Public key length
    pub public_key_len: usize,
    /// Secret key length
    pub secret_key_len: usize,
    /// Ciphertext length (KEMs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ciphertext_len: Option<usize>,
    /// Shared secret length (KEMs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_secret_len: Option<usize>,
    /// Bytes signing adds to a message (signature schemes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_overhead: Option<usize>,
}

impl SchemeParams {
    /// Parameter set of a KEM.
    pub const fn kem(
        scheme: SchemeId,
        entropy_len: usize,
        public_key_len: usize,
        secret_key_len: usize,
        ciphertext_len: usize,
        shared_secret_len: usize,
    ) -> Self {
        Self {
            scheme,
            capability: Capability::KeyEncapsulation,
            entropy_len,
            public_key_len,
            secret_key_len,
            ciphertext_len: Some(ciphertext_len),
            shared_secret_len: Some(shared_secret_len),
            signature_overhead: None,
        }
    }

    /// Parameter set of a signature scheme.
    pub const fn signature(
        scheme: SchemeId,
        entropy_len: usize,
        public_key_len: usize,
        secret_key_len: usize,
        signature_overhead: usize,
    ) -> Self {
        Self {
            scheme,
            capability: Capability::Signature,
            entropy_len,
            public_key_len,
            secret_key_len,
            ciphertext_len: None,
            shared_secret_len: None,
            signature_overhead: Some(signature_overhead),
        }
    }
}
