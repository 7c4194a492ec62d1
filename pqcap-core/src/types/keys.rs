//! Key material returned by the capability traits.
//!
//! - [`KeyPair`]: Public key + secret key, always both fully populated
//! - [`Encapsulated`]: Ciphertext + shared secret from a KEM
//!
//! Buffers are plain owned byte vectors. Clearing them is the caller's decision;
//! both types implement [`Zeroize`] so a caller can do it explicitly.

use zeroize::Zeroize;

/// Number of leading bytes shown by `Debug` for public material.
const FINGERPRINT_LEN: usize = 8;

fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(FINGERPRINT_LEN)])
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PAIR
// ═══════════════════════════════════════════════════════════════════════════════

/// A public/secret key pair produced by key generation.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct KeyPair {
    /// Public key (safe to share)
    pub public: Vec<u8>,
    /// Secret key (keep private)
    pub secret: Vec<u8>,
}

impl KeyPair {
    /// Creates a new key pair from public and secret keys.
    pub fn new(public: Vec<u8>, secret: Vec<u8>) -> Self {
        Self { public, secret }
    }

    /// Splits into `(public, secret)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.public, self.secret)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &format_args!("{}..({} bytes)", fingerprint(&self.public), self.public.len()))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENCAPSULATION OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Output of KEM encapsulation.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Encapsulated {
    /// Ciphertext to send to the key holder
    pub ciphertext: Vec<u8>,
    /// Shared secret known to the sender
    pub shared_secret: Vec<u8>,
}

impl Encapsulated {
    /// Creates an encapsulation result.
    pub fn new(ciphertext: Vec<u8>, shared_secret: Vec<u8>) -> Self {
        Self {
            ciphertext,
            shared_secret,
        }
    }
}

impl std::fmt::Debug for Encapsulated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encapsulated")
            .field(
                "ciphertext",
                &format_args!("{}..({} bytes)", fingerprint(&self.ciphertext), self.ciphertext.len()),
            )
            .field("shared_secret", &"[REDACTED]")
            .finish()
    }
}
