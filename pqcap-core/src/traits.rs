//! Capability and provider traits for pqcap.
//!
//! Callers program against the two capability traits. Adapters implement them by
//! binding a primitive provider, which is described by the two provider traits.

use thiserror::Error;

use crate::error::Result;
use crate::types::{Encapsulated, KeyPair, SchemeId, SchemeParams};

// ═══════════════════════════════════════════════════════════════════════════════
// CAPABILITY TRAITS
// ═══════════════════════════════════════════════════════════════════════════════

/// A key-encapsulation mechanism.
///
/// All byte buffers are raw and fixed-length; every length is checked against
/// [`params`](Self::params) before any math runs.
pub trait KeyEncapsulationScheme: Send + Sync {
    /// Identifier of the bound algorithm.
    fn scheme(&self) -> SchemeId;

    /// Parameter set of the bound algorithm.
    fn params(&self) -> SchemeParams;

    /// Generates a key pair from caller-supplied entropy.
    ///
    /// Identical entropy yields byte-identical key pairs.
    fn keygen(&self, entropy: &[u8]) -> Result<KeyPair>;

    /// Generates a key pair from fresh OS entropy.
    ///
    /// # Panics
    /// If the operating system cannot supply entropy.
    fn keygen_random(&self) -> Result<KeyPair>;

    /// Encapsulates a fresh shared secret to `public_key`, using `entropy` as the
    /// only source of randomness.
    fn encapsulate(&self, entropy: &[u8], public_key: &[u8]) -> Result<Encapsulated>;

    /// Encapsulates with fresh OS entropy.
    ///
    /// # Panics
    /// If the operating system cannot supply entropy.
    fn encapsulate_random(&self, public_key: &[u8]) -> Result<Encapsulated>;

    /// Recovers the shared secret from `ciphertext`.
    ///
    /// A well-formed ciphertext that was not produced for this key does not fail:
    /// the result is a deterministic pseudorandom value unrelated to the sender's
    /// secret. Do not use success here as evidence that the ciphertext was valid.
    fn decapsulate(&self, ciphertext: &[u8], secret_key: &[u8]) -> Result<Vec<u8>>;
}

/// A digital-signature scheme producing attached (signature || message) output.
pub trait SignatureScheme: Send + Sync {
    /// Identifier of the bound algorithm.
    fn scheme(&self) -> SchemeId;

    /// Parameter set of the bound algorithm.
    fn params(&self) -> SchemeParams;

    /// Generates a key pair from caller-supplied entropy.
    fn keygen(&self, entropy: &[u8]) -> Result<KeyPair>;

    /// Generates a key pair from fresh OS entropy.
    ///
    /// # Panics
    /// If the operating system cannot supply entropy.
    fn keygen_random(&self) -> Result<KeyPair>;

    /// Signs `message`. Deterministic in `(message, secret_key)`.
    ///
    /// The output is `message.len() + overhead` bytes long.
    fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>>;

    /// Verifies `signed_message` and returns the embedded message.
    fn open(&self, signed_message: &[u8], public_key: &[u8]) -> Result<Vec<u8>>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRIMITIVE PROVIDER TRAITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Non-success status reported by a primitive provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Error)]
#[error("primitive provider returned non-zero status")]
pub struct PrimitiveFailure;

/// Status of one provider call. `Ok(())` is the zero status.
pub type PrimitiveStatus = std::result::Result<(), PrimitiveFailure>;

/// The math behind a KEM.
///
/// Callers of these functions guarantee every slice has exactly the length named
/// by the matching constant. Implementations write every byte of every output
/// slice on success and keep all working state on the stack of the call.
pub trait KemPrimitive: Send + Sync + 'static {
    /// Scheme implemented by this provider.
    const SCHEME: SchemeId;
    /// Entropy consumed per keypair or encapsulation.
    const ENTROPY_BYTES: usize;
    /// Public key length.
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key length.
    const SECRET_KEY_BYTES: usize;
    /// Ciphertext length.
    const CIPHERTEXT_BYTES: usize;
    /// Shared secret length.
    const SHARED_SECRET_BYTES: usize;

    /// Derives a key pair from `entropy`.
    fn keypair(pk: &mut [u8], sk: &mut [u8], entropy: &[u8]) -> PrimitiveStatus;

    /// Encapsulates to `pk` using `entropy`.
    ///
    /// Fails only if the provider rejects the encoding of `pk`.
    fn encapsulate(ct: &mut [u8], ss: &mut [u8], pk: &[u8], entropy: &[u8]) -> PrimitiveStatus;

    /// Decapsulates `ct` with implicit rejection.
    ///
    /// Fails only if the provider rejects the encoding of `sk`.
    fn decapsulate(ss: &mut [u8], ct: &[u8], sk: &[u8]) -> PrimitiveStatus;
}

/// The math behind an attached-signature scheme.
pub trait SignaturePrimitive: Send + Sync + 'static {
    /// Scheme implemented by this provider.
    const SCHEME: SchemeId;
    /// Entropy consumed per keypair.
    const ENTROPY_BYTES: usize;
    /// Public key length.
    const PUBLIC_KEY_BYTES: usize;
    /// Secret key length.
    const SECRET_KEY_BYTES: usize;
    /// Bytes added to a message by signing.
    const SIGNATURE_BYTES: usize;

    /// Derives a key pair from `entropy`.
    fn keypair(pk: &mut [u8], sk: &mut [u8], entropy: &[u8]) -> PrimitiveStatus;

    /// Writes `signature || msg` into `sm`, which is `msg.len() + SIGNATURE_BYTES` long.
    fn sign(sm: &mut [u8], msg: &[u8], sk: &[u8]) -> PrimitiveStatus;

    /// Verifies `sm` and writes the embedded message into `msg`.
    ///
    /// `msg` is `sm.len() - SIGNATURE_BYTES` long (empty when `sm` is shorter than
    /// a signature, in which case verification fails). Nothing beyond `msg.len()`
    /// bytes is ever written.
    fn open(msg: &mut [u8], sm: &[u8], pk: &[u8]) -> PrimitiveStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_failure_display() {
        assert_eq!(PrimitiveFailure.to_string(), "primitive provider returned non-zero status");
    }

    #[test]
    fn test_primitive_failure_is_std_error() {
        let err: Box<dyn std::error::Error + Send + Sync> = Box::new(PrimitiveFailure);
        assert!(err.source().is_none());
        assert!(err.downcast_ref::<PrimitiveFailure>().is_some());
    }

    #[test]
    fn test_capability_traits_are_object_safe() {
        fn accepts_kem(_: Option<&dyn KeyEncapsulationScheme>) {}
        fn accepts_sig(_: Option<&dyn SignatureScheme>) {}
        accepts_kem(None);
        accepts_sig(None);
    }
}
