//! Error types for pqcap.
//!
//! Three kinds of outcome are kept apart:
//!
//! - **Validation errors**: a buffer had the wrong length. Detected before the
//!   primitive provider is touched; the caller can fix and retry.
//! - **Provider failures**: the provider reported a non-success status.
//! - **Verification failure**: `open` rejected a signed message. This is a routine
//!   answer for forged or tampered input, not a fault.
//!
//! Running out of OS entropy is not represented here. It aborts the calling path
//! with a panic because no safe key material can be produced without it.
//!
//! KEM decapsulation of a ciphertext that does not match the secret key is not an
//! error either: it yields an unusable shared secret (implicit rejection).

use thiserror::Error;

use crate::types::SchemeId;

/// Result type alias using `PqError`.
pub type Result<T> = std::result::Result<T, PqError>;

/// Main error type for all pqcap operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PqError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Entropy buffer length differs from the scheme's entropy length.
    #[error("Invalid entropy length: expected {expected} bytes, got {actual}")]
    InvalidEntropyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Public key length differs from the scheme's public key length.
    #[error("Invalid public key length: expected {expected} bytes, got {actual}")]
    InvalidPublicKeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Secret key length differs from the scheme's secret key length.
    #[error("Invalid secret key length: expected {expected} bytes, got {actual}")]
    InvalidSecretKeyLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Ciphertext length differs from the scheme's ciphertext length.
    #[error("Invalid ciphertext length: expected {expected} bytes, got {actual}")]
    InvalidCiphertextLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // PROVIDER FAILURES
    // ═══════════════════════════════════════════════════════════════════════════
    /// The provider reported failure while generating a key pair.
    #[error("{scheme}: keypair generation failed")]
    KeypairGenerationFailed {
        /// Scheme whose provider failed
        scheme: SchemeId,
    },

    /// The provider rejected the encoding of the public key during encapsulation.
    #[error("{scheme}: encapsulation failed")]
    EncapsulationFailed {
        /// Scheme whose provider failed
        scheme: SchemeId,
    },

    /// The provider rejected the encoding of the secret key during decapsulation.
    ///
    /// Never raised because a ciphertext does not match the key.
    #[error("{scheme}: decapsulation failed")]
    DecapsulationFailed {
        /// Scheme whose provider failed
        scheme: SchemeId,
    },

    /// The provider reported failure while signing.
    #[error("{scheme}: signing failed")]
    SignFailed {
        /// Scheme whose provider failed
        scheme: SchemeId,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // VERIFICATION
    // ═══════════════════════════════════════════════════════════════════════════
    /// The signed message did not verify under the public key.
    #[error("{scheme}: signature verification failed")]
    SignatureVerificationFailed {
        /// Scheme that rejected the signature
        scheme: SchemeId,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP
    // ═══════════════════════════════════════════════════════════════════════════
    /// No scheme is registered under the given name.
    #[error("Unknown scheme: {0}")]
    UnknownScheme(String),
}

impl PqError {
    /// Returns true if the error was raised by the validation layer.
    ///
    /// These are caller-correctable and no provider call was made.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            PqError::InvalidEntropyLength { .. }
                | PqError::InvalidPublicKeyLength { .. }
                | PqError::InvalidSecretKeyLength { .. }
                | PqError::InvalidCiphertextLength { .. }
        )
    }

    /// Returns true if the primitive provider reported a failure status.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            PqError::KeypairGenerationFailed { .. }
                | PqError::EncapsulationFailed { .. }
                | PqError::DecapsulationFailed { .. }
                | PqError::SignFailed { .. }
        )
    }

    /// Returns true if this is a rejected signature.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, PqError::SignatureVerificationFailed { .. })
    }
}
