//! Length validation for adapter inputs.
//!
//! Every check here runs before the provider is touched. A mismatch maps to the
//! length variant of [`PqError`] naming the offending buffer.

use pqcap_core::{PqError, Result};

/// Which caller buffer a length check is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    /// Keygen or encapsulation entropy
    Entropy,
    /// Public key
    PublicKey,
    /// Secret key
    SecretKey,
    /// KEM ciphertext
    Ciphertext,
}

impl BufferKind {
    fn mismatch(self, expected: usize, actual: usize) -> PqError {
        match self {
            BufferKind::Entropy => PqError::InvalidEntropyLength { expected, actual },
            BufferKind::PublicKey => PqError::InvalidPublicKeyLength { expected, actual },
            BufferKind::SecretKey => PqError::InvalidSecretKeyLength { expected, actual },
            BufferKind::Ciphertext => PqError::InvalidCiphertextLength { expected, actual },
        }
    }
}

/// Fails unless `buf` is exactly `expected` bytes long.
pub fn check_len(kind: BufferKind, buf: &[u8], expected: usize) -> Result<()> {
    if buf.len() == expected {
        Ok(())
    } else {
        Err(kind.mismatch(expected, buf.len()))
    }
}

/// Zeroed output buffer of exactly `len` bytes for a provider to fill.
pub(crate) fn output_buffer(len: usize) -> Vec<u8> {
    vec![0u8; len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_exact_length_passes() {
        assert!(check_len(BufferKind::PublicKey, &[0u8; 16], 16).is_ok());
    }

    #[test_case(BufferKind::Entropy, PqError::InvalidEntropyLength { expected: 48, actual: 47 })]
    #[test_case(BufferKind::PublicKey, PqError::InvalidPublicKeyLength { expected: 48, actual: 47 })]
    #[test_case(BufferKind::SecretKey, PqError::InvalidSecretKeyLength { expected: 48, actual: 47 })]
    #[test_case(BufferKind::Ciphertext, PqError::InvalidCiphertextLength { expected: 48, actual: 47 })]
    fn test_mismatch_names_the_buffer(kind: BufferKind, expected: PqError) {
        assert_eq!(check_len(kind, &[0u8; 47], 48).unwrap_err(), expected);
    }

    #[test]
    fn test_longer_buffer_rejected() {
        let err = check_len(BufferKind::Entropy, &[0u8; 49], 48).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_output_buffer_zeroed() {
        let buf = output_buffer(32);
        assert_eq!(buf.len(), 32);
        assert!(buf.iter().all(|b| *b == 0));
    }
}
