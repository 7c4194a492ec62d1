//! Primitive providers.
//!
//! Each provider implements [`KemPrimitive`](pqcap_core::KemPrimitive) or
//! [`SignaturePrimitive`](pqcap_core::SignaturePrimitive) over one third-party
//! implementation:
//!
//! | Provider | Crate | Scheme |
//! |----------|-------|--------|
//! | [`MlKem768Primitive`] | `ml-kem` | ML-KEM-768 |
//! | [`MlKem1024Primitive`] | `ml-kem` | ML-KEM-1024 |
//! | [`MlDsa65Primitive`] | `fips204` | ML-DSA-65 |
//!
//! Providers see only exact-length slices. They decode the caller bytes into the
//! crate's key types, run the math, and write the encoded result back.

mod ml_dsa_65;
mod ml_kem_1024;
mod ml_kem_768;

pub use ml_dsa_65::MlDsa65Primitive;
pub use ml_kem_1024::MlKem1024Primitive;
pub use ml_kem_768::MlKem768Primitive;

use ml_kem::EncodedSizeUser;
use pqcap_core::{PrimitiveFailure, PrimitiveStatus};

/// Copies `src` into `dst`, failing unless both are the same length.
fn write_exact(dst: &mut [u8], src: &[u8]) -> PrimitiveStatus {
    if dst.len() != src.len() {
        return Err(PrimitiveFailure);
    }
    dst.copy_from_slice(src);
    Ok(())
}

/// Decodes an `ml-kem` key. Only the length is checked; `ml-kem` accepts any
/// encoding of the right size.
fn decode_key<T: EncodedSizeUser>(bytes: &[u8]) -> Result<T, PrimitiveFailure> {
    let encoded = bytes.try_into().map_err(|_| PrimitiveFailure)?;
    Ok(T::from_bytes(&encoded))
}

/// Reads an exact-size array out of `src`.
fn read_array<const N: usize>(src: &[u8]) -> Result<[u8; N], PrimitiveFailure> {
    src.try_into().map_err(|_| PrimitiveFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_exact_rejects_length_mismatch() {
        let mut dst = [0u8; 4];
        assert_eq!(write_exact(&mut dst, &[1, 2, 3]), Err(PrimitiveFailure));
        assert_eq!(dst, [0u8; 4]);
        assert!(write_exact(&mut dst, &[1, 2, 3, 4]).is_ok());
        assert_eq!(dst, [1, 2, 3, 4]);
    }

    #[test]
    fn test_read_array() {
        assert_eq!(read_array::<2>(&[9, 8]), Ok([9, 8]));
        assert!(read_array::<2>(&[9]).is_err());
    }
}
