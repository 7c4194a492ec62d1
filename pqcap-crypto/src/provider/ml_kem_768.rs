//! ML-KEM-768 provider backed by the RustCrypto `ml-kem` crate.

use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{Ciphertext, EncodedSizeUser, KemCore, MlKem768};

use pqcap_core::constants::{DOMAIN_ENCAPS_SEED, DOMAIN_KEYGEN_SEED, ML_KEM_768_ENTROPY_LEN};
use pqcap_core::{KemPrimitive, PrimitiveFailure, PrimitiveStatus, SchemeId};

use super::{decode_key, write_exact};
use crate::entropy::rng_from_entropy;

type DecapsulationKey = <MlKem768 as KemCore>::DecapsulationKey;
type EncapsulationKey = <MlKem768 as KemCore>::EncapsulationKey;

/// ML-KEM-768 (FIPS 203, security category 3).
#[derive(Clone, Copy, Debug, Default)]
pub struct MlKem768Primitive;

impl KemPrimitive for MlKem768Primitive {
    const SCHEME: SchemeId = SchemeId::MlKem768;
    const ENTROPY_BYTES: usize = ML_KEM_768_ENTROPY_LEN;
    const PUBLIC_KEY_BYTES: usize = 1184;
    const SECRET_KEY_BYTES: usize = 2400;
    const CIPHERTEXT_BYTES: usize = 1088;
    const SHARED_SECRET_BYTES: usize = 32;

    fn keypair(pk: &mut [u8], sk: &mut [u8], entropy: &[u8]) -> PrimitiveStatus {
        let mut rng = rng_from_entropy(DOMAIN_KEYGEN_SEED, entropy);
        let (dk, ek) = MlKem768::generate(&mut rng);

        write_exact(pk, ek.as_bytes().as_slice())?;
        write_exact(sk, dk.as_bytes().as_slice())
    }

    fn encapsulate(ct: &mut [u8], ss: &mut [u8], pk: &[u8], entropy: &[u8]) -> PrimitiveStatus {
        let ek: EncapsulationKey = decode_key(pk)?;
        let mut rng = rng_from_entropy(DOMAIN_ENCAPS_SEED, entropy);
        let (ciphertext, shared) = ek.encapsulate(&mut rng).map_err(|_| PrimitiveFailure)?;

        write_exact(ct, ciphertext.as_slice())?;
        write_exact(ss, shared.as_slice())
    }

    fn decapsulate(ss: &mut [u8], ct: &[u8], sk: &[u8]) -> PrimitiveStatus {
        let dk: DecapsulationKey = decode_key(sk)?;
        let ciphertext: Ciphertext<MlKem768> = ct.try_into().map_err(|_| PrimitiveFailure)?;
        let shared = dk.decapsulate(&ciphertext).map_err(|_| PrimitiveFailure)?;

        write_exact(ss, shared.as_slice())
    }
}
