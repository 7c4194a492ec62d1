//! ML-DSA-65 provider backed by the `fips204` crate.
//!
//! `fips204` produces detached signatures; this provider attaches them as
//! `signature || message`.

use fips204::ml_dsa_65::{PrivateKey, PublicKey, KG, PK_LEN, SIG_LEN, SK_LEN};
use fips204::traits::{KeyGen, SerDes, Signer, Verifier};

use pqcap_core::constants::ML_DSA_65_ENTROPY_LEN;
use pqcap_core::{PrimitiveFailure, PrimitiveStatus, SchemeId, SignaturePrimitive};

use super::{read_array, write_exact};
use crate::entropy::{rng_from_seed, signing_rng};

/// Empty signing context string.
const CONTEXT: &[u8] = &[];

/// ML-DSA-65 (FIPS 204, security category 3).
#[derive(Clone, Copy, Debug, Default)]
pub struct MlDsa65Primitive;

impl SignaturePrimitive for MlDsa65Primitive {
    const SCHEME: SchemeId = SchemeId::MlDsa65;
    const ENTROPY_BYTES: usize = ML_DSA_65_ENTROPY_LEN;
    const PUBLIC_KEY_BYTES: usize = PK_LEN;
    const SECRET_KEY_BYTES: usize = SK_LEN;
    const SIGNATURE_BYTES: usize = SIG_LEN;

    fn keypair(pk: &mut [u8], sk: &mut [u8], entropy: &[u8]) -> PrimitiveStatus {
        let mut rng = rng_from_seed(read_array(entropy)?);
        let (public, secret) = <KG as KeyGen>::try_keygen_with_rng(&mut rng).map_err(|_| PrimitiveFailure)?;

        write_exact(pk, &public.into_bytes())?;
        write_exact(sk, &secret.into_bytes())
    }

    fn sign(sm: &mut [u8], msg: &[u8], sk: &[u8]) -> PrimitiveStatus {
        if sm.len() != msg.len() + SIG_LEN {
            return Err(PrimitiveFailure);
        }
        let secret = PrivateKey::try_from_bytes(read_array::<SK_LEN>(sk)?).map_err(|_| PrimitiveFailure)?;
        let signature = secret
            .try_sign_with_rng(&mut signing_rng(), msg, CONTEXT)
            .map_err(|_| PrimitiveFailure)?;

        let (sig_out, msg_out) = sm.split_at_mut(SIG_LEN);
        write_exact(sig_out, &signature)?;
        write_exact(msg_out, msg)
    }

    fn open(msg: &mut [u8], sm: &[u8], pk: &[u8]) -> PrimitiveStatus {
        if sm.len() < SIG_LEN {
            return Err(PrimitiveFailure);
        }
        let (signature, body) = sm.split_at(SIG_LEN);
        let signature = read_array::<SIG_LEN>(signature)?;
        let public = PublicKey::try_from_bytes(read_array::<PK_LEN>(pk)?).map_err(|_| PrimitiveFailure)?;

        if !public.verify(body, &signature, CONTEXT) {
            return Err(PrimitiveFailure);
        }
        write_exact(msg, body)
    }
}
