//! Signature adapter.
//!
//! [`SignatureAdapter`] binds a [`SignaturePrimitive`] to the
//! [`SignatureScheme`] capability. Signed messages are attached:
//! `signature || message`.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, instrument, warn};

use pqcap_core::{KeyPair, PqError, Result, SchemeId, SchemeParams, SignaturePrimitive, SignatureScheme};

use crate::entropy::fresh_entropy;
use crate::provider::MlDsa65Primitive;
use crate::validate::{check_len, output_buffer, BufferKind};

/// ML-DSA-65 bound to the `fips204` provider.
pub type MlDsa65 = SignatureAdapter<MlDsa65Primitive>;

/// Signature capability over the provider `P`.
pub struct SignatureAdapter<P> {
    _provider: PhantomData<fn() -> P>,
}

impl<P: SignaturePrimitive> SignatureAdapter<P> {
    /// Creates the adapter.
    pub const fn new() -> Self {
        Self { _provider: PhantomData }
    }

    /// Parameter set of `P`.
    pub const fn parameters() -> SchemeParams {
        SchemeParams::signature(
            P::SCHEME,
            P::ENTROPY_BYTES,
            P::PUBLIC_KEY_BYTES,
            P::SECRET_KEY_BYTES,
            P::SIGNATURE_BYTES,
        )
    }
}

impl<P: SignaturePrimitive> Default for SignatureAdapter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SignaturePrimitive> Clone for SignatureAdapter<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: SignaturePrimitive> Copy for SignatureAdapter<P> {}

impl<P: SignaturePrimitive> fmt::Debug for SignatureAdapter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignatureAdapter").field(&P::SCHEME).finish()
    }
}

impl<P: SignaturePrimitive> SignatureScheme for SignatureAdapter<P> {
    fn scheme(&self) -> SchemeId {
        P::SCHEME
    }

    fn params(&self) -> SchemeParams {
        Self::parameters()
    }

    #[instrument(level = "debug", skip_all, fields(scheme = %P::SCHEME))]
    fn keygen(&self, entropy: &[u8]) -> Result<KeyPair> {
        check_len(BufferKind::Entropy, entropy, P::ENTROPY_BYTES)?;

        let mut public = output_buffer(P::PUBLIC_KEY_BYTES);
        let mut secret = output_buffer(P::SECRET_KEY_BYTES);
        P::keypair(&mut public, &mut secret, entropy)
            .map_err(|_| PqError::KeypairGenerationFailed { scheme: P::SCHEME })?;

        debug!(public_key_len = public.len(), "generated keypair");
        Ok(KeyPair::new(public, secret))
    }

    fn keygen_random(&self) -> Result<KeyPair> {
        let entropy = fresh_entropy(P::ENTROPY_BYTES);
        self.keygen(&entropy)
    }

    #[instrument(level = "debug", skip_all, fields(scheme = %P::SCHEME, message_len = message.len()))]
    fn sign(&self, message: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
        check_len(BufferKind::SecretKey, secret_key, P::SECRET_KEY_BYTES)?;

        let mut signed = output_buffer(message.len() + P::SIGNATURE_BYTES);
        P::sign(&mut signed, message, secret_key).map_err(|_| PqError::SignFailed { scheme: P::SCHEME })?;

        Ok(signed)
    }

    #[instrument(level = "debug", skip_all, fields(scheme = %P::SCHEME, signed_len = signed_message.len()))]
    fn open(&self, signed_message: &[u8], public_key: &[u8]) -> Result<Vec<u8>> {
        check_len(BufferKind::PublicKey, public_key, P::PUBLIC_KEY_BYTES)?;

        // The provider writes at most the bytes following the signature
        let mut message = output_buffer(signed_message.len().saturating_sub(P::SIGNATURE_BYTES));
        P::open(&mut message, signed_message, public_key).map_err(|_| {
            warn!("signature verification failed");
            PqError::SignatureVerificationFailed { scheme: P::SCHEME }
        })?;

        Ok(message)
    }
}
