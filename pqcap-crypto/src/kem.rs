//! Key-encapsulation adapter.
//!
//! [`KemAdapter`] binds a [`KemPrimitive`] to the [`KeyEncapsulationScheme`]
//! capability. Each entry point follows the same three steps:
//!
//! 1. Check every input length against the provider constants
//! 2. Allocate exact-size output buffers and hand them to the provider
//! 3. Map a provider failure to the operation's error variant
//!
//! Nothing is returned unless the provider reported success.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, instrument};

use pqcap_core::{Encapsulated, KemPrimitive, KeyEncapsulationScheme, KeyPair, PqError, Result, SchemeId, SchemeParams};

use crate::entropy::fresh_entropy;
use crate::provider::{MlKem1024Primitive, MlKem768Primitive};
use crate::validate::{check_len, output_buffer, BufferKind};

/// ML-KEM-768 bound to the `ml-kem` provider.
pub type MlKem768 = KemAdapter<MlKem768Primitive>;

/// ML-KEM-1024 bound to the `ml-kem` provider.
pub type MlKem1024 = KemAdapter<MlKem1024Primitive>;

/// KEM capability over the provider `P`.
///
/// Stateless and zero-sized; one value can be shared across threads.
pub struct KemAdapter<P> {
    _provider: PhantomData<fn() -> P>,
}

impl<P: KemPrimitive> KemAdapter<P> {
    /// Creates the adapter.
    pub const fn new() -> Self {
        Self { _provider: PhantomData }
    }

    /// Parameter set of `P`.
    pub const fn parameters() -> SchemeParams {
        SchemeParams::kem(
            P::SCHEME,
            P::ENTROPY_BYTES,
            P::PUBLIC_KEY_BYTES,
            P::SECRET_KEY_BYTES,
            P::CIPHERTEXT_BYTES,
            P::SHARED_SECRET_BYTES,
        )
    }
}

impl<P: KemPrimitive> Default for KemAdapter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: KemPrimitive> Clone for KemAdapter<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: KemPrimitive> Copy for KemAdapter<P> {}

impl<P: KemPrimitive> fmt::Debug for KemAdapter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KemAdapter").field(&P::SCHEME).finish()
    }
}

impl<P: KemPrimitive> KeyEncapsulationScheme for KemAdapter<P> {
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

    #[instrument(level = "debug", skip_all, fields(scheme = %P::SCHEME))]
    fn encapsulate(&self, entropy: &[u8], public_key: &[u8]) -> Result<Encapsulated> {
        check_len(BufferKind::Entropy, entropy, P::ENTROPY_BYTES)?;
        check_len(BufferKind::PublicKey, public_key, P::PUBLIC_KEY_BYTES)?;

        let mut ciphertext = output_buffer(P::CIPHERTEXT_BYTES);
        let mut shared_secret = output_buffer(P::SHARED_SECRET_BYTES);
        P::encapsulate(&mut ciphertext, &mut shared_secret, public_key, entropy)
            .map_err(|_| PqError::EncapsulationFailed { scheme: P::SCHEME })?;

        debug!(ciphertext_len = ciphertext.len(), "encapsulated");
        Ok(Encapsulated::new(ciphertext, shared_secret))
    }

    fn encapsulate_random(&self, public_key: &[u8]) -> Result<Encapsulated> {
        // Validate before drawing, so a bad key costs no OS entropy
        check_len(BufferKind::PublicKey, public_key, P::PUBLIC_KEY_BYTES)?;
        let entropy = fresh_entropy(P::ENTROPY_BYTES);
        self.encapsulate(&entropy, public_key)
    }

    #[instrument(level = "debug", skip_all, fields(scheme = %P::SCHEME))]
    fn decapsulate(&self, ciphertext: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
        check_len(BufferKind::SecretKey, secret_key, P::SECRET_KEY_BYTES)?;
        check_len(BufferKind::Ciphertext, ciphertext, P::CIPHERTEXT_BYTES)?;

        let mut shared_secret = output_buffer(P::SHARED_SECRET_BYTES);
        P::decapsulate(&mut shared_secret, ciphertext, secret_key)
            .map_err(|_| PqError::DecapsulationFailed { scheme: P::SCHEME })?;

        Ok(shared_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcap_core::{PrimitiveFailure, PrimitiveStatus};
    use std::cell::Cell;
    use test_case::test_case;

    thread_local! {
        static PROVIDER_CALLS: Cell<usize> = const { Cell::new(0) };
        static FAIL: Cell<bool> = const { Cell::new(false) };
    }

    fn calls() -> usize {
        PROVIDER_CALLS.with(Cell::get)
    }

    /// Counts the call and reports whether the provider should fail.
    fn record_call() -> PrimitiveStatus {
        PROVIDER_CALLS.with(|c| c.set(c.get() + 1));
        if FAIL.with(Cell::get) {
            return Err(PrimitiveFailure);
        }
        Ok(())
    }

    fn set_failing(failing: bool) {
        FAIL.with(|f| f.set(failing));
    }

    /// Toy provider: ss = pk = sk = entropy[..4], ct = entropy[..4] reversed.
    /// Fails on every call while [`set_failing`] is on.
    struct CountingKem;

    impl KemPrimitive for CountingKem {
        const SCHEME: SchemeId = SchemeId::MlKem768;
        const ENTROPY_BYTES: usize = 8;
        const PUBLIC_KEY_BYTES: usize = 4;
        const SECRET_KEY_BYTES: usize = 4;
        const CIPHERTEXT_BYTES: usize = 4;
        const SHARED_SECRET_BYTES: usize = 4;

        fn keypair(pk: &mut [u8], sk: &mut [u8], entropy: &[u8]) -> PrimitiveStatus {
            record_call()?;
            pk.copy_from_slice(&entropy[..4]);
            sk.copy_from_slice(&entropy[..4]);
            Ok(())
        }

        fn encapsulate(ct: &mut [u8], ss: &mut [u8], pk: &[u8], _entropy: &[u8]) -> PrimitiveStatus {
            record_call()?;
            ss.copy_from_slice(pk);
            ct.copy_from_slice(pk);
            ct.reverse();
            Ok(())
        }

        fn decapsulate(ss: &mut [u8], ct: &[u8], sk: &[u8]) -> PrimitiveStatus {
            record_call()?;
            ss.copy_from_slice(ct);
            ss.reverse();
            Ok(())
        }
    }

    const TOY: KemAdapter<CountingKem> = KemAdapter::new();

    #[test]
    fn test_toy_roundtrip() {
        let kp = TOY.keygen(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(kp.public, vec![1, 2, 3, 4]);

        let enc = TOY.encapsulate(&[0u8; 8], &kp.public).unwrap();
        assert_eq!(enc.ciphertext, vec![4, 3, 2, 1]);

        let ss = TOY.decapsulate(&enc.ciphertext, &kp.secret).unwrap();
        assert_eq!(ss, enc.shared_secret);
        assert_eq!(calls(), 3);
    }

    #[test_case(7 ; "short")]
    #[test_case(9 ; "long")]
    #[test_case(0 ; "empty")]
    fn test_keygen_entropy_length_rejected_before_provider(len: usize) {
        let err = TOY.keygen(&vec![0u8; len]).unwrap_err();
        assert_eq!(err, PqError::InvalidEntropyLength { expected: 8, actual: len });
        assert_eq!(calls(), 0);
    }

    #[test]
    fn test_encapsulate_validation_never_reaches_provider() {
        assert_eq!(
            TOY.encapsulate(&[0u8; 8], &[0u8; 3]).unwrap_err(),
            PqError::InvalidPublicKeyLength { expected: 4, actual: 3 }
        );
        assert_eq!(
            TOY.encapsulate(&[0u8; 5], &[0u8; 4]).unwrap_err(),
            PqError::InvalidEntropyLength { expected: 8, actual: 5 }
        );
        assert_eq!(
            TOY.encapsulate_random(&[0u8; 5]).unwrap_err(),
            PqError::InvalidPublicKeyLength { expected: 4, actual: 5 }
        );
        assert_eq!(calls(), 0);
    }

    #[test]
    fn test_decapsulate_validation_never_reaches_provider() {
        assert_eq!(
            TOY.decapsulate(&[0u8; 3], &[0u8; 4]).unwrap_err(),
            PqError::InvalidCiphertextLength { expected: 4, actual: 3 }
        );
        assert_eq!(
            TOY.decapsulate(&[0u8; 4], &[0u8; 5]).unwrap_err(),
            PqError::InvalidSecretKeyLength { expected: 4, actual: 5 }
        );
        // Secret key is checked first
        assert_eq!(
            TOY.decapsulate(&[0u8; 3], &[0u8; 5]).unwrap_err(),
            PqError::InvalidSecretKeyLength { expected: 4, actual: 5 }
        );
        assert_eq!(calls(), 0);
    }

    #[test]
    fn test_provider_failures_map_per_operation() {
        let scheme = SchemeId::MlKem768;
        set_failing(true);
        assert_eq!(
            TOY.keygen(&[0u8; 8]).unwrap_err(),
            PqError::KeypairGenerationFailed { scheme }
        );
        assert_eq!(
            TOY.encapsulate(&[0u8; 8], &[0u8; 4]).unwrap_err(),
            PqError::EncapsulationFailed { scheme }
        );
        assert_eq!(
            TOY.decapsulate(&[0u8; 4], &[0u8; 4]).unwrap_err(),
            PqError::DecapsulationFailed { scheme }
        );
        set_failing(false);
        assert_eq!(calls(), 3);
    }

    #[test]
    fn test_random_entry_points_draw_entropy() {
        // Any OS entropy, including a leading 0xFF, must succeed
        for _ in 0..512 {
            let kp = TOY.keygen_random().unwrap();
            assert_eq!(kp.public.len(), 4);
            let enc = TOY.encapsulate_random(&kp.public).unwrap();
            assert_eq!(enc.ciphertext.len(), 4);
        }
        assert_eq!(calls(), 1024);
    }

    #[test]
    fn test_params_mirror_provider_constants() {
        let params = MlKem768::new().params();
        assert_eq!(params.scheme, SchemeId::MlKem768);
        assert_eq!(params.entropy_len, 48);
        assert_eq!(params.public_key_len, 1184);
        assert_eq!(params.secret_key_len, 2400);
        assert_eq!(params.ciphertext_len, Some(1088));
        assert_eq!(params.shared_secret_len, Some(32));

        let params = MlKem1024::new().params();
        assert_eq!(params.public_key_len, 1568);
        assert_eq!(params.secret_key_len, 3168);
        assert_eq!(params.ciphertext_len, Some(1568));
    }

    #[test]
    fn test_adapter_is_zero_sized_and_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MlKem768>();
        assert_send_sync::<MlKem1024>();
        assert_eq!(std::mem::size_of::<MlKem768>(), 0);
    }
}
