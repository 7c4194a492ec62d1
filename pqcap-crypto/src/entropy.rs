//! Entropy sources for the scheme adapters.
//!
//! Two kinds of randomness flow into a provider:
//!
//! - **Caller entropy**: the explicit buffer passed to `keygen`/`encapsulate`.
//!   It seeds a ChaCha20 stream, so the provider output is a pure function of it.
//! - **OS entropy**: drawn once per `*_random` call and then handled exactly like
//!   caller entropy.
//!
//! An OS entropy failure is not a [`PqError`](pqcap_core::PqError). There is no
//! sensible way to continue without randomness, so [`fresh_entropy`] panics.

use pqcap_core::constants::{PROVIDER_SEED_LEN, SIGNING_STREAM_SEED};
use rand::{rngs::OsRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::error;
use zeroize::Zeroizing;

use crate::hash::shake256;

/// The operating system could not supply random bytes.
#[derive(Debug, Error)]
#[error("operating system entropy source failed: {0}")]
pub struct EntropyFault(#[from] rand::Error);

/// Fills a new `len`-byte buffer from the OS entropy source.
pub fn try_fresh_entropy(len: usize) -> Result<Zeroizing<Vec<u8>>, EntropyFault> {
    let mut entropy = Zeroizing::new(vec![0u8; len]);
    OsRng.try_fill_bytes(&mut entropy)?;
    Ok(entropy)
}

/// Fills a new `len`-byte buffer from the OS entropy source.
///
/// # Panics
/// If the OS entropy source fails. This is the only fatal path in the crate.
pub fn fresh_entropy(len: usize) -> Zeroizing<Vec<u8>> {
    match try_fresh_entropy(len) {
        Ok(entropy) => entropy,
        Err(fault) => {
            error!(%fault, "cannot continue without randomness");
            panic!("{fault}");
        }
    }
}

/// ChaCha20 stream keyed directly by a provider-width seed.
pub fn rng_from_seed(seed: [u8; PROVIDER_SEED_LEN]) -> ChaCha20Rng {
    ChaCha20Rng::from_seed(seed)
}

/// ChaCha20 stream keyed by `SHAKE256(domain, entropy)`.
///
/// Used when the entropy is wider than a provider seed. Every entropy byte
/// influences the stream.
pub fn rng_from_entropy(domain: &[u8], entropy: &[u8]) -> ChaCha20Rng {
    let seed = Zeroizing::new(shake256::<PROVIDER_SEED_LEN>(domain, entropy));
    ChaCha20Rng::from_seed(*seed)
}

/// Randomness stream handed to the signer.
///
/// Fixed seed: signatures depend only on the message and the secret key.
pub fn signing_rng() -> ChaCha20Rng {
    ChaCha20Rng::from_seed(SIGNING_STREAM_SEED)
}
