//! SHAKE256 with domain separation.
//!
//! Used to compress caller entropy into provider RNG seeds:
//!
//! ```text
//! output = SHAKE256(len(domain) || domain || input)
//! ```
//!
//! The length prefix keeps `(domain, input)` pairs unambiguous.

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

/// Computes an `N`-byte SHAKE256 output with domain separation.
///
/// # Example
///
/// ```rust
/// use pqcap_core::constants::DOMAIN_KEYGEN_SEED;
/// use pqcap_crypto::hash::shake256;
///
/// let seed: [u8; 32] = shake256(DOMAIN_KEYGEN_SEED, &[0u8; 48]);
/// assert_ne!(seed, [0u8; 32]);
/// ```
pub fn shake256<const N: usize>(domain: &[u8], input: &[u8]) -> [u8; N] {
    let mut hasher = Shake256::default();

    hasher.update(&(domain.len() as u32).to_le_bytes());
    hasher.update(domain);
    hasher.update(input);

    let mut reader = hasher.finalize_xof();
    let mut output = [0u8; N];
    reader.read(&mut output);
    output
}
