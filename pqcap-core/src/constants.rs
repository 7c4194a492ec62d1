//! Protocol constants for pqcap.
//!
//! Key, ciphertext and signature sizes belong to each primitive provider and are
//! exposed through the associated constants of [`KemPrimitive`](crate::KemPrimitive)
//! and [`SignaturePrimitive`](crate::SignaturePrimitive). This module only holds
//! the values the contract layer itself publishes.

// ═══════════════════════════════════════════════════════════════════════════════
// ENTROPY LENGTHS
// ═══════════════════════════════════════════════════════════════════════════════

/// Entropy consumed by one ML-DSA-65 key generation.
pub const ML_DSA_65_ENTROPY_LEN: usize = 32;

/// Entropy consumed by one ML-KEM-768 key generation or encapsulation.
pub const ML_KEM_768_ENTROPY_LEN: usize = 48;

/// Entropy consumed by one ML-KEM-1024 key generation or encapsulation.
pub const ML_KEM_1024_ENTROPY_LEN: usize = 48;

/// Width of the seed handed to the provider RNG.
pub const PROVIDER_SEED_LEN: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// DOMAIN SEPARATORS
// ═══════════════════════════════════════════════════════════════════════════════
// Entropy longer than a provider seed is compressed with SHAKE256 under one of
// these labels, so keygen and encapsulation never share a seed even when the
// caller reuses the same entropy for both.

/// Domain separator for key-generation seeds.
pub const DOMAIN_KEYGEN_SEED: &[u8] = b"PQCAP_KEYGEN_SEED_V1";

/// Domain separator for encapsulation seeds.
pub const DOMAIN_ENCAPS_SEED: &[u8] = b"PQCAP_ENCAPS_SEED_V1";

/// Seed of the ChaCha20 stream that supplies signing randomness.
///
/// Fixed, so signatures depend only on the message and the secret key.
pub const SIGNING_STREAM_SEED: [u8; PROVIDER_SEED_LEN] = [0u8; PROVIDER_SEED_LEN];

// ═══════════════════════════════════════════════════════════════════════════════
// GOLDEN FIXTURES
// ═══════════════════════════════════════════════════════════════════════════════

/// File extension of golden fixtures.
pub const GOLDEN_EXTENSION: &str = "golden";

/// Length of the all-zero message signed by the golden oracle.
pub const GOLDEN_MESSAGE_LEN: usize = 256;
