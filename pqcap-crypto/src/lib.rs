//! # pqcap Cryptography
//!
//! Scheme adapters binding post-quantum primitive providers to the pqcap
//! capability traits.
//!
//! This crate provides:
//!
//! - **Adapters**: [`MlKem768`], [`MlKem1024`] (key encapsulation) and
//!   [`MlDsa65`] (signatures)
//! - **Entropy**: OS entropy for the `*_random` entry points, seeded RNGs for
//!   the deterministic ones
//! - **Validation**: length checks that run before any provider call
//! - **Registry**: lookup of adapters by [`SchemeId`](pqcap_core::SchemeId)
//! - **Golden oracle**: byte-for-byte regression against checked-in fixtures
//!
//! ## Determinism
//!
//! Every key generation and encapsulation takes an explicit entropy buffer that
//! is the only randomness the call consumes. Equal entropy gives equal output,
//! which is what the golden fixtures rely on. Signing is deterministic in the
//! message and the secret key.
//!
//! ## Example
//!
//! ```rust,ignore
//! use pqcap_core::KeyEncapsulationScheme;
//! use pqcap_crypto::MlKem768;
//!
//! let kem = MlKem768::new();
//! let keypair = kem.keygen_random()?;
//!
//! // Sender encapsulates to the public key
//! let sent = kem.encapsulate_random(&keypair.public)?;
//!
//! // Receiver recovers the same shared secret
//! let received = kem.decapsulate(&sent.ciphertext, &keypair.secret)?;
//! assert_eq!(sent.shared_secret, received);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod entropy;
pub mod golden;
pub mod hash;
pub mod kem;
pub mod provider;
pub mod registry;
pub mod sign;
pub mod validate;

// Re-export main items at crate root
pub use kem::{KemAdapter, MlKem1024, MlKem768};
pub use sign::{MlDsa65, SignatureAdapter};
pub use golden::{GoldenError, GoldenMode, GoldenStore};
pub use registry::{kem_by_id, signature_by_id};
