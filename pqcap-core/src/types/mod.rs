//! Domain types for pqcap.
//!
//! - [`SchemeId`]: Which algorithm an adapter binds
//! - [`SchemeParams`]: Fixed buffer lengths of a scheme
//! - [`KeyPair`]: Public/secret key buffers
//! - [`Encapsulated`]: Ciphertext plus shared secret

mod keys;
mod scheme;

pub use keys::*;
pub use scheme::*;
