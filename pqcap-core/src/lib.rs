//! # pqcap Core
//!
//! Capability traits, error taxonomy, and scheme types shared by every pqcap crate.
//!
//! This crate provides the contract layer that algorithm adapters implement:
//!
//! - **Traits**: [`KeyEncapsulationScheme`] and [`SignatureScheme`] for callers,
//!   [`KemPrimitive`] and [`SignaturePrimitive`] for the math behind them
//! - **Errors**: [`PqError`], separating caller mistakes from primitive failures
//! - **Constants**: Entropy lengths and seed-derivation domains
//! - **Types**: Scheme identifiers, parameter sets, key pairs
//!
//! ## Example
//!
//! ```rust
//! use pqcap_core::{Capability, SchemeId};
//!
//! let scheme: SchemeId = "ml-kem-768".parse().unwrap();
//! assert_eq!(scheme.capability(), Capability::KeyEncapsulation);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PqError, Result};
pub use traits::*;
pub use types::*;
