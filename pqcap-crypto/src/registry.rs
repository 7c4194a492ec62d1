//! Lookup of scheme adapters by identifier or name.
//!
//! Adapters are zero-sized, so the registry hands out `'static` trait objects.

use pqcap_core::{KeyEncapsulationScheme, PqError, Result, SchemeId, SchemeParams, SignatureScheme};

use crate::kem::{KemAdapter, MlKem1024, MlKem768};
use crate::sign::{MlDsa65, SignatureAdapter};

static ML_KEM_768: MlKem768 = KemAdapter::new();
static ML_KEM_1024: MlKem1024 = KemAdapter::new();
static ML_DSA_65: MlDsa65 = SignatureAdapter::new();

/// KEM adapter for `id`, or `None` if `id` names a signature scheme.
pub fn kem_by_id(id: SchemeId) -> Option<&'static dyn KeyEncapsulationScheme> {
    match id {
        SchemeId::MlKem768 => Some(&ML_KEM_768),
        SchemeId::MlKem1024 => Some(&ML_KEM_1024),
        SchemeId::MlDsa65 => None,
    }
}

/// Signature adapter for `id`, or `None` if `id` names a KEM.
pub fn signature_by_id(id: SchemeId) -> Option<&'static dyn SignatureScheme> {
    match id {
        SchemeId::MlDsa65 => Some(&ML_DSA_65),
        SchemeId::MlKem768 | SchemeId::MlKem1024 => None,
    }
}

/// KEM adapter by name, e.g. `"ml-kem-768"`.
///
/// # Errors
/// [`PqError::UnknownScheme`] if the name is unknown or is not a KEM.
pub fn kem_by_name(name: &str) -> Result<&'static dyn KeyEncapsulationScheme> {
    let id: SchemeId = name.parse()?;
    kem_by_id(id).ok_or_else(|| PqError::UnknownScheme(name.to_string()))
}

/// Signature adapter by name, e.g. `"ml-dsa-65"`.
///
/// # Errors
/// [`PqError::UnknownScheme`] if the name is unknown or is not a signature scheme.
pub fn signature_by_name(name: &str) -> Result<&'static dyn SignatureScheme> {
    let id: SchemeId = name.parse()?;
    signature_by_id(id).ok_or_else(|| PqError::UnknownScheme(name.to_string()))
}

/// Parameter set of `id`.
pub fn params(id: SchemeId) -> SchemeParams {
    match id {
        SchemeId::MlKem768 => MlKem768::parameters(),
        SchemeId::MlKem1024 => MlKem1024::parameters(),
        SchemeId::MlDsa65 => MlDsa65::parameters(),
    }
}

/// Parameter sets of every supported scheme, in [`SchemeId::ALL`] order.
pub fn all_params() -> Vec<SchemeParams> {
    SchemeId::ALL.into_iter().map(params).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(SchemeId::MlKem768)]
    #[test_case(SchemeId::MlKem1024)]
    fn test_kem_lookup(id: SchemeId) {
        let kem = kem_by_id(id).unwrap();
        assert_eq!(kem.scheme(), id);
        assert_eq!(kem.params(), params(id));
        assert!(signature_by_id(id).is_none());
    }

    #[test]
    fn test_signature_lookup() {
        let sig = signature_by_id(SchemeId::MlDsa65).unwrap();
        assert_eq!(sig.scheme(), SchemeId::MlDsa65);
        assert!(kem_by_id(SchemeId::MlDsa65).is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(kem_by_name("ML-KEM-1024").unwrap().scheme(), SchemeId::MlKem1024);
        assert_eq!(signature_by_name("ml_dsa_65").unwrap().scheme(), SchemeId::MlDsa65);
    }

    #[test]
    fn test_capability_mismatch_is_unknown_scheme() {
        assert_eq!(
            kem_by_name("ml-dsa-65").err().unwrap(),
            PqError::UnknownScheme("ml-dsa-65".into())
        );
        assert!(signature_by_name("ml-kem-768").is_err());
        assert!(kem_by_name("round5").is_err());
    }

    #[test]
    fn test_all_params_cover_every_scheme() {
        let all = all_params();
        assert_eq!(all.len(), SchemeId::ALL.len());
        for (p, id) in all.iter().zip(SchemeId::ALL) {
            assert_eq!(p.scheme, id);
            assert_eq!(p.capability, id.capability());
        }
    }
}
