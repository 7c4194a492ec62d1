//! Golden-value regression for every scheme.
//!
//! Runs against `tests/golden/` (or `PQCAP_GOLDEN_DIR`). Set
//! `PQCAP_UPDATE_GOLDEN=1` to regenerate the fixtures.

use std::fs;

use pqcap_core::SchemeId;
use pqcap_crypto::golden::{self, Artifact, FixtureOutcome, GoldenError, GoldenMode, GoldenStore};
use tempfile::TempDir;
use test_case::test_case;

#[test_case(SchemeId::MlDsa65 ; "ml_dsa_65")]
#[test_case(SchemeId::MlKem768 ; "ml_kem_768")]
#[test_case(SchemeId::MlKem1024 ; "ml_kem_1024")]
fn checked_in_fixtures(id: SchemeId) {
    let store = GoldenStore::from_env();
    let report = golden::run_scheme(&store, id).unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(report.scheme, id);
    assert_eq!(report.outcomes.len(), 3);
    if store.mode() == GoldenMode::Verify {
        assert_eq!(report.count(FixtureOutcome::Matched), 3, "{:?}", report.outcomes);
    }
}

#[test]
fn every_fixture_is_checked_in() {
    let store = GoldenStore::new(golden::default_dir(), GoldenMode::Verify);
    for (id, artifacts) in [
        (SchemeId::MlDsa65, [Artifact::PublicKey, Artifact::SecretKey, Artifact::SignedMessage]),
        (SchemeId::MlKem768, [Artifact::PublicKey, Artifact::SecretKey, Artifact::SharedSecret]),
        (SchemeId::MlKem1024, [Artifact::PublicKey, Artifact::SecretKey, Artifact::SharedSecret]),
    ] {
        for artifact in artifacts {
            let path = store.fixture_path(id, artifact);
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
}

#[test]
fn empty_directory_fails_verification() {
    let tmp = TempDir::new().unwrap();
    let store = GoldenStore::new(tmp.path(), GoldenMode::Verify);

    match golden::run_scheme(&store, SchemeId::MlKem1024) {
        Err(GoldenError::Missing { scheme, artifact, .. }) => {
            assert_eq!(scheme, SchemeId::MlKem1024);
            assert_eq!(artifact, Artifact::PublicKey);
        }
        other => panic!("expected missing fixture, got {:?}", other),
    }
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn update_records_then_verify_matches() {
    let tmp = TempDir::new().unwrap();
    let update = GoldenStore::new(tmp.path(), GoldenMode::Update);
    let store = GoldenStore::new(tmp.path(), GoldenMode::Verify);

    for report in golden::run_all(&update).unwrap() {
        assert_eq!(report.count(FixtureOutcome::Recorded), 3, "{:?}", report.scheme);
    }
    for report in golden::run_all(&store).unwrap() {
        assert_eq!(report.count(FixtureOutcome::Matched), 3, "{:?}", report.scheme);
    }
}

#[test]
fn fixture_sizes_match_parameters() {
    let store = GoldenStore::new(golden::default_dir(), GoldenMode::Verify);

    let size = |id, artifact| fs::metadata(store.fixture_path(id, artifact)).unwrap().len();

    assert_eq!(size(SchemeId::MlDsa65, Artifact::PublicKey), 1952);
    assert_eq!(size(SchemeId::MlDsa65, Artifact::SecretKey), 4032);
    assert_eq!(size(SchemeId::MlDsa65, Artifact::SignedMessage), 3309 + 256);
    assert_eq!(size(SchemeId::MlKem768, Artifact::PublicKey), 1184);
    assert_eq!(size(SchemeId::MlKem768, Artifact::SharedSecret), 32);
    assert_eq!(size(SchemeId::MlKem1024, Artifact::SecretKey), 3168);
}

#[test]
fn corrupted_fixture_is_reported() {
    let tmp = TempDir::new().unwrap();
    let store = GoldenStore::new(tmp.path(), GoldenMode::Verify);
    let update = GoldenStore::new(tmp.path(), GoldenMode::Update);
    golden::run_scheme(&update, SchemeId::MlKem768).unwrap();

    let path = store.fixture_path(SchemeId::MlKem768, Artifact::SharedSecret);
    let mut bytes = fs::read(&path).unwrap();
    bytes[0] ^= 0x01;
    fs::write(&path, bytes).unwrap();

    match golden::run_scheme(&store, SchemeId::MlKem768) {
        Err(GoldenError::Mismatch { scheme, artifact, .. }) => {
            assert_eq!(scheme, SchemeId::MlKem768);
            assert_eq!(artifact, Artifact::SharedSecret);
        }
        other => panic!("expected mismatch, got {:?}", other),
    }

    // Update mode repairs it
    let report = golden::run_scheme(&update, SchemeId::MlKem768).unwrap();
    assert_eq!(report.count(FixtureOutcome::Updated), 3);
    assert!(golden::run_scheme(&store, SchemeId::MlKem768).is_ok());
}
