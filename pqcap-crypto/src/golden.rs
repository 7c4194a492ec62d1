//! Golden-value regression oracle.
//!
//! Runs every scheme on all-zero entropy and compares the raw outputs with
//! fixture files, one per artifact per scheme:
//!
//! ```text
//! <dir>/ml-dsa-65_pk.golden
//! <dir>/ml-dsa-65_sk.golden
//! <dir>/ml-dsa-65_sm.golden
//! <dir>/ml-kem-768_ss.golden
//! ...
//! ```
//!
//! | Mode | Fixture present | Fixture missing |
//! |------|-----------------|-----------------|
//! | [`GoldenMode::Verify`] | compare | error |
//! | [`GoldenMode::Update`] | overwrite | record |
//!
//! Set `PQCAP_UPDATE_GOLDEN=1` to update, and `PQCAP_GOLDEN_DIR` to move the
//! fixture directory.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::{debug, info, warn};

use pqcap_core::constants::{GOLDEN_EXTENSION, GOLDEN_MESSAGE_LEN};
use pqcap_core::{Capability, KeyEncapsulationScheme, PqError, SchemeId, SignatureScheme};

use crate::registry::{kem_by_id, signature_by_id};

/// Environment variable selecting update mode (`1` or `true`).
pub const UPDATE_ENV: &str = "PQCAP_UPDATE_GOLDEN";

/// Environment variable overriding the fixture directory.
pub const DIR_ENV: &str = "PQCAP_GOLDEN_DIR";

/// Fixture directory checked into this crate's source tree.
///
/// Fixed at compile time, so it only exists on the machine that built the
/// crate. Binaries take the directory from their caller instead.
pub fn default_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("golden")
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Whether fixtures are compared or rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GoldenMode {
    /// Compare outputs with existing fixtures
    #[default]
    Verify,
    /// Overwrite fixtures with current outputs
    Update,
}

impl GoldenMode {
    /// Reads [`UPDATE_ENV`].
    pub fn from_env() -> Self {
        match env::var(UPDATE_ENV) {
            Ok(value) if matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true") => {
                GoldenMode::Update
            }
            _ => GoldenMode::Verify,
        }
    }
}

/// One output of a golden scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
    /// Public key
    PublicKey,
    /// Secret key
    SecretKey,
    /// Signed message
    SignedMessage,
    /// KEM shared secret
    SharedSecret,
}

impl Artifact {
    /// Suffix used in the fixture file name.
    pub const fn suffix(self) -> &'static str {
        match self {
            Artifact::PublicKey => "pk",
            Artifact::SecretKey => "sk",
            Artifact::SignedMessage => "sm",
            Artifact::SharedSecret => "ss",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Result of checking one artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureOutcome {
    /// Output equals the fixture
    Matched,
    /// No fixture existed; update mode wrote the output as the new fixture
    Recorded,
    /// Fixture overwritten in update mode
    Updated,
}

/// Errors raised by the golden oracle.
#[derive(Debug, Error)]
pub enum GoldenError {
    /// Reading or writing a fixture failed.
    #[error("golden fixture I/O failed at {}: {source}", .path.display())]
    Io {
        /// Fixture path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Verify mode found no fixture to compare against.
    #[error("{scheme} {artifact} has no golden fixture at {} (rerun with PQCAP_UPDATE_GOLDEN=1 to record it)", .path.display())]
    Missing {
        /// Scheme under test
        scheme: SchemeId,
        /// Artifact without a fixture
        artifact: Artifact,
        /// Expected fixture path
        path: PathBuf,
    },

    /// Output differs from the fixture.
    #[error("{scheme} {artifact} differs from golden fixture {}", .path.display())]
    Mismatch {
        /// Scheme under test
        scheme: SchemeId,
        /// Artifact that differs
        artifact: Artifact,
        /// Fixture path
        path: PathBuf,
    },

    /// Decapsulation did not recover the encapsulated secret.
    #[error("{0}: decapsulated secret differs from encapsulated secret")]
    SharedSecretDisagreement(SchemeId),

    /// The scheme itself returned an error.
    #[error(transparent)]
    Scheme(#[from] PqError),
}

/// Outcomes of one scheme's scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoldenReport {
    /// Scheme under test
    pub scheme: SchemeId,
    /// Per-artifact outcome, in check order
    pub outcomes: Vec<(Artifact, FixtureOutcome)>,
}

impl GoldenReport {
    /// Number of artifacts with the given outcome.
    pub fn count(&self, outcome: FixtureOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIXTURE STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// A fixture directory plus the mode it is used in.
#[derive(Clone, Debug)]
pub struct GoldenStore {
    dir: PathBuf,
    mode: GoldenMode,
}

impl GoldenStore {
    /// Store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, mode: GoldenMode) -> Self {
        Self { dir: dir.into(), mode }
    }

    /// Store configured from [`DIR_ENV`] and [`UPDATE_ENV`], falling back to
    /// [`default_dir`] and verify mode.
    pub fn from_env() -> Self {
        let dir = env::var_os(DIR_ENV).map(PathBuf::from).unwrap_or_else(default_dir);
        Self::new(dir, GoldenMode::from_env())
    }

    /// Fixture directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Active mode.
    pub fn mode(&self) -> GoldenMode {
        self.mode
    }

    /// Path of the fixture for `scheme`/`artifact`.
    pub fn fixture_path(&self, scheme: SchemeId, artifact: Artifact) -> PathBuf {
        self.dir.join(format!("{}_{}.{}", scheme, artifact, GOLDEN_EXTENSION))
    }

    /// Checks `actual` against the fixture for `scheme`/`artifact`.
    pub fn check(
        &self,
        scheme: SchemeId,
        artifact: Artifact,
        actual: &[u8],
    ) -> Result<FixtureOutcome, GoldenError> {
        let path = self.fixture_path(scheme, artifact);

        let expected = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if self.mode == GoldenMode::Verify {
                    warn!(%scheme, %artifact, path = %path.display(), "golden fixture missing");
                    return Err(GoldenError::Missing { scheme, artifact, path });
                }
                self.write(&path, actual)?;
                info!(%scheme, %artifact, path = %path.display(), "recorded golden fixture");
                return Ok(FixtureOutcome::Recorded);
            }
            Err(source) => return Err(GoldenError::Io { path, source }),
        };

        match self.mode {
            GoldenMode::Update => {
                self.write(&path, actual)?;
                info!(%scheme, %artifact, "updated golden fixture");
                Ok(FixtureOutcome::Updated)
            }
            GoldenMode::Verify if bool::from(expected.as_slice().ct_eq(actual)) => {
                debug!(%scheme, %artifact, "golden fixture matched");
                Ok(FixtureOutcome::Matched)
            }
            GoldenMode::Verify => Err(GoldenError::Mismatch { scheme, artifact, path }),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), GoldenError> {
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(path, bytes))
            .map_err(|source| GoldenError::Io { path: path.to_path_buf(), source })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Keygen on zero entropy, then sign a zero message of
/// [`GOLDEN_MESSAGE_LEN`] bytes. Checks `pk`, `sk` and `sm`.
pub fn run_signature(store: &GoldenStore, scheme: &dyn SignatureScheme) -> Result<GoldenReport, GoldenError> {
    let id = scheme.scheme();
    let entropy = vec![0u8; scheme.params().entropy_len];
    let message = [0u8; GOLDEN_MESSAGE_LEN];

    let keypair = scheme.keygen(&entropy)?;
    let signed = scheme.sign(&message, &keypair.secret)?;
    scheme.open(&signed, &keypair.public)?;

    let outcomes = vec![
        (Artifact::PublicKey, store.check(id, Artifact::PublicKey, &keypair.public)?),
        (Artifact::SecretKey, store.check(id, Artifact::SecretKey, &keypair.secret)?),
        (Artifact::SignedMessage, store.check(id, Artifact::SignedMessage, &signed)?),
    ];
    Ok(GoldenReport { scheme: id, outcomes })
}

/// Keygen on zero entropy, then encapsulate with the same entropy. Checks
/// `pk`, `sk` and `ss`.
pub fn run_kem(store: &GoldenStore, scheme: &dyn KeyEncapsulationScheme) -> Result<GoldenReport, GoldenError> {
    let id = scheme.scheme();
    let entropy = vec![0u8; scheme.params().entropy_len];

    let keypair = scheme.keygen(&entropy)?;
    let sent = scheme.encapsulate(&entropy, &keypair.public)?;
    let received = scheme.decapsulate(&sent.ciphertext, &keypair.secret)?;
    if received != sent.shared_secret {
        return Err(GoldenError::SharedSecretDisagreement(id));
    }

    let outcomes = vec![
        (Artifact::PublicKey, store.check(id, Artifact::PublicKey, &keypair.public)?),
        (Artifact::SecretKey, store.check(id, Artifact::SecretKey, &keypair.secret)?),
        (Artifact::SharedSecret, store.check(id, Artifact::SharedSecret, &sent.shared_secret)?),
    ];
    Ok(GoldenReport { scheme: id, outcomes })
}

/// Runs the scenario of `id`.
pub fn run_scheme(store: &GoldenStore, id: SchemeId) -> Result<GoldenReport, GoldenError> {
    let unknown = || GoldenError::Scheme(PqError::UnknownScheme(id.to_string()));
    match id.capability() {
        Capability::KeyEncapsulation => run_kem(store, kem_by_id(id).ok_or_else(unknown)?),
        Capability::Signature => run_signature(store, signature_by_id(id).ok_or_else(unknown)?),
    }
}

/// Runs every scheme's scenario, stopping at the first error.
pub fn run_all(store: &GoldenStore) -> Result<Vec<GoldenReport>, GoldenError> {
    SchemeId::ALL.into_iter().map(|id| run_scheme(store, id)).collect()
}
