//! pqcap CLI
//!
//! Command-line front end for the pqcap schemes: key generation, encapsulation,
//! signing, and the golden-fixture oracle. Keys and ciphertexts are raw binary
//! files.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pqcap_core::{Capability, KeyPair, SchemeId};
use pqcap_crypto::golden::{self, FixtureOutcome, GoldenMode, GoldenStore};
use pqcap_crypto::registry;

/// pqcap - post-quantum KEMs and signatures behind one interface
#[derive(Parser)]
#[command(name = "pqcap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported schemes and their buffer lengths
    Schemes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a key pair (writes pk.bin and sk.bin)
    Keygen {
        /// Scheme name, e.g. ml-kem-768
        #[arg(short, long, env = "PQCAP_SCHEME")]
        scheme: SchemeId,
        /// Entropy as hex; fresh OS entropy when omitted
        #[arg(short, long)]
        entropy: Option<HexBytes>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Encapsulate to a public key (writes ct.bin and ss.bin)
    Encap {
        /// KEM scheme name
        #[arg(short, long, env = "PQCAP_SCHEME")]
        scheme: SchemeId,
        /// Public key file
        #[arg(long)]
        pk: PathBuf,
        /// Entropy as hex; fresh OS entropy when omitted
        #[arg(short, long)]
        entropy: Option<HexBytes>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Recover a shared secret from a ciphertext
    Decap {
        /// KEM scheme name
        #[arg(short, long, env = "PQCAP_SCHEME")]
        scheme: SchemeId,
        /// Ciphertext file
        #[arg(long)]
        ct: PathBuf,
        /// Secret key file
        #[arg(long)]
        sk: PathBuf,
        /// Output file for the shared secret
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Sign a message (output is signature || message)
    Sign {
        /// Signature scheme name
        #[arg(short, long, env = "PQCAP_SCHEME")]
        scheme: SchemeId,
        /// Secret key file
        #[arg(long)]
        sk: PathBuf,
        /// Message file
        #[arg(short, long)]
        message: PathBuf,
        /// Output file for the signed message
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Verify a signed message and extract the message
    Open {
        /// Signature scheme name
        #[arg(short, long, env = "PQCAP_SCHEME")]
        scheme: SchemeId,
        /// Public key file
        #[arg(long)]
        pk: PathBuf,
        /// Signed message file
        #[arg(long)]
        signed: PathBuf,
        /// Output file for the recovered message
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Run the golden-fixture oracle for every scheme
    Golden {
        /// Fixture directory (defaults to the current directory)
        #[arg(short, long, env = "PQCAP_GOLDEN_DIR", default_value = ".")]
        dir: PathBuf,
        /// Overwrite fixtures instead of comparing
        #[arg(short, long)]
        update: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pqcap=debug,info"
    } else {
        "pqcap=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Schemes { json } => cmd_schemes(json),
        Commands::Keygen { scheme, entropy, out } => cmd_keygen(scheme, HexBytes::bytes(&entropy), &out),
        Commands::Encap { scheme, pk, entropy, out } => cmd_encap(scheme, &pk, HexBytes::bytes(&entropy), &out),
        Commands::Decap { scheme, ct, sk, out } => cmd_decap(scheme, &ct, &sk, &out),
        Commands::Sign { scheme, sk, message, out } => cmd_sign(scheme, &sk, &message, &out),
        Commands::Open { scheme, pk, signed, out } => cmd_open(scheme, &pk, &signed, &out),
        Commands::Golden { dir, update } => cmd_golden(dir, update),
    }
}

/// Hex-encoded bytes from the command line, with optional `0x` prefix.
#[derive(Clone, Debug)]
struct HexBytes(Vec<u8>);

impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        hex::decode(s.trim().trim_start_matches("0x")).map(HexBytes)
    }
}

impl HexBytes {
    fn bytes(entropy: &Option<HexBytes>) -> Option<&[u8]> {
        entropy.as_ref().map(|e| e.0.as_slice())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), len = bytes.len(), "wrote file");
    Ok(())
}

fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(8)])
}

/// Print the parameter table
fn cmd_schemes(json: bool) -> Result<()> {
    let params = registry::all_params();

    if json {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<10} {:>8} {:>8} {:>8} {:>10} {:>8} {:>10}",
        "SCHEME".bold(),
        "KIND".bold(),
        "ENTROPY",
        "PK",
        "SK",
        "CT",
        "SS",
        "OVERHEAD"
    );
    let dash = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    for p in params {
        println!(
            "{:<12} {:<10} {:>8} {:>8} {:>8} {:>10} {:>8} {:>10}",
            p.scheme.name().cyan(),
            p.capability.to_string(),
            p.entropy_len,
            p.public_key_len,
            p.secret_key_len,
            dash(p.ciphertext_len),
            dash(p.shared_secret_len),
            dash(p.signature_overhead)
        );
    }
    Ok(())
}

/// Generate a key pair for any scheme
fn cmd_keygen(scheme: SchemeId, entropy: Option<&[u8]>, out: &Path) -> Result<()> {
    println!("{} {}", "🔑 Generating keys:".cyan().bold(), scheme);

    let keypair: KeyPair = match scheme.capability() {
        Capability::KeyEncapsulation => {
            let kem = registry::kem_by_id(scheme).context("Not a KEM")?;
            match entropy {
                Some(entropy) => kem.keygen(entropy),
                None => kem.keygen_random(),
            }
        }
        Capability::Signature => {
            let dsa = registry::signature_by_id(scheme).context("Not a signature scheme")?;
            match entropy {
                Some(entropy) => dsa.keygen(entropy),
                None => dsa.keygen_random(),
            }
        }
    }
    .context("Key generation failed")?;

    let pk_path = out.join("pk.bin");
    let sk_path = out.join("sk.bin");
    write_file(&pk_path, &keypair.public)?;
    write_file(&sk_path, &keypair.secret)?;

    println!("   {} {} ({} bytes)", "Public key:".green(), pk_path.display(), keypair.public.len());
    println!("   {} {}...", "Fingerprint:".dimmed(), fingerprint(&keypair.public));
    println!("   {} {} ({} bytes)", "Secret key:".green(), sk_path.display(), keypair.secret.len());
    println!("\n{}", "⚠️  Keep sk.bin safe! It must never be shared.".red().bold());
    Ok(())
}

/// Encapsulate to a public key
fn cmd_encap(scheme: SchemeId, pk: &Path, entropy: Option<&[u8]>, out: &Path) -> Result<()> {
    let kem = registry::kem_by_id(scheme).with_context(|| format!("{scheme} is not a KEM"))?;
    let public_key = read_file(pk)?;

    let sent = match entropy {
        Some(entropy) => kem.encapsulate(entropy, &public_key),
        None => kem.encapsulate_random(&public_key),
    }
    .context("Encapsulation failed")?;

    write_file(&out.join("ct.bin"), &sent.ciphertext)?;
    write_file(&out.join("ss.bin"), &sent.shared_secret)?;

    println!("{} {}", "✅ Encapsulated:".green().bold(), scheme);
    println!("   {} {} bytes", "Ciphertext:".dimmed(), sent.ciphertext.len());
    println!("   {} {} bytes", "Shared secret:".dimmed(), sent.shared_secret.len());
    Ok(())
}

/// Decapsulate a ciphertext
fn cmd_decap(scheme: SchemeId, ct: &Path, sk: &Path, out: &Path) -> Result<()> {
    let kem = registry::kem_by_id(scheme).with_context(|| format!("{scheme} is not a KEM"))?;
    let ciphertext = read_file(ct)?;
    let secret_key = read_file(sk)?;

    let shared_secret = kem.decapsulate(&ciphertext, &secret_key).context("Decapsulation failed")?;
    write_file(out, &shared_secret)?;

    println!("{} {}", "✅ Decapsulated:".green().bold(), out.display());
    Ok(())
}

/// Sign a message file
fn cmd_sign(scheme: SchemeId, sk: &Path, message: &Path, out: &Path) -> Result<()> {
    let dsa = registry::signature_by_id(scheme).with_context(|| format!("{scheme} is not a signature scheme"))?;
    let secret_key = read_file(sk)?;
    let msg = read_file(message)?;

    let signed = dsa.sign(&msg, &secret_key).context("Signing failed")?;
    write_file(out, &signed)?;

    println!("{} {} ({} bytes)", "✅ Signed:".green().bold(), out.display(), signed.len());
    Ok(())
}

/// Verify a signed message file
fn cmd_open(scheme: SchemeId, pk: &Path, signed: &Path, out: &Path) -> Result<()> {
    let dsa = registry::signature_by_id(scheme).with_context(|| format!("{scheme} is not a signature scheme"))?;
    let public_key = read_file(pk)?;
    let signed_message = read_file(signed)?;

    let message = match dsa.open(&signed_message, &public_key) {
        Ok(message) => message,
        Err(err) if err.is_verification_failure() => {
            println!("{}", "❌ Signature verification failed".red().bold());
            bail!(err);
        }
        Err(err) => return Err(err).context("Open failed"),
    };
    write_file(out, &message)?;

    println!("{} {} ({} bytes)", "✅ Signature valid:".green().bold(), out.display(), message.len());
    Ok(())
}

/// Run the golden oracle
fn cmd_golden(dir: PathBuf, update: bool) -> Result<()> {
    let mode = if update { GoldenMode::Update } else { GoldenMode::from_env() };
    let store = GoldenStore::new(dir, mode);

    println!("{} {} ({:?})", "🧪 Golden fixtures:".cyan().bold(), store.dir().display(), store.mode());

    let reports = golden::run_all(&store).context("Golden check failed")?;
    for report in &reports {
        let matched = report.count(FixtureOutcome::Matched);
        let recorded = report.count(FixtureOutcome::Recorded);
        let updated = report.count(FixtureOutcome::Updated);
        println!(
            "   {} {:<12} matched {} / recorded {} / updated {}",
            "✓".green(),
            report.scheme.name(),
            matched,
            recorded,
            updated
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_hex_bytes() {
        assert_eq!(HexBytes::from_str("0x00ff").unwrap().0, vec![0x00, 0xFF]);
        assert!(HexBytes::from_str("zz").is_err());
    }

    #[test]
    fn test_scheme_argument_parses() {
        let cli = Cli::try_parse_from(["pqcap", "keygen", "--scheme", "ml-dsa-65", "--entropy", "00"]).unwrap();
        match cli.command {
            Commands::Keygen { scheme, entropy, .. } => {
                assert_eq!(scheme, SchemeId::MlDsa65);
                assert_eq!(HexBytes::bytes(&entropy), Some(&[0u8][..]));
            }
            _ => panic!("expected keygen"),
        }
    }

    #[test]
    fn test_golden_dir_resolves_at_runtime() {
        let cli = Cli::try_parse_from(["pqcap", "golden", "--dir", "fixtures", "--update"]).unwrap();
        match cli.command {
            Commands::Golden { dir, update } => {
                assert_eq!(dir, PathBuf::from("fixtures"));
                assert!(update);
            }
            _ => panic!("expected golden"),
        }

        if std::env::var_os("PQCAP_GOLDEN_DIR").is_none() {
            let cli = Cli::try_parse_from(["pqcap", "golden"]).unwrap();
            match cli.command {
                Commands::Golden { dir, .. } => assert_eq!(dir, PathBuf::from(".")),
                _ => panic!("expected golden"),
            }
        }
    }
}
