// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Prints OpenSSL subject (or issuer) name hashes for certificate files.

use anyhow::{Context, Result};
use certhash::x509::{self, HashResult, ParsedCertificate};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "certhash")]
#[command(about = "Compute OpenSSL c_rehash names for X.509 certificates")]
#[command(long_about = "
Prints one line per certificate: the name hash as used for trust-store
symlinks, followed by the file name. The output matches
`openssl x509 -hash -noout` (or `-issuer_hash` with --issuer).

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Certificate files to hash
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Hash the issuer name instead of the subject name
    #[arg(long)]
    issuer: bool,

    /// Read the inputs as DER instead of PEM
    #[arg(long)]
    der: bool,

    /// Also print the SHA-1 fingerprint of each certificate
    #[arg(long)]
    fingerprint: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut failed = false;
    for path in &cli.files {
        match hash_file(&cli, path) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                log::error!("{err:#}");
                failed = true;
            }
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn hash_file(cli: &Cli, path: &Path) -> Result<String> {
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let cert = load(&raw, cli.der).with_context(|| format!("{}", path.display()))?;

    let hash = if cli.issuer {
        x509::issuer_name_hash(&cert)
    } else {
        x509::subject_name_hash(&cert)
    }
    .with_context(|| format!("{}", path.display()))?;

    let mut line = format!("{}  {}", HashResult::from(hash), path.display());
    if cli.fingerprint {
        line.push_str("  ");
        line.push_str(&format_fingerprint(&cert.fingerprint()));
    }
    Ok(line)
}

fn load(raw: &[u8], der: bool) -> x509::Result<ParsedCertificate> {
    if der {
        x509::parse_cert_der(raw)
    } else {
        x509::parse_cert(raw)
    }
}

/// Formats a digest as colon separated uppercase hex, like OpenSSL.
fn format_fingerprint(digest: &[u8]) -> String {
    let hex = hex::encode_upper(digest);
    let pairs: Vec<&str> = (0..hex.len())
        .step_by(2)
        .map(|i| &hex[i..i + 2])
        .collect();
    format!("SHA1 Fingerprint={}", pairs.join(":"))
}
