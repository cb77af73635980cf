// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::{Error, ParsedCertificate, Result, Stage, canonical_name, parse_cert_der};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// A name hash formatted as a c_rehash directory entry, `%08x.0`.
///
/// The `.0` suffix is the collision index, which is always zero here.
/// Resolving collisions between certificates sharing a hash is left to
/// whoever manages the directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashResult(u32);

impl HashResult {
    /// Returns the 32-bit name hash.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for HashResult {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for HashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}.{}", self.0, 0)
    }
}

impl FromStr for HashResult {
    type Err = Error;

    /// Parses a `%08x.0` entry name; hex digits must be lowercase.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidHashName {
            value: s.to_string(),
        };
        let digits = s.strip_suffix(".0").ok_or_else(invalid)?;
        if digits.len() != 8
            || !digits
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(invalid());
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| invalid())
    }
}

/// Hashes a raw DER Name the way OpenSSL's `X509_NAME_hash` does: SHA-1 over
/// the canonical encoding, first four digest bytes read little-endian.
pub fn name_hash(name_der: &[u8]) -> Result<u32> {
    let canon = canonical_name(name_der)?;
    let digest = Sha1::digest(&canon);
    Ok(u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

/// Computes the subject name hash (`openssl x509 -hash`).
pub fn subject_name_hash(cert: &ParsedCertificate) -> Result<u32> {
    name_hash(cert.subject_der())
}

/// Computes the issuer name hash (`openssl x509 -issuer_hash`).
pub fn issuer_name_hash(cert: &ParsedCertificate) -> Result<u32> {
    name_hash(cert.issuer_der())
}

/// Hashes the subject of a DER encoded certificate.
pub fn cert_der_hash(der: &[u8]) -> Result<HashResult> {
    let cert = parse_cert_der(der).map_err(|e| e.in_stage(Stage::Load))?;
    hash_parsed(&cert)
}

/// Hashes the subject of a certificate held in a single PEM block.
#[cfg(feature = "pem")]
pub fn cert_raw_hash(raw: &[u8]) -> Result<HashResult> {
    let cert = super::parse_cert(raw).map_err(|e| e.in_stage(Stage::Load))?;
    hash_parsed(&cert)
}

/// Reads a PEM certificate file and hashes its subject.
#[cfg(feature = "pem")]
pub fn cert_hash(path: impl AsRef<std::path::Path>) -> Result<HashResult> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let hash = cert_raw_hash(&raw)?;
    log::debug!("hashed {}: {hash}", path.display());
    Ok(hash)
}

fn hash_parsed(cert: &ParsedCertificate) -> Result<HashResult> {
    let hash = subject_name_hash(cert).map_err(|e| e.in_stage(Stage::Canonicalize))?;
    Ok(HashResult(hash))
}
