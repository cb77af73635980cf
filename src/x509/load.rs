// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::{Error, Result};
use sha1::{Digest, Sha1};

/// PEM labels OpenSSL accepts when reading a certificate.
#[cfg(feature = "pem")]
const CERTIFICATE_LABELS: &[&str] = &["CERTIFICATE", "X509 CERTIFICATE", "TRUSTED CERTIFICATE"];

/// A parsed X.509 certificate, reduced to what name hashing consumes.
///
/// The subject and issuer are kept as their original DER encodings, since
/// canonicalization has to work from the raw attribute structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCertificate {
    der: Vec<u8>,
    subject: Vec<u8>,
    issuer: Vec<u8>,
}

impl ParsedCertificate {
    /// Returns the full certificate DER.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Returns the raw DER encoding of the subject Name.
    pub fn subject_der(&self) -> &[u8] {
        &self.subject
    }

    /// Returns the raw DER encoding of the issuer Name.
    pub fn issuer_der(&self) -> &[u8] {
        &self.issuer
    }

    /// Computes the SHA-1 fingerprint of the certificate DER, as printed by
    /// `openssl x509 -fingerprint`.
    pub fn fingerprint(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        out.copy_from_slice(&Sha1::digest(&self.der));
        out
    }
}

/// Parses a certificate from a buffer holding exactly one PEM block.
///
/// Multi-certificate bundles are rejected rather than truncated to their
/// first entry.
#[cfg(feature = "pem")]
pub fn parse_cert(raw: &[u8]) -> Result<ParsedCertificate> {
    let block = crate::pem::decode_single(raw)?;
    if !CERTIFICATE_LABELS.contains(&block.kind.as_str()) {
        return Err(Error::InvalidPemLabel { label: block.kind });
    }
    parse_cert_der(&block.contents)
}

/// Parses a DER encoded certificate, rejecting trailing bytes.
pub fn parse_cert_der(der: &[u8]) -> Result<ParsedCertificate> {
    let (rem, cert) = x509_parser::parse_x509_certificate(der).map_err(|e| Error::X509Parse {
        details: e.to_string(),
    })?;
    if !rem.is_empty() {
        return Err(Error::TrailingDerData);
    }
    Ok(ParsedCertificate {
        der: der.to_vec(),
        subject: cert.tbs_certificate.subject.as_raw().to_vec(),
        issuer: cert.tbs_certificate.issuer.as_raw().to_vec(),
    })
}
