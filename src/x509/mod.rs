// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! X.509 subject name hashing compatible with OpenSSL's
//! `X509_subject_name_hash` and the `c_rehash` directory layout.
//!
//! The pipeline is: load a single certificate, canonicalize the raw subject
//! Name, SHA-1 the canonical bytes and format the first four digest bytes
//! (little-endian) as `%08x.0`. Every stage is a pure function, so
//! certificates can be hashed concurrently without coordination.
//!
//! https://github.com/openssl/openssl/blob/master/crypto/x509/x_name.c

mod error;
mod hash;
mod load;
mod name;
mod normalize;

pub use error::{Error, ErrorKind, Result, Stage};
#[cfg(feature = "pem")]
pub use hash::{cert_hash, cert_raw_hash};
pub use hash::{HashResult, cert_der_hash, issuer_name_hash, name_hash, subject_name_hash};
#[cfg(feature = "pem")]
pub use load::parse_cert;
pub use load::{ParsedCertificate, parse_cert_der};
pub use name::{CanonicalAtv, CanonicalSet, canonical_name, canonical_sets};
pub use normalize::canonical_string;
