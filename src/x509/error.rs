// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type used by x509 APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type used by x509 APIs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[cfg(feature = "pem")]
    #[error(transparent)]
    Pem(#[from] crate::pem::Error),
    #[error("PEM block is not a certificate: {label}")]
    InvalidPemLabel { label: String },
    #[error("X.509 parse error: {details}")]
    X509Parse { details: String },
    #[error("trailing data after DER certificate")]
    TrailingDerData,
    #[error("failed to parse subject name: {details}")]
    NameParse { details: String },
    #[error("unexpected non-string value with tag {tag}")]
    NonStringValue { tag: String },
    #[error("invalid hash name: {value}")]
    InvalidHashName { value: String },
    #[error("failed to encode canonical name: {0}")]
    Encode(#[from] der::Error),
    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

/// Broad failure classes, for callers deciding whether to skip a certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The certificate file could not be read.
    Io,
    /// The input is not a single well formed certificate with a textual subject.
    Format,
    /// The canonical name could not be re-encoded.
    Encoding,
}

/// Pipeline stage that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Loading and parsing the certificate.
    Load,
    /// Canonicalizing and hashing a name.
    Canonicalize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => f.write_str("load certificate"),
            Stage::Canonicalize => f.write_str("canonicalize name"),
        }
    }
}

impl Error {
    /// Classifies the error, looking through stage context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::Encode(_) => ErrorKind::Encoding,
            Error::Stage { source, .. } => source.kind(),
            _ => ErrorKind::Format,
        }
    }

    /// Returns the stage this error was attributed to, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub(super) fn in_stage(self, stage: Stage) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_looks_through_stage() {
        let err = Error::NonStringValue {
            tag: "INTEGER".to_string(),
        }
        .in_stage(Stage::Canonicalize);
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.stage(), Some(Stage::Canonicalize));
        assert_eq!(
            err.to_string(),
            "canonicalize name: unexpected non-string value with tag INTEGER"
        );
    }

    #[test]
    fn test_io_kind() {
        let err = Error::Io {
            path: PathBuf::from("/nonexistent"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_encoding_kind() {
        let err = Error::from(der::Error::from(der::ErrorKind::Overflow));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }
}
