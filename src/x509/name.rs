// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use super::{Error, Result, canonical_string};
use const_oid::ObjectIdentifier;
use der::asn1::{Any, AnyRef};
use der::{Decode, Encode, Reader, SliceReader, Tag, Tagged};
use x509_cert::attr::AttributeTypeAndValue;

/// A name attribute after canonicalization: the original type and the
/// normalized value, always encoded as a UTF8String.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalAtv {
    /// Attribute OID (for example `2.5.4.3` for CN).
    pub oid: ObjectIdentifier,
    /// Normalized attribute value.
    pub value: String,
}

impl CanonicalAtv {
    fn to_der(&self) -> Result<Vec<u8>> {
        let atv = AttributeTypeAndValue {
            oid: self.oid,
            value: Any::new(Tag::Utf8String, self.value.as_bytes())?,
        };
        Ok(atv.to_der()?)
    }
}

/// The canonical form of one relative distinguished name.
///
/// Attributes keep the order they had in the certificate; the set is not
/// re-sorted when encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalSet(pub Vec<CanonicalAtv>);

impl CanonicalSet {
    /// Encodes the attributes under a SET (0x31) header.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        for atv in &self.0 {
            body.extend_from_slice(&atv.to_der()?);
        }
        Ok(Any::new(Tag::Set, body)?.to_der()?)
    }
}

/// Parses a raw DER Name into its canonical relative distinguished names.
pub fn canonical_sets(name_der: &[u8]) -> Result<Vec<CanonicalSet>> {
    let rdns = Vec::<AnyRef<'_>>::from_der(name_der).map_err(name_parse_error)?;

    let mut sets = Vec::with_capacity(rdns.len());
    for rdn in rdns {
        if rdn.tag() != Tag::Set {
            return Err(Error::NameParse {
                details: format!("expected SET, found {}", rdn.tag()),
            });
        }
        let mut reader = SliceReader::new(rdn.value()).map_err(name_parse_error)?;
        let mut set = Vec::new();
        while !reader.is_finished() {
            let atv = AttributeTypeAndValue::decode(&mut reader).map_err(name_parse_error)?;
            let value = attribute_text(&atv.value)?;
            set.push(CanonicalAtv {
                oid: atv.oid,
                value: canonical_string(&value),
            });
        }
        log::trace!("canonical rdn: {set:?}");
        sets.push(CanonicalSet(set));
    }
    Ok(sets)
}

/// Produces OpenSSL's canonical encoding of a raw DER Name.
///
/// Each relative distinguished name is re-encoded as a SET of normalized
/// UTF8String attributes and the SETs are concatenated. The outer SEQUENCE
/// header of the Name is not part of the output.
pub fn canonical_name(name_der: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for set in canonical_sets(name_der)? {
        out.extend_from_slice(&set.to_der()?);
    }
    Ok(out)
}

/// Decodes an attribute value into text, or fails if it is not a string type.
fn attribute_text(value: &Any) -> Result<String> {
    let bytes = value.value();
    match value.tag() {
        Tag::Utf8String
        | Tag::PrintableString
        | Tag::Ia5String
        | Tag::NumericString
        | Tag::VisibleString => std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| Error::NameParse {
                details: e.to_string(),
            }),
        // T.61 is read as Latin-1, as OpenSSL does
        Tag::TeletexString => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        Tag::BmpString => {
            if bytes.len() % 2 != 0 {
                return Err(Error::NameParse {
                    details: "odd BMPString length".to_string(),
                });
            }
            let units = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            char::decode_utf16(units)
                .collect::<std::result::Result<String, _>>()
                .map_err(|e| Error::NameParse {
                    details: e.to_string(),
                })
        }
        // UniversalString, GraphicString and GeneralString never get here:
        // der has no tag for them and fails with NameParse while decoding
        tag => Err(Error::NonStringValue {
            tag: tag.to_string(),
        }),
    }
}

fn name_parse_error(err: der::Error) -> Error {
    Error::NameParse {
        details: err.to_string(),
    }
}
