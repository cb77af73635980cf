// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! PEM block scanning and encoding.
//!
//! The scanner follows the lenient conventions of OpenSSL and Go's
//! encoding/pem: text before a block is ignored, optional RFC 1421 headers
//! are accepted, and base64 bodies may be wrapped at any column. Callers
//! that need exactly one block use [`decode_single`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

const PEM_HEADER: &[u8] = b"-----BEGIN ";
const PEM_FOOTER: &[u8] = b"-----END ";
const PEM_ENDING: &[u8] = b"-----";

/// Errors raised when a buffer does not hold exactly one PEM block.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no PEM data")]
    NoPemData,
    #[error("multiple PEM blocks, expected exactly one")]
    MultipleBlocks,
}

/// A decoded PEM block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Label from the BEGIN line, e.g. `CERTIFICATE`.
    pub kind: String,
    /// RFC 1421 headers in the order they appeared.
    pub headers: Vec<(String, String)>,
    /// Decoded body bytes.
    pub contents: Vec<u8>,
}

/// Finds the first well formed PEM block in `data`.
///
/// Returns the block and the bytes following its END line, or `None` if no
/// block could be decoded. Malformed candidates are skipped.
///
/// Runs in time linear in `data`: the next END line is located once and
/// shared by every candidate before it, and a candidate with another BEGIN
/// line inside its body is skipped without decoding.
pub fn decode(data: &[u8]) -> Option<(Block, &[u8])> {
    let mut start = find_line_start(data, 0, PEM_HEADER)?;
    let mut footer: Option<usize> = None;
    loop {
        // No END line after this candidate means none after any later one
        let footer_at = match footer {
            Some(at) if at > start => at,
            _ => {
                let at = find_line_start(data, start, PEM_FOOTER)?;
                footer = Some(at);
                at
            }
        };
        let next = find_line_start(data, start + PEM_HEADER.len(), PEM_HEADER);
        if next.is_none_or(|next| next > footer_at) {
            if let Some(found) = decode_at(data, start, footer_at) {
                return Some(found);
            }
        }
        log::debug!("pem: skipping malformed block at offset {start}");
        start = next?;
    }
}

/// Decodes the only PEM block in `data`.
///
/// Bytes around the block that do not form another block are ignored, but a
/// second decodable block is an error rather than being silently dropped.
pub fn decode_single(data: &[u8]) -> Result<Block, Error> {
    let (block, rest) = decode(data).ok_or(Error::NoPemData)?;
    if decode(rest).is_some() {
        return Err(Error::MultipleBlocks);
    }
    Ok(block)
}

/// Encodes data as a PEM block with the given type.
/// Lines are 64 characters, using \n line endings.
pub fn encode(kind: &str, data: &[u8]) -> String {
    let b64 = STANDARD.encode(data);

    let mut buf = String::new();
    buf.push_str("-----BEGIN ");
    buf.push_str(kind);
    buf.push_str("-----\n");

    for (i, c) in b64.chars().enumerate() {
        if i > 0 && i % 64 == 0 {
            buf.push('\n');
        }
        buf.push(c);
    }
    if !b64.is_empty() {
        buf.push('\n');
    }

    buf.push_str("-----END ");
    buf.push_str(kind);
    buf.push_str("-----\n");

    buf
}

/// Decodes the block whose BEGIN line is at `start` and whose END line is at
/// `footer_at` within `data`.
fn decode_at(data: &[u8], start: usize, footer_at: usize) -> Option<(Block, &[u8])> {
    let (line, mut rest) = split_line(&data[start..footer_at]);
    let line = trim_ascii_end(line);
    if !line.ends_with(PEM_ENDING) || line.len() < PEM_HEADER.len() + PEM_ENDING.len() {
        return None;
    }
    let kind = &line[PEM_HEADER.len()..line.len() - PEM_ENDING.len()];
    let kind = std::str::from_utf8(kind).ok()?.to_string();

    // Optional "Key: value" headers, terminated by a blank line
    let mut headers = Vec::new();
    while !rest.is_empty() {
        let (line, next) = split_line(rest);
        let line = trim_ascii_end(line);
        if line.is_empty() {
            if !headers.is_empty() {
                rest = next;
            }
            break;
        }
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            break;
        };
        let key = std::str::from_utf8(&line[..colon]).ok()?.trim();
        let value = std::str::from_utf8(&line[colon + 1..]).ok()?.trim();
        headers.push((key.to_string(), value.to_string()));
        rest = next;
    }

    // The first END line terminates the block and must carry the same label
    let body = rest;
    let (footer, remainder) = split_line(&data[footer_at..]);
    let footer = trim_ascii_end(footer);
    let expected = [kind.as_bytes(), PEM_ENDING].concat();
    if footer.get(PEM_FOOTER.len()..) != Some(expected.as_slice()) {
        return None;
    }
    let b64: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let contents = STANDARD.decode(&b64).ok()?;

    Some((
        Block {
            kind,
            headers,
            contents,
        },
        remainder,
    ))
}

/// Finds the first occurrence of `marker` at or after `from` that begins a
/// line, as an offset into `data`.
fn find_line_start(data: &[u8], from: usize, marker: &[u8]) -> Option<usize> {
    data.get(from..)?
        .windows(marker.len())
        .enumerate()
        .map(|(i, w)| (from + i, w))
        .find(|(i, w)| *w == marker && (*i == 0 || data[i - 1] == b'\n'))
        .map(|(i, _)| i)
}

/// Splits off the first line, returning it (without the \n) and the rest.
fn split_line(data: &[u8]) -> (&[u8], &[u8]) {
    match data.iter().position(|&b| b == b'\n') {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, &data[data.len()..]),
    }
}

fn trim_ascii_end(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !matches!(b, b' ' | b'\t' | b'\r'))
        .map_or(0, |i| i + 1);
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"hello world";
        let encoded = encode("TEST", data);
        let (block, rest) = decode(encoded.as_bytes()).unwrap();
        assert_eq!(block.kind, "TEST");
        assert_eq!(block.contents, data);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_encode_wraps_at_64_columns() {
        let encoded = encode("TEST", &[0u8; 100]);
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1].len(), 64);
        assert_eq!(lines[2].len(), 64);
        assert_eq!(lines[3].len(), 8);
    }

    #[test]
    fn test_decode_valid_crlf() {
        let pem = b"-----BEGIN CERTIFICATE-----\r\nYWJj\r\n-----END CERTIFICATE-----\r\n";
        let (block, _) = decode(pem).unwrap();
        assert_eq!(block.kind, "CERTIFICATE");
        assert_eq!(block.contents, b"abc");
    }

    #[test]
    fn test_decode_no_trailing_newline() {
        let pem = b"-----BEGIN CERTIFICATE-----\nYWJj\n-----END CERTIFICATE-----";
        let (block, rest) = decode(pem).unwrap();
        assert_eq!(block.contents, b"abc");
        assert!(rest.is_empty());
    }

    #[test]
    fn test_decode_skips_leading_text() {
        let pem = b"subject=CN = abc.test\n\n-----BEGIN CERTIFICATE-----\nYWJj\n-----END CERTIFICATE-----\n";
        let (block, _) = decode(pem).unwrap();
        assert_eq!(block.contents, b"abc");
    }

    #[test]
    fn test_decode_headers() {
        let pem = b"-----BEGIN CERTIFICATE-----\nProc-Type: 4,ENCRYPTED\nDEK-Info: AES-128-CBC,00\n\nYWJj\n-----END CERTIFICATE-----\n";
        let (block, _) = decode(pem).unwrap();
        assert_eq!(
            block.headers,
            vec![
                ("Proc-Type".to_string(), "4,ENCRYPTED".to_string()),
                ("DEK-Info".to_string(), "AES-128-CBC,00".to_string()),
            ]
        );
        assert_eq!(block.contents, b"abc");
    }

    #[test]
    fn test_decode_wrapped_body() {
        let pem = b"-----BEGIN CERTIFICATE-----\nYW\nJj\n-----END CERTIFICATE-----\n";
        let (block, _) = decode(pem).unwrap();
        assert_eq!(block.contents, b"abc");
    }

    #[test]
    fn test_decode_missing_header() {
        assert!(decode(b"YWJj\n-----END CERTIFICATE-----\n").is_none());
    }

    #[test]
    fn test_decode_missing_footer() {
        assert!(decode(b"-----BEGIN CERTIFICATE-----\nYWJj\n").is_none());
    }

    #[test]
    fn test_decode_mismatched_footer() {
        assert!(decode(b"-----BEGIN CERTIFICATE-----\nYWJj\n-----END PUBLIC KEY-----\n").is_none());
    }

    #[test]
    fn test_decode_invalid_base64() {
        assert!(decode(b"-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----\n").is_none());
    }

    #[test]
    fn test_decode_skips_broken_candidate() {
        let pem = b"-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----\n-----BEGIN CERTIFICATE-----\nYWJj\n-----END CERTIFICATE-----\n";
        let (block, _) = decode(pem).unwrap();
        assert_eq!(block.contents, b"abc");
    }

    #[test]
    fn test_decode_skips_nested_begin() {
        let pem = b"-----BEGIN CERTIFICATE-----\nYWJj\n-----BEGIN CERTIFICATE-----\nZGVm\n-----END CERTIFICATE-----\n";
        let (block, _) = decode(pem).unwrap();
        assert_eq!(block.contents, b"def");
    }

    #[test]
    fn test_decode_many_unterminated_headers() {
        let pem = "-----BEGIN CERTIFICATE-----\n".repeat(50_000);

        let start = std::time::Instant::now();
        assert!(decode(pem.as_bytes()).is_none());
        assert_eq!(decode_single(pem.as_bytes()), Err(Error::NoPemData));
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_decode_many_broken_headers_before_block() {
        let mut pem = "-----BEGIN CERTIFICATE-----\n".repeat(50_000);
        pem.push_str(&encode("CERTIFICATE", b"abc"));

        let start = std::time::Instant::now();
        let block = decode_single(pem.as_bytes()).unwrap();
        assert_eq!(block.contents, b"abc");
        assert!(start.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_decode_single_rejects_empty() {
        assert_eq!(decode_single(b""), Err(Error::NoPemData));
        assert_eq!(decode_single(b"not a certificate"), Err(Error::NoPemData));
    }

    #[test]
    fn test_decode_single_rejects_bundle() {
        let mut pem = encode("CERTIFICATE", b"one");
        pem.push_str(&encode("CERTIFICATE", b"two"));
        assert_eq!(decode_single(pem.as_bytes()), Err(Error::MultipleBlocks));
    }

    #[test]
    fn test_decode_single_ignores_trailing_text() {
        let mut pem = encode("CERTIFICATE", b"one");
        pem.push_str("# trailing comment\n");
        let block = decode_single(pem.as_bytes()).unwrap();
        assert_eq!(block.contents, b"one");
    }
}
