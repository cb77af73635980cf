// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Returns whether `c` is one of the six ASCII whitespace characters that
/// OpenSSL trims and collapses: space, \t, \n, \v, \f and \r.
///
/// Unicode spaces such as U+0085 or U+00A0 are attribute data, not
/// whitespace, at both the edges and the interior of a value.
fn is_canonical_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Lower-cases a single character with its simple one-to-one mapping.
///
/// Final sigma stays σ and U+0130 becomes a plain i, with no context or
/// combining marks involved.
fn simple_lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Canonicalizes a single attribute string value.
///
/// Trims leading and trailing ASCII whitespace, lower-cases the result one
/// character at a time and collapses every interior whitespace run into a
/// single space.
pub fn canonical_string(s: &str) -> String {
    let trimmed = s.trim_matches(is_canonical_space);

    let mut out = String::with_capacity(trimmed.len());
    let mut in_space = false;
    for c in trimmed.chars().map(simple_lowercase) {
        if is_canonical_space(c) {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
