// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![no_main]

use certhash::x509;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as PEM text, DER certificates and raw names must
    // only ever fail with an error
    if let Ok(hash) = x509::cert_raw_hash(data) {
        assert_eq!(hash.to_string().len(), 10);
    }
    let _ = x509::cert_der_hash(data);
    if let Ok(canon) = x509::canonical_name(data) {
        // Canonical values are already normalized
        for set in x509::canonical_sets(data).unwrap() {
            for atv in set.0 {
                assert_eq!(x509::canonical_string(&atv.value), atv.value);
            }
        }
        assert!(canon.is_empty() || canon[0] == 0x31);
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let once = x509::canonical_string(text);
        assert_eq!(x509::canonical_string(&once), once);
    }
});
