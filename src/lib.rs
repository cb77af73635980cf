// certhash: OpenSSL-compatible certificate subject hashing
// Copyright 2026 Dark Bio AG. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! OpenSSL-compatible certificate subject name hashing.
//!
//! Produces the `%08x.0` names `c_rehash` uses for trust-store symlinks.
//!
//! ```no_run
//! let hash = certhash::x509::cert_hash("ca.pem")?;
//! println!("{hash}");
//! # Ok::<(), certhash::x509::Error>(())
//! ```

#[cfg(feature = "pem")]
pub mod pem;
pub mod x509;
