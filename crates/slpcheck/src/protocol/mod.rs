// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # SLP Wire Codec (RFC 2608)
//!
//! Request builders, the reply parser, and the supporting value types
//! (scope sets, URL entries, transaction ids, service-URL helpers).
//!
//! All builder output and parser input is big-endian per RFC 2608 Sec.8.
//! The parser treats every input buffer as untrusted: each multi-byte
//! read is bounds-checked before consumption, and a lying length or
//! count field aborts the parse instead of reading past the buffer.
//!
//! # Messages
//!
//! - SrvRqst (1): built by the harness, never parsed
//! - SrvRply (2): parsed by the harness, never built
//!
//! # References
//!
//! - RFC 2608 Sec.8 (message formats)
//! - RFC 2608 Sec.7 (errors), Sec.9.1 (service URLs)

pub mod builder;
pub mod constants;
pub mod parser;
pub mod scope;
pub mod service_url;
pub mod url_entry;
pub mod xid;
