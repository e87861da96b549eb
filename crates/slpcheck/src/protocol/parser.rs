// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SLP reply parsing.
//!
//! Implements decoding of SrvRply messages per RFC 2608 Sec.8.2.
//!
//! Input buffers come straight off a UDP socket and are untrusted: every
//! multi-byte read is checked against the remaining buffer before
//! consumption, so a length or count field that lies can only abort the
//! parse, never read past the buffer. A parse failure is fatal to the
//! current exchange only, never to the process.

use crate::protocol::constants::*;
use crate::protocol::url_entry::UrlEntry;

/// Parse error taxonomy for SrvRply decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Buffer ended before a declared field.
    TruncatedData,
    /// Version byte is not SLPv2.
    UnsupportedVersion(u8),
    /// Function id is not SrvRply.
    UnexpectedFunction(u8),
    /// Header length field disagrees with the bytes actually received.
    LengthMismatch { declared: usize, actual: usize },
    /// URL entry carries auth blocks, which this harness cannot skip.
    AuthBlocksPresent(u8),
    /// URL bytes are not valid UTF-8.
    InvalidUrl,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TruncatedData => write!(f, "reply truncated mid-field"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported SLP version {}", v),
            Self::UnexpectedFunction(id) => write!(f, "function id {} is not SrvRply", id),
            Self::LengthMismatch { declared, actual } => {
                write!(f, "declared length {} != received {}", declared, actual)
            }
            Self::AuthBlocksPresent(n) => write!(f, "{} auth blocks in URL entry", n),
            Self::InvalidUrl => write!(f, "URL is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Decoded SrvRply (RFC 2608 Sec.8.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReply {
    /// Transaction id echoed from the request.
    pub xid: u16,
    /// Language tag echoed from the request.
    pub language: String,
    /// RFC 2608 Sec.7 error code; `SLP_OK` for a positive reply.
    pub error_code: u16,
    /// URL entries, in wire order. Empty for error replies.
    pub url_entries: Vec<UrlEntry>,
}

/// Peek function id and xid without decoding the body.
///
/// The runner correlates incoming datagrams this way; stray traffic is
/// discarded on xid mismatch before any full decode happens.
pub fn peek_header(buf: &[u8]) -> Option<(u8, u16)> {
    if buf.len() < SLP_HEADER_FIXED_SIZE {
        return None;
    }
    let function_id = buf[SLP_FUNCTION_OFFSET];
    let xid = u16::from_be_bytes([buf[SLP_XID_OFFSET], buf[SLP_XID_OFFSET + 1]]);
    Some((function_id, xid))
}

/// Parse a SrvRply datagram.
///
/// # Errors
///
/// - `UnsupportedVersion` / `UnexpectedFunction` on a foreign header
/// - `LengthMismatch` when the header length field does not equal the
///   datagram size (the header invariant: they must agree exactly)
/// - `TruncatedData` when any field runs past the buffer
/// - `AuthBlocksPresent` on a nonzero auth-block count (out of scope,
///   and auth blocks cannot be skipped without decoding them)
pub fn parse_service_reply(buf: &[u8]) -> Result<ServiceReply, ParseError> {
    if buf.len() < SLP_HEADER_FIXED_SIZE {
        return Err(ParseError::TruncatedData);
    }

    if buf[0] != SLP_VERSION {
        return Err(ParseError::UnsupportedVersion(buf[0]));
    }
    if buf[SLP_FUNCTION_OFFSET] != SLP_FUNCT_SRVRPLY {
        return Err(ParseError::UnexpectedFunction(buf[SLP_FUNCTION_OFFSET]));
    }

    let declared = ((buf[2] as usize) << 16) | ((buf[3] as usize) << 8) | buf[4] as usize;
    if declared != buf.len() {
        log::debug!(
            "[parser] [!]  SrvRply length field {} != datagram size {}",
            declared,
            buf.len()
        );
        return Err(ParseError::LengthMismatch {
            declared,
            actual: buf.len(),
        });
    }

    let xid = u16::from_be_bytes([buf[SLP_XID_OFFSET], buf[SLP_XID_OFFSET + 1]]);
    let language_len = u16::from_be_bytes([buf[12], buf[13]]) as usize;

    let mut offset = SLP_HEADER_FIXED_SIZE;
    if offset + language_len > buf.len() {
        return Err(ParseError::TruncatedData);
    }
    let language = String::from_utf8_lossy(&buf[offset..offset + language_len]).into_owned();
    offset += language_len;

    if offset + 2 > buf.len() {
        return Err(ParseError::TruncatedData);
    }
    let error_code = u16::from_be_bytes([buf[offset], buf[offset + 1]]);
    offset += 2;

    // RFC 2608 Sec.7: an error reply MAY end right after the error code.
    if error_code != SLP_OK && offset == buf.len() {
        return Ok(ServiceReply {
            xid,
            language,
            error_code,
            url_entries: Vec::new(),
        });
    }

    if offset + 2 > buf.len() {
        return Err(ParseError::TruncatedData);
    }
    let entry_count = u16::from_be_bytes([buf[offset], buf[offset + 1]]) as usize;
    offset += 2;

    let mut url_entries = Vec::with_capacity(entry_count.min(64));
    for _ in 0..entry_count {
        // reserved(1) + lifetime(2) + url length(2)
        if offset + 5 > buf.len() {
            return Err(ParseError::TruncatedData);
        }
        let lifetime = u16::from_be_bytes([buf[offset + 1], buf[offset + 2]]);
        let url_len = u16::from_be_bytes([buf[offset + 3], buf[offset + 4]]) as usize;
        offset += 5;

        if offset + url_len > buf.len() {
            return Err(ParseError::TruncatedData);
        }
        let url = std::str::from_utf8(&buf[offset..offset + url_len])
            .map_err(|_| ParseError::InvalidUrl)?
            .to_owned();
        offset += url_len;

        if offset + 1 > buf.len() {
            return Err(ParseError::TruncatedData);
        }
        let auth_blocks = buf[offset];
        offset += 1;
        if auth_blocks != 0 {
            return Err(ParseError::AuthBlocksPresent(auth_blocks));
        }

        url_entries.push(UrlEntry::new(lifetime, url));
    }

    Ok(ServiceReply {
        xid,
        language,
        error_code,
        url_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-encode a SrvRply the way an SA would put it on the wire.
    fn encode_reply(xid: u16, error_code: u16, entries: &[(u16, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&error_code.to_be_bytes());
        body.extend_from_slice(&(entries.len() as u16).to_be_bytes());
        for (lifetime, url) in entries {
            body.push(0); // reserved
            body.extend_from_slice(&lifetime.to_be_bytes());
            body.extend_from_slice(&(url.len() as u16).to_be_bytes());
            body.extend_from_slice(url.as_bytes());
            body.push(0); // auth block count
        }

        let total = slp_header_size(2) + body.len();
        let mut packet = vec![
            SLP_VERSION,
            SLP_FUNCT_SRVRPLY,
            (total >> 16) as u8,
            (total >> 8) as u8,
            total as u8,
            0,
            0,
            0,
            0,
            0,
        ];
        packet.extend_from_slice(&xid.to_be_bytes());
        packet.extend_from_slice(&2u16.to_be_bytes());
        packet.extend_from_slice(b"en");
        packet.extend_from_slice(&body);
        packet
    }

    #[test]
    fn decodes_single_entry_reply() {
        let packet = encode_reply(
            0x0102,
            SLP_OK,
            &[(300, "service:rdmnet-device:7a7000000001@192.168.1.50")],
        );

        let reply = parse_service_reply(&packet).expect("valid reply");
        assert_eq!(reply.xid, 0x0102);
        assert_eq!(reply.language, "en");
        assert_eq!(reply.error_code, SLP_OK);
        assert_eq!(reply.url_entries.len(), 1);
        assert_eq!(reply.url_entries[0].lifetime, 300);
        assert_eq!(
            reply.url_entries[0].url,
            "service:rdmnet-device:7a7000000001@192.168.1.50"
        );
    }

    #[test]
    fn error_reply_may_end_after_error_code() {
        let mut packet = encode_reply(1, SLP_SCOPE_NOT_SUPPORTED, &[]);
        packet.truncate(packet.len() - 2); // drop the entry count
        packet[4] -= 2; // keep the length field honest

        let reply = parse_service_reply(&packet).expect("short error reply");
        assert_eq!(reply.error_code, SLP_SCOPE_NOT_SUPPORTED);
        assert!(reply.url_entries.is_empty());
    }

    #[test]
    fn truncation_mid_entry_is_rejected() {
        let full = encode_reply(2, SLP_OK, &[(60, "service:rdmnet-device:00aa00000001@10.0.0.9")]);

        // Every prefix that cuts into the URL entry must fail cleanly,
        // regardless of what the length and count fields still claim.
        for cut in slp_header_size(2) + 4..full.len() {
            let mut truncated = full[..cut].to_vec();
            truncated[2] = (cut >> 16) as u8;
            truncated[3] = (cut >> 8) as u8;
            truncated[4] = cut as u8;
            assert!(
                parse_service_reply(&truncated).is_err(),
                "cut at {} unexpectedly parsed",
                cut
            );
        }
    }

    #[test]
    fn lying_length_field_is_rejected() {
        let mut packet = encode_reply(3, SLP_OK, &[]);
        packet[4] += 5;
        assert!(matches!(
            parse_service_reply(&packet),
            Err(ParseError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn lying_entry_count_is_rejected() {
        let mut packet = encode_reply(4, SLP_OK, &[(10, "service:x:00aa00000001@10.0.0.1")]);
        let count_at = slp_header_size(2) + 2;
        packet[count_at] = 0xff;
        packet[count_at + 1] = 0xff;
        assert_eq!(parse_service_reply(&packet), Err(ParseError::TruncatedData));
    }

    #[test]
    fn foreign_function_id_is_rejected() {
        let mut packet = encode_reply(5, SLP_OK, &[]);
        packet[SLP_FUNCTION_OFFSET] = SLP_FUNCT_DAADVERT;
        assert_eq!(
            parse_service_reply(&packet),
            Err(ParseError::UnexpectedFunction(SLP_FUNCT_DAADVERT))
        );
    }

    #[test]
    fn auth_blocks_are_rejected() {
        let mut packet = encode_reply(6, SLP_OK, &[(10, "service:x:00aa00000001@10.0.0.1")]);
        let last = packet.len() - 1;
        packet[last] = 1;
        assert_eq!(
            parse_service_reply(&packet),
            Err(ParseError::AuthBlocksPresent(1))
        );
    }

    #[test]
    fn peek_reads_function_and_xid_only() {
        let packet = encode_reply(0xbeef, SLP_OK, &[]);
        assert_eq!(peek_header(&packet), Some((SLP_FUNCT_SRVRPLY, 0xbeef)));
        assert_eq!(peek_header(&packet[..13]), None);
        assert_eq!(peek_header(&[]), None);
    }
}
