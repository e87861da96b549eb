// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SLP request builders.
//!
//! UDP requires one contiguous datagram, and the header length field
//! covers the whole message, so [`build_service_request`] assembles the
//! body into a scratch buffer first and only then emits the header with
//! the final size.
//!
//! The builders perform **no semantic validation**: an empty service
//! type, a foreign language tag, or a header length that lies about the
//! body are all deliberately constructible. Exercising the target's own
//! rejection logic is the point of the conformance suite.

use crate::protocol::constants::*;
use crate::protocol::scope::ScopeSet;
use std::collections::BTreeSet;
use std::net::Ipv4Addr;

/// Previous-responder list: SAs already heard from, excluded from
/// answering a repeated multicast request (RFC 2608 Sec.8.1).
pub type PrList = BTreeSet<Ipv4Addr>;

/// Append an SLP header (RFC 2608 Sec.8.1).
///
/// `length` is the declared total message size. Callers normally pass
/// the real final size; conformance tests may deliberately declare more
/// bytes than they send.
pub fn build_header(
    out: &mut Vec<u8>,
    function_id: u8,
    flags: u16,
    xid: u16,
    language: &str,
    length: usize,
) {
    out.reserve(slp_header_size(language.len()));
    out.push(SLP_VERSION);
    out.push(function_id);
    write_u24(out, length);
    out.extend_from_slice(&flags.to_be_bytes());
    write_u24(out, 0); // next extension offset, none sent
    out.extend_from_slice(&xid.to_be_bytes());
    write_string(out, language);
}

/// Build a complete SrvRqst datagram (RFC 2608 Sec.8.1).
///
/// The MCAST flag is set exactly when `multicast` is true. Predicate and
/// SLP SPI are always empty: E1.33 discovery uses neither.
pub fn build_service_request(
    xid: u16,
    multicast: bool,
    pr_list: &PrList,
    service_type: &str,
    scopes: &ScopeSet,
    language: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(64 + service_type.len());
    write_string(&mut body, &join_pr_list(pr_list));
    write_string(&mut body, service_type);
    write_string(&mut body, &scopes.to_scope_list());
    write_string(&mut body, ""); // predicate
    write_string(&mut body, ""); // SLP SPI

    let flags = if multicast { SLP_FLAG_MCAST } else { 0 };
    let total = slp_header_size(language.len()) + body.len();

    let mut packet = Vec::with_capacity(total);
    build_header(&mut packet, SLP_FUNCT_SRVRQST, flags, xid, language, total);
    packet.extend_from_slice(&body);
    packet
}

/// Comma-join a PR list the way RFC 2608 Sec.8.1 expects it on the wire.
fn join_pr_list(pr_list: &PrList) -> String {
    let mut joined = String::new();
    for addr in pr_list {
        if !joined.is_empty() {
            joined.push(',');
        }
        joined.push_str(&addr.to_string());
    }
    joined
}

/// u16 length prefix + bytes, the encoding of every SLP string field.
fn write_string(out: &mut Vec<u8>, value: &str) {
    debug_assert!(value.len() <= u16::MAX as usize, "SLP string field overflow");
    out.extend_from_slice(&(value.len() as u16).to_be_bytes());
    out.extend_from_slice(value.as_bytes());
}

/// 3-byte big-endian length field.
fn write_u24(out: &mut Vec<u8>, value: usize) {
    debug_assert!(value <= 0x00ff_ffff, "SLP u24 field overflow");
    out.extend_from_slice(&[(value >> 16) as u8, (value >> 8) as u8, value as u8]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared_length(packet: &[u8]) -> usize {
        ((packet[2] as usize) << 16) | ((packet[3] as usize) << 8) | packet[4] as usize
    }

    #[test]
    fn header_structure() {
        let mut packet = Vec::new();
        build_header(&mut packet, SLP_FUNCT_SRVRQST, 0, 0x1234, "en", 16);

        assert_eq!(packet.len(), 16);
        assert_eq!(packet[0], SLP_VERSION);
        assert_eq!(packet[SLP_FUNCTION_OFFSET], SLP_FUNCT_SRVRQST);
        assert_eq!(declared_length(&packet), 16);
        // flags clear, no extension
        assert_eq!(&packet[5..10], &[0, 0, 0, 0, 0]);
        assert_eq!(&packet[SLP_XID_OFFSET..SLP_XID_OFFSET + 2], &[0x12, 0x34]);
        assert_eq!(&packet[12..16], &[0x00, 0x02, b'e', b'n']);
    }

    #[test]
    fn header_can_declare_more_than_it_carries() {
        // The overflow conformance test sends a 16-byte datagram whose
        // header claims 30 bytes; the builder must not second-guess it.
        let mut packet = Vec::new();
        build_header(&mut packet, SLP_FUNCT_SRVRQST, 0, 1, "en", 30);
        assert_eq!(packet.len(), 16);
        assert_eq!(declared_length(&packet), 30);
    }

    #[test]
    fn service_request_length_matches_serialized_size() {
        let packet = build_service_request(
            42,
            true,
            &PrList::new(),
            "service:rdmnet-device",
            &ScopeSet::new("rdmnet"),
            SLP_DEFAULT_LANGUAGE,
        );

        assert_eq!(declared_length(&packet), packet.len());
        assert_eq!(packet[SLP_FUNCTION_OFFSET], SLP_FUNCT_SRVRQST);
        // MCAST bit set, nothing else
        assert_eq!(&packet[5..7], &SLP_FLAG_MCAST.to_be_bytes());
    }

    #[test]
    fn unicast_request_clears_mcast_flag() {
        let packet = build_service_request(
            7,
            false,
            &PrList::new(),
            "service:rdmnet-device",
            &ScopeSet::new("rdmnet"),
            SLP_DEFAULT_LANGUAGE,
        );
        assert_eq!(&packet[5..7], &[0, 0]);
    }

    #[test]
    fn empty_service_type_still_well_formed() {
        // Builder never self-rejects; the target's PARSE_ERROR handling
        // is what the missing-service-type tests probe.
        let packet = build_service_request(
            9,
            false,
            &PrList::new(),
            "",
            &ScopeSet::new("rdmnet"),
            SLP_DEFAULT_LANGUAGE,
        );
        assert_eq!(declared_length(&packet), packet.len());
    }

    #[test]
    fn pr_list_serialized_comma_joined() {
        let mut pr_list = PrList::new();
        pr_list.insert(Ipv4Addr::new(10, 0, 0, 2));
        pr_list.insert(Ipv4Addr::new(10, 0, 0, 1));

        let packet = build_service_request(
            3,
            true,
            &pr_list,
            "service:rdmnet-device",
            &ScopeSet::new("rdmnet"),
            SLP_DEFAULT_LANGUAGE,
        );

        // PR list is the first body field, directly after the 16-byte header.
        let len = u16::from_be_bytes([packet[16], packet[17]]) as usize;
        let pr = std::str::from_utf8(&packet[18..18 + len]).unwrap();
        assert_eq!(pr, "10.0.0.1,10.0.0.2");
    }
}
