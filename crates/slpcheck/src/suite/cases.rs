// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The SA conformance scenarios.
//!
//! Each case probes one behavior an E1.33 Service Agent must get right:
//! answering well-formed requests, rejecting malformed ones with the
//! correct error code, and staying silent where RFC 2608 demands it
//! (multicast requests it cannot serve, requests listing it in the PR
//! list). Registration order here is execution order.

use crate::protocol::builder::{build_header, build_service_request, PrList};
use crate::protocol::constants::*;
use crate::protocol::parser::parse_service_reply;
use crate::protocol::scope::ScopeSet;
use crate::protocol::service_url::{parse_device_url, service_of_url};
use crate::suite::case::{BuildContext, Destination, Expectation, Outcome, TestCase, VerifyContext};
use crate::suite::registry::TestRegistry;

/// Service type all RDMnet devices register under (ANSI E1.33).
pub const RDMNET_DEVICE_SERVICE: &str = "service:rdmnet-device";

/// Scope all RDMnet devices must support (ANSI E1.33).
pub const RDMNET_SCOPE: &str = "rdmnet";

fn rdmnet_scopes() -> ScopeSet {
    ScopeSet::new(RDMNET_SCOPE)
}

/// A 0-byte UDP datagram; the SA must stay silent.
struct EmptyPacket;

impl TestCase for EmptyPacket {
    fn name(&self) -> &'static str {
        "empty_packet"
    }
    fn destination(&self) -> Destination {
        Destination::Unicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, _ctx: &BuildContext) -> Vec<u8> {
        Vec::new()
    }
}

/// A 1-byte datagram, too short for any header.
struct SingleByte;

impl TestCase for SingleByte {
    fn name(&self) -> &'static str {
        "single_byte"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, _ctx: &BuildContext) -> Vec<u8> {
        vec![0]
    }
}

/// The positive path: a multicast SrvRqst for `service:rdmnet-device`
/// in scope `rdmnet` must draw a SrvRply advertising exactly this
/// target.
struct SrvRqst;

impl TestCase for SrvRqst {
    fn name(&self) -> &'static str {
        "srv_rqst"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Response(SLP_FUNCT_SRVRPLY)
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        build_service_request(
            ctx.xid,
            true,
            &PrList::new(),
            RDMNET_DEVICE_SERVICE,
            &rdmnet_scopes(),
            SLP_DEFAULT_LANGUAGE,
        )
    }

    fn verify(&self, data: &[u8], ctx: &VerifyContext) -> Outcome {
        let reply = match parse_service_reply(data) {
            Ok(reply) => reply,
            Err(e) => return Outcome::Failed(format!("reply failed to parse: {}", e)),
        };

        if reply.error_code != SLP_OK {
            return Outcome::Failed(format!("error code is {}", reply.error_code));
        }
        if reply.url_entries.len() != 1 {
            return Outcome::Failed(format!(
                "expected 1 URL entry, received {}",
                reply.url_entries.len()
            ));
        }

        let entry = &reply.url_entries[0];
        log::info!("[case] received SrvRply containing {}", entry);

        match service_of_url(&entry.url) {
            Some(service) if service == RDMNET_DEVICE_SERVICE => {}
            service => {
                return Outcome::Failed(format!(
                    "mismatched SLP service, expected '{}', got '{}'",
                    RDMNET_DEVICE_SERVICE,
                    service.unwrap_or("<none>")
                ));
            }
        }

        let (uid, address) = match parse_device_url(&entry.url) {
            Some(parsed) => parsed,
            None => {
                return Outcome::Failed(format!(
                    "failed to extract UID & IP from {}",
                    entry.url
                ));
            }
        };
        log::debug!("[case] device uid {} at {}", uid, address);

        if address != ctx.target {
            return Outcome::Failed(format!(
                "IP in URL ({}) does not match that of the target",
                address
            ));
        }
        Outcome::Passed
    }
}

/// A unicast SrvRqst that is just a header; the SA must answer
/// PARSE_ERROR.
struct EmptyUnicastSrvRqst;

impl TestCase for EmptyUnicastSrvRqst {
    fn name(&self) -> &'static str {
        "empty_unicast_srv_rqst"
    }
    fn destination(&self) -> Destination {
        Destination::Unicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Error(SLP_FUNCT_SRVRPLY, SLP_PARSE_ERROR)
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        let mut packet = Vec::new();
        let size = slp_header_size(SLP_DEFAULT_LANGUAGE.len());
        build_header(
            &mut packet,
            SLP_FUNCT_SRVRQST,
            0,
            ctx.xid,
            SLP_DEFAULT_LANGUAGE,
            size,
        );
        packet
    }
}

/// Header-only SrvRqst on multicast; silence, not an error reply.
struct EmptyMulticastSrvRqst;

impl TestCase for EmptyMulticastSrvRqst {
    fn name(&self) -> &'static str {
        "empty_multicast_srv_rqst"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        let mut packet = Vec::new();
        let size = slp_header_size(SLP_DEFAULT_LANGUAGE.len());
        build_header(
            &mut packet,
            SLP_FUNCT_SRVRQST,
            SLP_FLAG_MCAST,
            ctx.xid,
            SLP_DEFAULT_LANGUAGE,
            size,
        );
        packet
    }
}

/// A unicast SrvRqst whose header declares 30 bytes but carries none.
struct OverflowUnicastSrvRqst;

impl TestCase for OverflowUnicastSrvRqst {
    fn name(&self) -> &'static str {
        "overflow_unicast_srv_rqst"
    }
    fn destination(&self) -> Destination {
        Destination::Unicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Error(SLP_FUNCT_SRVRPLY, SLP_PARSE_ERROR)
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        let mut packet = Vec::new();
        build_header(
            &mut packet,
            SLP_FUNCT_SRVRQST,
            0,
            ctx.xid,
            SLP_DEFAULT_LANGUAGE,
            30,
        );
        packet
    }
}

/// The multicast twin of the overflow test; expects silence.
struct OverflowMulticastSrvRqst;

impl TestCase for OverflowMulticastSrvRqst {
    fn name(&self) -> &'static str {
        "overflow_multicast_srv_rqst"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        let mut packet = Vec::new();
        build_header(
            &mut packet,
            SLP_FUNCT_SRVRQST,
            SLP_FLAG_MCAST,
            ctx.xid,
            SLP_DEFAULT_LANGUAGE,
            30,
        );
        packet
    }
}

/// A multicast SrvRqst listing the target in the PR list; an SA that
/// already responded must not respond again (RFC 2608 Sec.8.1).
struct PrListSrvRqst;

impl TestCase for PrListSrvRqst {
    fn name(&self) -> &'static str {
        "pr_list_srv_rqst"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        let mut pr_list = PrList::new();
        pr_list.insert(ctx.target);
        build_service_request(
            ctx.xid,
            true,
            &pr_list,
            RDMNET_DEVICE_SERVICE,
            &rdmnet_scopes(),
            SLP_DEFAULT_LANGUAGE,
        )
    }
}

/// Unicast request in scope `default`: an RDMnet SA only serves scope
/// `rdmnet` and must answer SCOPE_NOT_SUPPORTED.
struct DefaultScopeUnicast;

impl TestCase for DefaultScopeUnicast {
    fn name(&self) -> &'static str {
        "default_scope_unicast"
    }
    fn destination(&self) -> Destination {
        Destination::Unicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Error(SLP_FUNCT_SRVRPLY, SLP_SCOPE_NOT_SUPPORTED)
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        build_service_request(
            ctx.xid,
            false,
            &PrList::new(),
            RDMNET_DEVICE_SERVICE,
            &ScopeSet::new("default"),
            SLP_DEFAULT_LANGUAGE,
        )
    }
}

/// Multicast request in scope `default`; wrong scope on multicast means
/// silence rather than an error reply.
struct DefaultScopeMulticast;

impl TestCase for DefaultScopeMulticast {
    fn name(&self) -> &'static str {
        "default_scope_multicast"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        build_service_request(
            ctx.xid,
            true,
            &PrList::new(),
            RDMNET_DEVICE_SERVICE,
            &ScopeSet::new("default"),
            SLP_DEFAULT_LANGUAGE,
        )
    }
}

/// Unicast SrvRqst with no service type at all.
struct MissingServiceTypeUnicast;

impl TestCase for MissingServiceTypeUnicast {
    fn name(&self) -> &'static str {
        "missing_service_type_unicast"
    }
    fn destination(&self) -> Destination {
        Destination::Unicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Error(SLP_FUNCT_SRVRPLY, SLP_PARSE_ERROR)
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        build_service_request(
            ctx.xid,
            false,
            &PrList::new(),
            "",
            &rdmnet_scopes(),
            SLP_DEFAULT_LANGUAGE,
        )
    }
}

/// Multicast twin of the missing-service-type test.
struct MissingServiceTypeMulticast;

impl TestCase for MissingServiceTypeMulticast {
    fn name(&self) -> &'static str {
        "missing_service_type_multicast"
    }
    fn destination(&self) -> Destination {
        Destination::Multicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Timeout
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        build_service_request(
            ctx.xid,
            true,
            &PrList::new(),
            "",
            &rdmnet_scopes(),
            SLP_DEFAULT_LANGUAGE,
        )
    }
}

/// Unicast SrvRqst tagged `fr`; E1.33 SAs only carry `en` data.
struct NonEnglishUnicast;

impl TestCase for NonEnglishUnicast {
    fn name(&self) -> &'static str {
        "non_english_unicast"
    }
    fn destination(&self) -> Destination {
        Destination::Unicast
    }
    fn expectation(&self) -> Expectation {
        Expectation::Error(SLP_FUNCT_SRVRPLY, SLP_LANGUAGE_NOT_SUPPORTED)
    }
    fn build(&self, ctx: &BuildContext) -> Vec<u8> {
        build_service_request(ctx.xid, false, &PrList::new(), "", &rdmnet_scopes(), "fr")
    }
}

/// Register the full SA conformance suite in its canonical order.
pub fn register_default_suite(registry: &mut TestRegistry) {
    registry.register(Box::new(EmptyPacket));
    registry.register(Box::new(SingleByte));
    registry.register(Box::new(SrvRqst));
    registry.register(Box::new(EmptyUnicastSrvRqst));
    registry.register(Box::new(EmptyMulticastSrvRqst));
    registry.register(Box::new(OverflowUnicastSrvRqst));
    registry.register(Box::new(OverflowMulticastSrvRqst));
    registry.register(Box::new(PrListSrvRqst));
    registry.register(Box::new(DefaultScopeUnicast));
    registry.register(Box::new(DefaultScopeMulticast));
    registry.register(Box::new(MissingServiceTypeUnicast));
    registry.register(Box::new(MissingServiceTypeMulticast));
    registry.register(Box::new(NonEnglishUnicast));
}
