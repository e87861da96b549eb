// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SLP protocol constants (RFC 2608 Sec.7 / Sec.8)
//!
//! Centralizes all SLP function ids, flag bits, error codes, and header
//! sizing to avoid duplication across builder, parser, and test cases.

/// SLP protocol version carried in every header (RFC 2608 Sec.8.1).
pub const SLP_VERSION: u8 = 2;

// ============================================================================
// FUNCTION IDs (RFC 2608 Sec.8.1)
// ============================================================================

/// Service Request (SrvRqst)
pub const SLP_FUNCT_SRVRQST: u8 = 1;
/// Service Reply (SrvRply)
pub const SLP_FUNCT_SRVRPLY: u8 = 2;
/// Service Registration (SrvReg)
pub const SLP_FUNCT_SRVREG: u8 = 3;
/// Service Deregister (SrvDeReg)
pub const SLP_FUNCT_SRVDEREG: u8 = 4;
/// Service Acknowledge (SrvAck)
pub const SLP_FUNCT_SRVACK: u8 = 5;
/// Attribute Request (AttrRqst)
pub const SLP_FUNCT_ATTRRQST: u8 = 6;
/// Attribute Reply (AttrRply)
pub const SLP_FUNCT_ATTRRPLY: u8 = 7;
/// DA Advertisement (DAAdvert)
pub const SLP_FUNCT_DAADVERT: u8 = 8;
/// Service Type Request (SrvTypeRqst)
pub const SLP_FUNCT_SRVTYPERQST: u8 = 9;
/// Service Type Reply (SrvTypeRply)
pub const SLP_FUNCT_SRVTYPERPLY: u8 = 10;
/// SA Advertisement (SAAdvert)
pub const SLP_FUNCT_SAADVERT: u8 = 11;

// ============================================================================
// HEADER FLAGS (RFC 2608 Sec.8.1)
// ============================================================================
// The flags field is 16 bits; only the top three are assigned, the rest
// are reserved and must be 0.

/// Set when a message exceeds the datagram MTU (not handled here).
pub const SLP_FLAG_OVERFLOW: u16 = 0x8000;
/// Set on SrvReg for fresh registrations (SA/DA traffic, not built here).
pub const SLP_FLAG_FRESH: u16 = 0x4000;
/// Set exactly when the request is sent to a multicast address.
pub const SLP_FLAG_MCAST: u16 = 0x2000;

// ============================================================================
// ERROR CODES (RFC 2608 Sec.7, carried in SrvRply)
// ============================================================================

/// No error.
pub const SLP_OK: u16 = 0;
/// No data in the requested language; request was otherwise valid.
pub const SLP_LANGUAGE_NOT_SUPPORTED: u16 = 1;
/// The message failed to parse, or a required field was absent.
pub const SLP_PARSE_ERROR: u16 = 2;
/// SrvReg had problems (zero lifetime, omitted language tag, ...).
pub const SLP_INVALID_REGISTRATION: u16 = 3;
/// Request scope list unsupported by the responder.
pub const SLP_SCOPE_NOT_SUPPORTED: u16 = 4;
/// Unknown SLP SPI in the request.
pub const SLP_AUTHENTICATION_UNKNOWN: u16 = 5;
/// URL signature missing where the SPI demanded one.
pub const SLP_AUTHENTICATION_ABSENT: u16 = 6;
/// URL signature failed verification.
pub const SLP_AUTHENTICATION_FAILED: u16 = 7;
/// Unsupported SLP version in the request header.
pub const SLP_VER_NOT_SUPPORTED: u16 = 9;
/// DA or SA internal error.
pub const SLP_INTERNAL_ERROR: u16 = 10;
/// DA busy, request should be retried.
pub const SLP_DA_BUSY_NOW: u16 = 11;
/// Mandatory extension in the request was not understood.
pub const SLP_OPTION_NOT_UNDERSTOOD: u16 = 12;
/// Update for a nonexistent registration.
pub const SLP_INVALID_UPDATE: u16 = 13;
/// Message type known but unsupported (SA ignoring AttrRqst, ...).
pub const SLP_MSG_NOT_SUPPORTED: u16 = 14;
/// DA refused a refresh interval.
pub const SLP_REFRESH_REJECTED: u16 = 15;

// ============================================================================
// SIZING
// ============================================================================

/// Header bytes preceding the language tag:
/// version(1) + function(1) + length(3) + flags(2) + ext offset(3) + xid(2)
/// + lang tag length(2).
pub const SLP_HEADER_FIXED_SIZE: usize = 14;

/// Byte offset of the function id within the header.
pub const SLP_FUNCTION_OFFSET: usize = 1;

/// Byte offset of the transaction id within the header.
pub const SLP_XID_OFFSET: usize = 10;

/// Default language tag for requests (RFC 2608 Sec.6.2 mandates a tag;
/// the E1.33 test plan uses English).
pub const SLP_DEFAULT_LANGUAGE: &str = "en";

/// Total header size for a given language tag.
pub const fn slp_header_size(language_len: usize) -> usize {
    SLP_HEADER_FIXED_SIZE + language_len
}
