// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Harness Configuration - Single Source of Truth
//!
//! This module centralizes the SLP transport constants and the runtime
//! configuration handed to the test runner. **NEVER hardcode elsewhere!**
//!
//! - **Static**: compile-time constants (RFC 2608 port, multicast group)
//! - **Dynamic**: [`TesterConfig`] built from CLI arguments per run

use std::net::Ipv4Addr;
use std::time::Duration;

// =======================================================================
// SLP transport constants (RFC 2608 Sec.6 / IANA)
// =======================================================================

/// Well-known SLP port, shared by unicast and multicast traffic
/// (RFC 2608 Sec.6.1, IANA registered: 427/udp).
pub const SLP_PORT: u16 = 427;

/// Administratively scoped SLP multicast group (RFC 2608 Sec.6.1).
///
/// SrvRqst messages with the MCAST flag are sent here; Service Agents
/// answer with unicast SrvRply to the request's source address.
pub const SLP_MULTICAST_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 253);

/// Largest datagram the harness will receive.
///
/// Exchanges are single-datagram only (no OVERFLOW handling), so an
/// ethernet MTU sized buffer covers every reply we accept.
pub const MAX_DATAGRAM_SIZE: usize = 1500;

/// Default per-test reply deadline in milliseconds.
///
/// CID-540 (E1.33 test plan) allows an SA one second to answer a unicast
/// request; multicast timeout tests reuse the same bound.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default multicast TTL for outgoing requests.
///
/// Conformance runs happen on the local segment; routing SLP further is
/// an operator decision (`--multicast-ttl`).
pub const DEFAULT_MULTICAST_TTL: u32 = 1;

// =======================================================================
// Runtime configuration
// =======================================================================

/// Per-run configuration for the test runner.
///
/// Built once by the operator tool and borrowed by the runner for the
/// duration of one suite execution.
#[derive(Clone, Debug)]
pub struct TesterConfig {
    /// Target Service Agent address (unicast destination, and the address
    /// verify steps expect to find embedded in returned service URLs).
    pub target: Ipv4Addr,
    /// Destination port for both unicast and multicast requests.
    pub port: u16,
    /// Reply deadline applied to every test.
    pub timeout: Duration,
    /// TTL for multicast-class requests.
    pub multicast_ttl: u32,
}

impl TesterConfig {
    /// Config for `target` with RFC defaults (port 427, 1s deadline).
    pub fn new(target: Ipv4Addr) -> Self {
        TesterConfig {
            target,
            port: SLP_PORT,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            multicast_ttl: DEFAULT_MULTICAST_TTL,
        }
    }

    /// Interface override for the multicast group join.
    ///
    /// Reads `SLPCHECK_MULTICAST_IF`; falls back to UNSPECIFIED, which
    /// lets the kernel pick the default multicast route.
    pub fn multicast_interface() -> Ipv4Addr {
        if let Ok(var) = std::env::var("SLPCHECK_MULTICAST_IF") {
            if let Ok(addr) = var.parse::<Ipv4Addr>() {
                log::debug!("[config] Using SLPCHECK_MULTICAST_IF override: {}", addr);
                return addr;
            }
            log::debug!(
                "[config] [!]  Invalid SLPCHECK_MULTICAST_IF='{}' -- falling back to UNSPECIFIED",
                var
            );
        }
        Ipv4Addr::UNSPECIFIED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_rfc2608() {
        let config = TesterConfig::new(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(config.port, 427);
        assert_eq!(config.timeout, Duration::from_millis(1000));
        assert_eq!(config.multicast_ttl, 1);
    }
}
