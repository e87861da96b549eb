// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Service-URL helpers for E1.33 device URLs.
//!
//! RDMnet devices register URLs of the form
//! `service:<type>:<identifier>@<address>`, e.g.
//! `service:rdmnet-device:7a7000000001@192.168.1.50`. The identifier is
//! the device's RDM UID: 12 hex digits, a u16 manufacturer id followed
//! by a u32 device id.

use std::net::Ipv4Addr;

/// An RDM UID embedded in a device service URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceUid {
    pub manufacturer_id: u16,
    pub device_id: u32,
}

impl DeviceUid {
    pub fn new(manufacturer_id: u16, device_id: u32) -> Self {
        DeviceUid {
            manufacturer_id,
            device_id,
        }
    }

    /// Parse the 12-hex-digit wire form, e.g. `7a7000000001`.
    fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 12 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let manufacturer_id = u16::from_str_radix(&s[..4], 16).ok()?;
        let device_id = u32::from_str_radix(&s[4..], 16).ok()?;
        Some(DeviceUid::new(manufacturer_id, device_id))
    }
}

impl std::fmt::Display for DeviceUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}{:08x}", self.manufacturer_id, self.device_id)
    }
}

/// Extract the `service:<type>` part of a service URL.
///
/// Returns `None` when the URL does not start with the `service:`
/// scheme or has no address part after the type.
pub fn service_of_url(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("service:")?;
    let type_len = rest.find(':')?;
    Some(&url[..("service:".len() + type_len)])
}

/// Parse a device URL into its UID and IPv4 address.
///
/// Expects `service:<type>:<uid>@<address>`; anything else yields `None`.
pub fn parse_device_url(url: &str) -> Option<(DeviceUid, Ipv4Addr)> {
    let rest = url.strip_prefix("service:")?;
    let (_, id_at_addr) = rest.split_once(':')?;
    let (id, addr) = id_at_addr.split_once('@')?;
    let uid = DeviceUid::from_hex(id)?;
    let address = addr.parse::<Ipv4Addr>().ok()?;
    Some((uid, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_url() {
        let (uid, addr) =
            parse_device_url("service:rdmnet-device:7a7000000001@192.168.1.50").unwrap();
        assert_eq!(uid, DeviceUid::new(0x7a70, 1));
        assert_eq!(addr, Ipv4Addr::new(192, 168, 1, 50));
        assert_eq!(uid.to_string(), "7a7000000001");
    }

    #[test]
    fn extracts_service_type() {
        assert_eq!(
            service_of_url("service:rdmnet-device:7a7000000001@192.168.1.50"),
            Some("service:rdmnet-device")
        );
        assert_eq!(service_of_url("http://example.com"), None);
        assert_eq!(service_of_url("service:bare"), None);
    }

    #[test]
    fn rejects_malformed_urls() {
        // wrong uid width
        assert!(parse_device_url("service:rdmnet-device:7a70@10.0.0.1").is_none());
        // non-hex uid
        assert!(parse_device_url("service:rdmnet-device:7a70000000zz@10.0.0.1").is_none());
        // missing address
        assert!(parse_device_url("service:rdmnet-device:7a7000000001").is_none());
        // not an IPv4 literal
        assert!(parse_device_url("service:rdmnet-device:7a7000000001@host.local").is_none());
    }
}
