// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # slpcheck - SLP Service Agent conformance harness
//!
//! A pure Rust conformance test harness for SLP (Service Location Protocol,
//! RFC 2608) Service Agents, built to validate device discovery on
//! RDMnet/E1.33 lighting-control networks.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slpcheck::config::TesterConfig;
//! use slpcheck::suite::{register_default_suite, TestRegistry, TestRunner};
//!
//! fn main() -> Result<(), slpcheck::transport::TransportError> {
//!     let config = TesterConfig::new("192.168.1.50".parse().unwrap());
//!
//!     let mut registry = TestRegistry::new();
//!     register_default_suite(&mut registry);
//!
//!     let mut runner = TestRunner::new(config)?;
//!     let report = runner.run(&registry)?;
//!
//!     for result in report.results() {
//!         println!("{}: {:?}", result.name, result.outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |                        Operator Layer                         |
//! |        slpcheck-sa CLI -> Registry -> Runner -> Report        |
//! +---------------------------------------------------------------+
//! |                        Suite Layer                            |
//! |   TestCase (build/verify) | Expectation | Outcome taxonomy    |
//! +---------------------------------------------------------------+
//! |                       Protocol Layer                          |
//! |   SrvRqst builder | SrvRply parser | ScopeSet | XID | URLs    |
//! +---------------------------------------------------------------+
//! |                      Transport Layer                          |
//! |   UDP unicast | UDP multicast (239.255.255.253) | mio poll    |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`suite`] - Test cases, registry, runner, report (start here)
//! - [`protocol`] - SLP wire codec and value types
//! - [`transport`] - UDP socket ownership for one run
//! - [`config`] - Protocol constants and runtime configuration
//!
//! ## See Also
//!
//! - [RFC 2608](https://www.rfc-editor.org/rfc/rfc2608) - SLPv2
//! - ANSI E1.33 (RDMnet), which mandates SLP for device discovery

pub mod config;
pub mod protocol;
pub mod suite;
pub mod transport;

pub use protocol::parser::{ParseError, ServiceReply};
pub use protocol::scope::ScopeSet;
pub use protocol::url_entry::UrlEntry;
pub use suite::{Outcome, Report, TestCase, TestRegistry, TestResult, TestRunner};
pub use transport::TransportError;
