// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! UDP transport for the conformance runner.
//!
//! One [`udp::Transport`] per run: a unicast socket aimed at the
//! configured target and a socket joined to the SLP multicast group.
//! Both are exclusively owned by the runner and released (closed, group
//! left) when the run ends. Any socket-level failure here is fatal to
//! the whole run -- without a working transport no test can produce a
//! meaningful result.

pub mod udp;

pub use udp::{Transport, TransportError};
