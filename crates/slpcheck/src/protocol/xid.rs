// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transaction id allocation.
//!
//! One process-wide counter, reset only at process start. Tests run
//! strictly sequentially with at most one request outstanding, so
//! distinctness across 65536 consecutive calls is all the uniqueness an
//! exchange ever needs; after wraparound values repeat.

use std::sync::atomic::{AtomicU16, Ordering};

static NEXT_XID: AtomicU16 = AtomicU16::new(0);

/// Return a fresh transaction id, wrapping from 65535 back to 0.
pub fn next_xid() -> u16 {
    NEXT_XID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_period_is_pairwise_distinct_then_wraps() {
        // The counter is process-global and other tests may pull from
        // it, so assert on relative behavior: 65536 consecutive draws
        // cover every u16 once, and the 65537th repeats the first.
        let first = next_xid();
        let mut seen = HashSet::with_capacity(65536);
        seen.insert(first);
        for _ in 0..65535 {
            assert!(seen.insert(next_xid()), "xid repeated before wraparound");
        }
        assert_eq!(next_xid(), first);
    }
}
