// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scope sets (RFC 2608 Sec.6.4.1).
//!
//! Scope names are case-insensitive on the wire; tokens are normalized
//! to lowercase at construction so set operations stay plain string
//! comparisons. The harness only ever *builds* scope lists -- enforcing
//! them is the target SA's job, and exactly what the default-scope
//! conformance tests probe.

use std::collections::BTreeSet;

/// Normalized, case-insensitive set of scope names.
///
/// An empty set means the implicit default scope; note that the literal
/// scope name `"default"` is a different thing and serializes as such.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    // BTreeSet keeps serialization order deterministic.
    scopes: BTreeSet<String>,
}

impl ScopeSet {
    /// Build from a single name or a comma-delimited list.
    ///
    /// Empty tokens are dropped, so `""` yields the empty set.
    pub fn new(scope_list: &str) -> Self {
        let scopes = scope_list
            .split(',')
            .map(|token| token.trim().to_ascii_lowercase())
            .filter(|token| !token.is_empty())
            .collect();
        ScopeSet { scopes }
    }

    /// The empty set (implicit default scope).
    pub fn empty() -> Self {
        ScopeSet::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Case-insensitive membership.
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(&scope.to_ascii_lowercase())
    }

    /// Two scope sets match when their token sets intersect.
    pub fn intersects(&self, other: &ScopeSet) -> bool {
        self.scopes.intersection(&other.scopes).next().is_some()
    }

    /// Comma-joined wire form (RFC 2608 scope-list).
    pub fn to_scope_list(&self) -> String {
        let mut joined = String::new();
        for scope in &self.scopes {
            if !joined.is_empty() {
                joined.push(',');
            }
            joined.push_str(scope);
        }
        joined
    }
}

impl std::fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_scope_list())
    }
}
