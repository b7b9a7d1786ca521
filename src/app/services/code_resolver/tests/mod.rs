//! Tests for BODC code resolution
//!
//! Shared helpers for driving `resolve()` without a full record context.

use std::collections::HashSet;


/// Empty excluded-code set
pub fn no_codes() -> HashSet<String> {
    HashSet::new()
}

/// Excluded-code set from a list of literals
pub fn codes(values: &[&str]) -> HashSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}
