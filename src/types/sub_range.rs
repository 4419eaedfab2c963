//! Inclusive numeric ranges, e.g. port ranges.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SUB_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").unwrap());

/// An inclusive range `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubRange {
    pub start: u64,
    pub end: u64,
}

impl SubRange {
    pub fn new(start: u64, end: u64) -> Self {
        SubRange { start, end }
    }

    /// Recognize the wire form `<digits>-<digits>`.
    ///
    /// Anything else, including endpoints too large for a `u64`, is not a
    /// range and yields `None`; callers keep such strings as plain text.
    pub fn from_wire(s: &str) -> Option<Self> {
        let caps = SUB_RANGE.captures(s)?;
        let start = caps[1].parse().ok()?;
        let end = caps[2].parse().ok()?;
        Some(SubRange { start, end })
    }
}
