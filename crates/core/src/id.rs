//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a sample pack.
///
/// Assigned by the catalog store from a monotonically increasing counter that
/// starts at 1. Zero is never a valid id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(u64);

impl PackId {
    /// The first id handed out by a fresh store.
    pub const FIRST: PackId = PackId(1);

    /// Wrap a raw id. Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for PackId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<PackId> for u64 {
    fn from(value: PackId) -> Self {
        value.0
    }
}

impl FromStr for PackId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("PackId: {e}")))?;
        Self::new(raw).ok_or_else(|| DomainError::invalid_id("PackId: must be positive"))
    }
}
