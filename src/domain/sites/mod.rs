//! Site identity and the capacity table.
//!
//! A site is a seaweed bed with a fixed number of lines (its capacity).
//! The table is the authority for which sites exist; per-row capacity is
//! denormalized into the ledger at append time, so revising a site here
//! only affects rows written afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a harvest site, e.g. `A27` or `34`.
///
/// Normalized to uppercase so chat reports are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    /// Normalizes and validates a site identifier.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SiteError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SiteError::EmptySiteId);
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalized identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by site identity and table operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    #[error("Site identifier cannot be empty")]
    EmptySiteId,

    #[error("Site capacity must be a positive line count, got {0}")]
    InvalidCapacity(u32),

    #[error("Unknown site: {0}")]
    UnknownSite(SiteId),
}

/// Outcome of a capacity-table upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteChange {
    /// The site did not exist before.
    Added,
    /// The site's capacity was revised from the given previous value.
    Revised { previous: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SiteEntry {
    id: SiteId,
    capacity: u32,
}

/// Mapping from site identifier to maximum line count.
///
/// Preserves declaration order, which the forecast schedule uses to order
/// sites with no forecast yet.
#[derive(Debug, Clone, Default)]
pub struct SiteCapacityTable {
    entries: Vec<SiteEntry>,
}

impl SiteCapacityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(site, capacity)` seed pairs, in order.
    pub fn from_seed<I, S>(seed: I) -> Result<Self, SiteError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (raw, capacity) in seed {
            table.upsert(SiteId::new(raw)?, capacity)?;
        }
        Ok(table)
    }

    /// Adds a site or revises its capacity.
    ///
    /// Revision keeps the site's original position in declaration order.
    pub fn upsert(&mut self, id: SiteId, capacity: u32) -> Result<SiteChange, SiteError> {
        if capacity == 0 {
            return Err(SiteError::InvalidCapacity(capacity));
        }
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                let previous = entry.capacity;
                entry.capacity = capacity;
                Ok(SiteChange::Revised { previous })
            }
            None => {
                self.entries.push(SiteEntry { id, capacity });
                Ok(SiteChange::Added)
            }
        }
    }

    /// Looks up a site's capacity.
    pub fn capacity_of(&self, id: &SiteId) -> Option<u32> {
        self.entries.iter().find(|e| e.id == *id).map(|e| e.capacity)
    }

    /// True when the site is declared.
    pub fn contains(&self, id: &SiteId) -> bool {
        self.capacity_of(id).is_some()
    }

    /// Sites in declaration order.
    pub fn declaration_order(&self) -> impl Iterator<Item = &SiteId> {
        self.entries.iter().map(|e| &e.id)
    }

    /// `(site, capacity)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&SiteId, u32)> {
        self.entries.iter().map(|e| (&e.id, e.capacity))
    }

    /// Number of declared sites.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no sites are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_id_normalizes_to_uppercase() {
        let id = SiteId::new(" a27 ").unwrap();
        assert_eq!(id.as_str(), "A27");
        assert_eq!(id, SiteId::new("A27").unwrap());
    }

    #[test]
    fn site_id_rejects_empty() {
        assert_eq!(SiteId::new("   "), Err(SiteError::EmptySiteId));
    }

    #[test]
    fn upsert_adds_then_revises() {
        let mut table = SiteCapacityTable::new();
        let a27 = SiteId::new("A27").unwrap();

        assert_eq!(table.upsert(a27.clone(), 60), Ok(SiteChange::Added));
        assert_eq!(table.capacity_of(&a27), Some(60));

        assert_eq!(
            table.upsert(a27.clone(), 65),
            Ok(SiteChange::Revised { previous: 60 })
        );
        assert_eq!(table.capacity_of(&a27), Some(65));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn upsert_rejects_zero_capacity() {
        let mut table = SiteCapacityTable::new();
        let id = SiteId::new("B3").unwrap();
        assert_eq!(table.upsert(id, 0), Err(SiteError::InvalidCapacity(0)));
    }

    #[test]
    fn declaration_order_is_preserved_across_revision() {
        let mut table = SiteCapacityTable::from_seed([("A27", 60), ("34", 109), ("C11", 80)])
            .unwrap();
        table.upsert(SiteId::new("A27").unwrap(), 70).unwrap();

        let order: Vec<&str> = table.declaration_order().map(SiteId::as_str).collect();
        assert_eq!(order, vec!["A27", "34", "C11"]);
    }

    #[test]
    fn unknown_site_is_absent() {
        let table = SiteCapacityTable::from_seed([("A27", 60)]).unwrap();
        assert!(!table.contains(&SiteId::new("Z9").unwrap()));
    }
}
