//! Spell identifier predicate.

use crate::catalog::SpellRecord;

/// Exact match on the spell id.
///
/// A disabled predicate rejects every record. The controller removes the
/// identifier predicate instead of disabling it, so this only matters to
/// callers building filter sets by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierPredicate {
    pub id: i64,
    pub enabled: bool,
}

impl IdentifierPredicate {
    pub fn new(id: i64) -> Self {
        Self { id, enabled: true }
    }

    pub fn disabled(id: i64) -> Self {
        Self { id, enabled: false }
    }

    /// Parse typed text as an identifier, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything that is not an integer.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<i64>().ok().map(Self::new)
    }

    pub fn matches(&self, record: &SpellRecord) -> bool {
        self.enabled && i64::from(record.id) == self.id
    }
}
