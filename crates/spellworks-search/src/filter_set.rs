//! Keyed collection of active predicates.

use crate::catalog::SpellRecord;
use crate::predicate::{Predicate, PredicateKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// At most one predicate per [`PredicateKind`], evaluated as a conjunction.
///
/// A missing kind places no constraint; an empty set accepts every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    active: BTreeMap<PredicateKind, Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a predicate, replacing any predicate of the same kind.
    ///
    /// Returns the replaced predicate.
    pub fn upsert(&mut self, predicate: Predicate) -> Option<Predicate> {
        self.active.insert(predicate.kind(), predicate)
    }

    /// Drop the constraint for `kind`. Removing an absent kind is a no-op.
    pub fn remove(&mut self, kind: PredicateKind) -> Option<Predicate> {
        self.active.remove(&kind)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn get(&self, kind: PredicateKind) -> Option<&Predicate> {
        self.active.get(&kind)
    }

    pub fn contains(&self, kind: PredicateKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Kinds with an active predicate, in a stable order.
    pub fn kinds(&self) -> impl Iterator<Item = PredicateKind> + '_ {
        self.active.keys().copied()
    }

    /// Whether every active predicate accepts `record`.
    pub fn matches(&self, record: &SpellRecord) -> bool {
        self.active.values().all(|p| p.matches(record))
    }

    /// Lazily yield matching records in input order.
    pub fn iter_matching<'a, I>(&'a self, records: I) -> impl Iterator<Item = &'a Arc<SpellRecord>>
    where
        I: IntoIterator<Item = &'a Arc<SpellRecord>>,
        I::IntoIter: 'a,
    {
        records.into_iter().filter(move |r| self.matches(r))
    }

    /// Collect every matching record, preserving input order.
    pub fn apply(&self, records: &[Arc<SpellRecord>]) -> Vec<Arc<SpellRecord>> {
        if self.active.is_empty() {
            return records.to_vec();
        }
        self.iter_matching(records).cloned().collect()
    }
}
