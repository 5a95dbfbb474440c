//! Single-rule predicates over spell records.
//!
//! Every predicate plays one role, its [`PredicateKind`], and a
//! [`crate::FilterSet`] holds at most one predicate per kind. The set of kinds
//! is closed, so predicates are a plain enum rather than trait objects.
//!
//! # Module Structure
//!
//! - `similarity` - edit distance, normalized similarity and fuzzy matching
//! - `matcher` - cached case-folded search text
//! - `description` - exact/fuzzy description predicate
//! - `identifier` - spell id predicate

mod description;
mod identifier;
mod matcher;
pub mod similarity;

use crate::catalog::{CastMethod, EffectType, SpellRecord, TargetMechanicFlags, TargetMechanicType};
use std::fmt;

pub use description::DescriptionPredicate;
pub use identifier::IdentifierPredicate;
pub use matcher::CachedText;

/// The role a predicate plays in a filter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PredicateKind {
    Description,
    Identifier,
    CastMethod,
    TargetMechanicType,
    TargetMechanicFlags,
    EffectType,
}

impl PredicateKind {
    pub const ALL: [PredicateKind; 6] = [
        PredicateKind::Description,
        PredicateKind::Identifier,
        PredicateKind::CastMethod,
        PredicateKind::TargetMechanicType,
        PredicateKind::TargetMechanicFlags,
        PredicateKind::EffectType,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PredicateKind::Description => "description",
            PredicateKind::Identifier => "identifier",
            PredicateKind::CastMethod => "cast-method",
            PredicateKind::TargetMechanicType => "target-mechanic-type",
            PredicateKind::TargetMechanicFlags => "target-mechanic-flags",
            PredicateKind::EffectType => "effect-type",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single matching rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Description(DescriptionPredicate),
    Identifier(IdentifierPredicate),
    /// Cast method equality
    CastMethod(CastMethod),
    /// Target mechanic type equality
    TargetMechanicType(TargetMechanicType),
    /// Target mechanic flags equality (whole value, not bitwise)
    TargetMechanicFlags(TargetMechanicFlags),
    /// Effect type equality
    EffectType(EffectType),
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Description(_) => PredicateKind::Description,
            Predicate::Identifier(_) => PredicateKind::Identifier,
            Predicate::CastMethod(_) => PredicateKind::CastMethod,
            Predicate::TargetMechanicType(_) => PredicateKind::TargetMechanicType,
            Predicate::TargetMechanicFlags(_) => PredicateKind::TargetMechanicFlags,
            Predicate::EffectType(_) => PredicateKind::EffectType,
        }
    }

    /// Check whether a record satisfies this predicate. Pure.
    pub fn matches(&self, record: &SpellRecord) -> bool {
        match self {
            Predicate::Description(p) => p.matches(record),
            Predicate::Identifier(p) => p.matches(record),
            Predicate::CastMethod(v) => record.cast_method == *v,
            Predicate::TargetMechanicType(v) => record.target_mechanic_type == *v,
            Predicate::TargetMechanicFlags(v) => record.target_mechanic_flags == *v,
            Predicate::EffectType(v) => record.effect_type == *v,
        }
    }
}

impl From<DescriptionPredicate> for Predicate {
    fn from(p: DescriptionPredicate) -> Self {
        Predicate::Description(p)
    }
}

impl From<IdentifierPredicate> for Predicate {
    fn from(p: IdentifierPredicate) -> Self {
        Predicate::Identifier(p)
    }
}
