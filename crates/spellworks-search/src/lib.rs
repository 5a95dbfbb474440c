//! SpellWorks search - narrows a spell catalog down to the records a user is
//! looking for.
//!
//! The crate is split along the same lines the search panel is:
//!
//! - `catalog` - the read-only spell records and their categorical attributes
//! - `predicate` - single-rule matchers (description, identifier, categorical)
//!   and the edit-distance scorer behind fuzzy description search
//! - `filter_set` - at most one active predicate per kind, evaluated as a
//!   conjunction over the catalog
//! - `search` - the toggle/text state machine that decides which predicates are
//!   active and republishes the visible records
//! - `config` - fuzzy threshold settings
//!
//! # Example
//!
//! ```no_run
//! use spellworks_search::{Catalog, SearchConfig, SearchController};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::from_file("spells.json").unwrap());
//! let mut search = SearchController::new(catalog, SearchConfig::default());
//!
//! search.set_fuzzy_enabled(true);
//! for spell in search.set_description_text("frost bolt") {
//!     println!("{} {:?}", spell.id, spell.description);
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod filter_set;
pub mod predicate;
pub mod search;

pub use catalog::{
    AttributeOptions, CastMethod, Catalog, CatalogError, EffectType, SpellRecord,
    TargetMechanicFlags, TargetMechanicType,
};
pub use config::{ConfigError, FuzzyThresholds, SearchConfig};
pub use filter_set::FilterSet;
pub use predicate::similarity::{distance, is_fuzzy_match, normalized_similarity};
pub use predicate::{DescriptionPredicate, IdentifierPredicate, Predicate, PredicateKind};
pub use search::{
    transition, FilterDelta, SearchController, SearchEvent, SearchMode, SearchObserver,
    SearchState, Transition,
};
