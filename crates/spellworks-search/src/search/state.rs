//! Search panel state and its transition function.
//!
//! `transition` is pure: it takes the current state and one event and returns
//! the next state together with the filter changes that event implies. The
//! controller applies those changes in one step, so a toggle that switches off
//! its counterpart never re-enters another handler.

use crate::catalog::{CastMethod, EffectType, TargetMechanicFlags, TargetMechanicType};
use crate::config::FuzzyThresholds;
use crate::predicate::{IdentifierPredicate, Predicate, PredicateKind};

/// How the search text is currently interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Blank text: no text-derived constraint
    None,
    IdExact,
    DescriptionExact,
    DescriptionFuzzy,
}

/// Toggles, text and categorical selections of the search panel.
///
/// `id_search_enabled` and `fuzzy_enabled` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub id_search_enabled: bool,
    pub fuzzy_enabled: bool,
    pub text: String,
    pub cast_method: Option<CastMethod>,
    pub target_mechanic_type: Option<TargetMechanicType>,
    pub target_mechanic_flags: Option<TargetMechanicFlags>,
    pub effect_type: Option<EffectType>,
}

impl SearchState {
    pub fn mode(&self) -> SearchMode {
        if self.text.trim().is_empty() {
            SearchMode::None
        } else if self.id_search_enabled {
            SearchMode::IdExact
        } else if self.fuzzy_enabled {
            SearchMode::DescriptionFuzzy
        } else {
            SearchMode::DescriptionExact
        }
    }
}

/// A single user-facing change to the search panel.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    SetIdSearch(bool),
    SetFuzzy(bool),
    SetText(String),
    SetCastMethod(Option<CastMethod>),
    SetTargetMechanicType(Option<TargetMechanicType>),
    SetTargetMechanicFlags(Option<TargetMechanicFlags>),
    SetEffectType(Option<EffectType>),
}

/// A change to apply to the filter set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDelta {
    Upsert(Predicate),
    Remove(PredicateKind),
    /// Set the description text and fuzzy flag, creating the predicate with
    /// `threshold` if none is active.
    DescriptionText {
        text: String,
        use_fuzzy: bool,
        threshold: f64,
    },
    /// Set the fuzzy flag on the active description predicate. When none is
    /// active and `create` is given, create one from that text and threshold.
    DescriptionFuzzy {
        use_fuzzy: bool,
        create: Option<(String, f64)>,
    },
}

/// Outcome of one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SearchState,
    pub deltas: Vec<FilterDelta>,
    /// False when the event carried the value already in effect.
    pub changed: bool,
}

impl Transition {
    fn unchanged(state: &SearchState) -> Self {
        Self {
            state: state.clone(),
            deltas: Vec::new(),
            changed: false,
        }
    }

    fn to(state: SearchState, deltas: Vec<FilterDelta>) -> Self {
        Self {
            state,
            deltas,
            changed: true,
        }
    }
}

/// Compute the next state and filter changes for `event`.
pub fn transition(
    current: &SearchState,
    event: SearchEvent,
    thresholds: &FuzzyThresholds,
) -> Transition {
    let mut next = current.clone();

    match event {
        SearchEvent::SetIdSearch(enabled) => {
            if enabled == current.id_search_enabled {
                return Transition::unchanged(current);
            }
            next.id_search_enabled = enabled;

            if !enabled {
                return Transition::to(next, vec![FilterDelta::Remove(PredicateKind::Identifier)]);
            }

            let mut deltas = Vec::new();
            if current.fuzzy_enabled {
                next.fuzzy_enabled = false;
                deltas.push(FilterDelta::Remove(PredicateKind::Description));
            }
            deltas.extend(identifier_deltas(&current.text));
            Transition::to(next, deltas)
        }

        SearchEvent::SetFuzzy(enabled) => {
            if enabled == current.fuzzy_enabled {
                return Transition::unchanged(current);
            }
            next.fuzzy_enabled = enabled;

            if !enabled {
                return Transition::to(
                    next,
                    vec![FilterDelta::DescriptionFuzzy {
                        use_fuzzy: false,
                        create: None,
                    }],
                );
            }

            let mut deltas = Vec::new();
            if current.id_search_enabled {
                next.id_search_enabled = false;
                deltas.push(FilterDelta::Remove(PredicateKind::Identifier));
                deltas.push(FilterDelta::Remove(PredicateKind::Description));
            }
            let create = (!current.text.trim().is_empty())
                .then(|| (current.text.clone(), thresholds.toggle_threshold));
            deltas.push(FilterDelta::DescriptionFuzzy {
                use_fuzzy: true,
                create,
            });
            Transition::to(next, deltas)
        }

        SearchEvent::SetText(text) => {
            if text == current.text {
                return Transition::unchanged(current);
            }

            let deltas = if text.trim().is_empty() {
                vec![
                    FilterDelta::Remove(PredicateKind::Description),
                    FilterDelta::Remove(PredicateKind::Identifier),
                ]
            } else if current.id_search_enabled {
                identifier_deltas(&text)
            } else {
                vec![FilterDelta::DescriptionText {
                    text: text.clone(),
                    use_fuzzy: current.fuzzy_enabled,
                    threshold: thresholds.text_threshold,
                }]
            };

            next.text = text;
            Transition::to(next, deltas)
        }

        SearchEvent::SetCastMethod(value) => {
            if value == current.cast_method {
                return Transition::unchanged(current);
            }
            next.cast_method = value;
            let delta =
                categorical_delta(value.map(Predicate::CastMethod), PredicateKind::CastMethod);
            Transition::to(next, vec![delta])
        }

        SearchEvent::SetTargetMechanicType(value) => {
            if value == current.target_mechanic_type {
                return Transition::unchanged(current);
            }
            next.target_mechanic_type = value;
            let delta = categorical_delta(
                value.map(Predicate::TargetMechanicType),
                PredicateKind::TargetMechanicType,
            );
            Transition::to(next, vec![delta])
        }

        SearchEvent::SetTargetMechanicFlags(value) => {
            if value == current.target_mechanic_flags {
                return Transition::unchanged(current);
            }
            next.target_mechanic_flags = value;
            let delta = categorical_delta(
                value.map(Predicate::TargetMechanicFlags),
                PredicateKind::TargetMechanicFlags,
            );
            Transition::to(next, vec![delta])
        }

        SearchEvent::SetEffectType(value) => {
            if value == current.effect_type {
                return Transition::unchanged(current);
            }
            next.effect_type = value;
            let delta =
                categorical_delta(value.map(Predicate::EffectType), PredicateKind::EffectType);
            Transition::to(next, vec![delta])
        }
    }
}

/// Identifier constraint derived from typed text.
///
/// A parsed id replaces any description constraint; anything else just drops
/// the identifier constraint.
fn identifier_deltas(text: &str) -> Vec<FilterDelta> {
    match IdentifierPredicate::parse(text) {
        Some(predicate) => vec![
            FilterDelta::Remove(PredicateKind::Description),
            FilterDelta::Upsert(predicate.into()),
        ],
        None => vec![FilterDelta::Remove(PredicateKind::Identifier)],
    }
}

fn categorical_delta(predicate: Option<Predicate>, kind: PredicateKind) -> FilterDelta {
    match predicate {
        Some(p) => FilterDelta::Upsert(p),
        None => FilterDelta::Remove(kind),
    }
}
