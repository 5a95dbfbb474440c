//! Search controller: owns the filter set and republishes visible records.

use super::state::{transition, FilterDelta, SearchEvent, SearchMode, SearchState};
use crate::catalog::{
    CastMethod, Catalog, EffectType, SpellRecord, TargetMechanicFlags, TargetMechanicType,
};
use crate::config::SearchConfig;
use crate::filter_set::FilterSet;
use crate::predicate::{DescriptionPredicate, Predicate, PredicateKind};
use std::sync::Arc;
use tracing::{debug, trace};

/// Receives the controller's published output.
///
/// Both methods default to doing nothing so observers implement only what
/// they display.
pub trait SearchObserver {
    /// The visible records changed (called after every applied event).
    fn results_changed(&mut self, _results: &[Arc<SpellRecord>]) {}

    /// The selected record changed.
    fn selection_changed(&mut self, _selected: Option<&SpellRecord>) {}
}

/// Drives a [`FilterSet`] from search panel events.
///
/// Every event runs to completion, including any toggle it switches off,
/// before the setter returns. The whole catalog is re-evaluated after each
/// applied event.
pub struct SearchController {
    catalog: Arc<Catalog>,
    config: SearchConfig,
    state: SearchState,
    filters: FilterSet,
    visible: Vec<Arc<SpellRecord>>,
    selected: Option<u32>,
    observers: Vec<Box<dyn SearchObserver>>,
}

impl SearchController {
    /// Create a controller with no active filters; every record is visible.
    pub fn new(catalog: Arc<Catalog>, config: SearchConfig) -> Self {
        let visible = catalog.records().to_vec();
        Self {
            catalog,
            config,
            state: SearchState::default(),
            filters: FilterSet::new(),
            visible,
            selected: None,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SearchObserver>) {
        self.observers.push(observer);
    }

    pub fn results(&self) -> &[Arc<SpellRecord>] {
        &self.visible
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn mode(&self) -> SearchMode {
        self.state.mode()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_description_text(&mut self, text: impl Into<String>) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetText(text.into()))
    }

    pub fn set_id_search_enabled(&mut self, enabled: bool) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetIdSearch(enabled))
    }

    pub fn set_fuzzy_enabled(&mut self, enabled: bool) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetFuzzy(enabled))
    }

    pub fn set_cast_method(&mut self, value: Option<CastMethod>) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetCastMethod(value))
    }

    pub fn set_target_mechanic_type(
        &mut self,
        value: Option<TargetMechanicType>,
    ) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetTargetMechanicType(value))
    }

    pub fn set_target_mechanic_flags(
        &mut self,
        value: Option<TargetMechanicFlags>,
    ) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetTargetMechanicFlags(value))
    }

    pub fn set_effect_type(&mut self, value: Option<EffectType>) -> &[Arc<SpellRecord>] {
        self.handle(SearchEvent::SetEffectType(value))
    }

    /// Apply one event and return the visible records.
    ///
    /// An event carrying the value already in effect changes nothing and
    /// publishes nothing.
    pub fn handle(&mut self, event: SearchEvent) -> &[Arc<SpellRecord>] {
        let step = transition(&self.state, event.clone(), &self.config.fuzzy);
        if !step.changed {
            trace!("Ignoring unchanged search event {:?}", event);
            return &self.visible;
        }

        for delta in step.deltas {
            self.apply_delta(delta);
        }
        self.state = step.state;
        self.refresh();

        debug!(
            "Search event {:?} applied: mode={:?}, filters={}, visible={}/{}",
            event,
            self.state.mode(),
            self.filters.len(),
            self.visible.len(),
            self.catalog.len()
        );
        &self.visible
    }

    /// Swap in a newly loaded catalog, keeping the current filters.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) -> &[Arc<SpellRecord>] {
        self.catalog = catalog;
        self.refresh();
        debug!(
            "Catalog replaced: visible={}/{}",
            self.visible.len(),
            self.catalog.len()
        );
        &self.visible
    }

    /// Select a record by id, or clear the selection with `None`.
    ///
    /// Ids missing from the catalog resolve to no record.
    pub fn select(&mut self, id: Option<u32>) -> Option<&Arc<SpellRecord>> {
        if id != self.selected {
            self.selected = id;
            let record = id.and_then(|id| self.catalog.get(id));
            debug!("Selected spell {:?} (found: {})", id, record.is_some());
            for observer in &mut self.observers {
                observer.selection_changed(record.map(|r| r.as_ref()));
            }
        }
        self.selected()
    }

    pub fn selected(&self) -> Option<&Arc<SpellRecord>> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    fn apply_delta(&mut self, delta: FilterDelta) {
        trace!("Applying filter delta {:?}", delta);
        match delta {
            FilterDelta::Upsert(predicate) => {
                self.filters.upsert(predicate);
            }
            FilterDelta::Remove(kind) => {
                self.filters.remove(kind);
            }
            FilterDelta::DescriptionText {
                text,
                use_fuzzy,
                threshold,
            } => {
                let predicate = match self.description() {
                    Some(existing) => {
                        let mut updated = existing.clone();
                        updated.set_text(text);
                        updated.set_use_fuzzy(use_fuzzy);
                        updated
                    }
                    None => DescriptionPredicate::new(text, use_fuzzy, threshold),
                };
                self.filters.upsert(predicate.into());
            }
            FilterDelta::DescriptionFuzzy { use_fuzzy, create } => {
                let predicate = match (self.description(), create) {
                    (Some(existing), _) => {
                        let mut updated = existing.clone();
                        updated.set_use_fuzzy(use_fuzzy);
                        updated
                    }
                    (None, Some((text, threshold))) => {
                        DescriptionPredicate::new(text, use_fuzzy, threshold)
                    }
                    (None, None) => return,
                };
                self.filters.upsert(predicate.into());
            }
        }
    }

    fn description(&self) -> Option<&DescriptionPredicate> {
        match self.filters.get(PredicateKind::Description) {
            Some(Predicate::Description(p)) => Some(p),
            _ => None,
        }
    }

    fn refresh(&mut self) {
        self.visible = self.filters.apply(self.catalog.records());
        for observer in &mut self.observers {
            observer.results_changed(&self.visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FuzzyThresholds;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_records(vec![
                SpellRecord::new(1, Some("Fireball"))
                    .with_cast_method(CastMethod(1))
                    .with_effect_type(EffectType(10)),
                SpellRecord::new(2, Some("Ice Lance"))
                    .with_cast_method(CastMethod(2))
                    .with_effect_type(EffectType(10)),
                SpellRecord::new(3, Some("Frot Bolt"))
                    .with_cast_method(CastMethod(1))
                    .with_effect_type(EffectType(20)),
                SpellRecord::new(4, None).with_cast_method(CastMethod(2)),
            ])
            .unwrap(),
        )
    }

    fn controller() -> SearchController {
        SearchController::new(catalog(), SearchConfig::default())
    }

    fn ids(records: &[Arc<SpellRecord>]) -> Vec<u32> {
        records.iter().map(|r| r.id).collect()
    }

    fn description_predicate(c: &SearchController) -> Option<DescriptionPredicate> {
        c.description().cloned()
    }

    #[derive(Default)]
    struct Recorded {
        results: Vec<Vec<u32>>,
        selections: Vec<Option<u32>>,
    }

    struct Recorder(Rc<RefCell<Recorded>>);

    impl SearchObserver for Recorder {
        fn results_changed(&mut self, results: &[Arc<SpellRecord>]) {
            self.0.borrow_mut().results.push(ids(results));
        }

        fn selection_changed(&mut self, selected: Option<&SpellRecord>) {
            self.0.borrow_mut().selections.push(selected.map(|r| r.id));
        }
    }

    #[test]
    fn test_initially_everything_visible() {
        let c = controller();
        assert_eq!(ids(c.results()), vec![1, 2, 3, 4]);
        assert_eq!(c.mode(), SearchMode::None);
        assert!(c.filters().is_empty());
    }

    #[test]
    fn test_exact_description_search() {
        let mut c = controller();
        assert_eq!(ids(c.set_description_text("fire")), vec![1]);
        assert_eq!(c.mode(), SearchMode::DescriptionExact);
    }

    #[test]
    fn test_text_created_predicate_uses_text_threshold() {
        let mut c = controller();
        c.set_description_text("frost");
        let predicate = description_predicate(&c).unwrap();
        assert_eq!(predicate.threshold(), 0.4);
        assert!(!predicate.use_fuzzy());

        // Fuzzy toggle keeps the existing predicate and its threshold
        assert_eq!(ids(c.set_fuzzy_enabled(true)), vec![3]);
        let predicate = description_predicate(&c).unwrap();
        assert_eq!(predicate.threshold(), 0.4);
        assert!(predicate.use_fuzzy());
    }

    #[test]
    fn test_toggle_created_predicate_uses_toggle_threshold() {
        let mut c = controller();
        c.set_id_search_enabled(true);
        c.set_description_text("frost");
        assert!(description_predicate(&c).is_none());

        // Switching to fuzzy leaves ID mode and builds the description filter
        let visible = ids(c.set_fuzzy_enabled(true));
        assert!(!c.state().id_search_enabled);
        let predicate = description_predicate(&c).unwrap();
        assert_eq!(predicate.threshold(), 0.7);
        assert!(predicate.use_fuzzy());
        // similarity("frot bolt", "frost") is 4/9, below 0.7
        assert!(visible.is_empty());

        // Later text changes keep the 0.7 threshold
        c.set_description_text("frot");
        assert_eq!(description_predicate(&c).unwrap().threshold(), 0.7);
        assert_eq!(ids(c.results()), vec![3]);
    }

    #[test]
    fn test_disable_fuzzy_keeps_text() {
        let mut c = controller();
        c.set_fuzzy_enabled(true);
        assert_eq!(ids(c.set_description_text("frost")), vec![3]);
        assert_eq!(ids(c.set_fuzzy_enabled(false)), Vec::<u32>::new());
        assert_eq!(description_predicate(&c).unwrap().text(), "frost");
    }

    #[test]
    fn test_id_search() {
        let mut c = controller();
        c.set_id_search_enabled(true);
        assert_eq!(ids(c.set_description_text("2")), vec![2]);
        assert_eq!(c.mode(), SearchMode::IdExact);
        assert_eq!(ids(c.set_description_text("2x")), vec![1, 2, 3, 4]);
        assert!(!c.filters().contains(PredicateKind::Identifier));
    }

    #[test]
    fn test_enabling_id_search_rederives_from_text() {
        let mut c = controller();
        c.set_description_text("3");
        // "3" is not in any description
        assert!(c.results().is_empty());

        assert_eq!(ids(c.set_id_search_enabled(true)), vec![3]);
        assert!(!c.filters().contains(PredicateKind::Description));

        assert_eq!(ids(c.set_id_search_enabled(false)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_enabling_id_search_from_fuzzy() {
        let mut c = controller();
        c.set_fuzzy_enabled(true);
        c.set_description_text("fire");

        assert_eq!(ids(c.set_id_search_enabled(true)), vec![1, 2, 3, 4]);
        assert!(!c.state().fuzzy_enabled);
        assert!(c.filters().is_empty());
    }

    #[test]
    fn test_clearing_text_keeps_categorical_filters() {
        let mut c = controller();
        c.set_cast_method(Some(CastMethod(1)));
        assert_eq!(ids(c.set_description_text("ball")), vec![1]);
        assert_eq!(ids(c.set_description_text("")), vec![1, 3]);

        c.set_id_search_enabled(true);
        c.set_description_text("2");
        assert!(c.results().is_empty());
        assert_eq!(ids(c.set_description_text("  ")), vec![1, 3]);
    }

    #[test]
    fn test_categorical_filters_combine() {
        let mut c = controller();
        assert_eq!(ids(c.set_effect_type(Some(EffectType(10)))), vec![1, 2]);
        assert_eq!(ids(c.set_cast_method(Some(CastMethod(2)))), vec![2]);
        assert_eq!(ids(c.set_effect_type(None)), vec![2, 4]);
        assert_eq!(
            ids(c.set_target_mechanic_type(Some(TargetMechanicType(0)))),
            vec![2, 4]
        );
        assert!(c
            .set_target_mechanic_flags(Some(TargetMechanicFlags(1)))
            .is_empty());
    }

    #[test]
    fn test_unchanged_event_publishes_nothing() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut c = controller();
        c.subscribe(Box::new(Recorder(recorded.clone())));

        c.set_description_text("fire");
        c.set_description_text("fire");
        c.set_fuzzy_enabled(false);
        c.set_cast_method(None);

        assert_eq!(recorded.borrow().results, vec![vec![1]]);
    }

    #[test]
    fn test_observers_receive_results_and_selection() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let mut c = controller();
        c.subscribe(Box::new(Recorder(recorded.clone())));

        c.set_description_text("i");
        assert_eq!(c.select(Some(2)).map(|r| r.id), Some(2));
        assert_eq!(c.select(Some(99)).map(|r| r.id), None);
        c.select(None);

        let recorded = recorded.borrow();
        assert_eq!(recorded.results, vec![vec![1, 2]]);
        assert_eq!(recorded.selections, vec![Some(2), None, None]);
    }

    #[test]
    fn test_replace_catalog_reapplies_filters() {
        let mut c = controller();
        c.set_description_text("lance");

        let reloaded = Arc::new(
            Catalog::from_records(vec![
                SpellRecord::new(10, Some("Lance of Light")),
                SpellRecord::new(11, Some("Shield")),
            ])
            .unwrap(),
        );
        assert_eq!(ids(c.replace_catalog(reloaded)), vec![10]);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = SearchConfig {
            fuzzy: FuzzyThresholds {
                toggle_threshold: 0.7,
                text_threshold: 0.5,
            },
        };
        let mut c = SearchController::new(catalog(), config);
        c.set_fuzzy_enabled(true);
        // 4/9 is below 0.5
        assert!(c.set_description_text("frost").is_empty());
    }

    #[test]
    #[traced_test]
    fn test_logs_applied_events() {
        let mut c = controller();
        c.set_id_search_enabled(true);
        c.set_description_text("2");

        assert!(logs_contain("mode=IdExact"));
        assert!(logs_contain("visible=1/4"));
    }
}
