//! Description text predicate (exact substring or fuzzy).

use super::matcher::CachedText;
use super::similarity::is_fuzzy_match;
use crate::catalog::SpellRecord;
use crate::config::DEFAULT_TOGGLE_THRESHOLD;

/// Matches spells whose description contains, or approximately contains, a
/// search text.
///
/// A blank search text places no constraint. A spell without a description
/// never matches a non-blank search text.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionPredicate {
    text: CachedText,
    use_fuzzy: bool,
    threshold: f64,
}

impl DescriptionPredicate {
    pub fn new(text: impl Into<String>, use_fuzzy: bool, threshold: f64) -> Self {
        Self {
            text: CachedText::new(text),
            use_fuzzy,
            threshold,
        }
    }

    /// Case-insensitive substring predicate.
    pub fn exact(text: impl Into<String>) -> Self {
        Self::new(text, false, DEFAULT_TOGGLE_THRESHOLD)
    }

    /// Fuzzy predicate with the given similarity cutoff.
    pub fn fuzzy(text: impl Into<String>, threshold: f64) -> Self {
        Self::new(text, true, threshold)
    }

    pub fn text(&self) -> &str {
        &self.text.value
    }

    pub fn use_fuzzy(&self) -> bool {
        self.use_fuzzy
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = CachedText::new(text);
    }

    pub fn set_use_fuzzy(&mut self, use_fuzzy: bool) {
        self.use_fuzzy = use_fuzzy;
    }

    pub fn matches(&self, record: &SpellRecord) -> bool {
        if self.text.is_blank() {
            return true;
        }

        let Some(description) = record.description.as_deref() else {
            return false;
        };

        if self.use_fuzzy {
            is_fuzzy_match(description, &self.text.value, self.threshold)
        } else {
            self.text.contained_in(description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(description: Option<&str>) -> SpellRecord {
        SpellRecord::new(1, description)
    }

    #[test]
    fn test_blank_text_matches_everything() {
        let predicate = DescriptionPredicate::exact("   ");
        assert!(predicate.matches(&spell(Some("Fire Blast"))));
        assert!(predicate.matches(&spell(None)));

        let fuzzy = DescriptionPredicate::fuzzy("", 1.0);
        assert!(fuzzy.matches(&spell(None)));
    }

    #[test]
    fn test_missing_description_never_matches() {
        assert!(!DescriptionPredicate::exact("fire").matches(&spell(None)));
        assert!(!DescriptionPredicate::fuzzy("fire", 0.0).matches(&spell(None)));
    }

    #[test]
    fn test_exact_is_case_insensitive_substring() {
        let predicate = DescriptionPredicate::exact("fire");

        assert!(predicate.matches(&spell(Some("Fire Blast"))));
        assert!(predicate.matches(&spell(Some("Summons a FIREBALL"))));
        assert!(!predicate.matches(&spell(Some("Ice Lance"))));
    }

    #[test]
    fn test_exact_does_not_fuzz() {
        let predicate = DescriptionPredicate::exact("frost");
        assert!(!predicate.matches(&spell(Some("Frot Bolt"))));
    }

    #[test]
    fn test_fuzzy_uses_threshold() {
        let loose = DescriptionPredicate::fuzzy("frost", 0.4);
        assert!(loose.matches(&spell(Some("Frot Bolt"))));
        assert!(!loose.matches(&spell(Some("Ice Lance"))));

        let strict = DescriptionPredicate::fuzzy("frost", 0.7);
        assert!(!strict.matches(&spell(Some("Frot Bolt"))));
    }

    #[test]
    fn test_setters() {
        let mut predicate = DescriptionPredicate::new("ice", false, 0.4);
        predicate.set_text("Frost");
        predicate.set_use_fuzzy(true);

        assert_eq!(predicate.text(), "Frost");
        assert!(predicate.use_fuzzy());
        assert_eq!(predicate.threshold(), 0.4);
        assert!(predicate.matches(&spell(Some("Frot Bolt"))));
    }
}
