//! Case-insensitive text helpers shared by text predicates.

/// A search string with its lowercase form computed once.
///
/// Predicates are evaluated against every record in the catalog, so the
/// pattern side is folded when the predicate is built rather than per record.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedText {
    /// Text as typed
    pub value: String,
    /// Pre-computed lowercase
    pub lower: String,
}

impl CachedText {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let lower = value.to_lowercase();
        Self { value, lower }
    }

    /// Empty or whitespace-only.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Case-insensitive substring check against `haystack`.
    #[inline]
    pub fn contained_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.lower)
    }
}

impl From<String> for CachedText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CachedText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_text_new() {
        let text = CachedText::new("Fire Blast");
        assert_eq!(text.value, "Fire Blast");
        assert_eq!(text.lower, "fire blast");
    }

    #[test]
    fn test_cached_text_contained_in() {
        let text = CachedText::new("FIRE");

        assert!(text.contained_in("Fire Blast"));
        assert!(text.contained_in("deals fire damage"));
        assert!(!text.contained_in("Ice Lance"));
    }

    #[test]
    fn test_cached_text_is_blank() {
        assert!(CachedText::new("").is_blank());
        assert!(CachedText::new(" \t\n").is_blank());
        assert!(!CachedText::new(" a ").is_blank());
    }

    #[test]
    fn test_cached_text_from_impls() {
        let a: CachedText = "Ice".into();
        let b: CachedText = String::from("Ice").into();
        assert_eq!(a, b);
        assert_eq!(a.lower, "ice");
    }
}
