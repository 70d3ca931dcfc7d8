//! Free-text option narrowing.

/// Case-insensitive substring filter over option labels.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    query: String,
    query_lower: String,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Stores the query. The caller reapplies it to the registry afterwards.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.query_lower = self.query.to_lowercase();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.query_lower.clear();
    }

    /// Whether filtering is currently narrowing anything.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// An empty query matches everything.
    pub fn matches(&self, label: &str) -> bool {
        if self.query_lower.is_empty() {
            return true;
        }
        label.to_lowercase().contains(&self.query_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::FilterEngine;

    #[test]
    fn empty_query_matches_everything() {
        let filter = FilterEngine::new();
        assert!(!filter.is_active());
        assert!(filter.matches("anything"));
        assert!(filter.matches(""));
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let mut filter = FilterEngine::new();
        filter.set_query("EN");
        assert!(filter.is_active());
        assert!(filter.matches("Ten"));
        assert!(filter.matches("eleven"));
        assert!(!filter.matches("Two"));
    }

    #[test]
    fn clear_deactivates() {
        let mut filter = FilterEngine::new();
        filter.set_query("x");
        filter.clear();
        assert!(!filter.is_active());
        assert_eq!(filter.query(), "");
    }
}
