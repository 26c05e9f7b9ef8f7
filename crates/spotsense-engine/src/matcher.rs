//! Business-type matching strategy.
//!
//! Type labels in the source data are free text, so "matching a type" is a
//! policy decision rather than an equality check. The pipeline takes the
//! rule as a strategy object so substring matching can later be swapped for
//! exact or fuzzy matching without touching scoring.

/// Decides whether a candidate's type label satisfies a type query.
pub trait TypeMatcher: Send + Sync {
    fn matches(&self, query: &str, label: &str) -> bool;
}

/// Case-insensitive substring containment, the behavior the source data was
/// collected under.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl TypeMatcher for SubstringMatcher {
    fn matches(&self, query: &str, label: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        label.to_lowercase().contains(&query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matcher_matches_contained_korean_label() {
        let m = SubstringMatcher;
        assert!(m.matches("카페", "테마 카페"));
        assert!(!m.matches("카페", "편의점"));
    }

    #[test]
    fn substring_matcher_is_case_insensitive() {
        let m = SubstringMatcher;
        assert!(m.matches("cafe", "Book CAFE"));
    }

    #[test]
    fn substring_matcher_rejects_blank_query() {
        let m = SubstringMatcher;
        assert!(!m.matches("   ", "카페"));
    }
}
