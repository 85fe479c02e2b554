//! Symptom collection: merges selected and typed symptoms into one query string.

use serde::{Deserialize, Serialize};

const SEPARATOR: &str = ", ";

/// Splits comma-separated text into trimmed, non-empty tokens.
pub fn split_symptoms(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Concatenates the selected symptoms with the typed ones, in that order.
///
/// Selected items are taken as-is; typed text is split on commas and only
/// trimmed, non-empty tokens are kept. No de-duplication happens.
pub fn merge_symptoms<S: AsRef<str>>(selected: &[S], typed: &str) -> String {
    selected
        .iter()
        .map(|s| s.as_ref())
        .chain(split_symptoms(typed))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Normalizes a (translated) symptom string: trims tokens, drops empty ones.
pub fn clean_symptoms(text: &str) -> String {
    split_symptoms(text).collect::<Vec<_>>().join(SEPARATOR)
}

/// A non-empty, merged symptom string ready for translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomQuery(String);

impl SymptomQuery {
    /// Merges the inputs, returning `None` when nothing usable was entered.
    pub fn collect<S: AsRef<str>>(selected: &[S], typed: &str) -> Option<Self> {
        let merged = merge_symptoms(selected, typed);
        if merged.trim().is_empty() {
            None
        } else {
            Some(Self(merged))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SymptomQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_selected_then_typed() {
        let merged = merge_symptoms(&["fever", "cough"], " chills ,, night sweats , ");
        assert_eq!(merged, "fever, cough, chills, night sweats");
    }

    #[test]
    fn test_merge_keeps_duplicates() {
        let merged = merge_symptoms(&["fever"], "fever");
        assert_eq!(merged, "fever, fever");
    }

    #[test]
    fn test_merge_typed_only() {
        let selected: [&str; 0] = [];
        assert_eq!(merge_symptoms(&selected, "headache"), "headache");
    }

    #[test]
    fn test_collect_rejects_empty_input() {
        let selected: [&str; 0] = [];
        assert!(SymptomQuery::collect(&selected, "").is_none());
        assert!(SymptomQuery::collect(&selected, "  , ,  ").is_none());
    }

    #[test]
    fn test_collect_accepts_selection_only() {
        let query = SymptomQuery::collect(&["rash".to_string()], "").unwrap();
        assert_eq!(query.as_str(), "rash");
    }

    #[test]
    fn test_clean_symptoms() {
        assert_eq!(clean_symptoms(" fever ,cough,, "), "fever, cough");
        assert_eq!(clean_symptoms(""), "");
    }
}
