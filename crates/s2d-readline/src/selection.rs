//! Multi-select state over the common symptom list.

use s2d_core::catalog::common_symptom;

/// Chosen common symptoms, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomSelection {
    chosen: Vec<&'static str>,
}

impl SymptomSelection {
    pub fn chosen(&self) -> &[&'static str] {
        &self.chosen
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.chosen.iter().any(|chosen| *chosen == symptom)
    }

    /// Adds symptoms, ignoring ones already chosen. Returns unrecognized tokens.
    pub fn select<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<String> {
        let mut unknown = Vec::new();
        for token in tokens {
            match common_symptom(token.as_ref()) {
                Some(symptom) if !self.contains(symptom) => self.chosen.push(symptom),
                Some(_) => {}
                None => unknown.push(token.as_ref().to_string()),
            }
        }
        unknown
    }

    /// Removes symptoms. Returns unrecognized tokens.
    pub fn unselect<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<String> {
        let mut unknown = Vec::new();
        for token in tokens {
            match common_symptom(token.as_ref()) {
                Some(symptom) => self.chosen.retain(|chosen| *chosen != symptom),
                None => unknown.push(token.as_ref().to_string()),
            }
        }
        unknown
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }
}
