//! Fixed label catalogs shared by the predictor and the presentation layer.
//!
//! The disease labels are index-aligned with the classes of the trained
//! classifier artifact. Spelling (including typos and the double space in the
//! first label) is part of that contract and must not be "fixed".

use crate::error::{Result, S2dError};

/// Disease labels in classifier class order.
pub const DISEASE_LABELS: [&str; 41] = [
    "(vertigo) Paroymsal  Positional Vertigo",
    "AIDS",
    "Acne",
    "Alcoholic hepatitis",
    "Allergy",
    "Arthritis",
    "Bronchial Asthma",
    "Cervical spondylosis",
    "Chicken pox",
    "Chronic cholestasis",
    "Common Cold",
    "Dengue",
    "Diabetes",
    "Dimorphic hemmorhoids(piles)",
    "Drug Reaction",
    "Fungal infection",
    "GERD",
    "Gastroenteritis",
    "Heart attack",
    "Hepatitis B",
    "Hepatitis C",
    "Hepatitis D",
    "Hepatitis E",
    "Hypertension",
    "Hyperthyroidism",
    "Hypoglycemia",
    "Hypothyroidism",
    "Impetigo",
    "Jaundice",
    "Malaria",
    "Migraine",
    "Osteoarthristis",
    "Paralysis (brain hemorrhage)",
    "Peptic ulcer diseae",
    "Pneumonia",
    "Psoriasis",
    "Tuberculosis",
    "Typhoid",
    "Urinary tract infection",
    "Varicose veins",
    "hepatitis A",
];

/// Common symptoms offered for multi-selection, already sorted.
pub const COMMON_SYMPTOMS: [&str; 18] = [
    "abdominal pain",
    "breathlessness",
    "chest pain",
    "cough",
    "diarrhea",
    "dizziness",
    "fatigue",
    "fever",
    "headache",
    "itching",
    "joint pain",
    "muscle pain",
    "nausea",
    "rash",
    "sore throat",
    "sweating",
    "vomiting",
    "weight loss",
];

/// Looks up a common symptom by 1-based number or case-insensitive name.
pub fn common_symptom(token: &str) -> Option<&'static str> {
    let token = token.trim();
    if let Ok(number) = token.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| COMMON_SYMPTOMS.get(index))
            .copied();
    }
    COMMON_SYMPTOMS
        .iter()
        .copied()
        .find(|symptom| symptom.eq_ignore_ascii_case(token))
}

/// Shown once at startup by every front-end.
pub const DISCLAIMER: &str = "This AI tool provides educational suggestions based on symptoms. \
It is NOT a substitute for professional medical advice.";

/// Ordered list of disease labels, index-aligned with classifier classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseCatalog {
    labels: Vec<String>,
}

impl DiseaseCatalog {
    /// Builds a catalog from an explicit label list.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at a classifier class index.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Verifies that this catalog lines up with a classifier.
    ///
    /// The class count must match exactly. When the classifier artifact also
    /// records class names, every position must carry the same label.
    pub fn verify_alignment(
        &self,
        class_count: usize,
        class_names: Option<&[String]>,
    ) -> Result<()> {
        if class_count != self.labels.len() {
            return Err(S2dError::artifact(format!(
                "Disease catalog has {} labels but the classifier has {} classes",
                self.labels.len(),
                class_count
            )));
        }

        if let Some(names) = class_names {
            if let Some((index, (expected, actual))) = self
                .labels
                .iter()
                .zip(names.iter())
                .enumerate()
                .find(|(_, (expected, actual))| expected != actual)
            {
                return Err(S2dError::artifact(format!(
                    "Class {index} is '{actual}' in the classifier but '{expected}' in the disease catalog"
                )));
            }
        }

        Ok(())
    }
}

impl Default for DiseaseCatalog {
    fn default() -> Self {
        Self::new(DISEASE_LABELS.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_41_labels() {
        let catalog = DiseaseCatalog::default();
        assert_eq!(catalog.len(), 41);
        assert_eq!(catalog.label(1), Some("AIDS"));
        assert_eq!(catalog.label(40), Some("hepatitis A"));
        assert_eq!(catalog.label(41), None);
    }

    #[test]
    fn test_common_symptoms_are_sorted() {
        let mut sorted = COMMON_SYMPTOMS.to_vec();
        sorted.sort();
        assert_eq!(sorted, COMMON_SYMPTOMS.to_vec());
    }

    #[test]
    fn test_common_symptom_by_number_or_name() {
        assert_eq!(common_symptom("1"), Some("abdominal pain"));
        assert_eq!(common_symptom("18"), Some("weight loss"));
        assert_eq!(common_symptom("0"), None);
        assert_eq!(common_symptom("19"), None);
        assert_eq!(common_symptom(" Sore Throat "), Some("sore throat"));
        assert_eq!(common_symptom("sneezing"), None);
    }

    #[test]
    fn test_verify_alignment_accepts_matching_count() {
        let catalog = DiseaseCatalog::default();
        assert!(catalog.verify_alignment(41, None).is_ok());
    }

    #[test]
    fn test_verify_alignment_rejects_count_mismatch() {
        let catalog = DiseaseCatalog::default();
        let err = catalog.verify_alignment(40, None).unwrap_err();
        assert!(err.is_artifact());
        assert!(err.to_string().contains("41 labels"));
    }

    #[test]
    fn test_verify_alignment_rejects_swapped_names() {
        let catalog = DiseaseCatalog::new(vec!["Acne".into(), "AIDS".into()]);
        let names = vec!["AIDS".to_string(), "Acne".to_string()];
        let err = catalog.verify_alignment(2, Some(&names)).unwrap_err();
        assert!(err.to_string().contains("Class 0"));
    }
}
