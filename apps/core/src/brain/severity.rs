//! Severity scoring for symptom reports.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::vocabulary::Vocabulary;

/// Symptom intensity on a 1..=3 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild = 1,
    Moderate = 2,
    Severe = 3,
}

impl Severity {
    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(Severity::Mild),
            2 => Some(Severity::Moderate),
            3 => Some(Severity::Severe),
            _ => None,
        }
    }

    pub fn score(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }

    /// Card display form, e.g. `Mild (1/3)`
    pub fn display(&self) -> String {
        format!("{} ({}/3)", self.label(), self.score())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scores severity from an ordered phrase list.
///
/// Phrases are checked in declaration order and the first one present anywhere in
/// the text wins, so "mild but a lot" is Mild. Text without any phrase is Moderate.
pub struct SeverityScorer {
    phrases: Vec<(String, Severity)>,
}

impl SeverityScorer {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        let phrases = vocabulary
            .severity_phrases
            .iter()
            .filter_map(|p| Severity::from_score(p.score).map(|s| (p.phrase.to_lowercase(), s)))
            .collect();
        Self { phrases }
    }

    pub fn score(&self, text: &str) -> Severity {
        let lower = text.to_lowercase();
        self.phrases
            .iter()
            .find(|(phrase, _)| lower.contains(phrase.as_str()))
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::Moderate)
    }
}
