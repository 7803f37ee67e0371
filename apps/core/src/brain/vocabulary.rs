//! Vocabulary - the keyword tables behind classification and extraction.
//!
//! Everything the brain matches against lives here as plain data. The tables are
//! compiled once into the classifier/extractor at construction time, so an alternate
//! vocabulary (for tests, or loaded from JSON) never touches matching logic.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::AppError;

const GREETING_PATTERN: &str = r"^(hi|hello|hey|good morning|good evening|howdy)\b";

const HELP_PATTERN: &str = r"help|what can you|how do i|how does";

const SYMPTOM_PATTERN: &str = r"\b(bloat|gas|gassy|cramp|pain|ache|hurt|stomach|nause|queasy|constipat|diarrh|reflux|heartburn|discomfort|indigest|full|uncomfortable|sick)";

const FOOD_PATTERN: &str = r"\b(ate|eat|eats|eating|breakfast|lunch|dinner|snack|meal|food|drank|drink|calories?|kcal|fiber|fibre|oatmeal|oats|banana|apple|berries|yogurt|eggs?|toast|bread|rice|chicken|salmon|fish|beans|lentils|broccoli|spinach|salad|avocado|pasta|pizza|burger|sandwich|soup|coffee|water|milk|cheese|nuts|quinoa|tofu)\b";

const ACTIVITY_PATTERN: &str = r"\b(walk|walked|walking|run|ran|running|jog|jogged|jogging|yoga|gym|swim|swam|swimming|cycle|cycled|cycling|bike|biked|biking|hike|hiked|hiking|stretch|stretched|stretching|lift|lifted|lifting|cardio|hiit|workout|exercise|exercised|steps?)\b";

const ENERGY_PATTERN: &str = r"\b(energy|energetic|tired|fatigue|fatigued|exhausted|sluggish|lethargic|alert|motivated|refreshed|sleepy|drained)\b";

const HIGH_ENERGY_PATTERN: &str = r"\b(high|great|good|energetic|alert|refresh|motivated)";

const LOW_ENERGY_PATTERN: &str = r"\b(low|tired|fatigue|slug|exhaust|letharg)";

const FOOD_NAMES: &[&str] = &[
    "oatmeal", "oats", "banana", "apple", "berries", "yogurt", "egg", "toast", "bread", "rice",
    "chicken", "salmon", "fish", "beans", "lentils", "broccoli", "spinach", "salad", "avocado",
    "pasta", "pizza", "burger", "sandwich", "soup", "coffee", "water", "milk", "cheese", "nuts",
    "quinoa", "tofu",
];

const ACTIVITY_NAMES: &[&str] = &[
    "walk", "run", "jog", "yoga", "gym", "swim", "cycle", "hike", "stretch", "lift", "cardio",
    "hiit",
];

const SYMPTOM_NAMES: &[&str] = &[
    "bloating",
    "gas",
    "cramping",
    "pain",
    "nausea",
    "constipation",
    "diarrhea",
    "reflux",
    "heartburn",
    "discomfort",
    "indigestion",
    "fullness",
];

/// Declaration order matters: the first phrase found wins, not the first in the text.
const SEVERITY_PHRASES: &[(&str, u8)] = &[
    ("mild", 1),
    ("slight", 1),
    ("a little", 1),
    ("moderate", 2),
    ("bad", 2),
    ("severe", 3),
    ("terrible", 3),
    ("lot", 3),
    ("intense", 3),
];

// "discomfort" and "fullness" have no entry and fall through to the generic tip.
const SYMPTOM_TIPS: &[(&str, &str)] = &[
    ("bloating", "Try peppermint tea and a slow 10-minute walk to ease the bloating."),
    ("gas", "Eat slowly and cut back on carbonated drinks and chewing gum."),
    ("cramping", "A warm compress on your abdomen and gentle stretching can relax the muscles."),
    ("pain", "Rest, sip warm water, and see a doctor if the pain persists or worsens."),
    ("nausea", "Sip ginger tea and stick to small, bland meals for the next few hours."),
    ("constipation", "Increase fiber gradually and drink at least 8 glasses of water today."),
    ("diarrhea", "Stay hydrated with electrolytes and try the BRAT diet until it settles."),
    ("reflux", "Avoid lying down for 3 hours after eating and skip spicy or fatty foods."),
    ("heartburn", "Elevate your head while sleeping and avoid late-night meals."),
    ("indigestion", "Eat smaller portions and chew thoroughly to give digestion a head start."),
];

const GENERIC_TIP: &str = "Keep a food diary to identify potential trigger foods.";

/// A severity phrase and the score it maps to (1..=3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityPhrase {
    pub phrase: String,
    pub score: u8,
}

/// A remediation tip for one symptom name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomTip {
    pub symptom: String,
    pub tip: String,
}

/// Immutable keyword configuration for the brain.
///
/// Missing fields in a JSON vocabulary fall back to the built-in tables. Unknown
/// fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Vocabulary {
    pub greeting_pattern: String,
    pub help_pattern: String,
    pub symptom_pattern: String,
    pub food_pattern: String,
    pub activity_pattern: String,
    pub energy_pattern: String,
    pub high_energy_pattern: String,
    pub low_energy_pattern: String,
    pub food_names: Vec<String>,
    pub activity_names: Vec<String>,
    pub symptom_names: Vec<String>,
    pub severity_phrases: Vec<SeverityPhrase>,
    pub symptom_tips: Vec<SymptomTip>,
    pub generic_tip: String,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            greeting_pattern: GREETING_PATTERN.to_string(),
            help_pattern: HELP_PATTERN.to_string(),
            symptom_pattern: SYMPTOM_PATTERN.to_string(),
            food_pattern: FOOD_PATTERN.to_string(),
            activity_pattern: ACTIVITY_PATTERN.to_string(),
            energy_pattern: ENERGY_PATTERN.to_string(),
            high_energy_pattern: HIGH_ENERGY_PATTERN.to_string(),
            low_energy_pattern: LOW_ENERGY_PATTERN.to_string(),
            food_names: owned(FOOD_NAMES),
            activity_names: owned(ACTIVITY_NAMES),
            symptom_names: owned(SYMPTOM_NAMES),
            severity_phrases: SEVERITY_PHRASES
                .iter()
                .map(|(phrase, score)| SeverityPhrase {
                    phrase: phrase.to_string(),
                    score: *score,
                })
                .collect(),
            symptom_tips: SYMPTOM_TIPS
                .iter()
                .map(|(symptom, tip)| SymptomTip {
                    symptom: symptom.to_string(),
                    tip: tip.to_string(),
                })
                .collect(),
            generic_tip: GENERIC_TIP.to_string(),
        }
    }
}

impl Vocabulary {
    /// Parse a vocabulary from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let vocabulary: Vocabulary = serde_json::from_str(json)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    /// Load a vocabulary from a JSON file on disk.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        let vocabulary = Self::from_json_str(&json)?;
        info!("Loaded vocabulary from {}", path.display());
        Ok(vocabulary)
    }

    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(bad) = self.severity_phrases.iter().find(|p| !(1..=3).contains(&p.score)) {
            return Err(AppError::Config(format!(
                "Severity phrase '{}' has score {}, expected 1..=3",
                bad.phrase, bad.score
            )));
        }
        if self.severity_phrases.iter().any(|p| p.phrase.trim().is_empty()) {
            return Err(AppError::Config("Severity phrases must not be empty".to_string()));
        }
        if self.generic_tip.trim().is_empty() {
            return Err(AppError::Config("Generic tip must not be empty".to_string()));
        }
        Ok(())
    }

    /// Tip for a symptom name, if the table has one.
    pub fn tip_for(&self, symptom: &str) -> Option<&str> {
        self.symptom_tips
            .iter()
            .find(|t| t.symptom.eq_ignore_ascii_case(symptom))
            .map(|t| t.tip.as_str())
    }
}

/// Compile a vocabulary pattern case-insensitively, naming it in the error.
pub(crate) fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, AppError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| AppError::Config(format!("Invalid {} pattern: {}", name, e)))
}

/// Every list entry that occurs in `text` (case-insensitive), in list order.
pub(crate) fn find_listed(list: &[String], text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for name in list {
        let name_lower = name.to_lowercase();
        if !name_lower.is_empty() && lower.contains(&name_lower) && !found.contains(name) {
            found.push(name.clone());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(Vocabulary::default().validate().is_ok());
    }

    #[test]
    fn test_default_patterns_compile() {
        let vocab = Vocabulary::default();
        for (name, pattern) in [
            ("greeting", &vocab.greeting_pattern),
            ("help", &vocab.help_pattern),
            ("symptom", &vocab.symptom_pattern),
            ("food", &vocab.food_pattern),
            ("activity", &vocab.activity_pattern),
            ("energy", &vocab.energy_pattern),
            ("high energy", &vocab.high_energy_pattern),
            ("low energy", &vocab.low_energy_pattern),
        ] {
            assert!(compile_pattern(name, pattern).is_ok(), "{} failed", name);
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let vocab = Vocabulary::from_json_str(r#"{"food_names": ["kimchi"]}"#).unwrap();
        assert_eq!(vocab.food_names, vec!["kimchi".to_string()]);
        assert_eq!(vocab.symptom_names, Vocabulary::default().symptom_names);
    }

    #[test]
    fn test_misspelled_field_rejected() {
        let err = Vocabulary::from_json_str(r#"{"food_name": ["kimchi"]}"#).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_out_of_range_severity_rejected() {
        let err = Vocabulary::from_json_str(
            r#"{"severity_phrases": [{"phrase": "awful", "score": 5}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_tip_gap_is_preserved() {
        let vocab = Vocabulary::default();
        assert!(vocab.tip_for("bloating").is_some());
        assert!(vocab.tip_for("discomfort").is_none());
        assert!(vocab.tip_for("fullness").is_none());
    }

    #[test]
    fn test_find_listed_uses_list_order() {
        let list = owned(&["rice", "chicken", "banana"]);
        let found = find_listed(&list, "Banana, then chicken and RICE, more chicken");
        assert_eq!(found, owned(&["rice", "chicken", "banana"]));
    }
}
