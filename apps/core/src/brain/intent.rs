//! Intent Classification using regex patterns.
//!
//! Fixed-precedence detection: greeting, help, then the four tracked domains with
//! symptom first, so "full" or "uncomfortable" after a meal is not logged as food.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::log_card::CardType;
use super::vocabulary::{compile_pattern, Vocabulary};
use crate::error::AppError;

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Meal or drink report
    Food,
    /// Exercise or movement report
    Activity,
    /// Digestive symptom report
    Symptom,
    /// Energy level report
    Energy,
    /// Greeting (hello, hi, hey, etc.)
    Greeting,
    /// Asking what the bot can do
    Help,
    /// Nothing recognized
    Fallback,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Food => "food",
            Intent::Activity => "activity",
            Intent::Symptom => "symptom",
            Intent::Energy => "energy",
            Intent::Greeting => "greeting",
            Intent::Help => "help",
            Intent::Fallback => "fallback",
        }
    }

    /// The card type this intent logs, if it is a tracked domain.
    pub fn card_type(&self) -> Option<CardType> {
        match self {
            Intent::Food => Some(CardType::Food),
            Intent::Activity => Some(CardType::Activity),
            Intent::Symptom => Some(CardType::Symptom),
            Intent::Energy => Some(CardType::Energy),
            Intent::Greeting | Intent::Help | Intent::Fallback => None,
        }
    }

    /// Whether a log card is produced for this intent.
    pub fn is_tracked(&self) -> bool {
        self.card_type().is_some()
    }
}

/// Result of intent classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Detected intent
    pub intent: Intent,
    /// The text fragment that triggered it (None for fallback)
    pub matched: Option<String>,
}

/// Intent classifier using regex patterns, checked in precedence order
pub struct IntentClassifier {
    greeting: Regex,
    help: Regex,
    /// Tracked domains, symptom first.
    domains: Vec<(Intent, Regex)>,
}

impl IntentClassifier {
    /// Compile the classifier from a vocabulary.
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self, AppError> {
        Ok(Self {
            greeting: compile_pattern("greeting", &vocabulary.greeting_pattern)?,
            help: compile_pattern("help", &vocabulary.help_pattern)?,
            domains: vec![
                (Intent::Symptom, compile_pattern("symptom", &vocabulary.symptom_pattern)?),
                (Intent::Food, compile_pattern("food", &vocabulary.food_pattern)?),
                (Intent::Activity, compile_pattern("activity", &vocabulary.activity_pattern)?),
                (Intent::Energy, compile_pattern("energy", &vocabulary.energy_pattern)?),
            ],
        })
    }

    /// Classify the intent of a text
    pub fn classify(&self, text: &str) -> Intent {
        self.explain(text).intent
    }

    /// Classify and report which fragment decided it
    pub fn explain(&self, text: &str) -> IntentResult {
        let greeting_text = text.trim().to_lowercase();
        if let Some(m) = self.greeting.find(&greeting_text) {
            return IntentResult {
                intent: Intent::Greeting,
                matched: Some(m.as_str().to_string()),
            };
        }

        if let Some(m) = self.help.find(text) {
            return IntentResult {
                intent: Intent::Help,
                matched: Some(m.as_str().to_string()),
            };
        }

        for (intent, pattern) in &self.domains {
            if let Some(m) = pattern.find(text) {
                return IntentResult {
                    intent: *intent,
                    matched: Some(m.as_str().to_string()),
                };
            }
        }

        IntentResult {
            intent: Intent::Fallback,
            matched: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::from_vocabulary(&Vocabulary::default()).unwrap()
    }

    #[test]
    fn test_greeting_detection() {
        let classifier = classifier();

        assert_eq!(classifier.classify("hello"), Intent::Greeting);
        assert_eq!(classifier.classify("  Hey there"), Intent::Greeting);
        assert_eq!(classifier.classify("Good morning! I ate eggs"), Intent::Greeting);
        assert_eq!(classifier.classify("Howdy"), Intent::Greeting);
    }

    #[test]
    fn test_greeting_needs_whole_word() {
        let classifier = classifier();

        assert_eq!(classifier.classify("hiked for an hour"), Intent::Activity);
    }

    #[test]
    fn test_help_detection() {
        let classifier = classifier();

        assert_eq!(classifier.classify("What can you do?"), Intent::Help);
        assert_eq!(classifier.classify("how do I log a meal"), Intent::Help);
        assert_eq!(classifier.classify("I need HELP"), Intent::Help);
    }

    #[test]
    fn test_symptom_precedes_food() {
        let classifier = classifier();

        assert_eq!(classifier.classify("bloating after lunch"), Intent::Symptom);
        assert_eq!(classifier.classify("I ate pizza and now I feel full"), Intent::Symptom);
    }

    #[test]
    fn test_domains() {
        let classifier = classifier();

        assert_eq!(classifier.classify("I had oatmeal for breakfast"), Intent::Food);
        assert_eq!(classifier.classify("Went for a 20-min walk"), Intent::Activity);
        assert_eq!(classifier.classify("Feeling tired"), Intent::Energy);
    }

    #[test]
    fn test_fallback_detection() {
        let classifier = classifier();

        assert_eq!(classifier.classify(""), Intent::Fallback);
        assert_eq!(classifier.classify("   "), Intent::Fallback);
        assert_eq!(classifier.classify("the weather is nice"), Intent::Fallback);
    }

    #[test]
    fn test_explain_reports_fragment() {
        let result = classifier().explain("Mild BLOATING today");
        assert_eq!(result.intent, Intent::Symptom);
        assert_eq!(result.matched.as_deref(), Some("BLOAT"));
    }

    #[test]
    fn test_tracked_intents() {
        assert!(Intent::Food.is_tracked());
        assert!(!Intent::Greeting.is_tracked());
        assert_eq!(Intent::Energy.card_type(), Some(CardType::Energy));
        assert_eq!(Intent::Fallback.card_type(), None);
    }
}
