//! Field extraction for the tracked domains.
//!
//! Each extractor pulls named slots out of the raw utterance. Numeric slots come
//! from fixed regexes; name lists and energy terms come from the vocabulary.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::intent::Intent;
use super::numbers::NumberSource;
use super::vocabulary::{compile_pattern, find_listed, Vocabulary};
use crate::error::AppError;

// Compile patterns once at startup
static CALORIE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*k?cal").expect("Invalid regex: calorie pattern")
});

static FIBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*g?\s*(?:of\s+)?fib(?:er|re)").expect("Invalid regex: fiber pattern")
});

static PORTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:cups?|bowls?|pieces?|slices?|servings?|grams?|oz|ml)\b")
        .expect("Invalid regex: portion pattern")
});

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*-?\s*(?:minutes?|mins?|hours?|hrs?)\b")
        .expect("Invalid regex: duration pattern")
});

static STEPS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d+)\s*steps?").expect("Invalid regex: steps pattern")
});

const CALORIE_DEFAULT_RANGE: std::ops::Range<u32> = 100..500;
const FIBER_DEFAULT_RANGE: std::ops::Range<u32> = 1..9;
const DEFAULT_PORTION: &str = "1 serving";
const DEFAULT_DURATION: &str = "30 min";

/// Slots for a meal report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodFields {
    pub items: Vec<String>,
    pub calories: u32,
    pub fiber_g: u32,
    pub portion: String,
}

/// Slots for an exercise report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFields {
    pub activities: Vec<String>,
    /// The matched duration token, e.g. `30-minute`
    pub duration: String,
    /// The matched step count, commas kept
    pub steps: Option<String>,
}

/// Slots for a symptom report. Severity is scored separately from the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomFields {
    pub symptoms: Vec<String>,
}

/// Three-level energy label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyLevel {
    High,
    Moderate,
    Low,
}

impl EnergyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EnergyLevel::High => "High",
            EnergyLevel::Moderate => "Moderate",
            EnergyLevel::Low => "Low",
        }
    }

    /// Score out of 10 shown on the card
    pub fn score(&self) -> u8 {
        match self {
            EnergyLevel::High => 8,
            EnergyLevel::Moderate => 5,
            EnergyLevel::Low => 3,
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Extracted slots, tagged by intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Extraction {
    Food(FoodFields),
    Activity(ActivityFields),
    Symptom(SymptomFields),
    Energy { level: EnergyLevel },
    Greeting,
    Help,
    Fallback,
}

impl Extraction {
    pub fn intent(&self) -> Intent {
        match self {
            Extraction::Food(_) => Intent::Food,
            Extraction::Activity(_) => Intent::Activity,
            Extraction::Symptom(_) => Intent::Symptom,
            Extraction::Energy { .. } => Intent::Energy,
            Extraction::Greeting => Intent::Greeting,
            Extraction::Help => Intent::Help,
            Extraction::Fallback => Intent::Fallback,
        }
    }
}

/// First captured number. Digits too large for `u32` saturate rather than being dropped.
fn first_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
}

/// Slot extractor for all four tracked domains
pub struct FieldExtractor {
    food_names: Vec<String>,
    activity_names: Vec<String>,
    symptom_names: Vec<String>,
    high_energy: Regex,
    low_energy: Regex,
    numbers: Arc<dyn NumberSource>,
}

impl FieldExtractor {
    pub fn from_vocabulary(
        vocabulary: &Vocabulary,
        numbers: Arc<dyn NumberSource>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            food_names: vocabulary.food_names.clone(),
            activity_names: vocabulary.activity_names.clone(),
            symptom_names: vocabulary.symptom_names.clone(),
            high_energy: compile_pattern("high energy", &vocabulary.high_energy_pattern)?,
            low_energy: compile_pattern("low energy", &vocabulary.low_energy_pattern)?,
            numbers,
        })
    }

    /// Run the extractor matching `intent`
    pub fn extract(&self, intent: Intent, text: &str) -> Extraction {
        match intent {
            Intent::Food => Extraction::Food(self.extract_food(text)),
            Intent::Activity => Extraction::Activity(self.extract_activity(text)),
            Intent::Symptom => Extraction::Symptom(self.extract_symptoms(text)),
            Intent::Energy => Extraction::Energy {
                level: self.extract_energy(text),
            },
            Intent::Greeting => Extraction::Greeting,
            Intent::Help => Extraction::Help,
            Intent::Fallback => Extraction::Fallback,
        }
    }

    pub fn extract_food(&self, text: &str) -> FoodFields {
        let calories = first_number(&CALORIE_PATTERN, text)
            .unwrap_or_else(|| self.numbers.next_in(CALORIE_DEFAULT_RANGE));
        let fiber_g = first_number(&FIBER_PATTERN, text)
            .unwrap_or_else(|| self.numbers.next_in(FIBER_DEFAULT_RANGE));
        let portion = PORTION_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_PORTION.to_string());

        FoodFields {
            items: find_listed(&self.food_names, text),
            calories,
            fiber_g,
            portion,
        }
    }

    pub fn extract_activity(&self, text: &str) -> ActivityFields {
        let duration = DURATION_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_DURATION.to_string());
        let steps = STEPS_PATTERN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        ActivityFields {
            activities: find_listed(&self.activity_names, text),
            duration,
            steps,
        }
    }

    pub fn extract_symptoms(&self, text: &str) -> SymptomFields {
        SymptomFields {
            symptoms: find_listed(&self.symptom_names, text),
        }
    }

    pub fn extract_energy(&self, text: &str) -> EnergyLevel {
        if self.high_energy.is_match(text) {
            EnergyLevel::High
        } else if self.low_energy.is_match(text) {
            EnergyLevel::Low
        } else {
            EnergyLevel::Moderate
        }
    }
}
