//! Canned reply and log card generation.
//!
//! One match arm per intent. Pure apart from the extraction it is handed.

use super::extract::{ActivityFields, EnergyLevel, Extraction, FoodFields, SymptomFields};
use super::log_card::{CardData, CardType, LogCard, ResponseResult};
use super::severity::SeverityScorer;
use super::vocabulary::Vocabulary;

pub const GREETING_TEXT: &str = "Hey there! 👋 I'm **DigestiBot**. Tell me what you ate, how you moved, any symptoms, or how your energy is, and I'll log it for you.";

pub const HELP_TEXT: &str = "I can track four things through plain chat:\n\
• **Food**: \"I had oatmeal with berries, about 350 calories\"\n\
• **Activity**: \"Went for a 30-min walk, 4,000 steps\"\n\
• **Symptoms**: \"Mild bloating after lunch\"\n\
• **Energy**: \"Feeling low energy this afternoon\"\n\
Each one becomes a log card you can review later.";

pub const FALLBACK_TEXT: &str = "I didn't catch anything to log there. Try telling me about a **meal**, an **activity**, a **symptom**, or your **energy level**.";

/// Characters of the tip kept on the card before the ellipsis
pub const CARD_TIP_CHARS: usize = 35;

const NO_ITEMS: &str = "your meal";
const NO_ACTIVITIES: &str = "activity";
const NO_SYMPTOMS: &str = "general discomfort";
const GUT_BENEFIT: &str = "Motility ↑";
const ENERGY_LINK: &str = "Gut absorption";

/// Tip shortened for the card: always the first 35 characters plus an ellipsis.
pub fn card_tip(tip: &str) -> String {
    let mut short: String = tip.chars().take(CARD_TIP_CHARS).collect();
    short.push('…');
    short
}

/// Turns extractions into reply text and cards
pub struct Responder {
    vocabulary: Vocabulary,
    severity: SeverityScorer,
}

impl Responder {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        Self {
            vocabulary: vocabulary.clone(),
            severity: SeverityScorer::from_vocabulary(vocabulary),
        }
    }

    pub fn respond(&self, extraction: &Extraction, raw_text: &str) -> ResponseResult {
        match extraction {
            Extraction::Food(food) => self.respond_food(food),
            Extraction::Activity(activity) => self.respond_activity(activity),
            Extraction::Symptom(symptoms) => self.respond_symptom(symptoms, raw_text),
            Extraction::Energy { level } => self.respond_energy(*level),
            Extraction::Greeting => ResponseResult::text_only(GREETING_TEXT),
            Extraction::Help => ResponseResult::text_only(HELP_TEXT),
            Extraction::Fallback => ResponseResult::text_only(FALLBACK_TEXT),
        }
    }

    fn respond_food(&self, food: &FoodFields) -> ResponseResult {
        let items = if food.items.is_empty() {
            NO_ITEMS.to_string()
        } else {
            food.items.join(", ")
        };

        let remark = if food.fiber_g >= 5 {
            "Great fiber content! 🌾 That keeps your gut bacteria well fed."
        } else if food.fiber_g <= 2 {
            "⚠️ That's on the low-fiber side. Consider adding veggies, legumes, or whole grains."
        } else {
            "Decent fiber. A handful of berries or seeds would push it higher."
        };

        let text = format!(
            "Logged **{}** (~{} kcal, {}g fiber). {}",
            items, food.calories, food.fiber_g, remark
        );
        let data = CardData::new()
            .with("Item(s)", items)
            .with("Est. Calories", format!("{} kcal", food.calories))
            .with("Fiber", format!("{}g", food.fiber_g))
            .with("Portion", food.portion.clone());

        ResponseResult::with_card(text, LogCard::new(CardType::Food, data))
    }

    fn respond_activity(&self, activity: &ActivityFields) -> ResponseResult {
        let names = if activity.activities.is_empty() {
            NO_ACTIVITIES.to_string()
        } else {
            activity.activities.join(", ")
        };
        let steps = activity.steps.clone().unwrap_or_else(|| "N/A".to_string());

        let text = format!(
            "Nice work! 🏃 Logged **{}** for {}. Movement stimulates gut motility and helps reduce bloating.",
            names, activity.duration
        );
        let data = CardData::new()
            .with("Activity", names)
            .with("Duration", activity.duration.clone())
            .with("Steps", steps)
            .with("Gut Benefit", GUT_BENEFIT);

        ResponseResult::with_card(text, LogCard::new(CardType::Activity, data))
    }

    fn tip_for(&self, symptom: Option<&String>) -> &str {
        symptom
            .and_then(|s| self.vocabulary.tip_for(s))
            .unwrap_or(self.vocabulary.generic_tip.as_str())
    }

    fn respond_symptom(&self, fields: &SymptomFields, raw_text: &str) -> ResponseResult {
        let severity = self.severity.score(raw_text);
        let tip = self.tip_for(fields.symptoms.first());
        let names = if fields.symptoms.is_empty() {
            NO_SYMPTOMS.to_string()
        } else {
            fields.symptoms.join(", ")
        };

        let text = format!(
            "Sorry you're dealing with **{}** ({} severity). 💡 {}",
            names,
            severity.label().to_lowercase(),
            tip
        );
        let data = CardData::new()
            .with("Symptom", names)
            .with("Severity", severity.display())
            .with("Tip", card_tip(tip));

        ResponseResult::with_card(text, LogCard::new(CardType::Symptom, data))
    }

    fn respond_energy(&self, level: EnergyLevel) -> ResponseResult {
        let note = match level {
            EnergyLevel::High => "Great to hear! A well-fed gut microbiome helps keep energy steady.",
            EnergyLevel::Low => "Low energy can be linked to poor nutrient absorption. Try a fiber-rich snack and some water.",
            EnergyLevel::Moderate => "Steady energy. Balanced meals and regular movement help keep it that way.",
        };

        let text = format!("Energy logged as **{}**. {}", level.label(), note);
        let data = CardData::new()
            .with("Level", level.label())
            .with("Score", format!("{}/10", level.score()))
            .with("Linked to", ENERGY_LINK);

        ResponseResult::with_card(text, LogCard::new(CardType::Energy, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> Responder {
        Responder::from_vocabulary(&Vocabulary::default())
    }

    fn food(fiber_g: u32, items: &[&str]) -> Extraction {
        Extraction::Food(FoodFields {
            items: items.iter().map(|s| s.to_string()).collect(),
            calories: 300,
            fiber_g,
            portion: "1 serving".to_string(),
        })
    }

    #[test]
    fn test_card_tip_always_gets_ellipsis() {
        assert_eq!(card_tip("short"), "short…");
        let long = card_tip("Try peppermint tea and a slow 10-minute walk");
        assert!(long.ends_with('…'));
        assert_eq!(long.trim_end_matches('…').chars().count(), CARD_TIP_CHARS);
    }

    #[test]
    fn test_food_card_fields() {
        let result = responder().respond(&food(4, &["oatmeal", "berries"]), "");
        let card = result.card.unwrap();
        assert_eq!(card.card_type, CardType::Food);
        assert_eq!(card.data.get("Item(s)"), Some("oatmeal, berries"));
        assert_eq!(card.data.get("Est. Calories"), Some("300 kcal"));
        assert_eq!(card.data.get("Fiber"), Some("4g"));
        assert_eq!(card.data.get("Portion"), Some("1 serving"));
        assert!(result.text.contains("Decent fiber"));
    }

    #[test]
    fn test_fiber_remarks() {
        let responder = responder();
        assert!(responder.respond(&food(5, &[]), "").text.contains("Great fiber"));
        assert!(responder.respond(&food(2, &[]), "").text.contains("low-fiber"));
        assert!(responder.respond(&food(2, &[]), "").text.contains("your meal"));
    }

    #[test]
    fn test_unlisted_symptom_gets_generic_tip() {
        let extraction = Extraction::Symptom(SymptomFields {
            symptoms: vec!["discomfort".to_string()],
        });
        let result = responder().respond(&extraction, "some discomfort");
        let card = result.card.unwrap();
        assert_eq!(
            card.data.get("Tip"),
            Some(card_tip(&Vocabulary::default().generic_tip).as_str())
        );
        assert_eq!(card.data.get("Severity"), Some("Moderate (2/3)"));
    }

    #[test]
    fn test_tip_follows_first_symptom() {
        let vocab = Vocabulary::default();
        let extraction = Extraction::Symptom(SymptomFields {
            symptoms: vec!["gas".to_string(), "reflux".to_string()],
        });
        let card = responder().respond(&extraction, "severe gas and reflux").card.unwrap();
        assert_eq!(
            card.data.get("Tip"),
            Some(card_tip(vocab.tip_for("gas").unwrap()).as_str())
        );
        assert_eq!(card.data.get("Severity"), Some("Severe (3/3)"));
    }

    #[test]
    fn test_energy_card() {
        let card = responder()
            .respond(&Extraction::Energy { level: EnergyLevel::High }, "")
            .card
            .unwrap();
        assert_eq!(card.data.get("Level"), Some("High"));
        assert_eq!(card.data.get("Score"), Some("8/10"));
        assert_eq!(card.data.get("Linked to"), Some("Gut absorption"));
    }

    #[test]
    fn test_canned_replies_have_no_card() {
        let responder = responder();
        for extraction in [Extraction::Greeting, Extraction::Help, Extraction::Fallback] {
            let result = responder.respond(&extraction, "");
            assert!(result.card.is_none());
            assert!(!result.text.is_empty());
        }
    }
}
