//! Journal tests fed by real bot output.

use std::sync::Arc;

use crate::brain::{CardType, DigestiBot, SeededSource, Vocabulary};
use crate::journal::Journal;

fn bot() -> DigestiBot {
    DigestiBot::with_parts(&Vocabulary::default(), Arc::new(SeededSource::new(1))).unwrap()
}

#[test]
fn test_only_cards_are_recorded() {
    let bot = bot();
    let mut journal = Journal::new();

    for text in ["hello", "help", "I ate toast", "nothing here", "went for a run"] {
        let response = bot.generate_response(text);
        journal.record(text, &response);
    }

    assert_eq!(journal.len(), 2);
    assert_eq!(journal.count_of(CardType::Food), 1);
    assert_eq!(journal.count_of(CardType::Activity), 1);
    assert_eq!(journal.count_of(CardType::Symptom), 0);
}

#[test]
fn test_newest_first() {
    let bot = bot();
    let mut journal = Journal::new();

    for text in ["I ate toast", "mild gas", "feeling great energy"] {
        let response = bot.generate_response(text);
        journal.record(text, &response);
    }

    let types: Vec<CardType> = journal.entries().iter().map(|e| e.card.card_type).collect();
    assert_eq!(types, vec![CardType::Energy, CardType::Symptom, CardType::Food]);
    assert_eq!(journal.entries()[0].raw, "feeling great energy");
}

#[test]
fn test_entry_renderings() {
    let bot = bot();
    let mut journal = Journal::new();

    let response = bot.generate_response("severe cramping");
    let entry = journal.record("severe cramping", &response).unwrap();

    assert_eq!(entry.summary(), "cramping · Severe (3/3)");
    assert!(entry.details().starts_with("Symptom: cramping · Severity: Severe (3/3) · Tip: "));
    assert_eq!(entry.time_label().len(), 5);
}

#[test]
fn test_entry_ids_are_unique() {
    let bot = bot();
    let mut journal = Journal::new();

    for _ in 0..3 {
        let response = bot.generate_response("yoga");
        journal.record("yoga", &response);
    }

    let ids: std::collections::HashSet<_> = journal.entries().iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 3);
}
