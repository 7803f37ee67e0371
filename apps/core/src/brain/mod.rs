//! # Brain Module
//!
//! Fast, non-LLM analysis system for DigestiGo.
//! Turns free-text health notes into replies and structured log cards.
//!
//! ## Components
//! - `vocabulary`: keyword tables (injectable configuration)
//! - `intent`: intent classification with fixed precedence
//! - `extract`: per-domain slot extraction
//! - `severity`: symptom severity scoring
//! - `responder`: canned replies and card building
//! - `log_card`: output data structures
//! - `numbers`: injectable randomness for estimated values
//! - `analyzer`: main orchestrator
//! - `remote`: caller side of the LLM-backed variant

pub mod analyzer;
pub mod extract;
pub mod intent;
pub mod log_card;
pub mod numbers;
pub mod remote;
pub mod responder;
pub mod severity;
pub mod vocabulary;

// Re-export main types for convenience
pub use analyzer::DigestiBot;
pub use extract::{ActivityFields, EnergyLevel, Extraction, FieldExtractor, FoodFields, SymptomFields};
pub use intent::{Intent, IntentClassifier, IntentResult};
pub use log_card::{CardData, CardType, LogCard, ResponseResult};
pub use numbers::{NumberSource, SeededSource, ThreadRngSource};
pub use remote::{parse_tagged_reply, ChatTurn, RemoteResponder, Role, TextGenerator};
pub use responder::Responder;
pub use severity::{Severity, SeverityScorer};
pub use vocabulary::Vocabulary;
