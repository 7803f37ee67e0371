//! DigestiBot - Main orchestrator for the brain module.
//!
//! Runs the rule-based pipeline for one utterance:
//! 1. Intent classification (fixed precedence regexes)
//! 2. Slot extraction for the chosen intent
//! 3. Canned reply + log card generation
//!
//! No state is kept between calls; the bot can be shared across threads.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::extract::{Extraction, FieldExtractor};
use super::intent::{Intent, IntentClassifier};
use super::log_card::ResponseResult;
use super::numbers::{NumberSource, SeededSource, ThreadRngSource};
use super::responder::Responder;
use super::vocabulary::Vocabulary;
use crate::config::AppConfig;
use crate::error::AppError;

/// Rule-based responder that turns free text into replies and log cards
pub struct DigestiBot {
    classifier: IntentClassifier,
    extractor: FieldExtractor,
    responder: Responder,
}

impl DigestiBot {
    /// Built-in vocabulary, thread-local randomness
    pub fn new() -> Result<Self, AppError> {
        Self::with_parts(&Vocabulary::default(), Arc::new(ThreadRngSource))
    }

    /// Build from an explicit vocabulary and number source
    pub fn with_parts(
        vocabulary: &Vocabulary,
        numbers: Arc<dyn NumberSource>,
    ) -> Result<Self, AppError> {
        vocabulary.validate()?;
        Ok(Self {
            classifier: IntentClassifier::from_vocabulary(vocabulary)?,
            extractor: FieldExtractor::from_vocabulary(vocabulary, numbers)?,
            responder: Responder::from_vocabulary(vocabulary),
        })
    }

    /// Build from runtime configuration (vocabulary file, RNG seed)
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => Vocabulary::from_json_file(path)?,
            None => Vocabulary::default(),
        };
        let numbers: Arc<dyn NumberSource> = match config.rng_seed {
            Some(seed) => Arc::new(SeededSource::new(seed)),
            None => Arc::new(ThreadRngSource),
        };
        Self::with_parts(&vocabulary, numbers)
    }

    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(text)
    }

    pub fn extract(&self, text: &str) -> Extraction {
        self.extractor.extract(self.classify(text), text)
    }

    /// Classify, extract and respond. Never fails, whatever the input.
    pub fn generate_response(&self, text: &str) -> ResponseResult {
        let start = Instant::now();

        let result = self.classifier.explain(text);
        let extraction = self.extractor.extract(result.intent, text);
        let response = self.responder.respond(&extraction, text);

        debug!(
            intent = %result.intent,
            matched = result.matched.as_deref().unwrap_or("-"),
            card = response.card.is_some(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Generated response"
        );

        response
    }
}
