//! Companion - classifier, reply tables and selector wired together.
//!
//! Owns its random source so replies are reproducible under a fixed seed.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::classifier::MoodClassifier;
use super::keywords::KeywordTable;
use super::mood::MoodLabel;
use super::responses::{Reply, ResponseCatalog, ResponseSelector, ResponseTable, BASE_LOCALE};
use crate::config::{ChatTiming, CompanionConfig};
use crate::error::AppError;

/// A reply ready to be shown once the thinking delay has elapsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedReply {
    /// Mood the classifier detected (may be `Crisis`)
    pub mood: MoodLabel,
    pub reply: Reply,
    /// How long the UI should "think" before showing the reply
    pub delay: Duration,
}

pub struct Companion {
    classifier: MoodClassifier,
    catalog: ResponseCatalog,
    selector: ResponseSelector,
    timing: ChatTiming,
    locale: String,
    rng: StdRng,
}

impl Companion {
    pub fn new(
        classifier: MoodClassifier,
        catalog: ResponseCatalog,
        timing: ChatTiming,
        locale: &str,
        rng: StdRng,
    ) -> Self {
        Self {
            classifier,
            catalog,
            selector: ResponseSelector::default(),
            timing,
            locale: locale.to_string(),
            rng,
        }
    }

    /// Built-in tables, default timings, seeded random source.
    pub fn with_seed(seed: u64) -> Result<Self, AppError> {
        Ok(Self::new(
            MoodClassifier::builtin()?,
            ResponseCatalog::builtin()?,
            ChatTiming::default(),
            "en",
            StdRng::seed_from_u64(seed),
        ))
    }

    /// Build a companion from configuration, loading table overrides from disk.
    pub fn from_config(config: &CompanionConfig) -> Result<Self, AppError> {
        let keywords = match &config.keywords_path {
            Some(path) => KeywordTable::from_file(path)?,
            None => KeywordTable::builtin()?,
        };
        let catalog = match &config.responses_path {
            Some(path) => ResponseCatalog::from_file(path)?,
            None => ResponseCatalog::builtin()?,
        };
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(
            "Companion ready (locale: {}, locales available: {:?})",
            config.locale,
            catalog.locales()
        );

        let mut companion = Self::new(
            MoodClassifier::new(keywords),
            catalog,
            config.chat_timing(),
            BASE_LOCALE,
            rng,
        );
        companion.set_locale(&config.locale);
        Ok(companion)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Switch language. Unknown locales are kept but answered from the base
    /// table; returns false in that case.
    pub fn set_locale(&mut self, locale: &str) -> bool {
        self.locale = locale.to_string();
        let supported = self.catalog.supports(locale);
        if !supported {
            warn!("No response table for locale '{}', using '{}'", locale, BASE_LOCALE);
        }
        supported
    }

    pub fn classifier(&self) -> &MoodClassifier {
        &self.classifier
    }

    pub fn table(&self) -> &ResponseTable {
        self.catalog.table(&self.locale)
    }

    /// Welcome message of the current locale
    pub fn welcome(&self) -> Option<String> {
        self.table().welcome.clone()
    }

    /// Classify `text` and pick a reply. Never fails: missing templates are
    /// answered with the selector's fallback text.
    pub fn compose(&mut self, text: &str) -> ComposedReply {
        let result = self.classifier.analyze(text);
        debug!(
            "Classified message as {} (keyword: {:?})",
            result.mood, result.matched_keyword
        );

        let table = self.catalog.table(&self.locale);
        let reply = self.selector.select_or_fallback(result.mood, table, &mut self.rng);
        let delay = if result.mood == MoodLabel::Crisis {
            self.timing.crisis_delay
        } else {
            self.timing.reply_delay
        };

        ComposedReply {
            mood: result.mood,
            reply,
            delay,
        }
    }
}
