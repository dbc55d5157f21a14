//! Localized canned replies and the selector that picks one.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::mood::MoodLabel;
use crate::error::AppError;

const BUILTIN_RESPONSES: &str = include_str!("../../resources/responses.json");

/// Locale used when a requested locale has no table
pub const BASE_LOCALE: &str = "en";

/// Used when a table has no `crisis` entry
pub const CRISIS_FALLBACK: &str = "Please seek help.";

/// Used when neither the mood nor `default` has any candidate
pub const ACKNOWLEDGEMENT_FALLBACK: &str = "I hear you. I'm here with you.";

/// Reply candidates for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    /// Greeting shown when a chat starts
    #[serde(default)]
    pub welcome: Option<String>,
    /// Safety message for the crisis path
    #[serde(default)]
    pub crisis: Option<String>,
    /// Fallback candidates for moods without their own list
    #[serde(default)]
    pub default: Vec<String>,
    /// Candidates keyed by mood label (`sad`, `happy`, ...)
    #[serde(flatten)]
    pub moods: HashMap<String, Vec<String>>,
}

impl ResponseTable {
    /// Candidates for a mood, falling back to `default` when missing or empty
    pub fn candidates(&self, mood: MoodLabel) -> Option<&[String]> {
        self.moods
            .get(mood.label())
            .filter(|list| !list.is_empty())
            .or_else(|| Some(&self.default).filter(|list| !list.is_empty()))
            .map(|list| list.as_slice())
    }
}

/// Response tables for every supported locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCatalog {
    locales: HashMap<String, ResponseTable>,
}

impl ResponseCatalog {
    /// Build a catalog. The base locale must be present.
    pub fn new(locales: HashMap<String, ResponseTable>) -> Result<Self, AppError> {
        if !locales.contains_key(BASE_LOCALE) {
            return Err(AppError::Config(format!(
                "Response catalog is missing the base locale '{}'",
                BASE_LOCALE
            )));
        }
        Ok(Self { locales })
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let locales: HashMap<String, ResponseTable> = serde_json::from_str(json)?;
        Self::new(locales)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        info!("Loading response catalog from {:?}", path);
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Embedded tables for `en`, `hi` and `te`
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json(BUILTIN_RESPONSES)
    }

    /// Table for a locale, silently falling back to the base locale
    pub fn table(&self, locale: &str) -> &ResponseTable {
        match self.locales.get(locale) {
            Some(table) => table,
            None => &self.locales[BASE_LOCALE],
        }
    }

    pub fn supports(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Supported locale codes, sorted
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// A selected reply and the mood the avatar should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub display_mood: MoodLabel,
}

/// Picks a reply for a classified mood
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    crisis_fallback: String,
    acknowledgement: String,
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new(CRISIS_FALLBACK, ACKNOWLEDGEMENT_FALLBACK)
    }
}

impl ResponseSelector {
    pub fn new(crisis_fallback: &str, acknowledgement: &str) -> Self {
        Self {
            crisis_fallback: crisis_fallback.to_string(),
            acknowledgement: acknowledgement.to_string(),
        }
    }

    /// Select a reply.
    ///
    /// Crisis is deterministic: the table's crisis text (or the crisis
    /// fallback) shown with a sad avatar. Every other mood picks uniformly
    /// from its candidates, or from `default` when it has none.
    pub fn select<R: Rng + ?Sized>(
        &self,
        mood: MoodLabel,
        table: &ResponseTable,
        rng: &mut R,
    ) -> Result<Reply, AppError> {
        if mood == MoodLabel::Crisis {
            let text = table
                .crisis
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(&self.crisis_fallback);
            return Ok(Reply {
                text: text.to_string(),
                display_mood: mood.display_mood(),
            });
        }

        let text = table
            .candidates(mood)
            .and_then(|candidates| candidates.choose(rng))
            .ok_or(AppError::MissingResponseTemplate { mood })?;

        Ok(Reply {
            text: text.clone(),
            display_mood: mood,
        })
    }

    /// Like [`select`](Self::select) but never fails: a missing template is
    /// logged and answered with the generic acknowledgement.
    pub fn select_or_fallback<R: Rng + ?Sized>(
        &self,
        mood: MoodLabel,
        table: &ResponseTable,
        rng: &mut R,
    ) -> Reply {
        match self.select(mood, table, rng) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{}; answering with the generic acknowledgement", e);
                Reply {
                    text: self.acknowledgement.clone(),
                    display_mood: mood.display_mood(),
                }
            }
        }
    }
}
