//! Mood keyword tables.
//!
//! The classifier's vocabulary is configuration data: an ordered list of
//! `{ mood, keywords }` groups. The built-in table covers English, Hindi and
//! Telugu and is embedded from `resources/keywords.json`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::mood::MoodLabel;
use crate::error::AppError;

const BUILTIN_KEYWORDS: &str = include_str!("../../resources/keywords.json");

/// Keywords that map to a single mood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub mood: MoodLabel,
    pub keywords: Vec<String>,
}

/// Mood vocabulary, kept in classifier priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordTable {
    groups: Vec<KeywordGroup>,
}

impl KeywordTable {
    /// Build a table from raw groups.
    ///
    /// Keywords are lower-cased and blanks dropped. Groups are re-ordered by
    /// [`MoodLabel::priority`], so a file listing `happy` before `crisis`
    /// still tests crisis first.
    pub fn new(groups: Vec<KeywordGroup>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(groups.len());

        for group in groups {
            if group.mood == MoodLabel::Listening {
                return Err(AppError::Validation(
                    "'listening' is the fallback mood and cannot have keywords".to_string(),
                ));
            }
            if !seen.insert(group.mood) {
                return Err(AppError::Validation(format!(
                    "Mood '{}' appears more than once in the keyword table",
                    group.mood
                )));
            }

            let keywords: Vec<String> = group
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();

            normalized.push(KeywordGroup {
                mood: group.mood,
                keywords,
            });
        }

        normalized.sort_by_key(|g| g.mood.priority());
        Ok(Self { groups: normalized })
    }

    /// Parse a table from its JSON form (an array of groups).
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let groups: Vec<KeywordGroup> = serde_json::from_str(json)?;
        Self::new(groups)
    }

    /// Load a table from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        info!("Loading keyword table from {:?}", path);
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The embedded multilingual table.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json(BUILTIN_KEYWORDS)
    }

    /// Groups in evaluation order
    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    /// Keywords configured for a mood (empty for `listening` or unconfigured moods)
    pub fn keywords_for(&self, mood: MoodLabel) -> &[String] {
        self.groups
            .iter()
            .find(|g| g.mood == mood)
            .map(|g| g.keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Add extra keywords to a mood, creating the group if needed.
    pub fn extend(&mut self, mood: MoodLabel, extra: &[&str]) -> Result<(), AppError> {
        if mood == MoodLabel::Listening {
            return Err(AppError::Validation(
                "'listening' is the fallback mood and cannot have keywords".to_string(),
            ));
        }

        let extra = extra
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty());

        match self.groups.iter_mut().find(|g| g.mood == mood) {
            Some(group) => group.keywords.extend(extra),
            None => {
                self.groups.push(KeywordGroup {
                    mood,
                    keywords: extra.collect(),
                });
                self.groups.sort_by_key(|g| g.mood.priority());
            }
        }
        debug!("Keyword table extended for mood {}", mood);
        Ok(())
    }
}
