//! Mood classification by keyword containment.
//!
//! Fast, deterministic, no model required. The input is case-folded and each
//! keyword group is tested in priority order; the first group with a keyword
//! contained anywhere in the text wins.
//!
//! Matching is plain substring containment, not word matching: "die" fires
//! inside "studied" and "good" inside "goodbye". This is a known
//! approximation and is kept as-is so behaviour stays predictable.

use serde::{Deserialize, Serialize};

use super::keywords::KeywordTable;
use super::mood::MoodLabel;
use crate::error::AppError;

/// Result of mood classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodResult {
    /// Detected mood
    pub mood: MoodLabel,
    /// Keyword that decided the mood, if any
    pub matched_keyword: Option<String>,
}

/// Keyword-based mood classifier
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    table: KeywordTable,
}

impl MoodClassifier {
    /// Create a classifier over a custom keyword table
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Create a classifier over the embedded multilingual keywords
    pub fn builtin() -> Result<Self, AppError> {
        Ok(Self::new(KeywordTable::builtin()?))
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Classify the mood of a text
    pub fn classify(&self, text: &str) -> MoodLabel {
        self.analyze(text).mood
    }

    /// Classify and report which keyword fired
    pub fn analyze(&self, text: &str) -> MoodResult {
        let lower = text.to_lowercase();

        for group in self.table.groups() {
            if let Some(keyword) = group.keywords.iter().find(|k| lower.contains(k.as_str())) {
                return MoodResult {
                    mood: group.mood,
                    matched_keyword: Some(keyword.clone()),
                };
            }
        }

        MoodResult {
            mood: MoodLabel::Listening,
            matched_keyword: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> MoodClassifier {
        MoodClassifier::builtin().unwrap()
    }

    #[test]
    fn test_basic_moods() {
        let c = classifier();
        assert_eq!(c.classify("I feel so sad"), MoodLabel::Sad);
        assert_eq!(c.classify("Today was GREAT"), MoodLabel::Happy);
        assert_eq!(c.classify("I'm nervous about exams"), MoodLabel::Anxious);
        assert_eq!(c.classify("I went to the market"), MoodLabel::Listening);
    }

    #[test]
    fn test_set_priority_beats_text_position() {
        let c = classifier();
        // "happy" appears first in the text, but sad is tested before happy
        assert_eq!(c.classify("happy on the outside, sad inside"), MoodLabel::Sad);
    }

    #[test]
    fn test_matched_keyword_reported() {
        let result = classifier().analyze("I want to END IT");
        assert_eq!(result.mood, MoodLabel::Crisis);
        assert_eq!(result.matched_keyword.as_deref(), Some("end it"));

        let result = classifier().analyze("just a normal day");
        assert_eq!(result.matched_keyword, None);
    }

    #[test]
    fn test_empty_text_is_listening() {
        assert_eq!(classifier().classify(""), MoodLabel::Listening);
    }
}
