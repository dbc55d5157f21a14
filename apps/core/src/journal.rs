//! Journal entry record.
//!
//! Entries are stored by the front end as a JSON array under
//! [`JOURNAL_STORAGE_KEY`], newest first. This module only defines the
//! record and its encoding; storage itself lives with the UI.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const JOURNAL_STORAGE_KEY: &str = "moodmate_journal";

/// Entries longer than this (in UTF-16 code units, as the editor counts
/// them) get the "deep" insight
const DEEP_REFLECTION_CHARS: usize = 50;

const DEEP_INSIGHT: &str = "You seem to be reflecting deeply. Keep exploring these feelings.";
const SHORT_INSIGHT: &str = "Short and sweet.";

/// Mood picked in the journal editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMood {
    Happy,
    #[default]
    Neutral,
    Sad,
    Anxious,
    Calm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Creation time in milliseconds since the epoch
    pub id: i64,
    /// Long human date, e.g. "Friday, October 16, 2026"
    pub date: String,
    pub text: String,
    pub mood: JournalMood,
    pub insight: String,
}

impl JournalEntry {
    /// Build an entry written at `now`. Blank text yields no entry.
    pub fn compose(text: &str, mood: JournalMood, now: DateTime<Local>) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: now.timestamp_millis(),
            date: now.format("%A, %B %-d, %Y").to_string(),
            text: text.to_string(),
            mood,
            insight: insight_for(text).to_string(),
        })
    }
}

pub fn insight_for(text: &str) -> &'static str {
    if text.encode_utf16().count() > DEEP_REFLECTION_CHARS {
        DEEP_INSIGHT
    } else {
        SHORT_INSIGHT
    }
}

/// Parse the stored array. A missing value is an empty journal.
pub fn decode_entries(raw: Option<&str>) -> Result<Vec<JournalEntry>, AppError> {
    match raw {
        Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(json)?),
        _ => Ok(Vec::new()),
    }
}

pub fn encode_entries(entries: &[JournalEntry]) -> Result<String, AppError> {
    Ok(serde_json::to_string(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_blank_text_is_not_saved() {
        assert!(JournalEntry::compose("  ", JournalMood::Sad, noon()).is_none());
    }

    #[test]
    fn test_insight_threshold() {
        let short = "a".repeat(50);
        let long = "a".repeat(51);
        assert_eq!(insight_for(&short), SHORT_INSIGHT);
        assert_eq!(insight_for(&long), DEEP_INSIGHT);
    }

    #[test]
    fn test_insight_counts_utf16_units() {
        // 26 emoji are 26 chars but 52 UTF-16 units
        let emoji = "🌧".repeat(26);
        assert_eq!(insight_for(&emoji), DEEP_INSIGHT);
        // Devanagari stays in the BMP: one unit per char
        let hindi = "ख".repeat(50);
        assert_eq!(insight_for(&hindi), SHORT_INSIGHT);
    }

    #[test]
    fn test_entry_fields() {
        let entry = JournalEntry::compose("Walked by the lake", JournalMood::Calm, noon()).unwrap();
        assert_eq!(entry.date, "Friday, October 16, 2026");
        assert_eq!(entry.id, noon().timestamp_millis());
        assert_eq!(entry.insight, SHORT_INSIGHT);
    }

    #[test]
    fn test_stored_format() {
        let entry = JournalEntry::compose("hi", JournalMood::Happy, noon()).unwrap();
        let json = encode_entries(&[entry.clone()]).unwrap();
        assert!(json.contains("\"mood\":\"happy\""));
        assert_eq!(decode_entries(Some(&json)).unwrap(), vec![entry]);
        assert!(decode_entries(None).unwrap().is_empty());
        assert!(decode_entries(Some("{oops")).is_err());
    }
}
