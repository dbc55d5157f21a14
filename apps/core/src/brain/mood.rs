//! Mood labels produced by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Detected mood of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    /// Self-harm or acute distress wording. Always wins over other moods.
    Crisis,
    /// Sadness, crying, loneliness
    Sad,
    /// Positive wording
    Happy,
    /// Worry, nerves, fear
    Anxious,
    /// Nothing matched; the companion just listens
    Listening,
}

impl MoodLabel {
    /// Keyword-bearing moods in the order they are tested.
    pub const PRIORITY: [MoodLabel; 4] = [
        MoodLabel::Crisis,
        MoodLabel::Sad,
        MoodLabel::Happy,
        MoodLabel::Anxious,
    ];

    /// Returns the lowercase key used in keyword and response tables
    pub fn label(&self) -> &'static str {
        match self {
            MoodLabel::Crisis => "crisis",
            MoodLabel::Sad => "sad",
            MoodLabel::Happy => "happy",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Listening => "listening",
        }
    }

    /// Position in the classifier's evaluation order (lower runs first).
    /// `Listening` is the fallback and sorts last.
    pub fn priority(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|m| m == self)
            .unwrap_or(Self::PRIORITY.len())
    }

    /// Mood shown on the avatar. Crisis is never displayed as its own emotion.
    pub fn display_mood(&self) -> MoodLabel {
        match self {
            MoodLabel::Crisis => MoodLabel::Sad,
            other => *other,
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MoodLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "crisis" => Ok(MoodLabel::Crisis),
            "sad" => Ok(MoodLabel::Sad),
            "happy" => Ok(MoodLabel::Happy),
            "anxious" => Ok(MoodLabel::Anxious),
            "listening" => Ok(MoodLabel::Listening),
            other => Err(AppError::Validation(format!("Unknown mood label '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(MoodLabel::Crisis.priority() < MoodLabel::Sad.priority());
        assert!(MoodLabel::Sad.priority() < MoodLabel::Happy.priority());
        assert!(MoodLabel::Happy.priority() < MoodLabel::Anxious.priority());
        assert_eq!(MoodLabel::Listening.priority(), 4);
    }

    #[test]
    fn test_crisis_is_displayed_as_sad() {
        assert_eq!(MoodLabel::Crisis.display_mood(), MoodLabel::Sad);
        assert_eq!(MoodLabel::Happy.display_mood(), MoodLabel::Happy);
    }

    #[test]
    fn test_parse_and_serde_agree() {
        let parsed: MoodLabel = "Anxious".parse().unwrap();
        assert_eq!(parsed, MoodLabel::Anxious);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"anxious\"");
        assert!("neutral".parse::<MoodLabel>().is_err());
    }
}
