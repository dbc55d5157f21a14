//! Brain Module Tests
//!
//! Mood classification priority, the documented substring limitations and
//! reply selection statistics.

use crate::brain::{
    KeywordTable, MoodClassifier, MoodLabel, ResponseCatalog, ResponseSelector, ResponseTable,
    CRISIS_FALLBACK,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn classifier() -> MoodClassifier {
    MoodClassifier::builtin().unwrap()
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_crisis_priority_is_absolute() {
        let classifier = classifier();
        let crisis_words: Vec<String> = classifier.table().keywords_for(MoodLabel::Crisis).to_vec();
        assert!(!crisis_words.is_empty());

        for word in &crisis_words {
            for other in ["so happy", "very sad", "really nervous"] {
                let text = format!("{} and I {} today", other, word);
                assert_eq!(
                    classifier.classify(&text),
                    MoodLabel::Crisis,
                    "Expected Crisis for '{}'",
                    text
                );
            }
        }
    }

    #[test]
    fn test_case_and_position_do_not_matter() {
        let classifier = classifier();
        for text in ["SAD", "I am Sad", "feeling sAd.", "sad!!!"] {
            assert_eq!(classifier.classify(text), MoodLabel::Sad, "for '{}'", text);
        }
    }

    #[test]
    fn test_sad_beats_happy_beats_anxious() {
        let classifier = classifier();
        assert_eq!(classifier.classify("happy but lonely"), MoodLabel::Sad);
        assert_eq!(classifier.classify("nervous but happy"), MoodLabel::Happy);
        assert_eq!(classifier.classify("nervous and scared"), MoodLabel::Anxious);
    }

    #[test]
    fn test_unmatched_input_is_listening() {
        let classifier = classifier();
        for text in ["", "the weather is mild", "12345", "🙂"] {
            let result = classifier.analyze(text);
            assert_eq!(result.mood, MoodLabel::Listening);
            assert_eq!(result.matched_keyword, None);
        }
    }

    #[test]
    fn test_non_latin_keywords() {
        let classifier = classifier();
        assert_eq!(classifier.classify("मैं बहुत दुखी हूँ"), MoodLabel::Sad);
        assert_eq!(classifier.classify("నాకు ఆందోళన గా ఉంది"), MoodLabel::Anxious);
        assert_eq!(classifier.classify("मुझे मरना है"), MoodLabel::Crisis);
    }

    /// Containment matching fires inside unrelated words. These cases pin
    /// the current behaviour so any change to matching is deliberate.
    #[test]
    fn test_substring_false_positives() {
        let classifier = classifier();

        let result = classifier.analyze("I studied all night");
        assert_eq!(result.mood, MoodLabel::Crisis);
        assert_eq!(result.matched_keyword.as_deref(), Some("die"));

        assert_eq!(classifier.classify("learning a new skill"), MoodLabel::Crisis);
        assert_eq!(classifier.classify("a goodbye party"), MoodLabel::Happy);
    }

    /// Phrasings without a configured keyword are missed entirely.
    #[test]
    fn test_substring_false_negatives() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify("I don't want to live anymore"),
            MoodLabel::Listening
        );
        assert_eq!(classifier.classify("everything feels heavy"), MoodLabel::Listening);
    }

    #[test]
    fn test_file_order_does_not_change_priority() {
        let table = KeywordTable::from_json(
            r#"[
                {"mood": "anxious", "keywords": ["exam"]},
                {"mood": "happy", "keywords": ["exam"]},
                {"mood": "crisis", "keywords": ["exam"]}
            ]"#,
        )
        .unwrap();
        let classifier = MoodClassifier::new(table);
        assert_eq!(classifier.classify("exam tomorrow"), MoodLabel::Crisis);
    }
}

#[cfg(test)]
mod selector_tests {
    use super::*;

    fn anxious_table() -> ResponseTable {
        let mut moods = HashMap::new();
        moods.insert(
            "anxious".to_string(),
            vec!["Breathe with me.".to_string(), "One step at a time.".to_string()],
        );
        ResponseTable {
            welcome: None,
            crisis: Some("Call a helpline now.".to_string()),
            default: vec!["Tell me more.".to_string()],
            moods,
        }
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        let table = anxious_table();
        let selector = ResponseSelector::default();
        let mut rng = StdRng::seed_from_u64(2024);

        let mut counts: HashMap<String, usize> = HashMap::new();
        let trials = 4000;
        for _ in 0..trials {
            let reply = selector.select(MoodLabel::Anxious, &table, &mut rng).unwrap();
            *counts.entry(reply.text).or_default() += 1;
        }

        assert_eq!(counts.len(), 2);
        for (text, count) in counts {
            assert!(
                (1700..=2300).contains(&count),
                "'{}' picked {} times out of {}",
                text,
                count,
                trials
            );
        }
    }

    #[test]
    fn test_crisis_is_deterministic() {
        let table = anxious_table();
        let selector = ResponseSelector::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = selector.select(MoodLabel::Crisis, &table, &mut rng).unwrap();
            assert_eq!(reply.text, "Call a helpline now.");
            assert_eq!(reply.display_mood, MoodLabel::Sad);
        }
    }

    #[test]
    fn test_missing_crisis_text_uses_fallback() {
        let table = ResponseTable::default();
        let selector = ResponseSelector::default();
        let mut rng = StdRng::seed_from_u64(1);
        let reply = selector.select(MoodLabel::Crisis, &table, &mut rng).unwrap();
        assert_eq!(reply.text, CRISIS_FALLBACK);
    }

    #[test]
    fn test_listening_uses_default_list() {
        let table = anxious_table();
        let selector = ResponseSelector::default();
        let mut rng = StdRng::seed_from_u64(9);
        let reply = selector.select(MoodLabel::Listening, &table, &mut rng).unwrap();
        assert_eq!(reply.text, "Tell me more.");
        assert_eq!(reply.display_mood, MoodLabel::Listening);
    }

    #[test]
    fn test_every_builtin_locale_answers_every_mood() {
        let catalog = ResponseCatalog::builtin().unwrap();
        let selector = ResponseSelector::default();
        let mut rng = StdRng::seed_from_u64(5);

        for locale in catalog.locales() {
            let table = catalog.table(locale);
            assert!(table.welcome.is_some(), "{} has no welcome", locale);
            for mood in MoodLabel::PRIORITY {
                assert!(
                    selector.select(mood, table, &mut rng).is_ok(),
                    "{} cannot answer {}",
                    locale,
                    mood
                );
            }
        }
    }
}
