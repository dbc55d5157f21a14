//! # Brain Module
//!
//! Rule-based "companion" logic for MoodMate chat.
//! No model involved: keyword containment decides the mood, a localized
//! table of canned replies decides the answer.
//!
//! ## Components
//! - `mood`: Mood labels and their priority order
//! - `keywords`: Keyword tables (configuration data)
//! - `classifier`: Text -> mood
//! - `responses`: Localized reply tables and the reply selector
//! - `companion`: Everything above wired together with a seeded RNG

pub mod classifier;
pub mod companion;
pub mod keywords;
pub mod mood;
pub mod responses;

pub use classifier::{MoodClassifier, MoodResult};
pub use companion::{Companion, ComposedReply};
pub use keywords::{KeywordGroup, KeywordTable};
pub use mood::MoodLabel;
pub use responses::{
    Reply, ResponseCatalog, ResponseSelector, ResponseTable, ACKNOWLEDGEMENT_FALLBACK,
    BASE_LOCALE, CRISIS_FALLBACK,
};
