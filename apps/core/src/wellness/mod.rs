//! Music panel logic: breathing pacer, meditation countdown, mood playlists.

pub mod breathing;
pub mod meditation;
pub mod playlist;

pub use breathing::{BreathPhase, BreathingPacer};
pub use meditation::{MeditationSession, MeditationTimer, MAX_MINUTES, PRESET_MINUTES};
pub use playlist::{Player, Track};
