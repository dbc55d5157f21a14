//! Mood playlists for the music panel.

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    pub duration: &'static str,
    /// Accent colour of the player card
    pub color: &'static str,
}

const fn track(
    title: &'static str,
    artist: &'static str,
    duration: &'static str,
    color: &'static str,
) -> Track {
    Track {
        title,
        artist,
        duration,
        color,
    }
}

const SAD: &[Track] = &[
    track("Gentle Rain", "Nature Sounds", "3:00", "#90caf9"),
    track("Piano Comfort", "MoodMate", "4:20", "#b39ddb"),
    track("Ocean Waves", "Nature Sounds", "5:15", "#80deea"),
];

const STRESSED: &[Track] = &[
    track("Deep Om", "Meditation", "10:00", "#ef9a9a"),
    track("Forest Walk", "Nature Sounds", "6:45", "#a5d6a7"),
];

const HAPPY: &[Track] = &[
    track("Sunny Day", "Upbeat Trio", "2:50", "#fff59d"),
    track("Morning Energy", "MoodMate", "3:30", "#ffe082"),
];

const DEFAULT: &[Track] = &[track("Ambient Flow", "MoodMate", "4:00", "#e0e0e0")];

/// Tracks for a landing-page mood id; unknown moods get the ambient list
pub fn tracks_for(mood: &str) -> &'static [Track] {
    match mood {
        "sad" => SAD,
        "stressed" => STRESSED,
        "happy" => HAPPY,
        _ => DEFAULT,
    }
}

/// Player position within one playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    tracks: &'static [Track],
    current: usize,
    playing: bool,
}

impl Player {
    pub fn for_mood(mood: &str) -> Self {
        debug!("Loading playlist for mood '{}'", mood);
        Self {
            tracks: tracks_for(mood),
            current: 0,
            playing: false,
        }
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Skip forward, wrapping to the first track, and keep playing.
    pub fn next(&mut self) -> &Track {
        self.current = (self.current + 1) % self.tracks.len();
        self.playing = true;
        self.current()
    }

    /// Skip back, wrapping to the last track, and keep playing.
    pub fn previous(&mut self) -> &Track {
        self.current = (self.current + self.tracks.len() - 1) % self.tracks.len();
        self.playing = true;
        self.current()
    }
}
