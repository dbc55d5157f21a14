//! Meditation countdown.
//!
//! The user picks a length in minutes, starts, and the remaining seconds tick
//! down once per second until zero, at which point the timer goes idle.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::info;

use crate::error::AppError;
use crate::scheduler::{Scheduler, Tick, TimerHandle};

/// Lengths offered in the picker
pub const PRESET_MINUTES: [u32; 4] = [1, 3, 5, 10];

pub const DEFAULT_MINUTES: u32 = 3;

/// Longest session accepted by [`MeditationTimer::set_duration`]
pub const MAX_MINUTES: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationTimer {
    duration_minutes: u32,
    remaining_secs: u32,
    active: bool,
}

impl Default for MeditationTimer {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_MINUTES,
            remaining_secs: 0,
            active: false,
        }
    }
}

impl MeditationTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_duration(&mut self, minutes: u32) -> Result<(), AppError> {
        if minutes == 0 {
            return Err(AppError::Validation(
                "Meditation length must be at least one minute".to_string(),
            ));
        }
        if minutes > MAX_MINUTES {
            return Err(AppError::Validation(format!(
                "Meditation length is capped at {} minutes",
                MAX_MINUTES
            )));
        }
        self.duration_minutes = minutes;
        Ok(())
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn start(&mut self) {
        self.remaining_secs = self.duration_minutes * 60;
        self.active = true;
    }

    /// One second elapsed. Returns `Stop` once the countdown is finished.
    pub fn tick(&mut self) -> Tick {
        if !self.active {
            return Tick::Stop;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.active = false;
            return Tick::Stop;
        }
        Tick::Continue
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.remaining_secs = 0;
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining time as `m:ss`
    pub fn format_remaining(&self) -> String {
        format_time(self.remaining_secs)
    }
}

pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// [`MeditationTimer`] ticking on a scheduler.
pub struct MeditationSession {
    timer: Arc<Mutex<MeditationTimer>>,
    scheduler: Arc<dyn Scheduler>,
    tick: Duration,
    handle: Option<TimerHandle>,
}

impl MeditationSession {
    pub fn new(scheduler: Arc<dyn Scheduler>, tick: Duration) -> Self {
        Self {
            timer: Arc::new(Mutex::new(MeditationTimer::new())),
            scheduler,
            tick,
            handle: None,
        }
    }

    pub fn set_duration(&mut self, minutes: u32) -> Result<(), AppError> {
        lock(&self.timer).set_duration(minutes)
    }

    /// Start (or restart) the countdown from the chosen length.
    pub fn start(&mut self) {
        self.cancel();
        let minutes = {
            let mut timer = lock(&self.timer);
            timer.start();
            timer.duration_minutes()
        };

        let shared = self.timer.clone();
        let handle = self.scheduler.schedule_repeating(
            self.tick,
            Box::new(move || {
                let mut timer = lock(&shared);
                let tick = timer.tick();
                if tick == Tick::Stop && timer.remaining_secs() == 0 {
                    info!("Meditation session complete");
                }
                tick
            }),
        );
        self.handle = Some(handle);
        info!("Meditation started for {} minute(s)", minutes);
    }

    pub fn reset(&mut self) {
        self.cancel();
        lock(&self.timer).reset();
    }

    pub fn snapshot(&self) -> MeditationTimer {
        *lock(&self.timer)
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

impl Drop for MeditationSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
