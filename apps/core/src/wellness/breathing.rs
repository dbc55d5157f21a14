//! Box-breathing pacer: inhale, hold, exhale, four seconds each, forever.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, trace};

use crate::scheduler::{Scheduler, Tick, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    #[default]
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn next(self) -> BreathPhase {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    /// Translation key suffix, e.g. `music.breathing.inhale`
    pub fn key(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "inhale",
            BreathPhase::Hold => "hold",
            BreathPhase::Exhale => "exhale",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PacerState {
    phase: BreathPhase,
    transitions: u64,
}

/// Cycles [`BreathPhase`]s on a scheduler while it is running.
pub struct BreathingPacer {
    state: Arc<Mutex<PacerState>>,
    timer: TimerHandle,
}

impl BreathingPacer {
    /// Start at `Inhale` and advance every `phase_duration`.
    pub fn start(scheduler: &dyn Scheduler, phase_duration: Duration) -> Self {
        let state = Arc::new(Mutex::new(PacerState::default()));
        let shared = state.clone();
        let timer = scheduler.schedule_repeating(
            phase_duration,
            Box::new(move || {
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                state.phase = state.phase.next();
                state.transitions += 1;
                trace!("Breathing phase -> {}", state.phase);
                Tick::Continue
            }),
        );
        debug!("Breathing pacer started ({:?} per phase)", phase_duration);
        Self { state, timer }
    }

    pub fn phase(&self) -> BreathPhase {
        self.lock().phase
    }

    /// Number of phase changes since start
    pub fn transitions(&self) -> u64 {
        self.lock().transitions
    }

    /// Stop cycling, e.g. when the view closes. The phase freezes.
    pub fn stop(&self) {
        self.timer.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.timer.is_cancelled()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PacerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for BreathingPacer {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}
