//! Deferred and repeating tasks.
//!
//! Every timed transition in the app (bot "thinking", memory-tile revert,
//! breathing phases, meditation ticks) goes through a [`Scheduler`]. The
//! engines never sleep; they hand a closure to the scheduler and keep the
//! returned [`TimerHandle`] so the work can be cancelled.
//!
//! - [`TokioScheduler`] runs tasks on real timers.
//! - [`ManualScheduler`] runs them on a virtual clock advanced by hand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::error::AppError;

/// One-shot task
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Repeating task; returns whether it wants to run again
pub type RepeatingTask = Box<dyn FnMut() -> Tick + Send + 'static>;

/// Returned by repeating tasks after each run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Cancellation handle for a scheduled task. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent any future run of the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Runs closures after a delay.
pub trait Scheduler: Send + Sync {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Run `task` every `interval` (first run after one interval) until it
    /// returns [`Tick::Stop`] or the handle is cancelled.
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle;
}

// --- Tokio ---

/// Scheduler backed by tokio timers.
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Bind to the runtime of the calling context.
    pub fn current() -> Result<Self, AppError> {
        let runtime = Handle::try_current()
            .map_err(|e| AppError::Internal(format!("No tokio runtime available: {}", e)))?;
        Ok(Self { runtime })
    }

    pub fn with_handle(runtime: Handle) -> Self {
        Self { runtime }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if guard.is_cancelled() {
                trace!("Timer cancelled before firing");
                return;
            }
            task();
        });
        handle
    }

    fn schedule_repeating(&self, interval: Duration, mut task: RepeatingTask) -> TimerHandle {
        let handle = TimerHandle::new();
        let guard = handle.clone();
        let interval = interval.max(MIN_INTERVAL);
        self.runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if guard.is_cancelled() {
                    break;
                }
                if task() == Tick::Stop {
                    break;
                }
            }
            trace!("Repeating timer finished");
        });
        handle
    }
}

// --- Virtual clock ---

enum Job {
    Once(Task),
    Repeating {
        interval: Duration,
        task: RepeatingTask,
    },
}

struct Entry {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    job: Job,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    entries: Vec<Entry>,
}

impl ManualState {
    fn push(&mut self, due: Duration, handle: TimerHandle, job: Job) {
        self.seq += 1;
        self.entries.push(Entry {
            due,
            seq: self.seq,
            handle,
            job,
        });
    }

    /// Remove and return the earliest live entry due at or before `until`.
    fn pop_due(&mut self, until: Duration) -> Option<Entry> {
        self.entries.retain(|e| !e.handle.is_cancelled());
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(index))
    }
}

/// Deterministic scheduler driven by [`advance`](Self::advance).
///
/// Tasks run on the caller's thread, in due-time order, FIFO for equal
/// due times. Tasks may schedule further tasks; those run in the same
/// `advance` call if they fall due within it.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of live (not cancelled) scheduled tasks
    pub fn pending(&self) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .count()
    }

    /// Move the clock forward, running everything that falls due.
    /// Returns the number of task runs.
    pub fn advance(&self, by: Duration) -> usize {
        let until = self.lock().now + by;
        let mut runs = 0;

        loop {
            let entry = {
                let mut state = self.lock();
                match state.pop_due(until) {
                    Some(entry) => {
                        state.now = entry.due;
                        entry
                    }
                    None => {
                        state.now = until;
                        break;
                    }
                }
            };

            runs += 1;
            match entry.job {
                Job::Once(task) => task(),
                Job::Repeating { interval, mut task } => {
                    if task() == Tick::Continue && !entry.handle.is_cancelled() {
                        let mut state = self.lock();
                        let due = entry.due + interval;
                        state.push(due, entry.handle, Job::Repeating { interval, task });
                    }
                }
            }
        }

        debug!("Virtual clock advanced by {:?}, {} task run(s)", by, runs);
        runs
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut state = self.lock();
        let due = state.now + delay;
        state.push(due, handle.clone(), Job::Once(task));
        handle
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle {
        let handle = TimerHandle::new();
        let interval = interval.max(MIN_INTERVAL);
        let mut state = self.lock();
        let due = state.now + interval;
        state.push(due, handle.clone(), Job::Repeating { interval, task });
        handle
    }
}
