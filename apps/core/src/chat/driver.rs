//! Scheduler-driven chat: delivers each reply after its thinking delay.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

use super::message::ChatMessage;
use super::session::{ChatSession, PendingReply};
use crate::brain::{Companion, MoodLabel};
use crate::scheduler::{Scheduler, TimerHandle};

/// Couples a [`ChatSession`] and a [`Companion`] with a [`Scheduler`].
#[derive(Clone)]
pub struct ChatDriver {
    session: Arc<Mutex<ChatSession>>,
    companion: Arc<Mutex<Companion>>,
    scheduler: Arc<dyn Scheduler>,
    timer: Arc<Mutex<Option<TimerHandle>>>,
}

impl ChatDriver {
    pub fn new(companion: Companion, scheduler: Arc<dyn Scheduler>) -> Self {
        let session = ChatSession::new(companion.welcome());
        Self {
            session: Arc::new(Mutex::new(session)),
            companion: Arc::new(Mutex::new(companion)),
            scheduler,
            timer: Arc::new(Mutex::new(None)),
        }
    }

    /// Submit user text. Returns the pending reply, or `None` for blank input.
    #[instrument(skip(self, text))]
    pub fn send(&self, text: &str) -> Option<PendingReply> {
        let pending = {
            let mut companion = lock(&self.companion);
            lock(&self.session).submit(text, &mut companion)?
        };

        let session = self.session.clone();
        let ticket = pending.ticket;
        let handle = self.scheduler.schedule(
            pending.delay,
            Box::new(move || {
                lock(&session).deliver(ticket);
            }),
        );

        // The previous reply (if any) was already flushed by `submit`.
        if let Some(previous) = lock(&self.timer).replace(handle) {
            previous.cancel();
        }
        Some(pending)
    }

    /// Switch language and restart the conversation with its welcome line.
    pub fn change_locale(&self, locale: &str) {
        self.cancel_timer();
        let welcome = {
            let mut companion = lock(&self.companion);
            companion.set_locale(locale);
            companion.welcome()
        };
        lock(&self.session).reset(welcome);
    }

    /// Drop any pending reply, e.g. when the chat view closes.
    pub fn close(&self) {
        self.cancel_timer();
        lock(&self.session).discard_pending();
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        lock(&self.session).messages().to_vec()
    }

    pub fn is_typing(&self) -> bool {
        lock(&self.session).is_typing()
    }

    pub fn current_emotion(&self) -> Option<MoodLabel> {
        lock(&self.session).current_emotion()
    }

    fn cancel_timer(&self) {
        if let Some(handle) = lock(&self.timer).take() {
            handle.cancel();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
