//! Chat session state.
//!
//! A `ChatSession` is owned by whoever drives the conversation (the actor,
//! a `ChatDriver`, a test). Submitting a message stores the bot's answer as
//! *outstanding* and returns a ticket; the caller delivers the ticket once
//! the thinking delay has passed.
//!
//! At most one reply is outstanding. Submitting while a reply is still
//! outstanding delivers the older reply first, so the transcript keeps
//! strict user/bot alternation and no answer is ever dropped. Tickets from
//! before a `reset` are stale and ignored.

use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::message::ChatMessage;
use crate::brain::{Companion, MoodLabel};

/// Reply waiting for its thinking delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: u64,
    pub delay: Duration,
    /// Classified mood of the user message (may be `Crisis`)
    pub mood: MoodLabel,
}

#[derive(Debug, Clone)]
struct Outstanding {
    ticket: u64,
    text: String,
    emotion: MoodLabel,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
    next_message_id: u64,
    next_ticket: u64,
    outstanding: Option<Outstanding>,
    current_emotion: Option<MoodLabel>,
}

impl ChatSession {
    /// Start a session, optionally opening with a welcome message.
    pub fn new(welcome: Option<String>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            next_message_id: 1,
            next_ticket: 1,
            outstanding: None,
            current_emotion: None,
        };
        session.push_welcome(welcome);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Transcript in insertion order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a bot reply is waiting for its delay
    pub fn is_typing(&self) -> bool {
        self.outstanding.is_some()
    }

    /// Mood shown on the avatar; `None` means neutral
    pub fn current_emotion(&self) -> Option<MoodLabel> {
        self.current_emotion
    }

    /// Record a user message and prepare the bot's answer.
    ///
    /// Blank input is a no-op: nothing is appended and the classifier is not
    /// consulted.
    pub fn submit(&mut self, text: &str, companion: &mut Companion) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }

        if let Some(flushed) = self.flush() {
            debug!("Delivered superseded reply {} early", flushed.id);
        }

        let id = self.take_message_id();
        self.messages.push(ChatMessage::user(id, text));

        let composed = companion.compose(text);
        self.current_emotion = Some(composed.reply.display_mood);

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.outstanding = Some(Outstanding {
            ticket,
            text: composed.reply.text,
            emotion: composed.reply.display_mood,
        });

        if composed.mood == MoodLabel::Crisis {
            info!("Crisis wording detected in session {}", self.id);
        }

        Some(PendingReply {
            ticket,
            delay: composed.delay,
            mood: composed.mood,
        })
    }

    /// Append the outstanding reply if `ticket` is still current.
    pub fn deliver(&mut self, ticket: u64) -> Option<ChatMessage> {
        let current = self.outstanding.as_ref().map(|o| o.ticket);
        if current == Some(ticket) {
            self.flush()
        } else {
            debug!("Ignoring stale reply ticket {}", ticket);
            None
        }
    }

    /// Append the outstanding reply immediately, whatever its ticket.
    pub fn flush(&mut self) -> Option<ChatMessage> {
        let outstanding = self.outstanding.take()?;
        let id = self.take_message_id();
        let message = ChatMessage::bot(id, &outstanding.text, Some(outstanding.emotion));
        self.messages.push(message.clone());
        Some(message)
    }

    /// Forget the outstanding reply without showing it. Its ticket becomes
    /// stale.
    pub fn discard_pending(&mut self) -> bool {
        match self.outstanding.take() {
            Some(dropped) => {
                debug!("Discarded pending reply {}", dropped.ticket);
                true
            }
            None => false,
        }
    }

    /// Clear the transcript (e.g. after a language switch). Outstanding
    /// replies are discarded and their tickets become stale.
    pub fn reset(&mut self, welcome: Option<String>) {
        self.messages.clear();
        self.outstanding = None;
        self.current_emotion = None;
        self.push_welcome(welcome);
    }

    fn push_welcome(&mut self, welcome: Option<String>) {
        if let Some(text) = welcome {
            let id = self.take_message_id();
            self.messages.push(ChatMessage::bot(id, &text, None));
        }
    }

    fn take_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }
}
