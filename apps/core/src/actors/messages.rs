use serde::Serialize;
use tokio::sync::oneshot;

use crate::chat::ChatMessage;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The actor's mailbox is closed (actor stopped or crashed).
    #[error("Companion is not running: {0}")]
    Unavailable(String),
    /// The actor dropped the reply channel without answering.
    #[error("Companion dropped the request: {0}")]
    Dropped(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the companion actor.
#[derive(Debug)]
pub enum CompanionMessage {
    /// A user chat line. Answered with the bot reply once its thinking delay
    /// has elapsed, or `None` for blank input.
    Chat {
        text: String,
        responder: oneshot::Sender<Result<Option<ChatMessage>, AppError>>,
    },
    /// Snapshot of the transcript.
    History {
        responder: oneshot::Sender<Vec<ChatMessage>>,
    },
    /// Switch language and restart the conversation with its welcome line.
    SetLocale {
        locale: String,
        responder: oneshot::Sender<Vec<ChatMessage>>,
    },
    /// Stop the actor after the current message.
    Shutdown,
}
