use crate::actors::messages::AppError;
use crate::chat::ChatMessage;
use async_trait::async_trait;

/// Defines the public interface of a chat companion.
///
/// Front ends talk to this trait so they can be driven by the real actor or
/// by a scripted stand-in.
#[async_trait]
pub trait ChatCompanion: Send + Sync + 'static {
    /// Send a user line and wait for the bot's reply (`None` for blank input).
    async fn chat(&self, text: String) -> Result<Option<ChatMessage>, AppError>;

    /// Current transcript, oldest first.
    async fn history(&self) -> Result<Vec<ChatMessage>, AppError>;

    /// Change language; returns the fresh transcript.
    async fn set_locale(&self, locale: String) -> Result<Vec<ChatMessage>, AppError>;
}
