use crate::actors::messages::{ActorError, AppError, CompanionMessage};
use crate::actors::traits::ChatCompanion;
use crate::brain::Companion;
use crate::chat::{ChatMessage, ChatSession};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, instrument};

const MAILBOX_SIZE: usize = 32;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A handle to the companion actor.
///
/// The actor owns the chat session and answers one message at a time, so a
/// reply can never overtake an earlier one: a second message waits in the
/// mailbox until the first reply's thinking delay has elapsed.
#[derive(Clone)]
pub struct CompanionHandle {
    sender: mpsc::Sender<CompanionMessage>,
}

impl CompanionHandle {
    /// Spawn the actor on the current tokio runtime.
    pub fn new(companion: Companion) -> Self {
        let (sender, receiver) = mpsc::channel(MAILBOX_SIZE);
        let session = ChatSession::new(companion.welcome());
        let runner = CompanionRunner {
            receiver,
            companion,
            session,
        };
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Sends a user message and waits for the bot's reply.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the text is blank, otherwise the bot message that was
    /// appended to the transcript.
    #[instrument(skip(self, text))]
    pub async fn process_message(&self, text: String) -> Result<Option<ChatMessage>, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(CompanionMessage::Chat {
            text,
            responder: send,
        })
        .await?;
        timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Dropped(e.to_string())))?
    }

    pub async fn transcript(&self) -> Result<Vec<ChatMessage>, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(CompanionMessage::History { responder: send }).await?;
        timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Dropped(e.to_string())))
    }

    pub async fn change_locale(&self, locale: String) -> Result<Vec<ChatMessage>, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(CompanionMessage::SetLocale {
            locale,
            responder: send,
        })
        .await?;
        timeout(REQUEST_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Dropped(e.to_string())))
    }

    /// Ask the actor to stop. Later requests fail with `Unavailable`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.send(CompanionMessage::Shutdown).await
    }

    async fn send(&self, msg: CompanionMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Unavailable(e.to_string())))
    }
}

#[async_trait]
impl ChatCompanion for CompanionHandle {
    async fn chat(&self, text: String) -> Result<Option<ChatMessage>, AppError> {
        self.process_message(text).await
    }

    async fn history(&self) -> Result<Vec<ChatMessage>, AppError> {
        self.transcript().await
    }

    async fn set_locale(&self, locale: String) -> Result<Vec<ChatMessage>, AppError> {
        self.change_locale(locale).await
    }
}

// --- Actor Runner ---
struct CompanionRunner {
    receiver: mpsc::Receiver<CompanionMessage>,
    companion: Companion,
    session: ChatSession,
}

impl CompanionRunner {
    async fn run(mut self) {
        info!("Companion started (session {})", self.session.id());
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CompanionMessage::Chat { text, responder } => {
                    let reply = self.handle_chat(&text).await;
                    let _ = responder.send(Ok(reply));
                }
                CompanionMessage::History { responder } => {
                    let _ = responder.send(self.session.messages().to_vec());
                }
                CompanionMessage::SetLocale { locale, responder } => {
                    info!("Switching companion locale to {}", locale);
                    self.companion.set_locale(&locale);
                    self.session.reset(self.companion.welcome());
                    let _ = responder.send(self.session.messages().to_vec());
                }
                CompanionMessage::Shutdown => {
                    info!("Companion shutting down...");
                    break;
                }
            }
        }
        info!("Companion stopped");
    }

    async fn handle_chat(&mut self, text: &str) -> Option<ChatMessage> {
        let pending = self.session.submit(text, &mut self.companion)?;
        debug!("Reply {} composed, thinking for {:?}", pending.ticket, pending.delay);
        sleep(pending.delay).await;
        self.session.deliver(pending.ticket)
    }
}
