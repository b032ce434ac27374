//! Conversation state and the pending-reply timer.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::message::{Message, seed_messages};
use crate::backend::{Answer, ConversationalBackend};
use crate::error::{AppError, Result};
use crate::language::Language;
use crate::notify::{Notifier, Toast};

/// Handle to one mounted conversation screen.
///
/// Clones share state. The pending reply is cancelled when [`dispose`] is
/// called or the last handle is dropped.
///
/// [`dispose`]: Conversation::dispose
#[derive(Debug, Clone)]
pub struct Conversation {
    inner: Arc<ConversationInner>,
}

struct ConversationInner {
    id: String,
    state: RwLock<ConversationState>,
    backend: Arc<dyn ConversationalBackend>,
    notifier: Notifier,
    reply_delay: Duration,
    /// Cancelled on teardown; each reply task watches a child of it.
    lifetime: CancellationToken,
}

#[derive(Debug, Default)]
struct ConversationState {
    messages: Vec<Message>,
    draft: String,
    listening: bool,
    pending: bool,
}

impl fmt::Debug for ConversationInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationInner")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("reply_delay", &self.reply_delay)
            .field("disposed", &self.lifetime.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Drop for ConversationInner {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

impl ConversationInner {
    fn read(&self) -> RwLockReadGuard<'_, ConversationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConversationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish_reply(&self, outcome: Result<Answer>) {
        let mut state = self.write();
        // Checked under the lock so a concurrent dispose wins.
        if self.lifetime.is_cancelled() {
            tracing::debug!(conversation_id = %self.id, "Reply arrived after dispose, dropped");
            return;
        }
        state.pending = false;
        match outcome {
            Ok(answer) => {
                let message = answer.into_message();
                tracing::info!(
                    name: "chat.reply.delivered",
                    conversation_id = %self.id,
                    message_id = %message.id,
                    message_count = state.messages.len() + 1,
                    "Mock reply delivered"
                );
                state.messages.push(message);
            }
            Err(e) => {
                drop(state);
                tracing::warn!(
                    conversation_id = %self.id,
                    error = %e,
                    "Backend failed to answer"
                );
                self.notifier.push(e.toast());
            }
        }
    }
}

impl Conversation {
    /// Create a conversation seeded with the sample exchange.
    ///
    /// Replies arrive `reply_delay` after each accepted submission.
    #[must_use]
    pub fn new(
        backend: Arc<dyn ConversationalBackend>,
        notifier: Notifier,
        reply_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ConversationInner {
                id: Uuid::new_v4().to_string(),
                state: RwLock::new(ConversationState {
                    messages: seed_messages(),
                    ..ConversationState::default()
                }),
                backend,
                notifier,
                reply_delay,
                lifetime: CancellationToken::new(),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Snapshot of all messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.read().messages.clone()
    }

    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.read().messages.len()
    }

    /// Whether a bot reply is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.read().pending
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.inner.read().listening
    }

    /// Current contents of the input box.
    #[must_use]
    pub fn draft(&self) -> String {
        self.inner.read().draft.clone()
    }

    /// Prefill the input box.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.inner.write().draft = text.into();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.lifetime.is_cancelled()
    }

    /// Submit a question.
    ///
    /// Appends the user message, clears the draft and schedules the reply.
    /// Must be called inside a Tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `text` is blank
    /// - [`AppError::ReplyPending`] if a reply is still outstanding
    /// - [`AppError::NotFound`] if the conversation was disposed
    ///
    /// State is unchanged in every error case.
    pub fn submit(&self, text: &str, language: Language) -> Result<Message> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("message is empty".to_string()));
        }
        if self.is_disposed() {
            return Err(AppError::NotFound(format!("conversation {}", self.inner.id)));
        }

        let message = {
            let mut state = self.inner.write();
            if state.pending {
                return Err(AppError::ReplyPending);
            }
            let message = Message::user(text);
            state.messages.push(message.clone());
            state.draft.clear();
            state.pending = true;
            message
        };

        self.schedule_reply(text.to_string(), language);
        Ok(message)
    }

    fn schedule_reply(&self, query: String, language: Language) {
        let weak = Arc::downgrade(&self.inner);
        let token = self.inner.lifetime.child_token();
        let backend = Arc::clone(&self.inner.backend);
        let delay = self.inner.reply_delay;
        let conversation_id = self.inner.id.clone();

        tracing::info!(
            name: "chat.reply.scheduled",
            conversation_id = %conversation_id,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            language = language.code(),
            "Mock reply scheduled"
        );

        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::debug!(conversation_id = %conversation_id, "Reply cancelled during delay");
                    return;
                }
                () = tokio::time::sleep(delay) => {}
            }

            let outcome = tokio::select! {
                () = token.cancelled() => return,
                outcome = backend.answer(&query, language) => outcome,
            };

            match weak.upgrade() {
                Some(inner) if !token.is_cancelled() => inner.finish_reply(outcome),
                _ => {
                    tracing::debug!(conversation_id = %conversation_id, "Conversation gone, reply dropped");
                }
            }
        });
    }

    /// Flip the microphone flag. Returns the new value.
    ///
    /// No audio is captured.
    pub fn toggle_voice_input(&self) -> bool {
        let listening = {
            let mut state = self.inner.write();
            state.listening = !state.listening;
            state.listening
        };

        let toast = if listening {
            Toast::info("Voice input activated", "Speak your question now...")
        } else {
            Toast::info("Voice input stopped", "Processing your speech...")
        };
        self.inner.notifier.push(toast);
        listening
    }

    fn find(&self, message_id: &str) -> Result<Message> {
        self.inner
            .read()
            .messages
            .iter()
            .find(|m| m.id == message_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("message {message_id}")))
    }

    /// Text to place on the client's clipboard.
    pub fn copy(&self, message_id: &str) -> Result<String> {
        let message = self.find(message_id)?;
        self.inner
            .notifier
            .push(Toast::info("Copied to clipboard", "Message copied successfully."));
        Ok(message.content)
    }

    /// Acknowledge a "save to space" request. Nothing is stored.
    pub fn save(&self, message_id: &str) -> Result<()> {
        let message = self.find(message_id)?;
        tracing::info!(
            conversation_id = %self.inner.id,
            message_id = %message.id,
            "Message saved to space"
        );
        self.inner
            .notifier
            .push(Toast::info("Saved to Space", "Message saved to your workspace."));
        Ok(())
    }

    /// Tear the screen down, cancelling any pending reply.
    pub fn dispose(&self) {
        if !self.inner.lifetime.is_cancelled() {
            tracing::debug!(conversation_id = %self.inner.id, "Conversation disposed");
        }
        self.inner.lifetime.cancel();
        self.inner.write().pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::conversation::Role;
    use async_trait::async_trait;

    const DELAY: Duration = Duration::from_millis(1500);

    fn conversation() -> (Conversation, Notifier) {
        let notifier = Notifier::new();
        (
            Conversation::new(Arc::new(MockBackend), notifier.clone(), DELAY),
            notifier,
        )
    }

    struct Unreachable;

    #[async_trait]
    impl ConversationalBackend for Unreachable {
        async fn answer(&self, _query: &str, _language: Language) -> Result<Answer> {
            Err(AppError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (chat, _) = conversation();
        let seeded = chat.message_count();

        chat.submit("What is the current groundwater status in Rajasthan for 2023?", Language::En)
            .unwrap();
        assert_eq!(chat.message_count(), seeded + 1);
        assert!(chat.is_pending());
        assert!(chat.draft().is_empty());

        tokio::time::sleep(Duration::from_millis(1400)).await;
        assert_eq!(chat.message_count(), seeded + 1);
        assert!(chat.is_pending());

        tokio::time::sleep(Duration::from_millis(200)).await;
        let messages = chat.messages();
        assert_eq!(messages.len(), seeded + 2);
        let reply = messages.last().unwrap();
        assert_eq!(reply.role, Role::Bot);
        assert!(!reply.content.is_empty());
        assert!(!chat.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_is_rejected() {
        let (chat, _) = conversation();
        let seeded = chat.message_count();

        for blank in ["", "   ", "\n\t"] {
            let err = chat.submit(blank, Language::En).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(chat.message_count(), seeded);
        assert!(!chat.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_submit_is_guarded() {
        let (chat, _) = conversation();
        let seeded = chat.message_count();

        chat.submit("first", Language::En).unwrap();
        chat.set_draft("second");
        assert_eq!(chat.submit("second", Language::En), Err(AppError::ReplyPending));
        assert_eq!(chat.message_count(), seeded + 1);
        assert_eq!(chat.draft(), "second");

        tokio::time::sleep(DELAY * 3).await;
        assert_eq!(chat.message_count(), seeded + 2);

        chat.submit("second", Language::En).unwrap();
        assert_eq!(chat.message_count(), seeded + 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_cancels_pending_reply() {
        let (chat, _) = conversation();
        let seeded = chat.message_count();

        chat.submit("Karnataka?", Language::En).unwrap();
        chat.dispose();
        assert!(!chat.is_pending());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(chat.message_count(), seeded + 1);
        assert!(matches!(
            chat.submit("again", Language::En),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_finished_after_dispose_is_dropped() {
        let (chat, notifier) = conversation();
        let seeded = chat.message_count();
        chat.submit("Maharashtra?", Language::En).unwrap();
        chat.dispose();

        // The reply task lost the race: it passed its cancellation check
        // before dispose and only now reaches the lock.
        let late = MockBackend.answer("Maharashtra?", Language::En).await;
        chat.inner.finish_reply(late);
        chat.inner.finish_reply(Err(AppError::Transport("late".to_string())));

        assert_eq!(chat.message_count(), seeded + 1);
        assert!(!chat.is_pending());
        assert_eq!(notifier.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_reply() {
        let (chat, _) = conversation();
        let weak = Arc::downgrade(&chat.inner);
        chat.submit("Punjab in summer?", Language::Hi).unwrap();
        drop(chat);

        assert!(weak.upgrade().is_none());
        tokio::time::sleep(DELAY * 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_failure_clears_pending_and_notifies() {
        let notifier = Notifier::new();
        let chat = Conversation::new(Arc::new(Unreachable), notifier.clone(), DELAY);
        let seeded = chat.message_count();

        chat.submit("anything", Language::En).unwrap();
        tokio::time::sleep(DELAY * 2).await;

        assert!(!chat.is_pending());
        assert_eq!(chat.message_count(), seeded + 1);
        let toasts = notifier.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Connection problem");
    }

    #[test]
    fn test_toggle_voice_twice_restores_flag() {
        let (chat, notifier) = conversation();
        let seeded = chat.message_count();

        assert!(chat.toggle_voice_input());
        assert!(!chat.toggle_voice_input());
        assert!(!chat.is_listening());
        assert_eq!(chat.message_count(), seeded);
        assert!(chat.draft().is_empty());

        let titles: Vec<_> = notifier.drain().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["Voice input activated", "Voice input stopped"]);
    }

    #[test]
    fn test_copy_and_save() {
        let (chat, notifier) = conversation();
        let bot = chat.messages().into_iter().find(Message::is_bot).unwrap();

        assert_eq!(chat.copy(&bot.id).unwrap(), bot.content);
        chat.save(&bot.id).unwrap();
        assert!(matches!(chat.copy("missing"), Err(AppError::NotFound(_))));
        assert!(matches!(chat.save("missing"), Err(AppError::NotFound(_))));

        let titles: Vec<_> = notifier.drain().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["Copied to clipboard", "Saved to Space"]);
    }
}
