//! Per-visitor context and screen state.
//!
//! Every browser gets a [`Visitor`], identified by a cookie. The visitor owns
//! the explicit [`SessionContext`] shared by all screens plus each screen's
//! own state. Screens never reach into each other's state.
//!
//! # Architecture
//!
//! - [`SessionContext`]: signed-in user and display language
//! - [`Visitor`]: cloneable handle to one browser's state
//! - [`VisitorStore`]: thread-safe map of all live visitors

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::{ConversationalBackend, UserProfile};
use crate::conversation::Conversation;
use crate::history::SessionList;
use crate::landing::DemoOverlay;
use crate::language::Language;
use crate::login::LoginForm;
use crate::notify::Notifier;
use crate::shell::ShellState;

/// Name of the cookie carrying the visitor id.
pub const VISITOR_COOKIE: &str = "ingres_visitor";

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Ambient state visible to every screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user: Option<UserProfile>,
    pub language: Language,
}

/// The mounted chat page: conversation plus history sidebar.
#[derive(Debug, Clone)]
pub struct ChatScreen {
    pub conversation: Conversation,
    pub history: SessionList,
}

/// Cloneable handle to one visitor.
#[derive(Debug, Clone)]
pub struct Visitor {
    inner: Arc<VisitorInner>,
}

#[derive(Debug)]
struct VisitorInner {
    id: String,
    created_at: DateTime<Utc>,
    last_activity: RwLock<DateTime<Utc>>,
    context: RwLock<SessionContext>,
    shell: RwLock<ShellState>,
    demo: RwLock<DemoOverlay>,
    login: RwLock<LoginForm>,
    chat: RwLock<Option<ChatScreen>>,
    notifier: Notifier,
}

impl Visitor {
    fn new(id: String, language: Language) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(VisitorInner {
                id,
                created_at: now,
                last_activity: RwLock::new(now),
                context: RwLock::new(SessionContext {
                    user: None,
                    language,
                }),
                shell: RwLock::new(ShellState::default()),
                demo: RwLock::new(DemoOverlay::default()),
                login: RwLock::new(LoginForm::default()),
                chat: RwLock::new(None),
                notifier: Notifier::new(),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Toast queue for this visitor.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    #[must_use]
    pub fn context(&self) -> SessionContext {
        read(&self.inner.context).clone()
    }

    #[must_use]
    pub fn language(&self) -> Language {
        read(&self.inner.context).language
    }

    pub fn set_language(&self, language: Language) {
        write(&self.inner.context).language = language;
        self.touch();
    }

    pub fn sign_in(&self, user: UserProfile) {
        write(&self.inner.context).user = Some(user);
        self.touch();
    }

    /// Forget the user and tear down the dashboard screens.
    pub fn sign_out(&self) {
        write(&self.inner.context).user = None;
        *write(&self.inner.shell) = ShellState::default();
        self.unmount_chat();
    }

    /// Run `f` against the shell state.
    pub fn with_shell<R>(&self, f: impl FnOnce(&mut ShellState) -> R) -> R {
        self.touch();
        f(&mut write(&self.inner.shell))
    }

    pub fn with_demo<R>(&self, f: impl FnOnce(&mut DemoOverlay) -> R) -> R {
        self.touch();
        f(&mut write(&self.inner.demo))
    }

    pub fn with_login<R>(&self, f: impl FnOnce(&mut LoginForm) -> R) -> R {
        self.touch();
        f(&mut write(&self.inner.login))
    }

    /// Mount a fresh chat screen, disposing the previous one.
    pub fn mount_chat(
        &self,
        backend: Arc<dyn ConversationalBackend>,
        reply_delay: Duration,
    ) -> Conversation {
        let conversation = Conversation::new(backend, self.inner.notifier.clone(), reply_delay);
        let screen = ChatScreen {
            conversation: conversation.clone(),
            history: SessionList::default(),
        };

        let previous = write(&self.inner.chat).replace(screen);
        if let Some(old) = previous {
            old.conversation.dispose();
        }

        tracing::debug!(
            visitor_id = %self.inner.id,
            conversation_id = %conversation.id(),
            "Chat screen mounted"
        );
        self.touch();
        conversation
    }

    /// Dispose the chat screen, if any.
    pub fn unmount_chat(&self) {
        if let Some(old) = write(&self.inner.chat).take() {
            old.conversation.dispose();
        }
    }

    /// The mounted conversation.
    #[must_use]
    pub fn conversation(&self) -> Option<Conversation> {
        self.touch();
        read(&self.inner.chat)
            .as_ref()
            .map(|screen| screen.conversation.clone())
    }

    /// Run `f` against the mounted history sidebar.
    pub fn with_history<R>(&self, f: impl FnOnce(&mut SessionList) -> R) -> Option<R> {
        self.touch();
        write(&self.inner.chat)
            .as_mut()
            .map(|screen| f(&mut screen.history))
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    fn touch(&self) {
        *write(&self.inner.last_activity) = Utc::now();
    }

    /// Whether the visitor has been idle for at least `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *read(&self.inner.last_activity);
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle >= timeout)
    }
}

/// Thread-safe store for visitors.
#[derive(Debug, Clone)]
pub struct VisitorStore {
    inner: Arc<VisitorStoreInner>,
}

#[derive(Debug)]
struct VisitorStoreInner {
    visitors: RwLock<HashMap<String, Visitor>>,
    default_language: Language,
}

impl Default for VisitorStore {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl VisitorStore {
    #[must_use]
    pub fn new(default_language: Language) -> Self {
        Self {
            inner: Arc::new(VisitorStoreInner {
                visitors: RwLock::new(HashMap::new()),
                default_language,
            }),
        }
    }

    /// Create a visitor with a fresh id.
    #[must_use]
    pub fn create(&self) -> Visitor {
        let visitor = Visitor::new(Uuid::new_v4().to_string(), self.inner.default_language);
        write(&self.inner.visitors).insert(visitor.id().to_string(), visitor.clone());
        tracing::debug!(visitor_id = %visitor.id(), "Visitor created");
        visitor
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Visitor> {
        read(&self.inner.visitors).get(id).cloned()
    }

    /// Look up `id`, or create a new visitor with a fresh id.
    ///
    /// Unknown ids are never adopted, so a client cannot pick its own id.
    #[must_use]
    pub fn get_or_create(&self, id: Option<&str>) -> Visitor {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| self.create())
    }

    /// Remove a visitor and dispose its screens.
    pub fn remove(&self, id: &str) -> Option<Visitor> {
        let removed = write(&self.inner.visitors).remove(id);
        if let Some(visitor) = &removed {
            visitor.unmount_chat();
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.inner.visitors).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove visitors idle longer than `timeout`.
    ///
    /// Returns the number of visitors removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let expired: Vec<Visitor> = {
            let mut guard = write(&self.inner.visitors);
            let ids: Vec<String> = guard
                .iter()
                .filter(|(_, v)| v.is_expired_with_timeout(timeout))
                .map(|(id, _)| id.clone())
                .collect();
            ids.iter().filter_map(|id| guard.remove(id)).collect()
        };

        for visitor in &expired {
            tracing::debug!(
                visitor_id = %visitor.id(),
                age_secs = (Utc::now() - visitor.created_at()).num_seconds(),
                "Visitor evicted"
            );
            visitor.unmount_chat();
        }
        expired.len()
    }

    /// Periodically evict idle visitors until the runtime shuts down.
    pub fn spawn_sweeper(&self, idle_timeout: Duration, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired_with_timeout(idle_timeout);
                if removed > 0 {
                    tracing::info!(
                        name: "visitors.swept",
                        removed,
                        remaining = store.len(),
                        "Idle visitors evicted"
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    #[test]
    fn test_visitor_store() {
        let store = VisitorStore::new(Language::Hi);
        assert!(store.is_empty());

        let visitor = store.create();
        assert_eq!(store.len(), 1);
        assert_eq!(visitor.language(), Language::Hi);

        let again = store.get_or_create(Some(visitor.id()));
        assert_eq!(again.id(), visitor.id());

        let stranger = store.get_or_create(Some("made-up"));
        assert_ne!(stranger.id(), "made-up");
        assert_eq!(store.len(), 2);

        store.remove(visitor.id());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_created_at_survives_activity() {
        let store = VisitorStore::default();
        let visitor = store.create();
        let created = visitor.created_at();
        assert!(created <= Utc::now());

        let again = store.get(visitor.id()).unwrap();
        assert_eq!(again.created_at(), created);
        assert!(*read(&again.inner.last_activity) >= created);
    }

    #[test]
    fn test_context_is_shared_across_handles() {
        let store = VisitorStore::default();
        let visitor = store.create();
        let other_handle = store.get(visitor.id()).unwrap();

        visitor.set_language(Language::Mr);
        assert_eq!(other_handle.context().language, Language::Mr);
        assert!(other_handle.context().user.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_disposes_previous_conversation() {
        let store = VisitorStore::default();
        let visitor = store.create();

        let first = visitor.mount_chat(Arc::new(MockBackend), Duration::from_millis(1500));
        first.submit("Rajasthan?", Language::En).unwrap();

        let second = visitor.mount_chat(Arc::new(MockBackend), Duration::from_millis(1500));
        assert!(first.is_disposed());
        assert!(!second.is_disposed());

        let before = first.message_count();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(first.message_count(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_expired_disposes_chat() {
        let store = VisitorStore::default();
        let visitor = store.create();
        let chat = visitor.mount_chat(Arc::new(MockBackend), Duration::from_millis(1500));

        assert_eq!(store.cleanup_expired_with_timeout(Duration::from_secs(3600)), 0);
        assert_eq!(store.cleanup_expired_with_timeout(Duration::ZERO), 1);
        assert!(store.is_empty());
        assert!(chat.is_disposed());
    }

    #[test]
    fn test_sign_out_clears_user_and_chat() {
        let store = VisitorStore::default();
        let visitor = store.create();
        visitor.sign_in(UserProfile {
            name: "Demo User".to_string(),
            email: "demo@ingres.ai".to_string(),
            avatar: None,
        });
        visitor.with_shell(ShellState::toggle_panel);

        visitor.sign_out();
        assert!(visitor.context().user.is_none());
        assert!(!visitor.with_shell(|s| s.panel_open));
        assert!(visitor.conversation().is_none());
    }

    #[test]
    fn test_history_requires_mounted_chat() {
        let store = VisitorStore::default();
        let visitor = store.create();
        assert!(visitor.with_history(|h| h.filter("").len()).is_none());
    }
}
