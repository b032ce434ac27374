//! INGRES AI
//!
//! A conversational front end for India's groundwater data, served as an
//! HTML-first Axum application. Every screen is rendered on the server and
//! every interaction is an HTMX request that mutates per-visitor view state
//! and returns a fragment.
//!
//! # Architecture
//!
//! - **Server**: Axum router with a visitor-cookie middleware and a request timeout
//! - **View state**: one [`context::Visitor`] per browser, holding the shared
//!   [`context::SessionContext`] and each screen's state
//! - **Collaborators**: [`backend::ConversationalBackend`] and
//!   [`backend::AuthProvider`], with mock implementations
//! - **UI**: server-rendered HTML + HTMX
//!
//! # Modules
//!
//! - [`conversation`]: message list, pending reply and its cancellable timer
//! - [`history`]: chat history sidebar
//! - [`shell`]: dashboard routes, panel and header menus
//! - [`login`]: login stub
//! - [`landing`]: landing page demo overlay
//! - [`ui`]: HTML rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
#![allow(clippy::too_many_lines)]

pub mod backend;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod history;
pub mod landing;
pub mod language;
pub mod login;
pub mod notify;
pub mod server;
pub mod shell;
pub mod ui;

use std::fmt;
use std::sync::Arc;

use backend::{AcceptAllAuth, AuthProvider, ConversationalBackend, MockBackend};
use config::AppConfig;
use context::VisitorStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Global configuration.
    pub config: Arc<AppConfig>,
    /// Per-browser view state.
    pub visitors: VisitorStore,
    /// Answers chat questions.
    pub backend: Arc<dyn ConversationalBackend>,
    /// Verifies login credentials.
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// State wired to the bundled mock collaborators.
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_collaborators(config, Arc::new(MockBackend), Arc::new(AcceptAllAuth))
    }

    #[must_use]
    pub fn with_collaborators(
        config: Arc<AppConfig>,
        backend: Arc<dyn ConversationalBackend>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let visitors = VisitorStore::new(config.default_language());
        Self {
            config,
            visitors,
            backend,
            auth,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("visitors", &self.visitors.len())
            .finish()
    }
}
