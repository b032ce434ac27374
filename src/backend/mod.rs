//! External collaborators.
//!
//! The application only knows these contracts; the bundled implementations in
//! [`mock`] fabricate their results.
//!
//! - [`ConversationalBackend`]: answers a natural-language query
//! - [`AuthProvider`]: turns credentials into a user profile

pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conversation::{Message, MessageMetadata, Metric, Visual};
use crate::error::Result;
use crate::language::Language;

pub use mock::{AcceptAllAuth, MockBackend};

/// Structured answer returned by a conversational backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// Source citation and scope of the answer.
    #[serde(default)]
    pub metadata: MessageMetadata,
    #[serde(default)]
    pub visuals: Vec<Visual>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl Answer {
    /// Convert into a freshly stamped bot message.
    #[must_use]
    pub fn into_message(self) -> Message {
        Message::bot(self.text)
            .with_metadata(self.metadata)
            .with_visuals(self.visuals)
            .with_metrics(self.metrics)
    }
}

/// Answers groundwater questions.
#[async_trait]
pub trait ConversationalBackend: Send + Sync {
    /// Answer `query`, phrased in `language`.
    async fn answer(&self, query: &str, language: Language) -> Result<Answer>;
}

/// Credentials collected by the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signed-in user as shown in the profile menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Initials for the avatar fallback, e.g. "Demo User" -> "DU".
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Verifies credentials.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        let profile = UserProfile {
            name: "asha  rao".to_string(),
            email: "asha@example.org".to_string(),
            avatar: None,
        };
        assert_eq!(profile.initials(), "AR");
    }

    #[test]
    fn test_answer_into_message() {
        let answer = Answer {
            text: "Levels are stable.".to_string(),
            metadata: MessageMetadata {
                source: Some("Test".to_string()),
                ..MessageMetadata::default()
            },
            visuals: Vec::new(),
            metrics: Vec::new(),
        };
        let msg = answer.into_message();
        assert!(msg.is_bot());
        assert_eq!(msg.metadata.unwrap().source.as_deref(), Some("Test"));
    }
}
