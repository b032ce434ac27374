//! Fabricated collaborators used until real services exist.

use async_trait::async_trait;

use super::{Answer, AuthProvider, ConversationalBackend, Credentials, UserProfile};
use crate::conversation::MessageMetadata;
use crate::error::Result;
use crate::language::Language;

const CANNED_REPLY: &str = "I understand you're asking about groundwater data. This is a mock \
    response demonstrating the chat interface. In the production version, this would connect to \
    the INGRES AI backend to provide real insights about groundwater conditions, trends, and \
    forecasts.";

/// Returns the same answer for every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBackend;

#[async_trait]
impl ConversationalBackend for MockBackend {
    async fn answer(&self, query: &str, language: Language) -> Result<Answer> {
        tracing::debug!(
            query_length = query.len(),
            language = language.code(),
            "Mock backend answering"
        );
        Ok(Answer {
            text: CANNED_REPLY.to_string(),
            metadata: MessageMetadata {
                source: Some("INGRES AI Analysis".to_string()),
                year: Some(2025),
                region: None,
            },
            visuals: Vec::new(),
            metrics: Vec::new(),
        })
    }
}

/// Accepts any credentials, including empty ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllAuth;

#[async_trait]
impl AuthProvider for AcceptAllAuth {
    async fn authenticate(&self, credentials: &Credentials) -> Result<UserProfile> {
        let email = credentials.email.trim();
        let name = match credentials.full_name.trim() {
            "" => email
                .split('@')
                .next()
                .filter(|local| !local.is_empty())
                .unwrap_or("Demo User")
                .to_string(),
            full => full.to_string(),
        };

        tracing::info!(user = %name, "Mock sign-in accepted");
        Ok(UserProfile {
            name,
            email: if email.is_empty() {
                "demo@ingres.ai".to_string()
            } else {
                email.to_string()
            },
            avatar: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answer_ignores_query() {
        let backend = MockBackend;
        let a = backend.answer("Punjab?", Language::En).await.unwrap();
        let b = backend.answer("", Language::Hi).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.metadata.year, Some(2025));
    }

    #[tokio::test]
    async fn test_accept_all_with_empty_fields() {
        let profile = AcceptAllAuth
            .authenticate(&Credentials::default())
            .await
            .unwrap();
        assert_eq!(profile.name, "Demo User");
        assert_eq!(profile.initials(), "DU");
    }

    #[tokio::test]
    async fn test_accept_all_prefers_full_name() {
        let creds = Credentials {
            full_name: "Meera Patil".to_string(),
            email: "meera@example.org".to_string(),
            password: String::new(),
        };
        let profile = AcceptAllAuth.authenticate(&creds).await.unwrap();
        assert_eq!(profile.name, "Meera Patil");

        let creds = Credentials {
            full_name: String::new(),
            ..creds
        };
        let profile = AcceptAllAuth.authenticate(&creds).await.unwrap();
        assert_eq!(profile.name, "meera");
    }
}
