//! Mock conversation screen.
//!
//! A [`Conversation`] owns an append-only list of [`Message`]s. Submitting a
//! question appends it immediately and schedules one canned bot reply after a
//! fixed delay. The scheduled reply is tied to the conversation's lifetime:
//! disposing or dropping the conversation cancels it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use ingres_ai::backend::MockBackend;
//! use ingres_ai::conversation::Conversation;
//! use ingres_ai::language::Language;
//! use ingres_ai::notify::Notifier;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let chat = Conversation::new(Arc::new(MockBackend), Notifier::new(), Duration::from_millis(10));
//! let before = chat.message_count();
//!
//! chat.submit("How much water is left in Rajasthan?", Language::En).unwrap();
//! assert_eq!(chat.message_count(), before + 1);
//! assert!(chat.is_pending());
//! # }
//! ```

mod message;
mod thread;

pub use message::{
    Message, MessageMetadata, Metric, MetricTone, Role, Visual, VisualKind, seed_messages,
};
pub use thread::Conversation;
