//! Landing page demo overlay.

use crate::conversation::{Message, Metric, MetricTone};
use crate::language::{DemoStrings, demo_strings};

/// Relative time shown under every demo message.
pub const DEMO_TIMESTAMP: &str = "2 min ago";

/// State of the "Try Live Demo" overlay.
///
/// The demo never talks to a backend: sending only clears the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoOverlay {
    pub open: bool,
    pub hindi: bool,
    pub listening: bool,
    pub draft: String,
}

impl DemoOverlay {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Switch between English and Hindi.
    pub fn toggle_language(&mut self) -> bool {
        self.hindi = !self.hindi;
        self.hindi
    }

    /// Flip the microphone indicator. No audio is captured.
    pub fn toggle_listening(&mut self) -> bool {
        self.listening = !self.listening;
        self.listening
    }

    #[must_use]
    pub fn strings(&self) -> &'static DemoStrings {
        demo_strings(self.hindi)
    }

    /// The fixed exchange shown in the overlay, in the current language.
    #[must_use]
    pub fn sample_messages(&self) -> Vec<Message> {
        let strings = self.strings();
        vec![
            Message::user(strings.sample_question),
            Message::bot(strings.sample_answer).with_metrics(vec![
                Metric::new("Current Level", "18.5m", MetricTone::Neutral),
                Metric::new("Annual Change", "-2.3m", MetricTone::Negative),
                Metric::new("Status", "Critical", MetricTone::Highlight),
            ]),
        ]
    }

    /// Fill the input with the suggested query at `index`.
    pub fn pick_suggestion(&mut self, index: usize) -> Option<&'static str> {
        let query = self.strings().queries.get(index).copied()?;
        self.draft = query.to_string();
        Some(query)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Returns whether anything was "sent".
    pub fn send(&mut self) -> bool {
        if self.draft.trim().is_empty() {
            return false;
        }
        self.draft.clear();
        true
    }
}
