//! Chat message records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// Provenance shown as badges under a bot answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl MessageMetadata {
    /// Whether there is anything to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.year.is_none() && self.region.is_none()
    }
}

/// Kind of visual attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualKind {
    Chart,
    Table,
    Map,
}

/// A visual attachment with an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub kind: VisualKind,
    pub data: serde_json::Value,
}

/// Colour hint for a metric tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricTone {
    #[default]
    Neutral,
    Negative,
    Highlight,
}

/// Headline figure rendered as a tile under a bot answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub tone: MetricTone,
}

impl Metric {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>, tone: MetricTone) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone,
        }
    }
}

/// One entry in a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visuals: Vec<Visual>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<Metric>,
}

impl Message {
    /// A user message stamped now.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: None,
            visuals: Vec::new(),
            metrics: Vec::new(),
        }
    }

    /// A bot message stamped now.
    #[must_use]
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            ..Self::user(content)
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }

    #[must_use]
    pub fn with_visuals(mut self, visuals: Vec<Visual>) -> Self {
        self.visuals = visuals;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.role == Role::Bot
    }
}

fn seed_time(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 9, 15)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .map_or_else(Utc::now, |naive| naive.and_utc())
}

/// The Rajasthan exchange every chat screen opens with.
#[must_use]
pub fn seed_messages() -> Vec<Message> {
    let question = Message {
        id: "1".to_string(),
        timestamp: seed_time(10, 0, 0),
        ..Message::user("What is the current groundwater status in Rajasthan for 2023?")
    };

    let answer = Message {
        id: "2".to_string(),
        timestamp: seed_time(10, 0, 30),
        ..Message::bot(
            "Based on the 2023 groundwater assessment data, Rajasthan shows mixed conditions \
             across districts. Overall, 58% of assessment units fall in the \"Safe\" category, \
             23% are in \"Semi-critical\" stage, 12% are \"Critical\", and 7% are \
             \"Over-exploited\". The western districts show better groundwater availability \
             compared to eastern regions.",
        )
    }
    .with_metadata(MessageMetadata {
        source: Some("CGWB Annual Report 2023".to_string()),
        year: Some(2023),
        region: Some("Rajasthan".to_string()),
    })
    .with_visuals(vec![Visual {
        kind: VisualKind::Chart,
        data: serde_json::json!({
            "categories": ["Safe", "Semi-critical", "Critical", "Over-exploited"],
            "values": [58, 23, 12, 7]
        }),
    }]);

    vec![question, answer]
}
