use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freeform piece of page copy addressed by a dotted key ("hero.title").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnippet {
    pub id: String,
    pub key: String,
    pub value: String,
    /// Stored as `type` in the backing store
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_kind() -> String {
    "text".to_string()
}

impl ContentSnippet {
    /// New text snippet stamped with the current time
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            key: key.into(),
            value: value.into(),
            kind: default_kind(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the value and bump `updated_at`, keeping identity
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.updated_at = Utc::now();
        self
    }
}
