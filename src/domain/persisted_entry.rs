use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One archived prescription. The payload is kept exactly as the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedEntry {
    pub prescription: serde_json::Value,
    pub timestamp: String,
}

impl PersistedEntry {
    pub fn new(prescription: serde_json::Value, saved_at: DateTime<Utc>) -> Self {
        Self {
            prescription,
            timestamp: saved_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
