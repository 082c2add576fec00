use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `stream_id -> unmute_at` as persisted: epoch seconds, fractional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuteTable(HashMap<String, f64>);

impl MuteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the mute for `stream_id` ends. A stored value that is not a valid
    /// timestamp reads as already expired.
    pub fn get(&self, stream_id: &str) -> Option<DateTime<Utc>> {
        self.0
            .get(stream_id)
            .map(|secs| from_epoch_seconds(*secs).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }

    /// Insert or overwrite the entry for `stream_id`
    pub fn insert(&mut self, stream_id: &str, unmute_at: DateTime<Utc>) {
        self.0
            .insert(stream_id.to_string(), to_epoch_seconds(unmute_at));
    }

    /// Returns whether an entry was present
    pub fn remove(&mut self, stream_id: &str) -> bool {
        self.0.remove(stream_id).is_some()
    }

    pub fn contains(&self, stream_id: &str) -> bool {
        self.0.contains_key(stream_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn to_epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}

fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
}
