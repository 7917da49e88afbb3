//! Task and schedule entities plus the backend wire format.
//!
//! Timestamps crossing the bridge use the literal pattern
//! `YYYY-MM-DD HH:MM:SS` -- space-separated, whole seconds, no timezone
//! suffix. Internally they are `chrono::NaiveDateTime`; the [`wire_time`]
//! serde module does the conversion at the boundary.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Timestamp pattern used on the bridge wire.
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A to-do item. Identity is the backend-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "wire_time::option")]
    pub due_date: Option<NaiveDateTime>,
}

/// A schedule entry or reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(with = "wire_time")]
    pub start_time: NaiveDateTime,
    #[serde(default, with = "wire_time::option")]
    pub end_time: Option<NaiveDateTime>,
    pub is_reminder: bool,
}

/// Fields for a task the backend has not created yet. The id (and
/// `created_at`) exist only once the backend confirms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "wire_time::option")]
    pub due_date: Option<NaiveDateTime>,
}

/// Fields for a schedule entry the backend has not created yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchedule {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "wire_time")]
    pub start_time: NaiveDateTime,
    #[serde(default, with = "wire_time::option")]
    pub end_time: Option<NaiveDateTime>,
    pub is_reminder: bool,
}

/// Full backend snapshot returned by `get_app_state`, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppStateSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// Parse a wire-format timestamp, surfacing `InvalidInput` on mismatch.
pub fn parse_wire_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, WIRE_TIME_FORMAT).map_err(|e| BridgeError::InvalidInput {
        field: "timestamp",
        message: format!("'{s}' does not match YYYY-MM-DD HH:MM:SS: {e}"),
    })
}

/// Render a timestamp in the wire format, truncated to whole seconds.
pub fn format_wire_time(t: &NaiveDateTime) -> String {
    t.format(WIRE_TIME_FORMAT).to_string()
}

/// Serde adapter for wire-format timestamps.
pub mod wire_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::WIRE_TIME_FORMAT;

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&t.format(WIRE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, WIRE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }

    /// `Option<NaiveDateTime>` variant; absent and `null` both map to `None`.
    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::WIRE_TIME_FORMAT;

        pub fn serialize<S: Serializer>(
            t: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match t {
                Some(t) => serializer.serialize_some(&t.format(WIRE_TIME_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            let s = Option::<String>::deserialize(deserializer)?;
            s.map(|s| {
                NaiveDateTime::parse_from_str(&s, WIRE_TIME_FORMAT)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
        }
    }
}
