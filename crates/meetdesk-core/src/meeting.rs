//! Meeting records as served by the meetings API.
//!
//! The server contract is loose: besides the canonical fields
//! (`meeting_date`, `meeting_time`, `description`) some records carry the
//! short names `date`, `time` and `desc`, identifiers may be strings or
//! numbers, and numeric fields sometimes arrive as strings. [`Meeting`]
//! accepts all of these and exposes accessors that apply the fallbacks.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Duration used when the form leaves the field empty.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// A meeting record.
///
/// Every field is optional on the wire. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meeting {
    /// Application identifier, when the server exposes one.
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Storage identifier (`_id`).
    #[serde(
        rename = "_id",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub object_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient_string")]
    pub meeting_date: Option<String>,
    /// Time of day, `HH:MM`.
    #[serde(deserialize_with = "lenient_string")]
    pub meeting_time: Option<String>,
    /// Length in minutes.
    #[serde(deserialize_with = "lenient_int")]
    pub duration: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub meeting_link: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Legacy alias of `meeting_date`.
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    /// Legacy alias of `meeting_time`.
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<String>,
    /// Legacy alias of `description`.
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub desc: Option<String>,
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    /// Server-side hint; not used for classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_past: Option<bool>,
    /// Server-side hint; not used for classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
}

impl Meeting {
    /// Creates a meeting with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Builder method to set the canonical date and time fields.
    pub fn with_schedule(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.meeting_date = Some(date.into());
        self.meeting_time = Some(time.into());
        self
    }

    /// Builder method to set the meeting link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.meeting_link = Some(link.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The identifier to address this meeting by, `id` first then `_id`.
    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.id).or_else(|| non_empty(&self.object_id))
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// `meeting_date`, falling back to `date`, then the empty string.
    pub fn date_str(&self) -> &str {
        first_non_empty(&self.meeting_date, &self.date)
    }

    /// `meeting_time`, falling back to `time`, then the empty string.
    pub fn time_str(&self) -> &str {
        first_non_empty(&self.meeting_time, &self.time)
    }

    /// `description`, falling back to `desc`, then the empty string.
    pub fn description_str(&self) -> &str {
        first_non_empty(&self.description, &self.desc)
    }

    /// The link to join the meeting, if one is set.
    pub fn join_link(&self) -> Option<&str> {
        non_empty(&self.meeting_link)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn first_non_empty<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> &'a str {
    non_empty(primary)
        .or_else(|| non_empty(fallback))
        .unwrap_or_default()
}

/// Accepts strings, numbers and booleans; `{"$oid": "..."}` yields the
/// inner string. Anything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Object(map)) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

/// Accepts integers, floats (truncated) and numeric strings.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
