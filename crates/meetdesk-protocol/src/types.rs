//! Request and response bodies of the meetings API.

use meetdesk_core::Meeting;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};

/// Duration sent with a new meeting.
///
/// `Invalid` stands for form input with no integer prefix; it is still sent,
/// as JSON `null`, and the server decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationField {
    Minutes(i64),
    Invalid,
}

impl DurationField {
    pub fn minutes(&self) -> Option<i64> {
        match self {
            Self::Minutes(m) => Some(*m),
            Self::Invalid => None,
        }
    }
}

impl Serialize for DurationField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Minutes(m) => serializer.serialize_i64(*m),
            Self::Invalid => serializer.serialize_none(),
        }
    }
}

/// Body of `POST /meetings/api/meetings/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMeeting {
    pub title: String,
    pub category: String,
    pub meeting_date: String,
    pub meeting_time: String,
    pub duration: DurationField,
    pub meeting_link: String,
    pub description: String,
}

/// Body of `PUT /meetings/api/meetings/{id}/`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MeetingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MeetingPatch {
    /// Returns true if no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The generic JSON object the server answers with for single-meeting
/// operations and failures: `{ message?, error?, meeting? }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiReply {
    pub message: Option<String>,
    /// The server's failure text, if the reply carries a truthy `error`.
    pub error: Option<String>,
    pub meeting: Option<Meeting>,
}

impl ApiReply {
    /// Decodes a reply body.
    ///
    /// Any JSON value is accepted; non-objects carry no fields. A `meeting`
    /// member that is not an object is ignored.
    pub fn decode(body: &[u8]) -> ProtocolResult<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(map) = value else {
            return Ok(Self::default());
        };

        let message = map.get("message").and_then(text_of);
        let error = map.get("error").filter(|v| is_truthy(v)).and_then(text_of);
        let meeting = match map.get("meeting") {
            Some(v @ Value::Object(_)) => Some(serde_json::from_value(v.clone())?),
            _ => None,
        };

        Ok(Self {
            message,
            error,
            meeting,
        })
    }
}

/// Decodes the body of `GET /meetings/api/meetings/` into a flat list.
///
/// Accepted shapes, checked in order:
/// - an object whose `meetings` member is truthy; the member must then be
///   an array
/// - a bare array
///
/// Any other value yields an empty list.
pub fn decode_meeting_list(body: &[u8]) -> ProtocolResult<Vec<Meeting>> {
    let value: Value = serde_json::from_slice(body)?;
    let items = match value {
        Value::Object(mut map) => match map.remove("meetings") {
            Some(Value::Array(items)) => items,
            Some(other) if is_truthy(&other) => {
                return Err(ProtocolError::UnexpectedShape(format!(
                    "`meetings` is {}, expected an array",
                    type_name(&other)
                )));
            }
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => Ok(serde_json::from_value(item)?),
            other => Err(ProtocolError::UnexpectedShape(format!(
                "meeting entry is {}, expected an object",
                type_name(&other)
            ))),
        })
        .collect()
}

/// Mirrors JSON truthiness as the page script sees it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
