//! Reading the add-meeting form and submitting it.

use meetdesk_core::DEFAULT_DURATION_MINUTES;
use meetdesk_protocol::{ApiReply, DurationField, NewMeeting};
use tracing::{error, info, warn};

use crate::api::{ApiError, MeetingsBackend};
use crate::page::{FieldId, MeetingForm};

pub const CREATED_MESSAGE: &str = "Meeting scheduled successfully";
pub const REJECTED_FALLBACK: &str = "Failed to create meeting";
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

/// Parses the leading integer of `s`: optional whitespace, an optional sign,
/// then decimal digits, or hex digits after a `0x`/`0X` prefix. Anything
/// after the digits is ignored.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits = rest
        .bytes()
        .take_while(|b| char::from(*b).is_digit(radix))
        .count();
    if digits == 0 {
        return None;
    }
    let magnitude = i64::from_str_radix(&rest[..digits], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Reads the duration input: empty means the default, otherwise the
/// integer prefix. Input with no integer prefix is still sent.
pub fn parse_duration(raw: &str) -> DurationField {
    if raw.is_empty() {
        return DurationField::Minutes(DEFAULT_DURATION_MINUTES);
    }
    match parse_int_prefix(raw) {
        Some(minutes) => DurationField::Minutes(minutes),
        None => {
            warn!(input = raw, "duration has no integer value; sending null");
            DurationField::Invalid
        }
    }
}

/// Builds the request body from the form's current values.
pub fn read_payload(form: &MeetingForm) -> NewMeeting {
    NewMeeting {
        title: form.value(FieldId::Title).trim().to_string(),
        category: form.value(FieldId::Category).to_string(),
        meeting_date: form.value(FieldId::Date).to_string(),
        meeting_time: form.value(FieldId::Time).to_string(),
        duration: parse_duration(form.value(FieldId::Duration)),
        meeting_link: form.value(FieldId::Link).trim().to_string(),
        description: form.value(FieldId::Description).trim().to_string(),
    }
}

/// Result of one submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The server accepted the meeting.
    Created(ApiReply),
    /// The server answered with a failure; carries the text to show.
    Rejected(String),
    /// No usable answer was obtained; carries the diagnostic.
    Failed(String),
}

impl SubmitOutcome {
    /// Text shown to the user for this outcome.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Created(_) => CREATED_MESSAGE,
            Self::Rejected(text) => text,
            Self::Failed(_) => SERVER_ERROR_MESSAGE,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Sends `payload` once and classifies the answer.
///
/// A missing CSRF token fails before anything is sent.
pub async fn submit<B>(backend: &B, payload: &NewMeeting, csrf_token: Option<&str>) -> SubmitOutcome
where
    B: MeetingsBackend + ?Sized,
{
    let Some(token) = csrf_token else {
        error!("page has no csrfmiddlewaretoken input; not submitting");
        return SubmitOutcome::Failed("missing CSRF token".to_string());
    };

    match backend.create_meeting(payload, token).await {
        Ok(reply) => {
            info!(title = %payload.title, "meeting created");
            SubmitOutcome::Created(reply)
        }
        Err(e) => classify_failure(e),
    }
}

fn classify_failure(e: ApiError) -> SubmitOutcome {
    if e.is_transport() {
        error!(error = %e, "meeting submit failed");
        SubmitOutcome::Failed(e.to_string())
    } else {
        warn!(error = %e, "server rejected meeting");
        SubmitOutcome::Rejected(e.user_message(REJECTED_FALLBACK).to_string())
    }
}
