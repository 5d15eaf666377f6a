//! Endpoints and request/response types for the meetings REST API.
//!
//! # Endpoints
//!
//! - `GET  /meetings/api/meetings/`: the caller's meetings, either
//!   `{ "meetings": [...] }` or a bare array
//! - `POST /meetings/api/meetings/`: create from a [`NewMeeting`] body
//! - `GET | PUT | DELETE /meetings/api/meetings/{id}/`: single meeting
//!
//! State-changing requests carry the session's CSRF token in
//! [`CSRF_HEADER`]. Failures answer with `{ "error": "..." }`.
//!
//! # Example
//!
//! ```rust
//! use meetdesk_protocol::{decode_meeting_list, meeting_path};
//!
//! let meetings = decode_meeting_list(br#"{"meetings":[{"title":"Sync"}]}"#).unwrap();
//! assert_eq!(meetings[0].title_str(), "Sync");
//! assert_eq!(meeting_path("42"), "/meetings/api/meetings/42/");
//! ```

mod error;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use types::{ApiReply, DurationField, MeetingPatch, NewMeeting, decode_meeting_list};

/// Collection endpoint.
pub const MEETINGS_PATH: &str = "/meetings/api/meetings/";

/// Header carrying the CSRF token on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Name of the hidden form input holding the CSRF token.
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";

/// Cookie names of the server session.
pub const CSRF_COOKIE: &str = "csrftoken";
pub const SESSION_COOKIE: &str = "sessionid";

/// Path of a single meeting; the identifier is percent-encoded.
pub fn meeting_path(id: &str) -> String {
    format!("{MEETINGS_PATH}{}/", urlencoding::encode(id))
}
