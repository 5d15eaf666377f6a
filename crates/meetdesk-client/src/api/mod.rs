//! Access to the meetings REST API.
//!
//! [`MeetingsBackend`] is the seam the page controller talks to; the HTTP
//! implementation is [`MeetingsApi`].

mod client;
mod error;

use std::future::Future;
use std::pin::Pin;

use meetdesk_core::Meeting;
use meetdesk_protocol::{ApiReply, MeetingPatch, NewMeeting};

pub use client::{ApiConfig, MeetingsApi, SessionCookies};
pub use error::{ApiError, ApiErrorCode, ApiResult};

/// A boxed future for async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Operations of the meetings service.
///
/// Each call is one request. Mutating calls take the CSRF token to send in
/// the `X-CSRFToken` header. Replies carrying an `error` member, and
/// non-success statuses, come back as [`ApiError`].
pub trait MeetingsBackend: Send + Sync {
    /// Fetches all meetings of the session's user.
    fn list_meetings(&self) -> BoxFuture<'_, ApiResult<Vec<Meeting>>>;

    /// Creates a meeting.
    fn create_meeting<'a>(
        &'a self,
        meeting: &'a NewMeeting,
        csrf_token: &'a str,
    ) -> BoxFuture<'a, ApiResult<ApiReply>>;

    /// Fetches one meeting.
    fn get_meeting<'a>(&'a self, id: &'a str) -> BoxFuture<'a, ApiResult<Meeting>>;

    /// Updates the given fields of one meeting.
    fn update_meeting<'a>(
        &'a self,
        id: &'a str,
        patch: &'a MeetingPatch,
        csrf_token: &'a str,
    ) -> BoxFuture<'a, ApiResult<ApiReply>>;

    /// Deletes one meeting.
    fn delete_meeting<'a>(
        &'a self,
        id: &'a str,
        csrf_token: &'a str,
    ) -> BoxFuture<'a, ApiResult<ApiReply>>;
}
