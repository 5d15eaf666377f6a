//! HTTP client for the meetings API.

use std::time::Duration;

use meetdesk_core::Meeting;
use meetdesk_protocol::{
    ApiReply, CSRF_COOKIE, CSRF_HEADER, MEETINGS_PATH, MeetingPatch, NewMeeting, SESSION_COOKIE,
    decode_meeting_list, meeting_path,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, trace, warn};
use url::Url;

use super::error::{ApiError, ApiResult};
use super::{BoxFuture, MeetingsBackend};

/// Cookies identifying the browser session to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    pub csrf_token: Option<String>,
    pub session_id: Option<String>,
}

impl SessionCookies {
    /// Renders the `Cookie` header value, or `None` when nothing is set.
    pub fn header_value(&self) -> Option<String> {
        let pairs: Vec<String> = [
            (CSRF_COOKIE, &self.csrf_token),
            (SESSION_COOKIE, &self.session_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}={v}")))
        .collect();
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }
}

/// Connection settings for [`MeetingsApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin of the meetings server, e.g. `https://tasks.example.com/`.
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
    pub cookies: SessionCookies,
}

impl ApiConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ApiError::configuration(format!("invalid base URL `{base_url}`: {e}")).with_source(e)
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::configuration(format!(
                "base URL `{base_url}` cannot carry a path"
            )));
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(30),
            user_agent: format!("meetdesk/{}", env!("CARGO_PKG_VERSION")),
            cookies: SessionCookies::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cookies(mut self, cookies: SessionCookies) -> Self {
        self.cookies = cookies;
        self
    }
}

/// Client for the meetings REST endpoints.
///
/// Every call is a single attempt; nothing is retried.
pub struct MeetingsApi {
    client: Client,
    config: ApiConfig,
}

impl MeetingsApi {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ApiError::configuration(format!("failed to create HTTP client: {e}")).with_source(e)
            })?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// `GET /meetings/api/meetings/`.
    ///
    /// The body is decoded whatever the status: a JSON error reply carries
    /// no meetings and yields an empty list.
    pub async fn list(&self) -> ApiResult<Vec<Meeting>> {
        let (status, body) = self.send(Method::GET, MEETINGS_PATH, None, None).await?;
        if !status.is_success() {
            warn!(status = %status, "meeting list answered with an error status");
        }
        let meetings = decode_meeting_list(&body).map_err(|e| {
            ApiError::invalid_response(format!("failed to decode meeting list: {e}"))
                .with_status(status)
                .with_source(e)
        })?;
        debug!(count = meetings.len(), "fetched meetings");
        Ok(meetings)
    }

    /// `POST /meetings/api/meetings/`.
    pub async fn create(&self, meeting: &NewMeeting, csrf_token: &str) -> ApiResult<ApiReply> {
        let body = encode(meeting)?;
        let (status, body) = self
            .send(Method::POST, MEETINGS_PATH, Some(body), Some(csrf_token))
            .await?;
        expect_reply(status, &body)
    }

    /// `GET /meetings/api/meetings/{id}/`.
    pub async fn get(&self, id: &str) -> ApiResult<Meeting> {
        let (status, body) = self.send(Method::GET, &meeting_path(id), None, None).await?;
        let reply = expect_reply(status, &body)?;
        reply.meeting.ok_or_else(|| {
            ApiError::invalid_response("reply carries no `meeting` object").with_status(status)
        })
    }

    /// `PUT /meetings/api/meetings/{id}/`.
    pub async fn update(
        &self,
        id: &str,
        patch: &MeetingPatch,
        csrf_token: &str,
    ) -> ApiResult<ApiReply> {
        let body = encode(patch)?;
        let (status, body) = self
            .send(Method::PUT, &meeting_path(id), Some(body), Some(csrf_token))
            .await?;
        expect_reply(status, &body)
    }

    /// `DELETE /meetings/api/meetings/{id}/`.
    pub async fn delete(&self, id: &str, csrf_token: &str) -> ApiResult<ApiReply> {
        let (status, body) = self
            .send(Method::DELETE, &meeting_path(id), None, Some(csrf_token))
            .await?;
        expect_reply(status, &body)
    }

    /// Sends one request and reads the whole body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        csrf_token: Option<&str>,
    ) -> ApiResult<(StatusCode, Vec<u8>)> {
        let url = self.config.base_url.join(path).map_err(|e| {
            ApiError::configuration(format!("invalid request path `{path}`: {e}")).with_source(e)
        })?;

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        if let Some(token) = csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        if let Some(cookie) = self.config.cookies.header_value() {
            request = request.header(COOKIE, cookie);
        }
        if let Some(b) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(b);
        }

        trace!(method = %method, url = %url, "sending request");

        let response = request.send().await.map_err(|e| {
            let what = if e.is_timeout() {
                "request timed out"
            } else {
                "request failed"
            };
            ApiError::network(format!("{what}: {method} {url}")).with_source(e)
        })?;

        let status = response.status();
        trace!(status = %status, "received response");

        let bytes = response.bytes().await.map_err(|e| {
            ApiError::network(format!("failed to read response body: {e}"))
                .with_status(status)
                .with_source(e)
        })?;

        Ok((status, bytes.to_vec()))
    }
}

impl MeetingsBackend for MeetingsApi {
    fn list_meetings(&self) -> BoxFuture<'_, ApiResult<Vec<Meeting>>> {
        Box::pin(self.list())
    }

    fn create_meeting<'a>(
        &'a self,
        meeting: &'a NewMeeting,
        csrf_token: &'a str,
    ) -> BoxFuture<'a, ApiResult<ApiReply>> {
        Box::pin(self.create(meeting, csrf_token))
    }

    fn get_meeting<'a>(&'a self, id: &'a str) -> BoxFuture<'a, ApiResult<Meeting>> {
        Box::pin(self.get(id))
    }

    fn update_meeting<'a>(
        &'a self,
        id: &'a str,
        patch: &'a MeetingPatch,
        csrf_token: &'a str,
    ) -> BoxFuture<'a, ApiResult<ApiReply>> {
        Box::pin(self.update(id, patch, csrf_token))
    }

    fn delete_meeting<'a>(
        &'a self,
        id: &'a str,
        csrf_token: &'a str,
    ) -> BoxFuture<'a, ApiResult<ApiReply>> {
        Box::pin(self.delete(id, csrf_token))
    }
}

fn encode<T: serde::Serialize>(value: &T) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        ApiError::configuration(format!("failed to encode request body: {e}")).with_source(e)
    })
}

/// Decodes a single-object reply; failure unless the status is a success
/// and the reply carries no `error`.
fn expect_reply(status: StatusCode, body: &[u8]) -> ApiResult<ApiReply> {
    let reply = ApiReply::decode(body).map_err(|e| {
        ApiError::invalid_response(format!("response is not JSON: {e}"))
            .with_status(status)
            .with_source(e)
    })?;

    if status.is_success() && reply.error.is_none() {
        return Ok(reply);
    }

    warn!(status = %status, error = ?reply.error, "server reported failure");
    Err(ApiError::from_reply(status, reply.error))
}
