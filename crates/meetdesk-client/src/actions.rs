//! Meeting actions: opening the join link.

use meetdesk_core::Meeting;
use tracing::info;

use crate::error::{ClientError, ClientResult};

/// The link `join` would open, if the meeting has a usable one.
pub fn join_target(meeting: &Meeting) -> ClientResult<&str> {
    let link = meeting.join_link().ok_or_else(|| {
        ClientError::Action(format!("meeting '{}' has no meeting link", meeting.title_str()))
    })?;
    let parsed = url::Url::parse(link)
        .map_err(|e| ClientError::Action(format!("invalid meeting link `{link}`: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::Action(format!(
            "refusing to open non-web link `{link}`"
        )));
    }
    Ok(link)
}

/// Opens the meeting link in the default browser.
pub fn open_meeting_link(meeting: &Meeting) -> ClientResult<()> {
    let link = join_target(meeting)?;
    info!(url = %link, "opening meeting link");
    open::that(link).map_err(|e| ClientError::Action(format!("failed to open URL: {e}")))
}
