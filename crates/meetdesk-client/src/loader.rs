//! Fetching the meeting list and rendering it into the page.

use chrono::{DateTime, TimeZone};
use meetdesk_core::{Agenda, MeetingCounts, MeetingFilter, OutputFormatter};
use tracing::{debug, error};

use crate::api::{ApiResult, MeetingsBackend};
use crate::page::Page;

/// What a successful load rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub filter: MeetingFilter,
    pub counts: MeetingCounts,
    /// Number of blocks rendered.
    pub visible: usize,
    pub agenda: Agenda,
}

/// Fetches the full meeting collection and classifies it against `now`.
pub async fn fetch_agenda<B, Tz>(backend: &B, now: &DateTime<Tz>) -> ApiResult<Agenda>
where
    B: MeetingsBackend + ?Sized,
    Tz: TimeZone,
{
    let meetings = backend.list_meetings().await?;
    Ok(Agenda::build(meetings, now))
}

/// Replaces the container content with the meetings `filter` admits, then
/// updates the counters and the empty state.
///
/// Returns the number of rendered blocks, or `None` without touching the
/// page when it has no container.
pub fn render_agenda(
    page: &mut Page,
    agenda: &Agenda,
    filter: MeetingFilter,
    formatter: &OutputFormatter,
) -> Option<usize> {
    let container = page.container.as_mut()?;
    container.clear();
    for block in formatter.render_blocks(agenda, filter) {
        container.append(block);
    }
    let visible = container.blocks.len();

    let counts = agenda.counts();
    for (counter, value) in [
        (&mut page.total, counts.total),
        (&mut page.upcoming, counts.upcoming),
        (&mut page.past, counts.past),
    ] {
        if let Some(counter) = counter {
            counter.set(value);
        }
    }

    if let Some(empty) = page.empty_state.as_mut() {
        empty.set_visible(visible == 0);
    }

    Some(visible)
}

/// Fetches and renders in one step.
///
/// On any failure the error is logged and the page is left exactly as it
/// was; `None` is returned.
pub async fn load_into<B, Tz>(
    backend: &B,
    page: &mut Page,
    filter: MeetingFilter,
    now: &DateTime<Tz>,
    formatter: &OutputFormatter,
) -> Option<LoadReport>
where
    B: MeetingsBackend + ?Sized,
    Tz: TimeZone,
{
    let agenda = match fetch_agenda(backend, now).await {
        Ok(agenda) => agenda,
        Err(e) => {
            error!(error = %e, "failed to load meetings");
            return None;
        }
    };

    let Some(visible) = render_agenda(page, &agenda, filter, formatter) else {
        error!("page has no meetings container; nothing rendered");
        return None;
    };

    let counts = agenda.counts();
    debug!(
        filter = %filter,
        total = counts.total,
        upcoming = counts.upcoming,
        past = counts.past,
        visible,
        "rendered meetings"
    );

    Some(LoadReport {
        filter,
        counts,
        visible,
        agenda,
    })
}
