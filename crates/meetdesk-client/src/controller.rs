//! The meetings page controller.
//!
//! [`MeetingsController`] owns the [`Page`] and is the only code that
//! mutates it. User input arrives as [`UiEvent`]s; changes to the meeting
//! collection travel over the [`MeetingsBus`], and the controller's list
//! view reloads (unfiltered) whenever one arrives.

use std::sync::Arc;

use meetdesk_core::{Clock, Meeting, MeetingFilter, OutputFormatter, SystemClock};
use meetdesk_protocol::{ApiReply, MeetingPatch};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::MeetingsBackend;
use crate::bus::{ChangeReason, MeetingsBus, MeetingsChanged};
use crate::error::{ClientError, ClientResult};
use crate::form::{self, SubmitOutcome};
use crate::loader::{self, LoadReport};
use crate::notify::{ConsoleNotifier, Notifier};
use crate::page::{FieldId, Page};
use crate::tabs::{self, TabSwitch};

/// Input from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A `.tab-btn` was clicked; carries its `data-tab`.
    TabClicked(String),
    /// A `.meeting-filter-btn` was clicked; carries its `data-filter`.
    FilterClicked(String),
    /// A form input changed.
    FieldEdited { field: FieldId, value: String },
    /// The add-meeting form was submitted.
    Submit,
    /// Stop the event loop.
    Shutdown,
}

pub struct MeetingsController<B> {
    backend: B,
    page: Page,
    bus: MeetingsBus,
    changes: Option<broadcast::Receiver<MeetingsChanged>>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    formatter: OutputFormatter,
    filter: MeetingFilter,
    last_load: Option<LoadReport>,
}

impl<B: MeetingsBackend> MeetingsController<B> {
    pub fn new(backend: B, page: Page, bus: MeetingsBus) -> Self {
        let changes = Some(bus.subscribe());
        Self {
            backend,
            page,
            bus,
            changes,
            notifier: Arc::new(ConsoleNotifier),
            clock: Arc::new(SystemClock),
            formatter: OutputFormatter::default(),
            filter: MeetingFilter::All,
            last_load: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_formatter(mut self, formatter: OutputFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn bus(&self) -> &MeetingsBus {
        &self.bus
    }

    /// Filter of the most recent load attempt.
    pub fn filter(&self) -> MeetingFilter {
        self.filter
    }

    /// The last load that rendered.
    pub fn last_load(&self) -> Option<&LoadReport> {
        self.last_load.as_ref()
    }

    /// Page setup: tabs keep their markup state, then the initial load.
    pub async fn start(&mut self) -> Option<&LoadReport> {
        debug!(
            tabs = self.page.tab_buttons.len(),
            filters = self.page.filter_buttons.len(),
            "page ready"
        );
        self.load(MeetingFilter::All).await
    }

    pub fn click_tab(&mut self, tab: &str) -> TabSwitch {
        tabs::activate_tab(&mut self.page, tab)
    }

    /// Selects a filter button and reloads with its filter.
    ///
    /// Tags other than `upcoming` and `past` load everything. Tags with no
    /// button on the page are ignored.
    pub async fn click_filter(&mut self, tag: &str) -> Option<&LoadReport> {
        if !tabs::select_filter(&mut self.page, tag) {
            debug!(tag, "no filter button for tag");
            return None;
        }
        self.load(MeetingFilter::from_tag(tag)).await
    }

    /// Sets a form input. Ignored when the page has no form.
    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        if let Some(form) = self.page.form.as_mut() {
            form.set(field, value);
        }
    }

    /// Submits the add-meeting form once.
    ///
    /// The outcome's message is shown to the user. On success the form is
    /// reset and [`ChangeReason::Created`] is published; otherwise the form
    /// keeps its values. Returns `None` when the page has no form.
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let payload = form::read_payload(self.page.form.as_ref()?);
        let outcome =
            form::submit(&self.backend, &payload, self.page.csrf_token.as_deref()).await;

        self.notifier.alert(outcome.user_message());

        if let SubmitOutcome::Created(ref reply) = outcome {
            if let Some(form) = self.page.form.as_mut() {
                form.reset();
            }
            let mut change = MeetingsChanged::new(ChangeReason::Created);
            if let Some(id) = reply.meeting.as_ref().and_then(Meeting::identifier) {
                change = change.with_meeting_id(id);
            }
            self.bus.publish(change);
        }

        Some(outcome)
    }

    /// Fetches the collection and re-renders the list with `filter`.
    ///
    /// Failures are logged and leave the page untouched.
    pub async fn load(&mut self, filter: MeetingFilter) -> Option<&LoadReport> {
        self.filter = filter;
        let now = self.clock.now();
        let report =
            loader::load_into(&self.backend, &mut self.page, filter, &now, &self.formatter).await?;
        self.last_load = Some(report);
        self.last_load.as_ref()
    }

    /// Reloads once if any change arrived on the bus since the last check.
    ///
    /// Returns the number of changes consumed.
    pub async fn process_pending_changes(&mut self) -> usize {
        let Some(changes) = self.changes.as_mut() else {
            return 0;
        };

        let mut seen = 0;
        loop {
            match changes.try_recv() {
                Ok(change) => {
                    debug!(reason = ?change.reason, "pending meetings change");
                    seen += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    seen += skipped as usize;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if seen > 0 {
            self.load(MeetingFilter::All).await;
        }
        seen
    }

    pub async fn get_meeting(&self, id: &str) -> ClientResult<Meeting> {
        Ok(self.backend.get_meeting(id).await?)
    }

    /// Sends `patch` for meeting `id` and publishes [`ChangeReason::Updated`].
    pub async fn update_meeting(&mut self, id: &str, patch: &MeetingPatch) -> ClientResult<ApiReply> {
        if patch.is_empty() {
            return Err(ClientError::InvalidInput("nothing to update".to_string()));
        }
        let token = self.csrf_token()?;
        let reply = self.backend.update_meeting(id, patch, token).await?;
        info!(id, "meeting updated");
        self.bus
            .publish(MeetingsChanged::new(ChangeReason::Updated).with_meeting_id(id));
        Ok(reply)
    }

    /// Deletes meeting `id` and publishes [`ChangeReason::Deleted`].
    pub async fn delete_meeting(&mut self, id: &str) -> ClientResult<ApiReply> {
        let token = self.csrf_token()?;
        let reply = self.backend.delete_meeting(id, token).await?;
        info!(id, "meeting deleted");
        self.bus
            .publish(MeetingsChanged::new(ChangeReason::Deleted).with_meeting_id(id));
        Ok(reply)
    }

    fn csrf_token(&self) -> ClientResult<&str> {
        self.page
            .csrf_token
            .as_deref()
            .ok_or_else(|| ClientError::Config("no CSRF token available".to_string()))
    }

    /// Handles one user event.
    pub async fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::TabClicked(tab) => {
                self.click_tab(&tab);
            }
            UiEvent::FilterClicked(tag) => {
                self.click_filter(&tag).await;
            }
            UiEvent::FieldEdited { field, value } => self.set_field(field, value),
            UiEvent::Submit => {
                self.submit().await;
            }
            UiEvent::Shutdown => {}
        }
    }

    /// Runs the page: initial load, then user events and bus changes until
    /// [`UiEvent::Shutdown`] or until every event sender is dropped.
    ///
    /// Bus changes are taken before user input, so a submit's reload happens
    /// before the next event is handled.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UiEvent>) {
        let mut changes = self.changes.take().unwrap_or_else(|| self.bus.subscribe());

        info!("meetings page started");
        self.start().await;

        loop {
            tokio::select! {
                biased;

                change = changes.recv() => match change {
                    Ok(change) => {
                        debug!(reason = ?change.reason, "reloading after change");
                        self.load(MeetingFilter::All).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "missed meetings changes; reloading");
                        self.load(MeetingFilter::All).await;
                    }
                    Err(RecvError::Closed) => break,
                },
                event = events.recv() => match event {
                    Some(UiEvent::Shutdown) | None => break,
                    Some(event) => self.handle(event).await,
                },
            }
        }

        info!("meetings page stopped");
        self.changes = Some(changes);
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{Local, TimeZone};
    use meetdesk_core::{FixedClock, NO_DESCRIPTION};
    use meetdesk_protocol::{DurationField, NewMeeting};
    use reqwest::StatusCode;

    use super::*;
    use crate::api::{ApiError, ApiResult, BoxFuture};
    use crate::notify::RecordingNotifier;

    /// In-memory stand-in for the meetings server.
    #[derive(Default)]
    struct FakeBackend {
        meetings: Mutex<Vec<Meeting>>,
        fail_list: Mutex<bool>,
        reject_create: Mutex<Option<(StatusCode, Option<String>)>>,
        garble_create: Mutex<bool>,
        created: Mutex<Vec<(NewMeeting, String)>>,
        list_calls: AtomicUsize,
        next_id: AtomicUsize,
    }

    impl FakeBackend {
        fn with_meetings(meetings: Vec<Meeting>) -> Self {
            let backend = Self::default();
            *backend.meetings.lock().unwrap() = meetings;
            backend
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    impl MeetingsBackend for FakeBackend {
        fn list_meetings(&self) -> BoxFuture<'_, ApiResult<Vec<Meeting>>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let result = if *self.fail_list.lock().unwrap() {
                Err(ApiError::network("connection refused"))
            } else {
                Ok(self.meetings.lock().unwrap().clone())
            };
            Box::pin(ready(result))
        }

        fn create_meeting<'a>(
            &'a self,
            meeting: &'a NewMeeting,
            csrf_token: &'a str,
        ) -> BoxFuture<'a, ApiResult<ApiReply>> {
            self.created
                .lock()
                .unwrap()
                .push((meeting.clone(), csrf_token.to_string()));

            let result = if let Some((status, text)) = self.reject_create.lock().unwrap().clone() {
                Err(ApiError::from_reply(status, text))
            } else if *self.garble_create.lock().unwrap() {
                Err(ApiError::invalid_response("response is not JSON"))
            } else {
                let id = format!("m{}", self.next_id.fetch_add(1, Ordering::SeqCst));
                let stored = Meeting::new(meeting.title.clone())
                    .with_schedule(meeting.meeting_date.clone(), meeting.meeting_time.clone())
                    .with_id(id);
                self.meetings.lock().unwrap().push(stored.clone());
                Ok(ApiReply {
                    message: Some("Meeting created successfully".into()),
                    error: None,
                    meeting: Some(stored),
                })
            };
            Box::pin(ready(result))
        }

        fn get_meeting<'a>(&'a self, id: &'a str) -> BoxFuture<'a, ApiResult<Meeting>> {
            let found = self
                .meetings
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.identifier() == Some(id))
                .cloned();
            let result = found.ok_or_else(|| {
                ApiError::from_reply(StatusCode::NOT_FOUND, Some("Meeting not found".into()))
            });
            Box::pin(ready(result))
        }

        fn update_meeting<'a>(
            &'a self,
            id: &'a str,
            patch: &'a MeetingPatch,
            _csrf_token: &'a str,
        ) -> BoxFuture<'a, ApiResult<ApiReply>> {
            let mut meetings = self.meetings.lock().unwrap();
            let result = match meetings.iter_mut().find(|m| m.identifier() == Some(id)) {
                Some(m) => {
                    if let Some(ref title) = patch.title {
                        m.title = Some(title.clone());
                    }
                    Ok(ApiReply {
                        message: Some("Meeting updated successfully".into()),
                        error: None,
                        meeting: Some(m.clone()),
                    })
                }
                None => Err(ApiError::from_reply(
                    StatusCode::NOT_FOUND,
                    Some("Meeting not found or update failed".into()),
                )),
            };
            Box::pin(ready(result))
        }

        fn delete_meeting<'a>(
            &'a self,
            id: &'a str,
            _csrf_token: &'a str,
        ) -> BoxFuture<'a, ApiResult<ApiReply>> {
            let mut meetings = self.meetings.lock().unwrap();
            let before = meetings.len();
            meetings.retain(|m| m.identifier() != Some(id));
            let result = if meetings.len() < before {
                Ok(ApiReply {
                    message: Some("Meeting deleted successfully".into()),
                    ..ApiReply::default()
                })
            } else {
                Err(ApiError::from_reply(
                    StatusCode::NOT_FOUND,
                    Some("Meeting not found or delete failed".into()),
                ))
            };
            Box::pin(ready(result))
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Local.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap(),
        ))
    }

    fn controller(
        backend: FakeBackend,
        page: Page,
    ) -> (MeetingsController<FakeBackend>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let controller = MeetingsController::new(backend, page, MeetingsBus::new())
            .with_notifier(notifier.clone())
            .with_clock(clock());
        (controller, notifier)
    }

    fn mixed_meetings() -> Vec<Meeting> {
        vec![
            Meeting::new("Standup").with_schedule("2099-03-01", "09:00").with_id("a"),
            Meeting::new("Retro").with_schedule("2020-01-10", "16:00").with_id("b"),
            Meeting::new("Planning").with_schedule("2030-06-15", "12:00").with_id("c"),
            Meeting::new("Broken").with_schedule("someday", "").with_id("d"),
            Meeting::new("Kickoff").with_schedule("2030-06-15", "11:59:59").with_id("e"),
        ]
    }

    fn fill_form(controller: &mut MeetingsController<FakeBackend>) {
        controller.set_field(FieldId::Title, "Sync");
        controller.set_field(FieldId::Date, "2099-01-01");
        controller.set_field(FieldId::Time, "10:00");
    }

    #[tokio::test]
    async fn initial_load_counts_and_renders_everything() {
        let (mut controller, _) =
            controller(FakeBackend::with_meetings(mixed_meetings()), Page::standard());

        let report = controller.start().await.unwrap().clone();
        let counts = report.counts;
        assert_eq!(counts.total, 5);
        assert_eq!(counts.upcoming, 2);
        assert_eq!(counts.past, 2);
        assert_eq!(counts.unscheduled(), 1);
        assert_eq!(counts.total, counts.upcoming + counts.past + counts.unscheduled());
        assert_eq!(controller.page().rendered_count(), counts.total);
        assert_eq!(
            controller.page().counter_texts(),
            [Some("5"), Some("2"), Some("2")]
        );
    }

    #[tokio::test]
    async fn example_meeting_renders_with_join_link_and_placeholder() {
        let backend = FakeBackend::with_meetings(vec![
            Meeting::new("Sync")
                .with_schedule("2099-01-01", "10:00")
                .with_link("https://x"),
        ]);
        let (mut controller, _) = controller(backend, Page::standard());
        let report = controller.start().await.unwrap();
        assert_eq!(report.counts.upcoming, 1);

        let html = controller.page().container.as_ref().unwrap().inner_html();
        assert_eq!(controller.page().rendered_count(), 1);
        assert!(html.contains("Sync"));
        assert!(html.contains(r#"href="https://x""#));
        assert!(html.contains(">Join</a>"));
        assert!(html.contains(NO_DESCRIPTION));
    }

    #[tokio::test]
    async fn filters_partition_without_double_counting() {
        let (mut controller, _) =
            controller(FakeBackend::with_meetings(mixed_meetings()), Page::standard());

        let upcoming = controller.click_filter("upcoming").await.unwrap().clone();
        let past = controller.click_filter("past").await.unwrap().clone();
        let all = controller.click_filter("all").await.unwrap().clone();

        assert_eq!(upcoming.counts, all.counts);
        assert_eq!(past.counts, all.counts);
        assert_eq!(
            upcoming.visible + past.visible + all.counts.unscheduled(),
            all.visible
        );
        assert_eq!(all.visible, 5);
        assert_eq!(controller.filter(), MeetingFilter::All);
    }

    #[tokio::test]
    async fn unknown_filter_button_is_ignored() {
        let backend = FakeBackend::with_meetings(mixed_meetings());
        let (mut controller, _) = controller(backend, Page::standard());
        assert!(controller.click_filter("tomorrow").await.is_none());
        assert_eq!(controller.backend().list_calls(), 0);
    }

    #[tokio::test]
    async fn created_meeting_resets_form_and_reloads_via_bus() {
        let page = Page::standard().with_csrf_token("tok");
        let (mut controller, notifier) = controller(FakeBackend::default(), page);
        controller.start().await;
        fill_form(&mut controller);

        let outcome = controller.submit().await.unwrap();
        assert!(outcome.is_created());
        assert_eq!(notifier.last().as_deref(), Some("Meeting scheduled successfully"));
        assert!(controller.page().form.as_ref().unwrap().is_pristine());

        let (sent, token) = controller.backend().created.lock().unwrap()[0].clone();
        assert_eq!(token, "tok");
        assert_eq!(sent.duration, DurationField::Minutes(60));

        assert_eq!(controller.process_pending_changes().await, 1);
        assert_eq!(controller.backend().list_calls(), 2);
        assert_eq!(controller.page().rendered_count(), 1);
        assert_eq!(controller.page().counter_texts()[1], Some("1"));
    }

    #[tokio::test]
    async fn rejected_submit_keeps_form_and_does_not_reload() {
        let backend = FakeBackend::default();
        *backend.reject_create.lock().unwrap() =
            Some((StatusCode::BAD_REQUEST, Some("Title required".into())));
        let page = Page::standard().with_csrf_token("tok");
        let (mut controller, notifier) = controller(backend, page);
        let mut watcher = controller.bus().subscribe();
        fill_form(&mut controller);

        let outcome = controller.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected("Title required".into()));
        assert_eq!(notifier.messages(), vec!["Title required".to_string()]);
        assert_eq!(
            controller.page().form.as_ref().unwrap().value(FieldId::Title),
            "Sync"
        );

        assert!(watcher.try_recv().is_err());
        assert_eq!(controller.process_pending_changes().await, 0);
        assert_eq!(controller.backend().list_calls(), 0);
    }

    #[tokio::test]
    async fn rejection_without_text_uses_fallback() {
        let backend = FakeBackend::default();
        *backend.reject_create.lock().unwrap() = Some((StatusCode::BAD_REQUEST, None));
        let (mut controller, notifier) =
            controller(backend, Page::standard().with_csrf_token("tok"));
        controller.submit().await;
        assert_eq!(notifier.last().as_deref(), Some("Failed to create meeting"));
    }

    #[tokio::test]
    async fn malformed_reply_is_a_server_error() {
        let backend = FakeBackend::default();
        *backend.garble_create.lock().unwrap() = true;
        let (mut controller, notifier) =
            controller(backend, Page::standard().with_csrf_token("tok"));
        fill_form(&mut controller);

        let outcome = controller.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(notifier.last().as_deref(), Some("Server error occurred"));
        assert!(!controller.page().form.as_ref().unwrap().is_pristine());
    }

    #[tokio::test]
    async fn missing_csrf_input_sends_nothing() {
        let (mut controller, notifier) = controller(FakeBackend::default(), Page::standard());
        fill_form(&mut controller);

        let outcome = controller.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(notifier.last().as_deref(), Some("Server error occurred"));
        assert!(controller.backend().created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn page_without_form_ignores_submit() {
        let page = Page::new().with_list().with_csrf_token("tok");
        let (mut controller, notifier) = controller(FakeBackend::default(), page);
        assert!(controller.submit().await.is_none());
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn load_failure_leaves_page_unchanged() {
        let (mut controller, notifier) =
            controller(FakeBackend::with_meetings(mixed_meetings()), Page::standard());
        controller.start().await;
        let before = controller.page().clone();

        *controller.backend().fail_list.lock().unwrap() = true;
        assert!(controller.click_filter("past").await.is_none());

        // The filter bar reflects the click; the list does not.
        assert_eq!(controller.page().container, before.container);
        assert_eq!(controller.page().counter_texts(), before.counter_texts());
        assert_eq!(controller.page().empty_state, before.empty_state);
        assert!(notifier.messages().is_empty());
        assert_eq!(controller.last_load().unwrap().filter, MeetingFilter::All);
    }

    #[tokio::test]
    async fn update_and_delete_publish_changes() {
        let page = Page::standard().with_csrf_token("tok");
        let (mut controller, _) =
            controller(FakeBackend::with_meetings(mixed_meetings()), page);
        let mut watcher = controller.bus().subscribe();

        let patch = MeetingPatch {
            title: Some("Daily".into()),
            ..MeetingPatch::default()
        };
        controller.update_meeting("a", &patch).await.unwrap();
        assert_eq!(controller.get_meeting("a").await.unwrap().title_str(), "Daily");
        assert_eq!(watcher.recv().await.unwrap().reason, ChangeReason::Updated);

        controller.delete_meeting("b").await.unwrap();
        let change = watcher.recv().await.unwrap();
        assert_eq!(change.reason, ChangeReason::Deleted);
        assert_eq!(change.meeting_id.as_deref(), Some("b"));

        assert_eq!(controller.process_pending_changes().await, 2);
        assert_eq!(controller.backend().list_calls(), 1);
        assert_eq!(controller.page().counter_texts()[0], Some("4"));
    }

    #[tokio::test]
    async fn detail_failures_surface_as_errors() {
        let page = Page::standard().with_csrf_token("tok");
        let (mut controller, _) = controller(FakeBackend::default(), page);

        let err = controller.delete_meeting("zzz").await.unwrap_err();
        assert!(matches!(err, ClientError::Api(ref e) if e.server_message() == Some("Meeting not found or delete failed")));

        let err = controller
            .update_meeting("a", &MeetingPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn tab_clicks_through_the_controller() {
        let (mut controller, _) = controller(FakeBackend::default(), Page::standard());
        assert_eq!(controller.click_tab("schedule"), TabSwitch::Switched);
        assert_eq!(controller.page().active_tab(), Some("schedule"));
    }

    #[tokio::test]
    async fn run_loop_handles_events_until_shutdown() {
        let page = Page::standard().with_csrf_token("tok");
        let (mut controller, notifier) = controller(FakeBackend::default(), page);

        let (tx, rx) = mpsc::channel(16);
        for event in [
            UiEvent::TabClicked("schedule".into()),
            UiEvent::FieldEdited {
                field: FieldId::Title,
                value: "Sync".into(),
            },
            UiEvent::FieldEdited {
                field: FieldId::Date,
                value: "2099-01-01".into(),
            },
            UiEvent::FieldEdited {
                field: FieldId::Time,
                value: "10:00".into(),
            },
            UiEvent::Submit,
            UiEvent::Shutdown,
        ] {
            tx.send(event).await.unwrap();
        }

        controller.run(rx).await;

        assert_eq!(controller.page().active_tab(), Some("schedule"));
        assert_eq!(notifier.messages(), vec!["Meeting scheduled successfully"]);
        // Initial load plus the reload after the create.
        assert_eq!(controller.backend().list_calls(), 2);
        assert_eq!(controller.page().rendered_count(), 1);
    }

    #[tokio::test]
    async fn run_loop_ends_when_senders_are_dropped() {
        let (mut controller, _) = controller(FakeBackend::default(), Page::standard());
        let (tx, rx) = mpsc::channel(1);
        drop(tx);
        controller.run(rx).await;
        assert_eq!(controller.backend().list_calls(), 1);
    }
}
