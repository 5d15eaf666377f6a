//! Classifying meetings against the current instant.
//!
//! A meeting's start is built from its date and time strings as
//! `"{date}T{time}"` and read as local wall-clock time. Meetings whose start
//! cannot be read are [`Schedule::Unscheduled`]: they count toward the total
//! but belong to neither the upcoming nor the past view.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::meeting::Meeting;

const START_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Where a meeting sits relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Starts now or later.
    Upcoming,
    /// Started before now.
    Past,
    /// Date or time missing or unreadable.
    Unscheduled,
}

impl Schedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Past => "past",
            Self::Unscheduled => "unscheduled",
        }
    }
}

/// Which subset of meetings to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingFilter {
    #[default]
    All,
    Upcoming,
    Past,
}

impl MeetingFilter {
    /// Reads a filter tag as found on filter buttons.
    ///
    /// Unrecognized tags behave like `all`.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Upcoming => "upcoming",
            Self::Past => "past",
        }
    }

    /// Returns true if a meeting with this schedule is shown under the filter.
    pub fn admits(&self, schedule: Schedule) -> bool {
        match self {
            Self::All => true,
            Self::Upcoming => schedule == Schedule::Upcoming,
            Self::Past => schedule == Schedule::Past,
        }
    }
}

impl fmt::Display for MeetingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meeting filter `{0}` (expected all, upcoming or past)")]
pub struct UnknownFilter(pub String);

impl FromStr for MeetingFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Parses `"{date}T{time}"` into a naive local date-time.
pub fn parse_start(date: &str, time: &str) -> Option<NaiveDateTime> {
    let joined = format!("{date}T{time}");
    START_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&joined, fmt).ok())
}

/// Classifies a naive start against `now` in `now`'s timezone.
///
/// Ambiguous local times take the earlier instant. Times that fall in a
/// daylight-saving gap are compared as wall-clock values.
pub fn classify_start<Tz: TimeZone>(start: NaiveDateTime, now: &DateTime<Tz>) -> Schedule {
    let is_past = match now.timezone().from_local_datetime(&start) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at < *now,
        LocalResult::None => start < now.naive_local(),
    };
    if is_past {
        Schedule::Past
    } else {
        Schedule::Upcoming
    }
}

/// Classifies a meeting against `now`.
pub fn classify<Tz: TimeZone>(meeting: &Meeting, now: &DateTime<Tz>) -> Schedule {
    match parse_start(meeting.date_str(), meeting.time_str()) {
        Some(start) => classify_start(start, now),
        None => Schedule::Unscheduled,
    }
}

/// Totals over a full meeting list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingCounts {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
}

impl MeetingCounts {
    /// Meetings counted in the total but in neither bucket.
    pub fn unscheduled(&self) -> usize {
        self.total - self.upcoming - self.past
    }

    fn record(&mut self, schedule: Schedule) {
        self.total += 1;
        match schedule {
            Schedule::Upcoming => self.upcoming += 1,
            Schedule::Past => self.past += 1,
            Schedule::Unscheduled => {}
        }
    }
}

/// A meeting paired with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry {
    pub meeting: Meeting,
    pub schedule: Schedule,
}

/// A classified meeting list, in server order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agenda {
    entries: Vec<AgendaEntry>,
    counts: MeetingCounts,
}

impl Agenda {
    /// Classifies every meeting against `now`.
    pub fn build<Tz: TimeZone>(meetings: Vec<Meeting>, now: &DateTime<Tz>) -> Self {
        let mut counts = MeetingCounts::default();
        let entries = meetings
            .into_iter()
            .map(|meeting| {
                let schedule = classify(&meeting, now);
                counts.record(schedule);
                AgendaEntry { meeting, schedule }
            })
            .collect();
        Self { entries, counts }
    }

    /// Counts over the whole list, independent of any filter.
    pub fn counts(&self) -> MeetingCounts {
        self.counts
    }

    pub fn entries(&self) -> &[AgendaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries admitted by `filter`, in server order.
    pub fn visible(&self, filter: MeetingFilter) -> impl Iterator<Item = &AgendaEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| filter.admits(entry.schedule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn meeting(date: &str, time: &str) -> Meeting {
        Meeting::new("m").with_schedule(date, time)
    }

    #[test]
    fn parses_minute_and_second_precision() {
        let expected = NaiveDate::from_ymd_opt(2030, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(parse_start("2030-06-15", "10:00"), Some(expected));
        assert_eq!(parse_start("2030-06-15", "10:00:00"), Some(expected));
        assert!(parse_start("2030-06-15", "10:00:00.250").is_some());
    }

    #[test]
    fn rejects_missing_or_malformed_parts() {
        assert!(parse_start("", "").is_none());
        assert!(parse_start("2030-06-15", "").is_none());
        assert!(parse_start("", "10:00").is_none());
        assert!(parse_start("15/06/2030", "10:00").is_none());
        assert!(parse_start("2030-02-30", "10:00").is_none());
        assert!(parse_start("2030-06-15", "25:00").is_none());
    }

    #[test]
    fn classify_relative_to_now() {
        let now = local(2030, 6, 15, 12, 0);
        assert_eq!(classify(&meeting("2030-06-15", "11:59"), &now), Schedule::Past);
        assert_eq!(classify(&meeting("2030-06-15", "12:01"), &now), Schedule::Upcoming);
        assert_eq!(classify(&meeting("2099-01-01", "10:00"), &now), Schedule::Upcoming);
        assert_eq!(classify(&meeting("2000-01-01", "10:00"), &now), Schedule::Past);
    }

    #[test]
    fn start_equal_to_now_is_upcoming() {
        let now = local(2030, 6, 15, 12, 0);
        assert_eq!(classify(&meeting("2030-06-15", "12:00"), &now), Schedule::Upcoming);
    }

    #[test]
    fn unreadable_start_is_unscheduled() {
        let now = local(2030, 6, 15, 12, 0);
        assert_eq!(classify(&Meeting::new("x"), &now), Schedule::Unscheduled);
        assert_eq!(classify(&meeting("soon", "ish"), &now), Schedule::Unscheduled);
    }

    #[test]
    fn classify_uses_fallback_fields() {
        let now = local(2030, 6, 15, 12, 0);
        let m = Meeting {
            date: Some("2000-01-01".into()),
            time: Some("08:00".into()),
            ..Meeting::default()
        };
        assert_eq!(classify(&m, &now), Schedule::Past);
    }

    #[test]
    fn filter_tags() {
        assert_eq!(MeetingFilter::from_tag("upcoming"), MeetingFilter::Upcoming);
        assert_eq!(MeetingFilter::from_tag("past"), MeetingFilter::Past);
        assert_eq!(MeetingFilter::from_tag("all"), MeetingFilter::All);
        assert_eq!(MeetingFilter::from_tag("tomorrow"), MeetingFilter::All);
        assert_eq!(MeetingFilter::default(), MeetingFilter::All);
        assert!("weekly".parse::<MeetingFilter>().is_err());
        assert_eq!(MeetingFilter::Past.to_string(), "past");
    }

    #[test]
    fn filter_admission() {
        assert!(MeetingFilter::All.admits(Schedule::Unscheduled));
        assert!(!MeetingFilter::Upcoming.admits(Schedule::Unscheduled));
        assert!(!MeetingFilter::Past.admits(Schedule::Unscheduled));
        assert!(MeetingFilter::Upcoming.admits(Schedule::Upcoming));
        assert!(!MeetingFilter::Upcoming.admits(Schedule::Past));
    }

    fn mixed_agenda(now: &DateTime<Local>) -> Agenda {
        Agenda::build(
            vec![
                meeting("2099-01-01", "10:00"),
                meeting("2000-01-01", "10:00"),
                Meeting::new("no date"),
                meeting("2098-03-03", "08:15"),
                meeting("2030-06-15", "bad"),
            ],
            now,
        )
    }

    #[test]
    fn agenda_counts_cover_full_list() {
        let now = local(2030, 6, 15, 12, 0);
        let agenda = mixed_agenda(&now);
        let counts = agenda.counts();

        assert_eq!(counts.total, 5);
        assert_eq!(counts.upcoming, 2);
        assert_eq!(counts.past, 1);
        assert_eq!(counts.unscheduled(), 2);
        assert_eq!(counts.total, counts.upcoming + counts.past + counts.unscheduled());
    }

    #[test]
    fn filtered_views_partition_scheduled_meetings() {
        let now = local(2030, 6, 15, 12, 0);
        let agenda = mixed_agenda(&now);

        let all = agenda.visible(MeetingFilter::All).count();
        let upcoming = agenda.visible(MeetingFilter::Upcoming).count();
        let past = agenda.visible(MeetingFilter::Past).count();

        assert_eq!(all, agenda.len());
        assert_eq!(upcoming, agenda.counts().upcoming);
        assert_eq!(past, agenda.counts().past);
        assert_eq!(upcoming + past + agenda.counts().unscheduled(), all);
    }

    #[test]
    fn visible_preserves_server_order() {
        let now = local(2030, 6, 15, 12, 0);
        let agenda = Agenda::build(
            vec![
                Meeting::new("b").with_schedule("2099-01-02", "10:00"),
                Meeting::new("a").with_schedule("2099-01-01", "10:00"),
            ],
            &now,
        );
        let titles: Vec<_> = agenda
            .visible(MeetingFilter::Upcoming)
            .map(|e| e.meeting.title_str())
            .collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let now = local(2030, 6, 15, 12, 0);
        assert_eq!(FixedClock(now).now(), now);
    }
}
