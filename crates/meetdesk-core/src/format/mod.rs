//! Output formatting for meeting lists.
//!
//! Three renderings of the same [`Agenda`]:
//! - **Markup**: the HTML block appended to the meetings container for each
//!   visible meeting
//! - **TTY**: one human-readable line per meeting
//! - **JSON**: machine-readable output with the summary counts
//!
//! # Example
//!
//! ```rust
//! use meetdesk_core::format::{FormatOptions, OutputFormatter};
//! use meetdesk_core::Meeting;
//!
//! let formatter = OutputFormatter::new(FormatOptions::default());
//! let block = formatter.render_block(&Meeting::new("Sync").with_schedule("2099-01-01", "10:00"));
//! assert!(block.inner_html.contains("Sync"));
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::meeting::Meeting;
use crate::schedule::{Agenda, AgendaEntry, MeetingCounts, MeetingFilter, Schedule};


/// Class list of the element wrapping each rendered meeting.
pub const BLOCK_CLASS: &str = "bg-white dark:bg-gray-800 p-5 rounded-2xl shadow-sm border border-gray-100 dark:border-gray-700 flex flex-col gap-3 mb-4";

/// Shown in place of a missing description.
pub const NO_DESCRIPTION: &str = "No description provided.";

const HEADER_CLASS: &str = "flex justify-between items-start";
const TITLE_CLASS: &str = "font-bold text-lg text-gray-800 dark:text-white leading-tight";
const WHEN_CLASS: &str = "flex items-center gap-4 mt-2 text-sm text-gray-500";
const JOIN_CLASS: &str = "shrink-0 bg-purple-600 text-white px-4 py-2 rounded-lg text-sm font-semibold hover:bg-purple-700 transition";
const DESCRIPTION_BOX_CLASS: &str = "mt-2 py-3 px-4 bg-gray-50 dark:bg-gray-700/50 rounded-xl";
const DESCRIPTION_CLASS: &str = "text-sm text-gray-600 dark:text-gray-300 leading-relaxed";
const PLACEHOLDER_CLASS: &str = "text-xs text-gray-400 italic";

/// The output format for meeting display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// The container markup, one block per meeting.
    Html,
    /// Machine-readable JSON output.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Maximum length for meeting titles (truncated with ellipsis).
    pub max_title_length: Option<usize>,
    /// Whether to wrap join links in OSC8 hyperlinks in TTY output.
    pub hyperlinks: bool,
    /// Text printed when no meeting survives the filter.
    pub no_meeting_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_title_length: None,
            hyperlinks: false,
            no_meeting_text: "No meetings".to_string(),
        }
    }
}

/// Markup for one meeting: the wrapper's class list and its inner HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub class: String,
    pub inner_html: String,
}

impl RenderedBlock {
    /// The block including its wrapping `div`.
    pub fn outer_html(&self) -> String {
        format!(
            "<div class=\"{}\">{}</div>",
            html_escape(&self.class),
            self.inner_html
        )
    }
}

/// JSON output format for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// The filter the list was rendered with.
    pub filter: MeetingFilter,
    /// Counts over the full list.
    pub counts: MeetingCounts,
    /// Meetings admitted by the filter.
    pub meetings: Vec<JsonMeeting>,
}

/// A single meeting in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMeeting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub time: String,
    pub schedule: Schedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Formatter for meeting output.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Builds the markup block for one meeting.
    ///
    /// All meeting text is escaped. The join anchor is present only when the
    /// meeting has a non-empty link; a missing description is replaced by
    /// [`NO_DESCRIPTION`].
    pub fn render_block(&self, meeting: &Meeting) -> RenderedBlock {
        let title = self.truncate_title(meeting.title_str());
        let mut html = String::new();

        html.push_str(&format!("<div class=\"{HEADER_CLASS}\">\n"));
        html.push_str("<div class=\"flex-1\">\n");
        html.push_str(&format!(
            "<h4 class=\"{TITLE_CLASS}\">{}</h4>\n",
            html_escape(&title)
        ));
        html.push_str(&format!("<div class=\"{WHEN_CLASS}\">\n"));
        html.push_str(&format!(
            "<span>📅 {}</span>\n",
            html_escape(meeting.date_str())
        ));
        html.push_str(&format!(
            "<span>⏰ {}</span>\n",
            html_escape(meeting.time_str())
        ));
        html.push_str("</div>\n</div>\n");
        if let Some(link) = meeting.join_link() {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{JOIN_CLASS}\">Join</a>\n",
                html_escape(link)
            ));
        }
        html.push_str("</div>\n");

        let description = meeting.description_str();
        if description.is_empty() {
            html.push_str(&format!(
                "<p class=\"{PLACEHOLDER_CLASS}\">{NO_DESCRIPTION}</p>"
            ));
        } else {
            html.push_str(&format!(
                "<div class=\"{DESCRIPTION_BOX_CLASS}\"><p class=\"{DESCRIPTION_CLASS}\">{}</p></div>",
                html_escape(description)
            ));
        }

        RenderedBlock {
            class: BLOCK_CLASS.to_string(),
            inner_html: html,
        }
    }

    /// Builds the blocks for every entry admitted by `filter`.
    pub fn render_blocks(&self, agenda: &Agenda, filter: MeetingFilter) -> Vec<RenderedBlock> {
        agenda
            .visible(filter)
            .map(|entry| self.render_block(&entry.meeting))
            .collect()
    }

    /// One line per visible meeting, or the no-meeting text.
    pub fn format_tty(&self, agenda: &Agenda, filter: MeetingFilter) -> Vec<String> {
        let lines: Vec<String> = agenda
            .visible(filter)
            .map(|entry| self.format_tty_line(entry))
            .collect();
        if lines.is_empty() {
            vec![self.options.no_meeting_text.clone()]
        } else {
            lines
        }
    }

    /// The counts line shown under the list.
    pub fn format_summary(&self, counts: &MeetingCounts) -> String {
        format!(
            "{} total • {} upcoming • {} past",
            counts.total, counts.upcoming, counts.past
        )
    }

    pub fn format_json(&self, agenda: &Agenda, filter: MeetingFilter) -> JsonOutput {
        JsonOutput {
            filter,
            counts: agenda.counts(),
            meetings: agenda
                .visible(filter)
                .map(|entry| self.to_json_meeting(entry))
                .collect(),
        }
    }

    fn format_tty_line(&self, entry: &AgendaEntry) -> String {
        let meeting = &entry.meeting;
        let when = match (meeting.date_str(), meeting.time_str()) {
            ("", "") => "--".to_string(),
            (date, "") => date.to_string(),
            ("", time) => time.to_string(),
            (date, time) => format!("{date} {time}"),
        };
        let mut line = format!(
            "{when}  {}  [{}]",
            self.truncate_title(meeting.title_str()),
            entry.schedule.as_str()
        );
        if let Some(link) = meeting.join_link() {
            let label = if self.options.hyperlinks {
                make_hyperlink(link, "Join")
            } else {
                link.to_string()
            };
            line.push_str(&format!("  {label}"));
        }
        line
    }

    fn to_json_meeting(&self, entry: &AgendaEntry) -> JsonMeeting {
        let meeting = &entry.meeting;
        let description = meeting.description_str();
        JsonMeeting {
            id: meeting.identifier().map(str::to_string),
            title: meeting.title_str().to_string(),
            date: meeting.date_str().to_string(),
            time: meeting.time_str().to_string(),
            schedule: entry.schedule,
            category: meeting.category.clone(),
            duration: meeting.duration,
            meeting_link: meeting.join_link().map(str::to_string),
            description: (!description.is_empty()).then(|| description.to_string()),
        }
    }

    fn truncate_title<'a>(&self, title: &'a str) -> Cow<'a, str> {
        match self.options.max_title_length {
            Some(max) => ellipsis(title, max),
            None => Cow::Borrowed(title),
        }
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

/// Creates an OSC8 hyperlink for terminal output.
pub fn make_hyperlink(url: &str, label: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, label)
}

/// Escapes text for HTML display.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
