//! Core types: meetings, schedule classification, filters, markup rendering

pub mod format;
pub mod meeting;
pub mod schedule;
pub mod tracing;

pub use format::{
    BLOCK_CLASS, FormatOptions, JsonMeeting, JsonOutput, NO_DESCRIPTION, OutputFormat,
    OutputFormatter, RenderedBlock, ellipsis, html_escape, make_hyperlink,
};
pub use meeting::{DEFAULT_DURATION_MINUTES, Meeting};
pub use schedule::{
    Agenda, AgendaEntry, Clock, FixedClock, MeetingCounts, MeetingFilter, Schedule, SystemClock,
    UnknownFilter, classify, parse_start,
};
pub use crate::tracing::{TracingConfig, TracingError, init_tracing};
