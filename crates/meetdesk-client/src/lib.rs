//! Meetings page controller, HTTP API client, CLI
//!
//! This crate provides the page view-model and its controller, the client
//! for the meetings REST API, and the `meetdesk` command-line interface.

pub mod actions;
pub mod api;
pub mod bus;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod loader;
pub mod notify;
pub mod page;
pub mod secret;
pub mod tabs;

pub use api::{ApiConfig, ApiError, ApiErrorCode, MeetingsApi, MeetingsBackend};
pub use bus::{ChangeReason, MeetingsBus, MeetingsChanged};
pub use cli::Cli;
pub use controller::{MeetingsController, UiEvent};
pub use error::{ClientError, ClientResult};
pub use page::Page;
