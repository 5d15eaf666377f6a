//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use meetdesk_core::{MeetingFilter, OutputFormat};

use crate::config::Overrides;

/// meetdesk - Your meetings from the terminal
#[derive(Debug, Parser)]
#[command(name = "meetdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MEETDESK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    // --- Connection flags ---
    /// Origin of the meetings server
    #[arg(long, env = "MEETDESK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// CSRF token of the session (the `csrftoken` cookie)
    #[arg(long, env = "MEETDESK_CSRF_TOKEN", global = true, hide_env_values = true)]
    pub csrf_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Settings given on the command line, to apply over the config file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            csrf_token: self.csrf_token.clone(),
            timeout: self.timeout,
            debug: self.debug,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List meetings with upcoming/past counts
    List(ListArgs),

    /// Schedule a new meeting
    Add(AddArgs),

    /// Show one meeting
    Show {
        /// Meeting identifier
        id: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Change fields of a meeting
    Update(UpdateArgs),

    /// Delete a meeting
    Delete {
        /// Meeting identifier
        id: String,
    },

    /// Open a meeting's link in the browser
    Join {
        /// Meeting identifier
        id: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Which meetings to show: all, upcoming or past
    #[arg(long, short, default_value = "all")]
    pub filter: MeetingFilter,

    /// Output the list markup, one block per meeting
    #[arg(long, group = "output_format")]
    pub html: bool,

    /// Output in JSON format
    #[arg(long, group = "output_format")]
    pub json: bool,

    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            filter: MeetingFilter::All,
            html: false,
            json: false,
            max_title_length: None,
        }
    }
}

impl ListArgs {
    /// Returns the output format based on the flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.html {
            OutputFormat::Html
        } else if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }
}

/// Fields of the add-meeting form. Values are sent the way the page form
/// sends them.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Meeting title
    #[arg(long)]
    pub title: String,

    /// Category
    #[arg(long, default_value = "work")]
    pub category: String,

    /// Date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Time of day, HH:MM
    #[arg(long)]
    pub time: String,

    /// Length in minutes (default 60)
    #[arg(long, default_value = "")]
    pub duration: String,

    /// Link to join the meeting
    #[arg(long, default_value = "")]
    pub link: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Meeting identifier
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Time of day, HH:MM
    #[arg(long)]
    pub time: Option<String>,

    /// Length in minutes
    #[arg(long)]
    pub duration: Option<i64>,

    #[arg(long)]
    pub link: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_flags() {
        let cli = Cli::try_parse_from(["meetdesk", "list", "--filter", "past", "--json"]).unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.filter, MeetingFilter::Past);
        assert_eq!(args.output_format(), OutputFormat::Json);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["meetdesk", "list", "--filter", "later"]).is_err());
    }

    #[test]
    fn html_and_json_conflict() {
        assert!(Cli::try_parse_from(["meetdesk", "list", "--html", "--json"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "meetdesk",
            "delete",
            "abc",
            "--base-url",
            "https://tasks.example/",
            "--timeout",
            "7",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("https://tasks.example/"));
        assert_eq!(overrides.timeout, Some(7));
        assert!(matches!(cli.command, Some(Command::Delete { ref id }) if id == "abc"));
    }

    #[test]
    fn add_defaults_match_the_form() {
        let cli = Cli::try_parse_from([
            "meetdesk", "add", "--title", "Sync", "--date", "2099-01-01", "--time", "10:00",
        ])
        .unwrap();
        let Some(Command::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.duration, "");
        assert_eq!(args.category, "work");
    }
}
