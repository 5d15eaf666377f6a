//! Meeting commands: list, add, show, update, delete, join.

use chrono::Local;
use meetdesk_core::{Agenda, Meeting, MeetingFilter, OutputFormat, OutputFormatter};
use meetdesk_protocol::MeetingPatch;
use tracing::debug;

use crate::actions;
use crate::api::MeetingsApi;
use crate::bus::MeetingsBus;
use crate::cli::{AddArgs, ListArgs, UpdateArgs};
use crate::config::ClientConfig;
use crate::controller::MeetingsController;
use crate::error::{ClientError, ClientResult};
use crate::form::SubmitOutcome;
use crate::loader;
use crate::page::{FieldId, Page};

/// Builds a controller over the configured server, with the session's CSRF
/// token on the page.
fn controller(
    config: &ClientConfig,
    formatter: OutputFormatter,
) -> ClientResult<MeetingsController<MeetingsApi>> {
    let api_config = config.api_config()?;
    debug!(base_url = %api_config.base_url, "connecting");

    let mut page = Page::standard();
    page.csrf_token = api_config.cookies.csrf_token.clone();

    let api = MeetingsApi::new(api_config)?;
    Ok(MeetingsController::new(api, page, MeetingsBus::new()).with_formatter(formatter))
}

/// Renders a loaded list in the requested format.
pub fn render_list(
    agenda: &Agenda,
    filter: MeetingFilter,
    format: OutputFormat,
    formatter: &OutputFormatter,
) -> ClientResult<String> {
    Ok(match format {
        OutputFormat::Html => formatter
            .render_blocks(agenda, filter)
            .iter()
            .map(|b| b.outer_html())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&formatter.format_json(agenda, filter))?,
        OutputFormat::Tty => {
            let mut lines = formatter.format_tty(agenda, filter);
            lines.push(String::new());
            lines.push(formatter.format_summary(&agenda.counts()));
            lines.join("\n")
        }
    })
}

/// `meetdesk list`
pub async fn list(config: &ClientConfig, args: &ListArgs) -> ClientResult<()> {
    let mut options = config.display.format_options();
    if args.max_title_length.is_some() {
        options.max_title_length = args.max_title_length;
    }
    let formatter = OutputFormatter::new(options);
    let api = MeetingsApi::new(config.api_config()?)?;

    let agenda = loader::fetch_agenda(&api, &Local::now()).await?;
    let output = render_list(&agenda, args.filter, args.output_format(), &formatter)?;
    println!("{output}");
    Ok(())
}

/// `meetdesk add`
pub async fn add(config: &ClientConfig, args: &AddArgs) -> ClientResult<()> {
    let mut controller = controller(config, OutputFormatter::default())?;
    for field in FieldId::ALL {
        controller.set_field(field, field_value(args, field));
    }

    match controller.submit().await {
        Some(SubmitOutcome::Created(reply)) => {
            if let Some(id) = reply.meeting.as_ref().and_then(Meeting::identifier) {
                println!("{id}");
            }
            Ok(())
        }
        Some(SubmitOutcome::Rejected(message)) => Err(ClientError::NotCreated(message)),
        Some(SubmitOutcome::Failed(detail)) => Err(ClientError::NotCreated(detail)),
        None => Err(ClientError::InvalidInput("no meeting form".to_string())),
    }
}

fn field_value(args: &AddArgs, field: FieldId) -> &str {
    match field {
        FieldId::Title => &args.title,
        FieldId::Category => &args.category,
        FieldId::Date => &args.date,
        FieldId::Time => &args.time,
        FieldId::Duration => &args.duration,
        FieldId::Link => &args.link,
        FieldId::Description => &args.description,
    }
}

/// `meetdesk show`
pub async fn show(config: &ClientConfig, id: &str, json: bool) -> ClientResult<()> {
    let controller = controller(config, OutputFormatter::default())?;
    let meeting = controller.get_meeting(id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&meeting)?);
    } else {
        print!("{}", describe(&meeting));
    }
    Ok(())
}

/// Multi-line plain-text description of one meeting.
pub fn describe(meeting: &Meeting) -> String {
    let mut out = format!("{}\n", meeting.title_str());
    let mut field = |name: &str, value: &str| {
        if !value.is_empty() {
            out.push_str(&format!("  {name:<12}{value}\n"));
        }
    };
    field("id", meeting.identifier().unwrap_or_default());
    field("category", meeting.category.as_deref().unwrap_or_default());
    field("date", meeting.date_str());
    field("time", meeting.time_str());
    field(
        "duration",
        &meeting.duration.map(|d| format!("{d} min")).unwrap_or_default(),
    );
    field("link", meeting.join_link().unwrap_or_default());
    field("description", meeting.description_str());
    out
}

impl From<&UpdateArgs> for MeetingPatch {
    fn from(args: &UpdateArgs) -> Self {
        MeetingPatch {
            title: args.title.clone(),
            category: args.category.clone(),
            meeting_date: args.date.clone(),
            meeting_time: args.time.clone(),
            duration: args.duration,
            meeting_link: args.link.clone(),
            description: args.description.clone(),
        }
    }
}

/// `meetdesk update`
pub async fn update(config: &ClientConfig, args: &UpdateArgs) -> ClientResult<()> {
    let mut controller = controller(config, OutputFormatter::default())?;
    let reply = controller
        .update_meeting(&args.id, &MeetingPatch::from(args))
        .await?;
    println!(
        "{}",
        reply.message.as_deref().unwrap_or("Meeting updated")
    );
    Ok(())
}

/// `meetdesk delete`
pub async fn delete(config: &ClientConfig, id: &str) -> ClientResult<()> {
    let mut controller = controller(config, OutputFormatter::default())?;
    let reply = controller.delete_meeting(id).await?;
    println!(
        "{}",
        reply.message.as_deref().unwrap_or("Meeting deleted")
    );
    Ok(())
}

/// `meetdesk join`
pub async fn join(config: &ClientConfig, id: &str) -> ClientResult<()> {
    let controller = controller(config, OutputFormatter::default())?;
    let meeting = controller.get_meeting(id).await?;
    actions::open_meeting_link(&meeting)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use meetdesk_core::FormatOptions;

    use super::*;

    fn agenda() -> Agenda {
        let now = Local.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap();
        Agenda::build(
            vec![
                Meeting::new("Sync")
                    .with_schedule("2099-01-01", "10:00")
                    .with_link("https://x"),
                Meeting::new("Retro").with_schedule("2020-01-10", "16:00"),
            ],
            &now,
        )
    }

    #[test]
    fn tty_list_ends_with_summary() {
        let out = render_list(
            &agenda(),
            MeetingFilter::All,
            OutputFormat::Tty,
            &OutputFormatter::default(),
        )
        .unwrap();
        insta::assert_snapshot!(out, @r"
        2099-01-01 10:00  Sync  [upcoming]  https://x
        2020-01-10 16:00  Retro  [past]

        2 total • 1 upcoming • 1 past
        ");
    }

    #[test]
    fn tty_list_with_nothing_visible() {
        let formatter = OutputFormatter::new(FormatOptions {
            no_meeting_text: "Nothing here".into(),
            ..FormatOptions::default()
        });
        let empty = Agenda::build(Vec::new(), &Local::now());
        let out = render_list(&empty, MeetingFilter::Upcoming, OutputFormat::Tty, &formatter)
            .unwrap();
        assert!(out.starts_with("Nothing here\n"));
    }

    #[test]
    fn html_list_has_one_block_per_visible_meeting() {
        let out = render_list(
            &agenda(),
            MeetingFilter::Past,
            OutputFormat::Html,
            &OutputFormatter::default(),
        )
        .unwrap();
        assert_eq!(out.matches("<h4 ").count(), 1);
        assert!(out.contains("Retro"));
        assert!(!out.contains("Join"));
    }

    #[test]
    fn json_list_carries_full_counts() {
        let out = render_list(
            &agenda(),
            MeetingFilter::Upcoming,
            OutputFormat::Json,
            &OutputFormatter::default(),
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["counts"]["total"], 2);
        assert_eq!(value["meetings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn update_args_become_a_sparse_patch() {
        let args = UpdateArgs {
            id: "a".into(),
            title: Some("Renamed".into()),
            category: None,
            date: None,
            time: None,
            duration: Some(30),
            link: None,
            description: None,
        };
        let patch = MeetingPatch::from(&args);
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.duration, Some(30));
        assert!(patch.meeting_date.is_none());
    }

    #[test]
    fn describe_skips_empty_fields() {
        let meeting = Meeting::new("Sync")
            .with_id("m1")
            .with_schedule("2099-01-01", "10:00");
        let text = describe(&meeting);
        assert!(text.starts_with("Sync\n"));
        assert!(text.contains("id          m1"));
        assert!(!text.contains("link"));
    }
}
