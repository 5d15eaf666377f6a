//! Configuration commands.

use std::path::Path;

use crate::api::MeetingsApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout, session values masked.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(&config.redacted())
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {e}")))?;
    println!("# config.toml ({})", path.display());
    println!("{toml_str}");

    Ok(())
}

/// Validate the configuration: server settings and session secrets must
/// resolve into a usable client.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let api_config = config.api_config()?;
    let has_csrf = api_config.cookies.csrf_token.is_some();
    MeetingsApi::new(api_config)?;

    if !has_csrf {
        println!("warning: no session.csrf_token; add, update and delete will fail.");
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    println!("config: {}", path.display());
    Ok(())
}
