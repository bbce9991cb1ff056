//! CLI command implementations.

pub mod apps;
pub mod crashes;
pub mod groups;
pub mod versions;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use hockey_api::{ApiClient, QueryParams};
use hockey_client::Client;
use hockey_core::config::AppConfig;
use hockey_core::error::{HockeyError, HockeyResult};
use hockey_models::App;

/// Helper to create a client from config.
pub fn create_client(config: &AppConfig) -> HockeyResult<Client> {
    config.ensure_server_configured()?;
    Ok(Client::new(ApiClient::new(&config.server)?))
}

/// Handle for an app given on the command line by public identifier.
pub fn app_handle(public_identifier: &str) -> Arc<App> {
    Arc::new(App::with_identifier(public_identifier))
}

/// Parse repeated `key=value` options into query parameters.
pub fn parse_options(pairs: &[String]) -> HockeyResult<QueryParams> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(HockeyError::Precondition(format!(
                "expected key=value, got {pair:?}"
            ))),
        })
        .collect()
}

/// A table with the shared look.
pub fn new_table<I, S>(header: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<comfy_table::Cell>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Format an optional timestamp for table output.
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format an optional string for table output.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Truncate a string to a maximum number of characters, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        let params =
            parse_options(&["sort=date".to_string(), " order = desc ".to_string()]).unwrap();
        assert_eq!(params.get("sort").map(String::as_str), Some("date"));
        assert_eq!(params.get("order").map(String::as_str), Some("desc"));
    }

    #[test]
    fn test_parse_options_rejects_bare_key() {
        assert!(parse_options(&["sort".to_string()]).is_err());
        assert!(parse_options(&["=date".to_string()]).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("EXC_BAD_ACCESS in main", 10), "EXC_BAD...");
        assert_eq!(truncate("ünïcödé", 2), "ün");
    }

    #[test]
    fn test_create_client_requires_token() {
        let config = AppConfig::default();
        assert!(matches!(
            create_client(&config),
            Err(HockeyError::MissingConfig(_))
        ));
    }
}
