//! Crash group commands.

use std::sync::Arc;

use clap::Subcommand;
use console::style;

use hockey_client::Client;
use hockey_core::error::HockeyResult;
use hockey_models::{CrashGroup, Version};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum GroupsAction {
    /// List the crash groups of an app.
    List {
        /// Public identifier of the app.
        app: String,
    },
    /// List the crash groups of one version.
    Version {
        /// Public identifier of the app.
        app: String,
        /// Version id.
        version: u64,
        /// Extra query parameter (key=value), repeatable.
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,
    },
}

pub async fn run(client: &Client, action: GroupsAction, format: OutputFormat) -> HockeyResult<()> {
    let groups = match action {
        GroupsAction::List { app } => client.crash_groups(&super::app_handle(&app)).await?,
        GroupsAction::Version {
            app,
            version,
            options,
        } => {
            let params = super::parse_options(&options)?;
            let version = Arc::new(Version::new(super::app_handle(&app)).with_id(version));
            client.crash_groups_for_version(&version, &params).await?
        }
    };

    match format {
        OutputFormat::Json => {
            let json: Vec<_> = groups
                .iter()
                .map(|g| {
                    serde_json::json!({
                        "id": g.id,
                        "app": g.app.public_identifier,
                        "app_version_id": g.app_version_id,
                        "number_of_crashes": g.number_of_crashes,
                        "last_crash_at": g.last_crash_at,
                        "status": g.status,
                        "fixed": g.fixed,
                        "reason": g.reason,
                        "file": g.file,
                        "class": g.class_name,
                        "method": g.method,
                    })
                })
                .collect();
            super::print_json(&serde_json::Value::Array(json));
        }
        OutputFormat::Text => print_table(&groups),
    }

    Ok(())
}

fn print_table(groups: &[CrashGroup]) {
    if groups.is_empty() {
        println!("No crash groups found.");
        return;
    }

    let mut table = super::new_table(vec!["ID", "Crashes", "Reason", "Location", "Last Crash"]);
    for g in groups {
        let id = if g.fixed {
            format!("{} {}", g.id, style("fixed").green())
        } else {
            g.id.to_string()
        };
        table.add_row(vec![
            id,
            g.number_of_crashes.to_string(),
            super::truncate(g.reason.as_deref().unwrap_or("-"), 40),
            super::truncate(&g.location().unwrap_or_else(|| "-".into()), 40),
            super::format_time(g.last_crash_at),
        ]);
    }
    println!("{table}");
    println!("\n{} crash groups", groups.len());
}
