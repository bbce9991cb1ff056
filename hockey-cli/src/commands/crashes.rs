//! Crash commands.

use std::sync::Arc;

use clap::Subcommand;

use hockey_client::{Client, Timestamp};
use hockey_core::error::HockeyResult;
use hockey_models::{Crash, CrashGroup, Version};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum CrashesAction {
    /// List the crashes of an app.
    List {
        /// Public identifier of the app.
        app: String,
    },
    /// Crashes of one version created in a time range.
    Between {
        /// Public identifier of the app.
        app: String,
        /// Version id.
        version: u64,
        /// Range start, e.g. 2021-06-01T00:00:00Z or "2021-06-01 00:00:00".
        #[arg(long)]
        since: Timestamp,
        /// Range end.
        #[arg(long)]
        till: Timestamp,
        /// Extra query parameter (key=value), repeatable.
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,
    },
    /// Crashes in one crash group.
    Group {
        /// Public identifier of the app.
        app: String,
        /// Crash group id.
        group: u64,
        /// Extra query parameter (key=value), repeatable.
        #[arg(short = 'o', long = "option")]
        options: Vec<String>,
    },
    /// Print the raw log of a crash.
    Log {
        /// Public identifier of the app.
        app: String,
        /// Crash id.
        crash: u64,
    },
    /// Print the user description of a crash.
    Description {
        /// Public identifier of the app.
        app: String,
        /// Crash id.
        crash: u64,
    },
}

pub async fn run(
    client: &Client,
    action: CrashesAction,
    format: OutputFormat,
) -> HockeyResult<()> {
    match action {
        CrashesAction::List { app } => {
            let crashes = client.crashes(&super::app_handle(&app)).await?;
            print_crashes(&crashes, format);
        }
        CrashesAction::Between {
            app,
            version,
            since,
            till,
            options,
        } => {
            let params = super::parse_options(&options)?;
            let version = Arc::new(Version::new(super::app_handle(&app)).with_id(version));
            let crashes = client
                .crashes_for_version_between(&version, since, till, &params)
                .await?;
            print_crashes(&crashes, format);
        }
        CrashesAction::Group {
            app,
            group,
            options,
        } => {
            let params = super::parse_options(&options)?;
            let group = Arc::new(CrashGroup::with_id(super::app_handle(&app), group));
            let crashes = client.crashes_for_crash_group(&group, &params).await?;
            print_crashes(&crashes, format);
        }
        CrashesAction::Log { app, crash } => {
            let crash = Crash::with_id(super::app_handle(&app), crash);
            let log = client.crash_log(&crash).await?;
            print_text("log", &crash, log, format);
        }
        CrashesAction::Description { app, crash } => {
            let crash = Crash::with_id(super::app_handle(&app), crash);
            let description = client.crash_description(&crash).await?;
            print_text("description", &crash, description, format);
        }
    }

    Ok(())
}

fn print_crashes(crashes: &[Crash], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let json: Vec<_> = crashes
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id,
                        "app": c.app.public_identifier,
                        "app_version_id": c.app_version_id,
                        "crash_reason_id": c.crash_reason_id,
                        "created_at": c.created_at,
                        "oem": c.oem,
                        "model": c.model,
                        "os_version": c.os_version,
                        "jail_break": c.jail_break,
                        "user_string": c.user_string,
                        "contact_string": c.contact_string,
                        "has_log": c.has_log,
                        "has_description": c.has_description,
                        "bundle_version": c.bundle_version,
                        "bundle_short_version": c.bundle_short_version,
                    })
                })
                .collect();
            super::print_json(&serde_json::Value::Array(json));
        }
        OutputFormat::Text => {
            if crashes.is_empty() {
                println!("No crashes found.");
                return;
            }
            let mut table =
                super::new_table(vec!["ID", "Created", "Device", "OS", "Group", "Log"]);
            for c in crashes {
                table.add_row(vec![
                    c.id.to_string(),
                    super::format_time(c.created_at),
                    super::truncate(&c.device().unwrap_or_else(|| "-".into()), 30),
                    super::or_dash(c.os_version.as_deref()),
                    c.crash_reason_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".into()),
                    if c.has_log { "yes" } else { "-" }.to_string(),
                ]);
            }
            println!("{table}");
            println!("\n{} crashes", crashes.len());
        }
    }
}

fn print_text(kind: &str, crash: &Crash, text: String, format: OutputFormat) {
    match format {
        OutputFormat::Json => super::print_json(&serde_json::json!({
            "id": crash.id,
            "app": crash.app.public_identifier,
            (kind): text,
        })),
        OutputFormat::Text => println!("{text}"),
    }
}
