//! App commands.

use std::path::PathBuf;

use clap::Subcommand;
use console::style;

use hockey_client::Client;
use hockey_core::error::HockeyResult;
use hockey_models::{App, Artifact};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum AppsAction {
    /// List all apps.
    List,
    /// Register a new app by uploading its first build.
    Create {
        /// Path to the .ipa or .apk file.
        ipa: PathBuf,
    },
    /// Delete an app and all of its data.
    Remove {
        /// Public identifier of the app.
        app: String,
    },
}

pub async fn run(client: &Client, action: AppsAction, format: OutputFormat) -> HockeyResult<()> {
    match action {
        AppsAction::List => {
            let apps = client.apps().await?;
            match format {
                OutputFormat::Json => {
                    let json: Vec<_> = apps.iter().map(|a| app_json(a)).collect();
                    super::print_json(&serde_json::Value::Array(json));
                }
                OutputFormat::Text => {
                    if apps.is_empty() {
                        println!("No apps found.");
                    } else {
                        let mut table =
                            super::new_table(vec!["Identifier", "Title", "Bundle", "Platform"]);
                        for app in &apps {
                            table.add_row(vec![
                                app.public_identifier.clone(),
                                super::truncate(app.display_name(), 30),
                                super::or_dash(app.bundle_identifier.as_deref()),
                                super::or_dash(app.platform.as_deref()),
                            ]);
                        }
                        println!("{table}");
                        println!("\n{} apps", apps.len());
                    }
                }
            }
        }
        AppsAction::Create { ipa } => {
            let artifact = Artifact::from_path(&ipa)?;
            let app = client.create_app(&artifact).await?;
            match format {
                OutputFormat::Json => super::print_json(&app_json(&app)),
                OutputFormat::Text => {
                    println!(
                        "{} Created {} ({})",
                        style("✓").green().bold(),
                        app.display_name(),
                        app.public_identifier
                    );
                }
            }
        }
        AppsAction::Remove { app } => {
            let app = App::with_identifier(app);
            client.remove_app(&app).await?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({
                    "public_identifier": app.public_identifier,
                    "removed": true,
                })),
                OutputFormat::Text => {
                    println!("{} Removed {}", style("✓").green().bold(), app.public_identifier);
                }
            }
        }
    }

    Ok(())
}

fn app_json(app: &App) -> serde_json::Value {
    serde_json::to_value(app).unwrap_or_default()
}
