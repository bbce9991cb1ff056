//! Version commands.

use std::path::PathBuf;

use clap::Subcommand;
use console::style;

use hockey_client::Client;
use hockey_core::error::HockeyResult;
use hockey_models::{Artifact, DownloadStatus, NotesType, NotifyMode, Version};

use crate::OutputFormat;

/// Who to notify about an upload.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum NotifyArg {
    Nobody,
    Installable,
    All,
}

impl From<NotifyArg> for NotifyMode {
    fn from(arg: NotifyArg) -> Self {
        match arg {
            NotifyArg::Nobody => NotifyMode::Nobody,
            NotifyArg::Installable => NotifyMode::Installable,
            NotifyArg::All => NotifyMode::All,
        }
    }
}

#[derive(Subcommand)]
pub enum VersionsAction {
    /// List the versions of an app.
    List {
        /// Public identifier of the app.
        app: String,
    },
    /// Upload a new build of an app.
    Upload {
        /// Public identifier of the app.
        app: String,
        /// Path to the .ipa or .apk file.
        #[arg(long)]
        ipa: PathBuf,
        /// Path to the zipped dSYM or mapping file.
        #[arg(long)]
        dsym: Option<PathBuf>,
        /// Release notes.
        #[arg(long, default_value = "")]
        notes: String,
        /// Release notes are Markdown rather than Textile.
        #[arg(long)]
        markdown: bool,
        /// Who to notify.
        #[arg(long, default_value = "nobody")]
        notify: NotifyArg,
        /// Upload without allowing downloads.
        #[arg(long)]
        no_download: bool,
        /// Restrict downloads to these tags (comma-separated).
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
}

pub async fn run(
    client: &Client,
    action: VersionsAction,
    format: OutputFormat,
) -> HockeyResult<()> {
    match action {
        VersionsAction::List { app } => {
            let app = super::app_handle(&app);
            let versions = client.versions(&app).await?;
            match format {
                OutputFormat::Json => {
                    let json: Vec<_> = versions.iter().map(version_json).collect();
                    super::print_json(&serde_json::Value::Array(json));
                }
                OutputFormat::Text => {
                    if versions.is_empty() {
                        println!("No versions found.");
                    } else {
                        let mut table =
                            super::new_table(vec!["ID", "Version", "Title", "Uploaded", "Downloadable"]);
                        for v in &versions {
                            table.add_row(vec![
                                v.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
                                v.label(),
                                super::truncate(v.title.as_deref().unwrap_or("-"), 30),
                                super::format_time(v.timestamp),
                                if v.status == DownloadStatus::Downloadable {
                                    "yes".to_string()
                                } else {
                                    "no".to_string()
                                },
                            ]);
                        }
                        println!("{table}");
                    }
                }
            }
        }
        VersionsAction::Upload {
            app,
            ipa,
            dsym,
            notes,
            markdown,
            notify,
            no_download,
            tags,
        } => {
            let notes_type = if markdown {
                NotesType::Markdown
            } else {
                NotesType::Textile
            };
            let status = if no_download {
                DownloadStatus::NotDownloadable
            } else {
                DownloadStatus::Downloadable
            };

            let mut version = Version::new(super::app_handle(&app))
                .with_ipa(Artifact::from_path(&ipa)?)
                .with_notes(notes, notes_type)
                .with_notify(notify.into())
                .with_status(status)
                .with_tags(tags.into_iter().filter(|t| !t.trim().is_empty()));
            if let Some(path) = dsym {
                version = version.with_dsym(Artifact::from_path(&path)?);
            }

            let uploaded = client.post_new_version(&version).await?;
            match format {
                OutputFormat::Json => super::print_json(&version_json(&uploaded)),
                OutputFormat::Text => {
                    println!(
                        "{} Uploaded {} of {}",
                        style("✓").green().bold(),
                        uploaded.label(),
                        uploaded.app.public_identifier
                    );
                    if let Some(url) = &uploaded.download_url {
                        println!("  Download: {url}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn version_json(v: &Version) -> serde_json::Value {
    serde_json::json!({
        "id": v.id,
        "app": v.app.public_identifier,
        "version": v.version,
        "shortversion": v.short_version,
        "title": v.title,
        "timestamp": v.timestamp,
        "appsize": v.app_size,
        "notes": v.notes,
        "mandatory": v.mandatory,
        "status": v.status.code(),
        "tags": v.tags,
        "restricted_to_tags": v.restricted_to_tags,
        "download_url": v.download_url,
        "config_url": v.config_url,
    })
}
