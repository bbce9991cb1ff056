//! App version entity model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::app::App;
use super::artifact::Artifact;

/// Markup format of release notes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i64)]
pub enum NotesType {
    #[default]
    Textile = 0,
    Markdown = 1,
}

/// Who gets notified about a newly uploaded version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i64)]
pub enum NotifyMode {
    /// Don't notify testers.
    #[default]
    Nobody = 0,
    /// Notify testers who are allowed to install this version.
    Installable = 1,
    /// Notify all testers.
    All = 2,
}

/// Whether testers may download a version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i64)]
pub enum DownloadStatus {
    NotDownloadable = 1,
    #[default]
    Downloadable = 2,
}

impl NotesType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Textile),
            1 => Some(Self::Markdown),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

impl NotifyMode {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Nobody),
            1 => Some(Self::Installable),
            2 => Some(Self::All),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

impl DownloadStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::NotDownloadable),
            2 => Some(Self::Downloadable),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// A version as the server reports it in `app_versions` and upload responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionRecord {
    pub id: Option<u64>,
    /// Build number (CFBundleVersion / versionCode).
    pub version: Option<String>,
    /// Marketing version (CFBundleShortVersionString / versionName).
    #[serde(rename = "shortversion")]
    pub short_version: Option<String>,
    pub title: Option<String>,
    /// Unix timestamp in seconds.
    pub timestamp: Option<i64>,
    #[serde(rename = "appsize")]
    pub app_size: Option<u64>,
    pub notes: Option<String>,
    pub mandatory: Option<bool>,
    pub status: Option<i64>,
    pub download_url: Option<String>,
    pub config_url: Option<String>,
    pub restricted_to_tags: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// A version of an app.
///
/// Either mapped from a server record, or built by the caller with
/// [`Version::new`] and the `with_*` setters before it is uploaded.
#[derive(Debug, Clone)]
pub struct Version {
    pub app: Arc<App>,
    /// Server id. `None` until the version has been persisted.
    pub id: Option<u64>,
    pub version: Option<String>,
    pub short_version: Option<String>,
    pub title: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub app_size: Option<u64>,
    pub notes: String,
    pub notes_type: NotesType,
    pub notify: NotifyMode,
    pub status: DownloadStatus,
    pub tags: Vec<String>,
    /// Downloads are limited to testers carrying one of `tags`.
    pub restricted_to_tags: bool,
    pub mandatory: bool,
    pub download_url: Option<String>,
    pub config_url: Option<String>,
    /// Installable binary. Required for upload.
    pub ipa: Option<Artifact>,
    /// Zipped debug symbols.
    pub dsym: Option<Artifact>,
}

impl Version {
    /// Start a client-side version for `app`, to be filled in and uploaded.
    pub fn new(app: Arc<App>) -> Self {
        Self {
            app,
            id: None,
            version: None,
            short_version: None,
            title: None,
            timestamp: None,
            app_size: None,
            notes: String::new(),
            notes_type: NotesType::default(),
            notify: NotifyMode::default(),
            status: DownloadStatus::default(),
            tags: Vec::new(),
            restricted_to_tags: false,
            mandatory: false,
            download_url: None,
            config_url: None,
            ipa: None,
            dsym: None,
        }
    }

    /// Map a server record onto the app it was requested for.
    pub fn from_record(record: VersionRecord, app: Arc<App>) -> Self {
        Self {
            app,
            id: record.id,
            version: record.version,
            short_version: record.short_version,
            title: record.title,
            timestamp: record
                .timestamp
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            app_size: record.app_size,
            notes: record.notes.unwrap_or_default(),
            notes_type: NotesType::default(),
            notify: NotifyMode::default(),
            status: record
                .status
                .and_then(DownloadStatus::from_code)
                .unwrap_or_default(),
            tags: record.tags.unwrap_or_default(),
            restricted_to_tags: record.restricted_to_tags.unwrap_or(false),
            mandatory: record.mandatory.unwrap_or(false),
            download_url: record.download_url,
            config_url: record.config_url,
            ipa: None,
            dsym: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_ipa(mut self, ipa: Artifact) -> Self {
        self.ipa = Some(ipa);
        self
    }

    pub fn with_dsym(mut self, dsym: Artifact) -> Self {
        self.dsym = Some(dsym);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>, notes_type: NotesType) -> Self {
        self.notes = notes.into();
        self.notes_type = notes_type;
        self
    }

    pub fn with_notify(mut self, notify: NotifyMode) -> Self {
        self.notify = notify;
        self
    }

    pub fn with_status(mut self, status: DownloadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// "1.2 (42)" style label built from whichever version strings are known.
    pub fn label(&self) -> String {
        match (&self.short_version, &self.version) {
            (Some(short), Some(build)) => format!("{short} ({build})"),
            (Some(short), None) => short.clone(),
            (None, Some(build)) => build.clone(),
            (None, None) => self
                .id
                .map_or_else(|| "unsaved".to_string(), |id| format!("#{id}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        assert_eq!(NotesType::from_code(1), Some(NotesType::Markdown));
        assert_eq!(NotifyMode::All.code(), 2);
        assert_eq!(DownloadStatus::from_code(1), Some(DownloadStatus::NotDownloadable));
        assert_eq!(DownloadStatus::from_code(7), None);
    }

    #[test]
    fn test_from_record_keeps_app_handle() {
        let app = Arc::new(App::with_identifier("abc"));
        let record: VersionRecord = serde_json::from_value(serde_json::json!({
            "id": 208,
            "version": "42",
            "shortversion": "1.2",
            "timestamp": 1326195742,
            "appsize": 157834,
            "status": 1,
            "mandatory": true,
            "notes": "<p>Fixes</p>"
        }))
        .unwrap();

        let version = Version::from_record(record, Arc::clone(&app));
        assert!(Arc::ptr_eq(&version.app, &app));
        assert_eq!(version.id, Some(208));
        assert_eq!(version.label(), "1.2 (42)");
        assert_eq!(version.status, DownloadStatus::NotDownloadable);
        assert!(version.mandatory);
        assert_eq!(version.timestamp.unwrap().timestamp(), 1326195742);
        assert!(version.ipa.is_none());
    }

    #[test]
    fn test_unknown_status_falls_back_to_default() {
        let app = Arc::new(App::with_identifier("abc"));
        let record = VersionRecord {
            status: Some(99),
            ..VersionRecord::default()
        };
        let version = Version::from_record(record, app);
        assert_eq!(version.status, DownloadStatus::Downloadable);
        assert!(!version.restricted_to_tags);
        assert_eq!(version.label(), "unsaved");
    }

    #[test]
    fn test_from_record_keeps_tag_restriction() {
        let app = Arc::new(App::with_identifier("abc"));
        let record: VersionRecord = serde_json::from_value(serde_json::json!({
            "id": 209,
            "restricted_to_tags": true,
            "tags": ["beta", "qa"]
        }))
        .unwrap();

        let version = Version::from_record(record, app);
        assert!(version.restricted_to_tags);
        assert_eq!(version.tags, vec!["beta".to_string(), "qa".to_string()]);
    }

    #[test]
    fn test_builder() {
        let app = Arc::new(App::with_identifier("abc"));
        let version = Version::new(app)
            .with_ipa(Artifact::new("a.ipa", vec![1]))
            .with_notes("notes", NotesType::Markdown)
            .with_notify(NotifyMode::Installable)
            .with_tags(["beta", "qa"]);
        assert!(version.ipa.is_some());
        assert!(version.dsym.is_none());
        assert_eq!(version.notes_type, NotesType::Markdown);
        assert_eq!(version.tags, vec!["beta".to_string(), "qa".to_string()]);
    }
}
