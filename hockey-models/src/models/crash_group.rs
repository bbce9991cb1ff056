//! Crash group (crash reason) entity model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::app::App;
use super::version::Version;

/// A crash group as reported under `crash_reasons`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashGroupRecord {
    pub id: u64,
    pub app_id: Option<u64>,
    pub app_version_id: Option<u64>,
    pub number_of_crashes: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_crash_at: Option<DateTime<Utc>>,
    pub status: Option<i64>,
    pub fixed: Option<bool>,
    pub reason: Option<String>,
    pub file: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub method: Option<String>,
    pub bundle_version: Option<String>,
    pub bundle_short_version: Option<String>,
}

/// Crashes sharing one signature.
#[derive(Debug, Clone)]
pub struct CrashGroup {
    pub app: Arc<App>,
    /// Set when the group was listed for a specific version.
    pub version: Option<Arc<Version>>,
    pub id: u64,
    pub app_version_id: Option<u64>,
    pub number_of_crashes: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_crash_at: Option<DateTime<Utc>>,
    pub status: Option<i64>,
    pub fixed: bool,
    pub reason: Option<String>,
    pub file: Option<String>,
    pub class_name: Option<String>,
    pub method: Option<String>,
    pub bundle_version: Option<String>,
    pub bundle_short_version: Option<String>,
}

impl CrashGroup {
    /// Build a handle for a crash group whose id is already known.
    pub fn with_id(app: Arc<App>, id: u64) -> Self {
        Self::from_record(
            CrashGroupRecord {
                id,
                ..CrashGroupRecord::default()
            },
            app,
            None,
        )
    }

    pub fn from_record(
        record: CrashGroupRecord,
        app: Arc<App>,
        version: Option<Arc<Version>>,
    ) -> Self {
        Self {
            app,
            version,
            id: record.id,
            app_version_id: record.app_version_id,
            number_of_crashes: record.number_of_crashes.unwrap_or(0),
            created_at: record.created_at,
            updated_at: record.updated_at,
            last_crash_at: record.last_crash_at,
            status: record.status,
            fixed: record.fixed.unwrap_or(false),
            reason: record.reason,
            file: record.file,
            class_name: record.class_name,
            method: record.method,
            bundle_version: record.bundle_version,
            bundle_short_version: record.bundle_short_version,
        }
    }

    /// `Class.method (file)` style location of the crashing frame.
    pub fn location(&self) -> Option<String> {
        let symbol = match (&self.class_name, &self.method) {
            (Some(class), Some(method)) => format!("{class}.{method}"),
            (Some(class), None) => class.clone(),
            (None, Some(method)) => method.clone(),
            (None, None) => return self.file.clone(),
        };
        Some(match &self.file {
            Some(file) => format!("{symbol} ({file})"),
            None => symbol,
        })
    }
}
