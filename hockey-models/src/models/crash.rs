//! Crash entity model.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::app::App;
use super::crash_group::CrashGroup;
use super::version::Version;

/// A single crash as reported under `crashes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashRecord {
    pub id: u64,
    pub app_id: Option<u64>,
    pub app_version_id: Option<u64>,
    pub crash_reason_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub oem: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub jail_break: Option<bool>,
    pub contact_string: Option<String>,
    pub user_string: Option<String>,
    pub has_log: Option<bool>,
    pub has_description: Option<bool>,
    pub bundle_version: Option<String>,
    pub bundle_short_version: Option<String>,
}

/// What a crash was queried through.
#[derive(Debug, Clone, Default)]
pub enum CrashContext {
    /// Listed directly for the app.
    #[default]
    App,
    /// Found by a version-scoped search.
    Version(Arc<Version>),
    /// Listed for a crash group.
    Group(Arc<CrashGroup>),
}

/// A crash report. The raw log and description are fetched on demand through
/// the client.
#[derive(Debug, Clone)]
pub struct Crash {
    pub app: Arc<App>,
    pub context: CrashContext,
    pub id: u64,
    pub app_version_id: Option<u64>,
    pub crash_reason_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub oem: Option<String>,
    pub model: Option<String>,
    pub os_version: Option<String>,
    pub jail_break: bool,
    pub contact_string: Option<String>,
    pub user_string: Option<String>,
    pub has_log: bool,
    pub has_description: bool,
    pub bundle_version: Option<String>,
    pub bundle_short_version: Option<String>,
}

impl Crash {
    /// Build a handle for a crash whose id is already known.
    pub fn with_id(app: Arc<App>, id: u64) -> Self {
        Self::from_record(
            CrashRecord {
                id,
                ..CrashRecord::default()
            },
            app,
            CrashContext::App,
        )
    }

    pub fn from_record(record: CrashRecord, app: Arc<App>, context: CrashContext) -> Self {
        Self {
            app,
            context,
            id: record.id,
            app_version_id: record.app_version_id,
            crash_reason_id: record.crash_reason_id,
            created_at: record.created_at,
            oem: record.oem,
            model: record.model,
            os_version: record.os_version,
            jail_break: record.jail_break.unwrap_or(false),
            contact_string: record.contact_string,
            user_string: record.user_string,
            has_log: record.has_log.unwrap_or(false),
            has_description: record.has_description.unwrap_or(false),
            bundle_version: record.bundle_version,
            bundle_short_version: record.bundle_short_version,
        }
    }

    /// The version this crash was queried through, if any.
    pub fn version(&self) -> Option<&Arc<Version>> {
        match &self.context {
            CrashContext::Version(version) => Some(version),
            _ => None,
        }
    }

    /// The crash group this crash was listed under, if any.
    pub fn group(&self) -> Option<&Arc<CrashGroup>> {
        match &self.context {
            CrashContext::Group(group) => Some(group),
            _ => None,
        }
    }

    /// "oem model" device label.
    pub fn device(&self) -> Option<String> {
        match (&self.oem, &self.model) {
            (Some(oem), Some(model)) => Some(format!("{oem} {model}")),
            (Some(v), None) | (None, Some(v)) => Some(v.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record() {
        let record: CrashRecord = serde_json::from_value(serde_json::json!({
            "id": 404,
            "app_id": 11,
            "crash_reason_id": 5,
            "created_at": "2012-01-13T14:17:56Z",
            "oem": "Apple",
            "model": "iPhone4,1",
            "os_version": "5.0.1",
            "jail_break": false,
            "has_log": true,
            "has_description": false
        }))
        .unwrap();

        let app = Arc::new(App::with_identifier("abc"));
        let crash = Crash::from_record(record, Arc::clone(&app), CrashContext::App);
        assert!(Arc::ptr_eq(&crash.app, &app));
        assert_eq!(crash.id, 404);
        assert_eq!(crash.crash_reason_id, Some(5));
        assert!(crash.has_log);
        assert_eq!(crash.device().as_deref(), Some("Apple iPhone4,1"));
        assert!(crash.version().is_none());
        assert!(crash.group().is_none());
    }

    #[test]
    fn test_group_context() {
        let app = Arc::new(App::with_identifier("abc"));
        let group = Arc::new(CrashGroup::with_id(Arc::clone(&app), 5));
        let crash = Crash::from_record(
            CrashRecord::default(),
            Arc::clone(&app),
            CrashContext::Group(Arc::clone(&group)),
        );
        assert!(Arc::ptr_eq(crash.group().unwrap(), &group));
        assert!(crash.device().is_none());
    }
}
