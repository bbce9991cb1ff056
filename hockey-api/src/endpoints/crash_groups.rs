//! Crash group (crash reason) endpoints.

use hockey_core::error::HockeyResult;

use crate::client::ApiClient;
use crate::response::{CrashGroupsEnvelope, QueryParams};

impl ApiClient {
    /// List crash groups across all versions of an app.
    pub async fn list_crash_groups(&self, app_id: &str) -> HockeyResult<CrashGroupsEnvelope> {
        self.get_json(&format!("/apps/{app_id}/crash_reasons"), None)
            .await
    }

    /// List crash groups of one version.
    pub async fn list_version_crash_groups(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashGroupsEnvelope> {
        self.get_json(
            &format!("/apps/{app_id}/app_versions/{version_id}/crash_reasons"),
            Some(params),
        )
        .await
    }
}
