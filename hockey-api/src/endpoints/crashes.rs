//! Crash endpoints.

use hockey_core::error::HockeyResult;

use crate::client::ApiClient;
use crate::response::{CrashesEnvelope, QueryParams};

impl ApiClient {
    /// List crashes of an app.
    pub async fn list_crashes(&self, app_id: &str) -> HockeyResult<CrashesEnvelope> {
        self.get_json(&format!("/apps/{app_id}/crashes"), None).await
    }

    /// Search the crashes of one version. `params` carries the search
    /// backend's `query` and `per_page`.
    pub async fn search_version_crashes(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope> {
        self.get_json(
            &format!("/apps/{app_id}/app_versions/{version_id}/crashes/search"),
            Some(params),
        )
        .await
    }

    /// List the crashes in one crash group.
    pub async fn list_group_crashes(
        &self,
        app_id: &str,
        group_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope> {
        self.get_json(
            &format!("/apps/{app_id}/crash_reasons/{group_id}"),
            Some(params),
        )
        .await
    }

    /// Fetch the raw text attached to a crash.
    ///
    /// `format` is "log" for the crash log or "text" for the user description.
    pub async fn crash_text(&self, app_id: &str, crash_id: u64, format: &str) -> HockeyResult<String> {
        let query = crash_text_query(format);
        let resp = self
            .get(&format!("/apps/{app_id}/crashes/{crash_id}"), Some(&query))
            .await?;
        ApiClient::response_text(resp).await
    }
}

fn crash_text_query(format: &str) -> QueryParams {
    QueryParams::from([("format".to_string(), format.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_text_query() {
        let query = crash_text_query("log");
        assert_eq!(query.get("format").map(String::as_str), Some("log"));
        assert_eq!(query.len(), 1);
    }
}
