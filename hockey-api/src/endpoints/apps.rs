//! App endpoints.

use reqwest::multipart::Form;

use hockey_core::error::HockeyResult;
use hockey_models::{App, Artifact};

use super::artifact_part;
use crate::client::ApiClient;
use crate::response::{AppsEnvelope, RecordEnvelope};

impl ApiClient {
    /// List all apps visible to the token.
    pub async fn list_apps(&self) -> HockeyResult<AppsEnvelope> {
        self.get_json("/apps", None).await
    }

    /// Delete an app. Returns whatever HTTP status code the server answered
    /// with; the body is ignored.
    pub async fn delete_app(&self, app_id: &str) -> HockeyResult<u16> {
        let resp = self.delete(&format!("/apps/{app_id}")).await?;
        Ok(resp.status().as_u16())
    }

    /// Create an app by uploading its first binary.
    pub async fn upload_app(&self, ipa: &Artifact) -> HockeyResult<RecordEnvelope<App>> {
        let form = Form::new().part("ipa", artifact_part(ipa)?);
        let resp = self.post_multipart("/apps/upload", form).await?;
        ApiClient::parse_record(resp).await
    }
}
