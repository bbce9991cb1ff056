//! App version endpoints.

use reqwest::multipart::Form;

use hockey_core::error::HockeyResult;
use hockey_models::VersionRecord;

use super::artifact_part;
use crate::client::ApiClient;
use crate::response::{RecordEnvelope, VersionsEnvelope};
use crate::transport::VersionUpload;

impl ApiClient {
    /// List all versions of an app.
    pub async fn list_versions(&self, app_id: &str) -> HockeyResult<VersionsEnvelope> {
        self.get_json(&format!("/apps/{app_id}/app_versions"), None)
            .await
    }

    /// Upload a new version binary with its metadata.
    pub async fn upload_version(
        &self,
        app_id: &str,
        upload: VersionUpload<'_>,
    ) -> HockeyResult<RecordEnvelope<VersionRecord>> {
        let mut form = Form::new().part("ipa", artifact_part(upload.ipa)?);
        if let Some(dsym) = upload.dsym {
            form = form.part("dsym", artifact_part(dsym)?);
        }
        for (name, value) in upload_fields(&upload) {
            form = form.text(name, value);
        }

        let resp = self
            .post_multipart(&format!("/apps/{app_id}/app_versions/upload"), form)
            .await?;
        ApiClient::parse_record(resp).await
    }
}

/// Text fields of an upload form, in the order the server documents them.
fn upload_fields(upload: &VersionUpload<'_>) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("notes", upload.notes.to_string()),
        ("notes_type", upload.notes_type.code().to_string()),
        ("notify", upload.notify.code().to_string()),
        ("status", upload.status.code().to_string()),
    ];
    if !upload.tags.is_empty() {
        fields.push(("tags", upload.tags.join(",")));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use hockey_models::{Artifact, DownloadStatus, NotesType, NotifyMode};

    #[test]
    fn test_upload_fields() {
        let ipa = Artifact::new("a.ipa", vec![1, 2, 3]);
        let tags = vec!["beta".to_string(), "qa".to_string()];
        let upload = VersionUpload {
            ipa: &ipa,
            dsym: None,
            notes: "Fixed login",
            notes_type: NotesType::Markdown,
            notify: NotifyMode::All,
            status: DownloadStatus::Downloadable,
            tags: &tags,
        };

        let fields = upload_fields(&upload);
        assert_eq!(
            fields,
            vec![
                ("notes", "Fixed login".to_string()),
                ("notes_type", "1".to_string()),
                ("notify", "2".to_string()),
                ("status", "2".to_string()),
                ("tags", "beta,qa".to_string()),
            ]
        );
    }

    #[test]
    fn test_upload_fields_without_tags() {
        let ipa = Artifact::new("a.ipa", vec![]);
        let upload = VersionUpload {
            ipa: &ipa,
            dsym: None,
            notes: "",
            notes_type: NotesType::Textile,
            notify: NotifyMode::Nobody,
            status: DownloadStatus::NotDownloadable,
            tags: &[],
        };
        let fields = upload_fields(&upload);
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|(name, _)| *name != "tags"));
    }
}
