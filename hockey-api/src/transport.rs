//! The transport contract consumed by the client adapter.
//!
//! One method per remote endpoint. Implementations own authentication,
//! serialization, and HTTP mechanics; they report application-level failures
//! only through the returned envelopes and never interpret them.

use async_trait::async_trait;

use hockey_core::error::HockeyResult;
use hockey_models::{App, Artifact, DownloadStatus, NotesType, NotifyMode, VersionRecord};

use crate::client::ApiClient;
use crate::response::{
    AppsEnvelope, CrashGroupsEnvelope, CrashesEnvelope, QueryParams, RecordEnvelope,
    VersionsEnvelope,
};

/// Fields sent when uploading a new version. The binary is required by type.
#[derive(Debug, Clone, Copy)]
pub struct VersionUpload<'a> {
    pub ipa: &'a Artifact,
    pub dsym: Option<&'a Artifact>,
    pub notes: &'a str,
    pub notes_type: NotesType,
    pub notify: NotifyMode,
    pub status: DownloadStatus,
    pub tags: &'a [String],
}

/// Raw access to the HockeyApp endpoints.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET /apps`
    async fn get_apps(&self) -> HockeyResult<AppsEnvelope>;

    /// `GET /apps/{app}/crashes`
    async fn get_crashes(&self, app_id: &str) -> HockeyResult<CrashesEnvelope>;

    /// `GET /apps/{app}/app_versions/{version}/crashes/search`
    async fn query_crashes_for_version(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope>;

    /// `GET /apps/{app}/crash_reasons/{group}`
    async fn get_crashes_for_group(
        &self,
        app_id: &str,
        group_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope>;

    /// `GET /apps/{app}/crash_reasons`
    async fn get_crash_groups(&self, app_id: &str) -> HockeyResult<CrashGroupsEnvelope>;

    /// `GET /apps/{app}/app_versions/{version}/crash_reasons`
    async fn get_crash_groups_for_version(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashGroupsEnvelope>;

    /// Raw crash log text.
    async fn get_crash_log(&self, app_id: &str, crash_id: u64) -> HockeyResult<String>;

    /// Raw crash description text.
    async fn get_crash_description(&self, app_id: &str, crash_id: u64) -> HockeyResult<String>;

    /// `GET /apps/{app}/app_versions`
    async fn get_versions(&self, app_id: &str) -> HockeyResult<VersionsEnvelope>;

    /// `POST /apps/{app}/app_versions/upload`
    async fn post_new_version(
        &self,
        app_id: &str,
        upload: VersionUpload<'_>,
    ) -> HockeyResult<RecordEnvelope<VersionRecord>>;

    /// `DELETE /apps/{app}`. Returns the HTTP status code.
    async fn remove_app(&self, app_id: &str) -> HockeyResult<u16>;

    /// `POST /apps/upload`
    async fn post_new_app(&self, ipa: &Artifact) -> HockeyResult<RecordEnvelope<App>>;
}

#[async_trait]
impl Transport for ApiClient {
    async fn get_apps(&self) -> HockeyResult<AppsEnvelope> {
        self.list_apps().await
    }

    async fn get_crashes(&self, app_id: &str) -> HockeyResult<CrashesEnvelope> {
        self.list_crashes(app_id).await
    }

    async fn query_crashes_for_version(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope> {
        self.search_version_crashes(app_id, version_id, params).await
    }

    async fn get_crashes_for_group(
        &self,
        app_id: &str,
        group_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope> {
        self.list_group_crashes(app_id, group_id, params).await
    }

    async fn get_crash_groups(&self, app_id: &str) -> HockeyResult<CrashGroupsEnvelope> {
        self.list_crash_groups(app_id).await
    }

    async fn get_crash_groups_for_version(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashGroupsEnvelope> {
        self.list_version_crash_groups(app_id, version_id, params)
            .await
    }

    async fn get_crash_log(&self, app_id: &str, crash_id: u64) -> HockeyResult<String> {
        self.crash_text(app_id, crash_id, "log").await
    }

    async fn get_crash_description(&self, app_id: &str, crash_id: u64) -> HockeyResult<String> {
        self.crash_text(app_id, crash_id, "text").await
    }

    async fn get_versions(&self, app_id: &str) -> HockeyResult<VersionsEnvelope> {
        self.list_versions(app_id).await
    }

    async fn post_new_version(
        &self,
        app_id: &str,
        upload: VersionUpload<'_>,
    ) -> HockeyResult<RecordEnvelope<VersionRecord>> {
        self.upload_version(app_id, upload).await
    }

    async fn remove_app(&self, app_id: &str) -> HockeyResult<u16> {
        self.delete_app(app_id).await
    }

    async fn post_new_app(&self, ipa: &Artifact) -> HockeyResult<RecordEnvelope<App>> {
        self.upload_app(ipa).await
    }
}
