//! The client adapter over a HockeyApp transport.

use std::sync::Arc;

use tracing::debug;

use hockey_api::{ApiClient, QueryParams, Transport, VersionUpload};
use hockey_core::error::{HockeyError, HockeyResult};
use hockey_models::{
    App, Artifact, Crash, CrashContext, CrashGroup, CrashGroupRecord, CrashRecord, Version,
};

use crate::query::crash_search_params;
use crate::timestamp::Timestamp;

/// Typed access to HockeyApp.
///
/// Every operation makes exactly one transport call. Returned entities are
/// fresh instances that share the `Arc` handle of the app (or version, or
/// crash group) the caller passed in. Follow-up calls such as
/// [`Client::crash_log`] take the entity back explicitly.
pub struct Client<T = ApiClient> {
    ws: T,
}

impl<T: Transport> Client<T> {
    pub fn new(ws: T) -> Self {
        Self { ws }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.ws
    }

    /// List all apps.
    pub async fn apps(&self) -> HockeyResult<Vec<Arc<App>>> {
        debug!("listing apps");
        let payload = self.ws.get_apps().await?.into_validated()?;
        Ok(payload.apps.into_iter().map(Arc::new).collect())
    }

    /// List the crashes of an app.
    pub async fn crashes(&self, app: &Arc<App>) -> HockeyResult<Vec<Crash>> {
        debug!(app = %app.public_identifier, "listing crashes");
        let payload = self
            .ws
            .get_crashes(&app.public_identifier)
            .await?
            .into_validated()?;
        Ok(map_crashes(payload.crashes, app, || CrashContext::App))
    }

    /// Crashes of `version` created between `start` and `end`.
    ///
    /// Results are requested 50 per page; a result set that needs more than
    /// one page fails with [`HockeyError::MultiplePages`].
    pub async fn crashes_for_version_between(
        &self,
        version: &Arc<Version>,
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
        options: &QueryParams,
    ) -> HockeyResult<Vec<Crash>> {
        let version_id = persisted_id(version)?;
        let params = crash_search_params(options, &start.into(), &end.into());
        debug!(
            app = %version.app.public_identifier,
            version_id,
            query = params.get("query").map(String::as_str).unwrap_or_default(),
            "searching version crashes"
        );

        let payload = self
            .ws
            .query_crashes_for_version(&version.app.public_identifier, version_id, &params)
            .await?
            .into_validated()?;
        Ok(map_crashes(payload.crashes, &version.app, || {
            CrashContext::Version(Arc::clone(version))
        }))
    }

    /// Crashes in one crash group.
    pub async fn crashes_for_crash_group(
        &self,
        group: &Arc<CrashGroup>,
        options: &QueryParams,
    ) -> HockeyResult<Vec<Crash>> {
        debug!(app = %group.app.public_identifier, group_id = group.id, "listing group crashes");
        let payload = self
            .ws
            .get_crashes_for_group(&group.app.public_identifier, group.id, options)
            .await?
            .into_validated()?;
        Ok(map_crashes(payload.crashes, &group.app, || {
            CrashContext::Group(Arc::clone(group))
        }))
    }

    /// List the crash groups of an app.
    pub async fn crash_groups(&self, app: &Arc<App>) -> HockeyResult<Vec<CrashGroup>> {
        debug!(app = %app.public_identifier, "listing crash groups");
        let payload = self
            .ws
            .get_crash_groups(&app.public_identifier)
            .await?
            .into_validated()?;
        Ok(map_crash_groups(payload.crash_reasons, app, None))
    }

    /// List the crash groups of one version.
    pub async fn crash_groups_for_version(
        &self,
        version: &Arc<Version>,
        options: &QueryParams,
    ) -> HockeyResult<Vec<CrashGroup>> {
        let version_id = persisted_id(version)?;
        debug!(app = %version.app.public_identifier, version_id, "listing version crash groups");
        let payload = self
            .ws
            .get_crash_groups_for_version(&version.app.public_identifier, version_id, options)
            .await?
            .into_validated()?;
        Ok(map_crash_groups(
            payload.crash_reasons,
            &version.app,
            Some(version),
        ))
    }

    /// Raw crash log text.
    pub async fn crash_log(&self, crash: &Crash) -> HockeyResult<String> {
        self.ws
            .get_crash_log(&crash.app.public_identifier, crash.id)
            .await
    }

    /// Raw crash description text.
    pub async fn crash_description(&self, crash: &Crash) -> HockeyResult<String> {
        self.ws
            .get_crash_description(&crash.app.public_identifier, crash.id)
            .await
    }

    /// List the versions of an app.
    ///
    /// This endpoint carries no status field, so the envelope is not validated.
    pub async fn versions(&self, app: &Arc<App>) -> HockeyResult<Vec<Version>> {
        debug!(app = %app.public_identifier, "listing versions");
        let payload = self
            .ws
            .get_versions(&app.public_identifier)
            .await?
            .into_payload()?;
        Ok(payload
            .app_versions
            .into_iter()
            .map(|record| Version::from_record(record, Arc::clone(app)))
            .collect())
    }

    /// Upload a client-built version.
    ///
    /// Fails with [`HockeyError::Precondition`] before any request when the
    /// version has no binary.
    pub async fn post_new_version(&self, version: &Version) -> HockeyResult<Version> {
        let ipa = version.ipa.as_ref().ok_or_else(|| {
            HockeyError::Precondition("there must be an executable file".into())
        })?;
        let upload = VersionUpload {
            ipa,
            dsym: version.dsym.as_ref(),
            notes: &version.notes,
            notes_type: version.notes_type,
            notify: version.notify,
            status: version.status,
            tags: &version.tags,
        };

        debug!(
            app = %version.app.public_identifier,
            file = %ipa.file_name,
            bytes = ipa.len(),
            "uploading version"
        );
        let record = self
            .ws
            .post_new_version(&version.app.public_identifier, upload)
            .await?
            .into_record()?;
        Ok(Version::from_record(record, Arc::clone(&version.app)))
    }

    /// Delete an app. Anything but HTTP 200 is an error.
    pub async fn remove_app(&self, app: &App) -> HockeyResult<bool> {
        debug!(app = %app.public_identifier, "removing app");
        let status = self.ws.remove_app(&app.public_identifier).await?;
        if status != 200 {
            return Err(HockeyError::UnexpectedResponse(format!(
                "removing app {} returned HTTP {status}",
                app.public_identifier
            )));
        }
        Ok(true)
    }

    /// Register a new app from its first binary.
    pub async fn create_app(&self, ipa: &Artifact) -> HockeyResult<Arc<App>> {
        debug!(file = %ipa.file_name, bytes = ipa.len(), "creating app");
        let app = self.ws.post_new_app(ipa).await?.into_record()?;
        Ok(Arc::new(app))
    }
}

/// Version-scoped endpoints need a server id.
fn persisted_id(version: &Version) -> HockeyResult<u64> {
    version.id.ok_or_else(|| {
        HockeyError::Precondition(format!(
            "version {} of app {} has not been uploaded",
            version.label(),
            version.app.public_identifier
        ))
    })
}

fn map_crashes(
    records: Vec<CrashRecord>,
    app: &Arc<App>,
    context: impl Fn() -> CrashContext,
) -> Vec<Crash> {
    records
        .into_iter()
        .map(|record| Crash::from_record(record, Arc::clone(app), context()))
        .collect()
}

fn map_crash_groups(
    records: Vec<CrashGroupRecord>,
    app: &Arc<App>,
    version: Option<&Arc<Version>>,
) -> Vec<CrashGroup> {
    records
        .into_iter()
        .map(|record| CrashGroup::from_record(record, Arc::clone(app), version.cloned()))
        .collect()
}
