//! Shared test utilities for client integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use hockey_api::{
    AppsEnvelope, CrashGroupsEnvelope, CrashesEnvelope, QueryParams, RecordEnvelope, Transport,
    VersionUpload, VersionsEnvelope,
};
use hockey_client::Client;
use hockey_core::error::{HockeyError, HockeyResult};
use hockey_models::{App, Artifact, VersionRecord};

/// One recorded transport invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub endpoint: &'static str,
    pub app_id: Option<String>,
    pub id: Option<u64>,
    pub params: QueryParams,
}

/// Transport double answering from canned JSON bodies and recording every call.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<HashMap<&'static str, Value>>,
    failures: Mutex<HashSet<&'static str>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `endpoint` with `body`.
    pub fn respond(self, endpoint: &'static str, body: Value) -> Self {
        self.responses.lock().unwrap().insert(endpoint, body);
        self
    }

    /// Make `endpoint` fail with a transport-level timeout.
    pub fn fail(self, endpoint: &'static str) -> Self {
        self.failures.lock().unwrap().insert(endpoint);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(
        &self,
        endpoint: &'static str,
        app_id: Option<&str>,
        id: Option<u64>,
        params: QueryParams,
    ) -> HockeyResult<Value> {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            app_id: app_id.map(String::from),
            id,
            params,
        });

        if self.failures.lock().unwrap().contains(endpoint) {
            return Err(HockeyError::Timeout(format!("{endpoint} timed out")));
        }
        self.responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .ok_or_else(|| HockeyError::Http(format!("no canned response for {endpoint}")))
    }

    fn text(value: Value) -> String {
        value.as_str().map(String::from).unwrap_or_else(|| value.to_string())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get_apps(&self) -> HockeyResult<AppsEnvelope> {
        let body = self.record("get_apps", None, None, QueryParams::new())?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_crashes(&self, app_id: &str) -> HockeyResult<CrashesEnvelope> {
        let body = self.record("get_crashes", Some(app_id), None, QueryParams::new())?;
        Ok(serde_json::from_value(body)?)
    }

    async fn query_crashes_for_version(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope> {
        let body = self.record(
            "query_crashes_for_version",
            Some(app_id),
            Some(version_id),
            params.clone(),
        )?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_crashes_for_group(
        &self,
        app_id: &str,
        group_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashesEnvelope> {
        let body = self.record(
            "get_crashes_for_group",
            Some(app_id),
            Some(group_id),
            params.clone(),
        )?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_crash_groups(&self, app_id: &str) -> HockeyResult<CrashGroupsEnvelope> {
        let body = self.record("get_crash_groups", Some(app_id), None, QueryParams::new())?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_crash_groups_for_version(
        &self,
        app_id: &str,
        version_id: u64,
        params: &QueryParams,
    ) -> HockeyResult<CrashGroupsEnvelope> {
        let body = self.record(
            "get_crash_groups_for_version",
            Some(app_id),
            Some(version_id),
            params.clone(),
        )?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_crash_log(&self, app_id: &str, crash_id: u64) -> HockeyResult<String> {
        let body = self.record("get_crash_log", Some(app_id), Some(crash_id), QueryParams::new())?;
        Ok(Self::text(body))
    }

    async fn get_crash_description(&self, app_id: &str, crash_id: u64) -> HockeyResult<String> {
        let body = self.record(
            "get_crash_description",
            Some(app_id),
            Some(crash_id),
            QueryParams::new(),
        )?;
        Ok(Self::text(body))
    }

    async fn get_versions(&self, app_id: &str) -> HockeyResult<VersionsEnvelope> {
        let body = self.record("get_versions", Some(app_id), None, QueryParams::new())?;
        Ok(serde_json::from_value(body)?)
    }

    async fn post_new_version(
        &self,
        app_id: &str,
        upload: VersionUpload<'_>,
    ) -> HockeyResult<RecordEnvelope<VersionRecord>> {
        let mut params = QueryParams::from([
            ("ipa".to_string(), upload.ipa.file_name.clone()),
            ("notes".to_string(), upload.notes.to_string()),
            ("notes_type".to_string(), upload.notes_type.code().to_string()),
            ("notify".to_string(), upload.notify.code().to_string()),
            ("status".to_string(), upload.status.code().to_string()),
            ("tags".to_string(), upload.tags.join(",")),
        ]);
        if let Some(dsym) = upload.dsym {
            params.insert("dsym".to_string(), dsym.file_name.clone());
        }
        let body = self.record("post_new_version", Some(app_id), None, params)?;
        RecordEnvelope::from_value(body)
    }

    async fn remove_app(&self, app_id: &str) -> HockeyResult<u16> {
        let body = self.record("remove_app", Some(app_id), None, QueryParams::new())?;
        body.as_u64()
            .and_then(|code| u16::try_from(code).ok())
            .ok_or_else(|| HockeyError::Http(format!("bad canned status: {body}")))
    }

    async fn post_new_app(&self, ipa: &Artifact) -> HockeyResult<RecordEnvelope<App>> {
        let params = QueryParams::from([("ipa".to_string(), ipa.file_name.clone())]);
        let body = self.record("post_new_app", None, None, params)?;
        RecordEnvelope::from_value(body)
    }
}

/// Wrap a transport double in a client.
pub fn client(transport: RecordingTransport) -> Client<RecordingTransport> {
    Client::new(transport)
}

/// The app most fixtures belong to.
pub fn sample_app() -> Arc<App> {
    Arc::new(App {
        title: Some("Sample".into()),
        ..App::with_identifier("1234567890abcdef1234567890abcdef")
    })
}

/// Successful `crashes` envelope with the given crash ids.
pub fn crashes_body(ids: &[u64]) -> Value {
    let crashes: Vec<Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "app_id": 11,
                "crash_reason_id": 5,
                "created_at": "2021-06-01T10:15:00Z",
                "oem": "Apple",
                "model": "iPhone13,2",
                "os_version": "14.6",
                "has_log": true,
                "has_description": false
            })
        })
        .collect();
    serde_json::json!({
        "status": "success",
        "total_pages": 1,
        "per_page": 25,
        "total_entries": ids.len(),
        "crashes": crashes
    })
}

/// Successful `crash_reasons` envelope with the given group ids.
pub fn crash_groups_body(ids: &[u64]) -> Value {
    let groups: Vec<Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "app_id": 11,
                "app_version_id": 208,
                "number_of_crashes": 3,
                "reason": "EXC_BAD_ACCESS",
                "class": "AppDelegate",
                "method": "application:didFinishLaunchingWithOptions:",
                "file": "AppDelegate.m",
                "fixed": false
            })
        })
        .collect();
    serde_json::json!({
        "status": "success",
        "crash_reasons": groups
    })
}
