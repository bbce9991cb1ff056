//! Response envelope types.
//!
//! Collection endpoints answer with a status envelope:
//! ```json
//! { "status": "success", "total_pages": 1, "per_page": 25, "apps": [ ... ] }
//! ```
//! Mutation endpoints (uploads) answer with the created record at the top
//! level, or with an `errors` field when the server rejected the request.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use hockey_core::constants::STATUS_SUCCESS;
use hockey_core::error::{HockeyError, HockeyResult, PageInfo};
use hockey_models::{App, CrashGroupRecord, CrashRecord, VersionRecord};

/// Query-string parameters forwarded to an endpoint.
pub type QueryParams = BTreeMap<String, String>;

/// Status envelope around a collection payload.
///
/// Only the status and pagination fields are decoded eagerly. The remaining
/// fields stay raw until the envelope has been validated, so a failed status
/// is reported even when the rest of the body does not fit `T`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// "success" on success. Absent on some endpoints (`app_versions`).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub per_page: Option<u64>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    /// Endpoint-specific fields, keyed by their own names.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    payload: PhantomData<fn() -> T>,
}

/// `apps` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppsPayload {
    pub apps: Vec<App>,
}

/// `crashes` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashesPayload {
    pub crashes: Vec<CrashRecord>,
}

/// `crash_reasons` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashGroupsPayload {
    pub crash_reasons: Vec<CrashGroupRecord>,
}

/// `app_versions` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsPayload {
    pub app_versions: Vec<VersionRecord>,
}

pub type AppsEnvelope = Envelope<AppsPayload>;
pub type CrashesEnvelope = Envelope<CrashesPayload>;
pub type CrashGroupsEnvelope = Envelope<CrashGroupsPayload>;
pub type VersionsEnvelope = Envelope<VersionsPayload>;

impl<T> Envelope<T> {
    /// Whether the envelope carries `status: "success"`.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    /// Pagination metadata, present when the server reported `total_pages`.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.total_pages.map(|total_pages| PageInfo {
            total_pages,
            per_page: self.per_page,
            total_entries: self.total_entries,
        })
    }

    /// Reject anything but a successful, single-page response.
    ///
    /// There is no pagination loop, so a multi-page result is an error rather
    /// than a silently truncated first page.
    pub fn ensure_success(&self) -> HockeyResult<()> {
        if !self.is_success() {
            return Err(HockeyError::RemoteStatus {
                status: self.status.clone(),
            });
        }

        match self.page_info() {
            Some(info) if info.total_pages > 1 => {
                warn!("refusing paginated response: {info}");
                Err(HockeyError::MultiplePages(info))
            }
            _ => Ok(()),
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode the endpoint payload without looking at the status.
    pub fn into_payload(self) -> HockeyResult<T> {
        Ok(serde_json::from_value(Value::Object(self.fields))?)
    }

    /// Validate the envelope, then decode its payload.
    pub fn into_validated(self) -> HockeyResult<T> {
        self.ensure_success()?;
        self.into_payload()
    }
}

/// Response of a mutation endpoint: the created record, or the server's
/// rendered error messages.
#[derive(Debug, Clone)]
pub struct RecordEnvelope<T> {
    /// Error messages, one per descriptor, in server order.
    pub errors: Option<Vec<String>>,
    /// The record, decoded only when no errors were reported.
    pub record: Option<T>,
}

impl<T: DeserializeOwned> RecordEnvelope<T> {
    /// Decode a mutation response body.
    pub fn from_value(value: Value) -> HockeyResult<Self> {
        let errors = match value.get("errors") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items.iter().map(render_error).collect()),
            Some(Value::Object(fields)) => Some(
                fields
                    .iter()
                    .map(|(field, detail)| format!("{field}: {}", render_error(detail)))
                    .collect(),
            ),
            Some(other) => Some(vec![render_error(other)]),
        };

        let record = match errors {
            Some(_) => None,
            None => Some(serde_json::from_value(value)?),
        };

        Ok(Self { errors, record })
    }
}

impl<T> RecordEnvelope<T> {
    /// All error messages joined by newlines.
    pub fn errors_message(&self) -> Option<String> {
        self.errors.as_ref().map(|errors| errors.join("\n"))
    }

    /// Unwrap the record, turning reported errors into one application error.
    pub fn into_record(self) -> HockeyResult<T> {
        if let Some(message) = self.errors_message() {
            return Err(HockeyError::Application(message));
        }
        self.record.ok_or_else(|| {
            HockeyError::UnexpectedResponse("response carried neither a record nor errors".into())
        })
    }
}

/// Render one error descriptor: strings verbatim, lists comma-joined, anything
/// else as compact JSON.
fn render_error(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render_error).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
