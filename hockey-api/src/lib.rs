//! HockeyApp API - transport layer for the HockeyApp REST API (v2).
//!
//! This crate defines the [`Transport`] contract the client adapter is built
//! on, the typed response envelopes every endpoint decodes into, and
//! [`ApiClient`], a reqwest-backed implementation with token authentication,
//! custom headers, multipart uploads, and retry with exponential backoff.

pub mod client;
pub mod endpoints;
pub mod response;
pub mod transport;

// Re-export key types
pub use client::{ApiClient, RetryConfig};
pub use response::{
    AppsEnvelope, CrashGroupsEnvelope, CrashesEnvelope, Envelope, QueryParams, RecordEnvelope,
    VersionsEnvelope,
};
pub use transport::{Transport, VersionUpload};
