//! Global error types for the HockeyApp client.
//!
//! Remote-service failures, local precondition failures, and transport
//! failures are unified into a single `HockeyError` enum.

use std::fmt;

use thiserror::Error;

/// Convenience type alias for Results using HockeyError.
pub type HockeyResult<T> = Result<T, HockeyError>;

/// Pagination metadata reported alongside a result set that spans more than
/// one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Number of pages the server split the result set into.
    pub total_pages: u64,
    /// Page size the server used.
    pub per_page: Option<u64>,
    /// Total number of entries across all pages.
    pub total_entries: Option<u64>,
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received {} pages with {} results per page, {} total entries",
            self.total_pages,
            display_count(self.per_page),
            display_count(self.total_entries)
        )
    }
}

fn display_count(value: Option<u64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Unified error type covering all error categories in the HockeyApp client.
#[derive(Error, Debug)]
pub enum HockeyError {
    // -- Remote application errors --
    /// The response envelope did not carry `status: "success"`.
    #[error("bad status: {}", .status.as_deref().unwrap_or("<missing>"))]
    RemoteStatus {
        /// Status value observed in the envelope, if any.
        status: Option<String>,
    },

    /// The result set spans more than one page and pagination is not implemented.
    #[error("more than one page of results received and pagination is not implemented: {0}")]
    MultiplePages(PageInfo),

    /// The remote service reported item-level errors on a mutation.
    #[error("{0}")]
    Application(String),

    /// An operation expected a specific success signal and did not get it.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    // -- Local errors --
    /// A local invariant was violated before any request was made.
    #[error("precondition failed: {0}")]
    Precondition(String),

    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Network errors --
    /// HTTP request failed.
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Server returned an error status code.
    #[error("server error (status {status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body from the server.
        message: String,
    },

    /// The API token was rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl HockeyError {
    /// Pagination metadata if this is a multiple-pages error.
    pub fn page_info(&self) -> Option<&PageInfo> {
        match self {
            Self::MultiplePages(info) => Some(info),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HockeyError {
    fn from(e: serde_json::Error) -> Self {
        HockeyError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for HockeyError {
    fn from(e: toml::de::Error) -> Self {
        HockeyError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_is_bare_message() {
        let err = HockeyError::Application("bad format\nmissing field".into());
        assert_eq!(err.to_string(), "bad format\nmissing field");
    }

    #[test]
    fn test_remote_status_display() {
        let err = HockeyError::RemoteStatus {
            status: Some("error".into()),
        };
        assert_eq!(err.to_string(), "bad status: error");

        let err = HockeyError::RemoteStatus { status: None };
        assert_eq!(err.to_string(), "bad status: <missing>");
    }

    #[test]
    fn test_multiple_pages_display_and_accessor() {
        let info = PageInfo {
            total_pages: 3,
            per_page: Some(25),
            total_entries: None,
        };
        let err = HockeyError::MultiplePages(info);
        assert_eq!(err.page_info(), Some(&info));
        assert!(err
            .to_string()
            .ends_with("received 3 pages with 25 results per page, unknown total entries"));
        assert!(HockeyError::Http("x".into()).page_info().is_none());
    }
}
