//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "HockeyApp";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// REST API version path segment.
pub const API_VERSION: &str = "2";

/// Default HockeyApp server address.
pub const DEFAULT_SERVER_ADDRESS: &str = "https://rink.hockeyapp.net";

/// Header carrying the API token on every request.
pub const TOKEN_HEADER: &str = "X-HockeyAppToken";

/// Environment variable that overrides the configured API token.
pub const TOKEN_ENV_VAR: &str = "HOCKEYAPP_API_TOKEN";

/// Default API request timeout in milliseconds.
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for binary uploads in milliseconds.
pub const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 600_000;

/// Page size requested from the crash search endpoint.
pub const CRASH_SEARCH_PAGE_SIZE: u32 = 50;

/// Envelope status value that marks a successful response.
pub const STATUS_SUCCESS: &str = "success";
