//! HockeyApp Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other HockeyApp crates:
//! - Application configuration (server URL, API token, logging)
//! - The unified error type covering remote, local, and transport failures
//! - Structured logging with tracing
//! - Platform directory lookup
//! - Common constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{HockeyError, HockeyResult, PageInfo};
pub use logging::init_logging;
pub use platform::Platform;
