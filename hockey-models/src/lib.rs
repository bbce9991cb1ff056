//! HockeyApp Models - Domain entities mapped from HockeyApp API responses.
//!
//! Entities are ephemeral views: every client call builds fresh instances.
//! Records owned by an app (versions, crashes, crash groups) hold a shared
//! `Arc` handle to the exact `App` passed into the mapping call, since the
//! response body does not reliably identify its owner.

pub mod models;

// Re-export key types
pub use models::app::App;
pub use models::artifact::Artifact;
pub use models::crash::{Crash, CrashContext, CrashRecord};
pub use models::crash_group::{CrashGroup, CrashGroupRecord};
pub use models::version::{DownloadStatus, NotesType, NotifyMode, Version, VersionRecord};
