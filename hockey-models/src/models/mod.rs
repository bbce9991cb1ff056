//! Entity model definitions.

pub mod app;
pub mod artifact;
pub mod crash;
pub mod crash_group;
pub mod version;
