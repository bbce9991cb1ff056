//! HockeyApp Client - the adapter between the raw transport and the domain model.
//!
//! [`Client`] calls one [`Transport`](hockey_api::Transport) endpoint per
//! operation, validates the response envelope (status and pagination), and
//! maps the payload into entities owned by the app or version the caller
//! passed in. [`timestamp`] and [`query`] build the crash search filter in
//! the exact layout the search backend accepts.

pub mod client;
pub mod query;
pub mod timestamp;

pub use client::Client;
pub use query::{crash_search_params, created_between};
pub use timestamp::Timestamp;
