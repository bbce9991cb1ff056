//! App entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An application registered with HockeyApp.
///
/// Apps carry no owner, so the server record and the entity are the same
/// shape. Every other entity is scoped to an app through its
/// `public_identifier`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Stable identifier used as a path parameter by nearly every endpoint.
    pub public_identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bundle_identifier: Option<String>,
    /// Platform name, e.g. "iOS" or "Android".
    #[serde(default)]
    pub platform: Option<String>,
    /// 0 beta, 1 store, 2 alpha, 3 enterprise.
    #[serde(default)]
    pub release_type: Option<i64>,
    /// 0 owner, 1 developer, 2 member, 3 tester.
    #[serde(default)]
    pub role: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl App {
    /// Build a handle for an app whose public identifier is already known.
    pub fn with_identifier(public_identifier: impl Into<String>) -> Self {
        Self {
            public_identifier: public_identifier.into(),
            ..Self::default()
        }
    }

    /// Human-readable name, falling back to the public identifier.
    pub fn display_name(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.public_identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_deserialize_full() {
        let json = serde_json::json!({
            "title": "Sample",
            "bundle_identifier": "net.hockeyapp.sample",
            "public_identifier": "1234567890abcdef1234567890abcdef",
            "platform": "iOS",
            "release_type": 0,
            "role": 0,
            "owner": "Example Ltd",
            "created_at": "2012-01-13T14:17:56Z"
        });
        let app: App = serde_json::from_value(json).unwrap();
        assert_eq!(app.public_identifier, "1234567890abcdef1234567890abcdef");
        assert_eq!(app.platform.as_deref(), Some("iOS"));
        assert_eq!(app.display_name(), "Sample");
        assert!(app.created_at.is_some());
    }

    #[test]
    fn test_app_requires_public_identifier() {
        let json = serde_json::json!({ "title": "No id" });
        assert!(serde_json::from_value::<App>(json).is_err());
    }

    #[test]
    fn test_with_identifier_display_name() {
        let app = App::with_identifier("abc");
        assert_eq!(app.display_name(), "abc");
        assert!(app.title.is_none());
    }
}
