//! Crash search query construction.

use hockey_api::QueryParams;
use hockey_core::constants::CRASH_SEARCH_PAGE_SIZE;

use crate::timestamp::Timestamp;

/// Range filter over two normalized timestamps:
/// `["<since>" TO "<till>"]'`.
///
/// The bounds must be double-quoted; with single quotes or no quotes the
/// backend ignores the filter and returns every crash of the version. The
/// trailing `'` is what the backend has always been sent.
pub fn created_between(since: &str, till: &str) -> String {
    format!("[\"{since}\" TO \"{till}\"]'")
}

/// Parameters for a version crash search between `since` and `till`.
///
/// Caller options are kept except `query` and `per_page`, which are always
/// set here.
pub fn crash_search_params(options: &QueryParams, since: &Timestamp, till: &Timestamp) -> QueryParams {
    let range = created_between(&since.to_query_string(), &till.to_query_string());

    let mut params = options.clone();
    params.insert("per_page".to_string(), CRASH_SEARCH_PAGE_SIZE.to_string());
    params.insert("query".to_string(), format!("created_at:{range}"));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_between_exact_layout() {
        assert_eq!(
            created_between("2021-06-01T00:00:00", "2021-06-02T00:00:00"),
            "[\"2021-06-01T00:00:00\" TO \"2021-06-02T00:00:00\"]'"
        );
    }

    #[test]
    fn test_search_params() {
        let since: Timestamp = "2021-06-01 00:00:00 UTC".parse().unwrap();
        let till: Timestamp = "2021-06-02T02:00:00+02:00".parse().unwrap();
        let options = QueryParams::from([
            ("sort".to_string(), "date".to_string()),
            ("per_page".to_string(), "500".to_string()),
            ("query".to_string(), "model:iPhone".to_string()),
        ]);

        let params = crash_search_params(&options, &since, &till);
        assert_eq!(params.get("sort").map(String::as_str), Some("date"));
        assert_eq!(params.get("per_page").map(String::as_str), Some("50"));
        assert_eq!(
            params.get("query").map(String::as_str),
            Some("created_at:[\"2021-06-01T00:00:00\" TO \"2021-06-02T00:00:00\"]'")
        );
        assert_eq!(params.len(), 3);
    }
}
