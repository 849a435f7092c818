//! Extraction of embedded state from profile and post HTML.

use std::sync::OnceLock;

use regex::Regex;

use crate::api::types::SharedData;
use crate::error::{Error, Result};

fn shared_data_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<script[^>]*>\s*window\._sharedData\s*=\s*(\{.*?\})\s*;?\s*</script>")
            .expect("valid shared data regex")
    })
}

fn container_script_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"/[^"'\s<>]*ProfilePageContainer\.js/[^"'\s<>]*\.js"#)
            .expect("valid container script regex")
    })
}

fn query_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"queryId:"(.+?)""#).expect("valid query id regex"))
}

/// Parse the `window._sharedData` blob out of a page.
pub fn extract_shared_data(html: &str) -> Result<SharedData> {
    let blob = shared_data_pattern()
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::MissingField("window._sharedData".into()))?;

    serde_json::from_str(blob.as_str())
        .map_err(|e| Error::MissingField(format!("page data ({})", e)))
}

/// Find the path of the script bundle holding the query identifiers.
pub fn find_container_script(html: &str) -> Option<&str> {
    container_script_pattern().find(html).map(|m| m.as_str())
}

/// List every `queryId:"..."` candidate in a script body, in order.
pub fn extract_query_ids(script: &str) -> Vec<String> {
    let mut ids: Vec<String> = query_id_pattern()
        .captures_iter(script)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();

    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_HTML: &str = r#"<html><head>
<script type="text/javascript" src="/static/bundles/es6/ProfilePageContainer.js/0a1b2c.js" crossorigin="anonymous"></script>
</head><body>
<script type="text/javascript">window._sharedData = {"entry_data": {"ProfilePage": [{"graphql": {"user": {
  "id": "42",
  "edge_owner_to_timeline_media": {"page_info": {"has_next_page": false, "end_cursor": null}, "edges": []}
}}}]}};</script>
</body></html>"#;

    #[test]
    fn test_extract_shared_data() {
        let data = extract_shared_data(PROFILE_HTML).unwrap();
        assert_eq!(data.entry_data.profile_page[0].graphql.user.id, "42");
    }

    #[test]
    fn test_extract_shared_data_missing() {
        let err = extract_shared_data("<html></html>").unwrap_err();
        assert!(matches!(err, Error::MissingField(_)));
    }

    #[test]
    fn test_find_container_script() {
        assert_eq!(
            find_container_script(PROFILE_HTML),
            Some("/static/bundles/es6/ProfilePageContainer.js/0a1b2c.js")
        );
        assert_eq!(find_container_script("<html></html>"), None);
    }

    #[test]
    fn test_extract_query_ids() {
        let script = r#"a={queryId:"abc123"},b={queryId:"def456"},c={queryId:"abc123"}"#;
        assert_eq!(extract_query_ids(script), ["abc123", "def456"]);
    }
}
