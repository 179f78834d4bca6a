//! Tests for crawl query construction.

use ghcrawl::{CrawlError, CrawlQuery, Visibility};

#[test]
fn queries_render_github_search_qualifiers() {
    let query = CrawlQuery {
        user: Some("octocat".to_string()),
        organizations: vec!["acme".to_string()],
        topics: vec!["inner-source".to_string()],
        visibility: Visibility::Public,
    };

    assert_eq!(
        query.to_search_string().expect("valid"),
        "user:octocat org:acme topic:inner-source is:public"
    );
}

#[test]
fn queries_emit_every_organization_and_topic() {
    let query = CrawlQuery {
        organizations: vec!["acme".to_string(), "globex".to_string()],
        topics: vec!["inner-source".to_string(), "rust".to_string()],
        ..CrawlQuery::default()
    };

    assert_eq!(
        query.to_search_string().expect("valid"),
        "org:acme org:globex topic:inner-source topic:rust is:public"
    );
}

#[test]
fn internal_visibility_is_rendered() {
    let query = CrawlQuery {
        organizations: vec!["acme".to_string()],
        visibility: Visibility::Internal,
        ..CrawlQuery::default()
    };

    assert_eq!(
        query.to_search_string().expect("valid"),
        "org:acme is:internal"
    );
}

#[test]
fn unqualified_queries_are_rejected() {
    let query = CrawlQuery::default();

    let err = query
        .to_search_string()
        .expect_err("nothing to scope the search");

    assert!(matches!(err, CrawlError::InvalidQuery { .. }));
}

#[test]
fn test_visibility_as_str() {
    assert_eq!(Visibility::Public.as_str(), "public");
    assert_eq!(Visibility::Private.as_str(), "private");
    assert_eq!(Visibility::Internal.as_str(), "internal");
}

#[test]
fn test_visibility_defaults_to_public() {
    assert_eq!(Visibility::default(), Visibility::Public);
    assert_eq!(CrawlQuery::default().visibility, Visibility::Public);
}
