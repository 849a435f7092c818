//! Integration tests for the HTTP feed client.
//!
//! These tests use wiremock to stand in for the profile page, the GraphQL
//! pagination endpoint, post detail pages and the media CDN.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use ig_spider::api::{FeedSource, InstagramApi, MediaTransport};
use ig_spider::checkpoint::{Checkpoint, CheckpointStore};
use ig_spider::config::{ClientConfig, DownloadType};
use ig_spider::download::{CrawlSettings, Crawler, DownloadOutcome, Downloader, TerminalState};
use ig_spider::fs::{temp_path, DownloadTarget};
use ig_spider::media::{ItemDescriptor, Media, MediaUrl};
use ig_spider::Error;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> InstagramApi {
    let config = ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    };
    InstagramApi::new(&config).expect("client builds")
}

fn profile_html(timeline: &str) -> String {
    format!(
        r#"<html><head>
<script type="text/javascript" src="/static/bundles/es6/ProfilePageContainer.js/abc123.js" crossorigin="anonymous"></script>
</head><body>
<script type="text/javascript">window._sharedData = {{"config": {{"csrf_token": "x"}},
"entry_data": {{"ProfilePage": [{{"graphql": {{"user": {{"id": "1234",
"edge_owner_to_timeline_media": {timeline}}}}}}}]}}}};</script>
</body></html>"#
    )
}

fn post_html(shortcode_media: &str) -> String {
    format!(
        r#"<html><body><script type="text/javascript">window._sharedData = {{"entry_data": {{"PostPage": [{{"graphql": {{"shortcode_media": {shortcode_media}}}}}]}}}};</script></body></html>"#
    )
}

async fn mount_profile(server: &MockServer, timeline: &str) {
    Mock::given(method("GET"))
        .and(path("/natgeo/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_html(timeline)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/static/bundles/es6/ProfilePageContainer.js/abc123.js"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"a={queryId:"badhash"};b={queryId:"goodhash"};"#),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_first_page_from_profile() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_profile(
        &server,
        &format!(
            r#"{{"page_info": {{"has_next_page": true, "end_cursor": "CURSOR1"}}, "edges": [
                {{"node": {{"shortcode": "p1", "is_video": false, "__typename": "GraphImage",
                           "display_url": "{base}/media/p1.jpg"}}}},
                {{"node": {{"shortcode": "v1", "is_video": true, "__typename": "GraphVideo"}}}}
            ]}}"#
        ),
    )
    .await;

    let api = client_for(&server);
    let (account_id, page) = api.fetch_first_page("natgeo").await.unwrap();

    assert_eq!(account_id, "1234");
    assert!(page.has_next);
    assert_eq!(page.next_cursor.as_deref(), Some("CURSOR1"));
    assert_eq!(page.items.len(), 2);
    assert_eq!(
        page.items[0].display_url.as_deref(),
        Some(format!("{base}/media/p1.jpg").as_str())
    );
    assert!(page.items[1].is_video);
}

#[tokio::test]
async fn test_unknown_account_is_missing_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nobody/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.fetch_first_page("nobody").await.unwrap_err();
    assert!(matches!(err, Error::MissingField(_)));
}

#[tokio::test]
async fn test_query_id_probed_once_then_cached() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        r#"{"page_info": {"has_next_page": true, "end_cursor": "CURSOR1"}, "edges": []}"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/graphql/query/"))
        .and(query_param("query_hash", "badhash"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": {"user": {}}}"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/graphql/query/"))
        .and(query_param("query_hash", "goodhash"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"data": {"user": {"edge_owner_to_timeline_media": {
                "page_info": {"has_next_page": true, "end_cursor": "CURSOR2"},
                "edges": [{"node": {"shortcode": "p2", "is_video": false}}]
            }}}}"#,
        ))
        .expect(2)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let (account_id, first) = api.fetch_first_page("natgeo").await.unwrap();

    let second = api
        .fetch_next_page(&account_id, first.next_cursor.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(second.items[0].shortcode, "p2");
    assert_eq!(second.next_cursor.as_deref(), Some("CURSOR2"));

    let third = api.fetch_next_page(&account_id, "CURSOR2").await.unwrap();
    assert_eq!(third.items.len(), 1);
}

#[tokio::test]
async fn test_null_user_is_feed_exhausted() {
    let server = MockServer::start().await;
    mount_profile(
        &server,
        r#"{"page_info": {"has_next_page": true, "end_cursor": "CURSOR1"}, "edges": []}"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/graphql/query/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": {"user": null}}"#))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let (account_id, _) = api.fetch_first_page("natgeo").await.unwrap();
    let err = api.fetch_next_page(&account_id, "CURSOR1").await.unwrap_err();
    assert!(matches!(err, Error::FeedExhausted));
}

#[tokio::test]
async fn test_resolve_gallery_from_post_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/p/g1/"))
        .and(query_param("taken-by", "natgeo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(post_html(
            r#"{"__typename": "GraphSidecar", "edge_sidecar_to_children": {"edges": [
                {"node": {"is_video": true, "display_url": "https://cdn/1.jpg", "video_url": "https://cdn/1.mp4"}},
                {"node": {"is_video": false, "display_url": "https://cdn/2.jpg"}}
            ]}}"#,
        )))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let media = api
        .resolve_media("natgeo", &ItemDescriptor::new("g1", false, true))
        .await
        .unwrap();

    assert_eq!(
        media,
        Media::Gallery(vec![
            MediaUrl::video("https://cdn/1.mp4"),
            MediaUrl::image("https://cdn/2.jpg"),
        ])
    );
}

#[tokio::test]
async fn test_download_streams_to_final_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/clip.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 64 * 1024]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let api = client_for(&server);
    let downloader = Downloader::new(&api, Arc::new(AtomicBool::new(false)));
    let target = DownloadTarget::new(
        &dir.path().join("natgeo"),
        &format!("{}/media/clip.mp4?sig=abc", server.uri()),
    )
    .unwrap();

    let outcome = downloader.ensure_downloaded(&target, false).await.unwrap();

    assert_eq!(outcome, DownloadOutcome::Downloaded(target.local_path.clone()));
    assert_eq!(std::fs::metadata(&target.local_path).unwrap().len(), 64 * 1024);
    assert!(!temp_path(&target.local_path).exists());
}

#[tokio::test]
async fn test_download_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/broken.jpg"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .open(&format!("{}/media/broken.jpg", server.uri()))
        .await
        .err()
        .expect("server error fails");
    assert!(matches!(err, Error::TransientFetch(_)));
}

#[tokio::test]
async fn test_crawl_single_page_photos_only() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_profile(
        &server,
        &format!(
            r#"{{"page_info": {{"has_next_page": false, "end_cursor": null}}, "edges": [
                {{"node": {{"shortcode": "p1", "is_video": false, "__typename": "GraphImage",
                           "display_url": "{base}/media/p1.jpg?sig=1"}}}},
                {{"node": {{"shortcode": "v1", "is_video": true, "__typename": "GraphVideo"}}}},
                {{"node": {{"shortcode": "p2", "is_video": false, "__typename": "GraphImage",
                           "display_url": "{base}/media/p2.jpg?sig=2"}}}}
            ]}}"#
        ),
    )
    .await;

    for name in ["p1.jpg", "p2.jpg"] {
        Mock::given(method("GET"))
            .and(path(format!("/media/{}", name)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(name.as_bytes().to_vec()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let api = client_for(&server);
    let crawler = Crawler::new(
        &api,
        &api,
        CheckpointStore::in_directory(dir.path()),
        CrawlSettings::new(dir.path()),
        Arc::new(AtomicBool::new(false)),
    );

    let report = crawler
        .run(Checkpoint::fresh("natgeo", DownloadType::Photo, 1))
        .await;

    assert!(matches!(report.terminal, TerminalState::Exhausted));
    assert_eq!(report.stats.total_downloaded(), 2);
    assert_eq!(report.checkpoint.page_index, 1);
    assert!(!report.checkpoint.has_next);
    assert_eq!(
        std::fs::read(dir.path().join("natgeo").join("p1.jpg")).unwrap(),
        b"p1.jpg"
    );
    assert!(dir.path().join("natgeo").join("p2.jpg").exists());
}
