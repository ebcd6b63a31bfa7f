//! Integration tests for the page downloader.
//!
//! These tests verify the full batch flow against mock HTTP servers.

use std::time::{Duration, Instant};

use tempfile::TempDir;
use toolbelt::download::{DownloadError, HttpClient, Pacing, PageDownloader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, path_str: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn quick_downloader() -> PageDownloader {
    PageDownloader::new(
        HttpClient::new().expect("client builds"),
        Pacing::disabled(),
    )
}

#[tokio::test]
async fn test_batch_writes_one_html_file_per_url() {
    let server = MockServer::start().await;
    mount_page(&server, "/report.csv", "a,b\n1,2").await;
    mount_page(&server, "/readme", "<p>hello</p>").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let out = temp_dir.path().join("out");

    let urls = [
        format!("{}/report.csv", server.uri()),
        format!("{}/readme", server.uri()),
    ];
    let saved = quick_downloader()
        .download_all(&urls, &out)
        .await
        .expect("batch should succeed");

    assert_eq!(saved, [out.join("report.html"), out.join("readme.html")]);
    assert_eq!(
        std::fs::read_to_string(out.join("report.html")).unwrap(),
        "a,b\n1,2"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("readme.html")).unwrap(),
        "<p>hello</p>"
    );
}

#[tokio::test]
async fn test_batch_overwrites_existing_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/news", "fresh").await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(temp_dir.path().join("news.html"), "stale").unwrap();

    quick_downloader()
        .download_all(&[format!("{}/news", server.uri())], temp_dir.path())
        .await
        .expect("batch should succeed");

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("news.html")).unwrap(),
        "fresh"
    );
}

#[tokio::test]
async fn test_http_error_aborts_remaining_urls() {
    let server = MockServer::start().await;
    mount_page(&server, "/first", "one").await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/never"))
        .respond_with(ResponseTemplate::new(200).set_body_string("unreachable"))
        .expect(0)
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let urls = [
        format!("{}/first", server.uri()),
        format!("{}/missing", server.uri()),
        format!("{}/never", server.uri()),
    ];
    let err = quick_downloader()
        .download_all(&urls, temp_dir.path())
        .await
        .unwrap_err();

    assert!(
        matches!(err, DownloadError::HttpStatus { status: 404, .. }),
        "unexpected error: {err:?}"
    );
    assert!(temp_dir.path().join("first.html").exists());
    assert!(!temp_dir.path().join("missing.html").exists());
    assert!(!temp_dir.path().join("never.html").exists());
}

#[tokio::test]
async fn test_pause_between_downloads_but_not_after_last() {
    let server = MockServer::start().await;
    for name in ["/a", "/b", "/c"] {
        mount_page(&server, name, "x").await;
    }
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let pacing = Pacing::new(Duration::from_millis(60), Duration::from_millis(61));
    let downloader = PageDownloader::new(HttpClient::new().unwrap(), pacing);

    let urls: Vec<String> = ["a", "b", "c"]
        .iter()
        .map(|name| format!("{}/{name}", server.uri()))
        .collect();

    let started = Instant::now();
    downloader
        .download_all(&urls, temp_dir.path())
        .await
        .expect("batch should succeed");
    let elapsed = started.elapsed();

    // Two pauses for three URLs.
    assert!(elapsed >= Duration::from_millis(120), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "elapsed {elapsed:?}");
}
