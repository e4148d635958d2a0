mod common;

use std::fs;
use std::path::PathBuf;

use harvester_core::{HarvestConfig, EXCLUDED_DRIVERS, TARGET_ENTRY};
use harvester_engine::{DownloadError, FailureKind, HarvestError, HarvestEvent, Harvester};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{zip_bytes, TestSink};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn config_for(server: &MockServer, temp: &TempDir) -> HarvestConfig {
    HarvestConfig {
        page_url: format!("{}/bigquery/drivers", server.uri()),
        base_origin: server.uri(),
        downloads_dir: temp.path().join("downloads"),
        history_file: temp.path().join("download_history.txt"),
        ..HarvestConfig::default()
    }
}

async fn serve_page(server: &MockServer, html: &str) {
    Mock::given(method("GET"))
        .and(path("/bigquery/drivers"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html.to_string(), "text/html"))
        .mount(server)
        .await;
}

async fn serve_archive(server: &MockServer, route: &str, body: Vec<u8>, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(times)
        .mount(server)
        .await;
}

fn history_lines(config: &HarvestConfig) -> Vec<String> {
    fs::read_to_string(&config.history_file)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn relative_driver_link_is_downloaded_extracted_and_recorded() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);

    serve_page(&server, r#"<p><a href="/docs/jdbc/x.zip">jdbc driver</a></p>"#).await;
    serve_archive(
        &server,
        "/docs/jdbc/x.zip",
        zip_bytes(&[(TARGET_ENTRY, b"jar-bytes"), ("LICENSE", b"text")]),
        1,
    )
    .await;

    let sink = TestSink::new();
    let harvester = Harvester::new(config.clone());
    let summary = harvester.run(&sink).await.expect("run ok");

    let link = format!("{}/docs/jdbc/x.zip", server.uri());
    assert_eq!(summary.processed, vec![link.clone()]);
    assert!(summary.skipped.is_empty());

    let archive = config.downloads_dir.join("x.zip");
    let extracted = config.downloads_dir.join("x-GoogleBigQueryJDBC42.jar");
    assert!(archive.is_file());
    assert_eq!(fs::read(&extracted).unwrap(), b"jar-bytes");
    assert_eq!(history_lines(&config), vec![link.clone()]);

    assert_eq!(
        sink.take(),
        vec![
            HarvestEvent::FetchingPage {
                url: config.page_url.clone()
            },
            HarvestEvent::Downloading { link },
            HarvestEvent::Downloaded { path: archive },
            HarvestEvent::Extracted { path: extracted },
        ]
    );
}

#[tokio::test]
async fn second_run_skips_everything_already_recorded() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);

    serve_page(
        &server,
        r#"<a href="/jdbc/a.zip">a</a> <a href="/jdbc/b.zip">b</a>"#,
    )
    .await;
    // Each archive may be fetched exactly once across both runs.
    serve_archive(&server, "/jdbc/a.zip", zip_bytes(&[(TARGET_ENTRY, b"a")]), 1).await;
    serve_archive(&server, "/jdbc/b.zip", zip_bytes(&[(TARGET_ENTRY, b"b")]), 1).await;

    let harvester = Harvester::new(config.clone());
    let first = harvester.run(&TestSink::new()).await.unwrap();
    assert_eq!(first.processed.len(), 2);

    let sink = TestSink::new();
    let second = harvester.run(&sink).await.unwrap();
    assert!(second.processed.is_empty());
    assert_eq!(second.skipped.len(), 2);

    let skipped: Vec<_> = sink
        .take()
        .into_iter()
        .filter(|event| matches!(event, HarvestEvent::AlreadyDownloaded { .. }))
        .collect();
    assert_eq!(skipped.len(), 2);

    let lines = history_lines(&config);
    assert_eq!(
        lines,
        vec![
            format!("{}/jdbc/a.zip", server.uri()),
            format!("{}/jdbc/b.zip", server.uri()),
        ]
    );
}

#[tokio::test]
async fn non_archive_and_deny_listed_links_are_never_requested() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);
    let denied = EXCLUDED_DRIVERS[1];

    let html = format!(
        r#"<a href="/docs/jdbc-release-notes">notes</a>
           <a href="/files/{denied}">old</a>
           <a href="/odbc/driver.zip">odbc</a>
           <a href="/files/jdbc-new.zip">new</a>"#
    );
    serve_page(&server, &html).await;
    serve_archive(&server, &format!("/files/{denied}"), Vec::new(), 0).await;
    serve_archive(&server, "/odbc/driver.zip", Vec::new(), 0).await;
    serve_archive(
        &server,
        "/files/jdbc-new.zip",
        zip_bytes(&[(TARGET_ENTRY, b"new")]),
        1,
    )
    .await;

    let summary = Harvester::new(config.clone())
        .run(&TestSink::new())
        .await
        .unwrap();
    assert_eq!(
        summary.processed,
        vec![format!("{}/files/jdbc-new.zip", server.uri())]
    );
    assert_eq!(summary.considered(), 1);
}

#[tokio::test]
async fn page_without_driver_links_still_creates_output_dir() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);
    serve_page(&server, "<html><body>nothing</body></html>").await;

    let summary = Harvester::new(config.clone())
        .run(&TestSink::new())
        .await
        .unwrap();
    assert_eq!(summary.considered(), 0);
    assert!(config.downloads_dir.is_dir());
    assert!(!config.history_file.exists());
}

#[tokio::test]
async fn page_fetch_failure_aborts_before_anything_is_written() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);
    Mock::given(method("GET"))
        .and(path("/bigquery/drivers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = Harvester::new(config.clone())
        .run(&TestSink::new())
        .await
        .unwrap_err();
    match err {
        HarvestError::PageFetch { source, .. } => {
            assert_eq!(source.kind, FailureKind::HttpStatus(503))
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.downloads_dir.exists());
}

#[tokio::test]
async fn first_failing_download_aborts_the_whole_run() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);

    serve_page(
        &server,
        r#"<a href="/jdbc/ok.zip">1</a><a href="/jdbc/broken.zip">2</a><a href="/jdbc/later.zip">3</a>"#,
    )
    .await;
    serve_archive(&server, "/jdbc/ok.zip", zip_bytes(&[(TARGET_ENTRY, b"ok")]), 1).await;
    Mock::given(method("GET"))
        .and(path("/jdbc/broken.zip"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    serve_archive(&server, "/jdbc/later.zip", Vec::new(), 0).await;

    let err = Harvester::new(config.clone())
        .run(&TestSink::new())
        .await
        .unwrap_err();
    match &err {
        HarvestError::Download { link, source } => {
            assert_eq!(link, &format!("{}/jdbc/broken.zip", server.uri()));
            assert!(matches!(
                source,
                DownloadError::Fetch(fetch) if fetch.kind == FailureKind::HttpStatus(404)
            ));
        }
        other => panic!("unexpected error: {other}"),
    }

    // Work finished before the failure stays recorded.
    assert_eq!(
        history_lines(&config),
        vec![format!("{}/jdbc/ok.zip", server.uri())]
    );
}

#[tokio::test]
async fn archive_without_target_entry_is_not_recorded() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);

    serve_page(&server, r#"<a href="/jdbc/odd.zip">odd</a>"#).await;
    serve_archive(&server, "/jdbc/odd.zip", zip_bytes(&[("README", b"no jar")]), 1).await;

    let err = Harvester::new(config.clone())
        .run(&TestSink::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::Extract { .. }), "{err}");
    assert!(!config.history_file.exists());
    let output: PathBuf = config.downloads_dir.join("odd-GoogleBigQueryJDBC42.jar");
    assert!(!output.exists());
    // The downloaded archive itself is left in place.
    assert!(config.downloads_dir.join("odd.zip").exists());
}

#[tokio::test]
async fn non_zip_body_fails_validation() {
    init_logging();
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    let config = config_for(&server, &temp);

    serve_page(&server, r#"<a href="/jdbc/fake.zip">fake</a>"#).await;
    serve_archive(&server, "/jdbc/fake.zip", b"<html>login</html>".to_vec(), 1).await;

    let err = Harvester::new(config.clone())
        .run(&TestSink::new())
        .await
        .unwrap_err();
    assert!(matches!(err, HarvestError::Validate { .. }), "{err}");
    assert!(!config.history_file.exists());
}
