use std::fs;
use std::sync::{Arc, Mutex};

use strongroom_client::{
    ClientEvent, ClientSettings, DownloadTarget, Downloader, FailureKind, ProgressSink,
    ReqwestStorageApi, StorageApi, StorageCopy,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<ClientEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: ClientEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn downloader_for(server: &MockServer, dir: &std::path::Path) -> Downloader {
    let settings = ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    };
    let api: Arc<dyn StorageApi> =
        Arc::new(ReqwestStorageApi::new(&settings).expect("client settings are valid"));
    Downloader::new(api, dir.to_path_buf())
}

#[tokio::test]
async fn backup_target_never_touches_the_primary_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/f1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files-backup/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("backup bytes"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sink = TestSink::new();
    let receipt = downloader_for(&server, dir.path())
        .fetch("f1", "a.txt", DownloadTarget::Backup, &sink)
        .await
        .expect("backup download ok");

    assert_eq!(receipt.served_from, StorageCopy::Backup);
    assert_eq!(fs::read(&receipt.path).unwrap(), b"backup bytes");
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn safe_download_prefers_the_primary_copy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("primary bytes"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files-backup/f1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sink = TestSink::new();
    let receipt = downloader_for(&server, dir.path())
        .fetch("f1", "a.txt", DownloadTarget::Safe, &sink)
        .await
        .expect("safe download ok");

    assert_eq!(receipt.served_from, StorageCopy::Primary);
    assert!(sink.take().is_empty());
}

#[tokio::test]
async fn safe_download_falls_back_to_backup_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/f1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files-backup/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("backup bytes"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sink = TestSink::new();
    let receipt = downloader_for(&server, dir.path())
        .fetch("f1", "a.txt", DownloadTarget::Safe, &sink)
        .await
        .expect("fallback download ok");

    assert_eq!(receipt.served_from, StorageCopy::Backup);
    assert_eq!(receipt.byte_len, "backup bytes".len() as u64);
    assert_eq!(
        sink.take(),
        vec![ClientEvent::DownloadFellBack {
            filename: "a.txt".to_string(),
        }]
    );
}

#[tokio::test]
async fn both_copies_failing_is_a_single_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/f1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files-backup/f1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sink = TestSink::new();
    let err = downloader_for(&server, dir.path())
        .fetch("f1", "a.txt", DownloadTarget::Safe, &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::AllCopiesFailed);
}

#[tokio::test]
async fn listed_names_cannot_escape_the_download_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let sink = TestSink::new();
    let receipt = downloader_for(&server, dir.path())
        .fetch("f1", "../../escape.txt", DownloadTarget::Primary, &sink)
        .await
        .expect("download ok");

    assert_eq!(receipt.path, dir.path().join("escape.txt"));
    assert!(receipt.path.exists());
}
