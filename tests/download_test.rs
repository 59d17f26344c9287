//! Download engine tests against a local mock media server.

use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ytgrab::downloader::{DownloadConfig, DownloadEngine};
use ytgrab::YtgrabError;

const MIB: usize = 1024 * 1024;

fn media_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

async fn serve_media(body: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videoplayback"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;
    server
}

async fn download_len(len: usize, config: DownloadConfig) {
    let body = media_bytes(len);
    let server = serve_media(body.clone()).await;
    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("video.mp4");

    let engine = DownloadEngine::new(config).expect("engine");
    let written = engine
        .download(&format!("{}/videoplayback", server.uri()), &output)
        .await
        .expect("download");

    let saved = std::fs::read(&output).expect("read output");
    assert_eq!(written, len as u64);
    assert_eq!(saved.len(), len);
    assert!(saved == body, "output differs from served body for len {len}");
}

#[tokio::test]
async fn empty_body_produces_empty_file() {
    download_len(0, DownloadConfig::default()).await;
}

#[tokio::test]
async fn single_byte_body() {
    download_len(1, DownloadConfig::default()).await;
}

#[tokio::test]
async fn body_just_under_one_chunk() {
    download_len(MIB - 1, DownloadConfig::default()).await;
}

#[tokio::test]
async fn body_just_over_one_chunk() {
    download_len(MIB + 1, DownloadConfig::default()).await;
}

#[tokio::test]
async fn small_buffer_crosses_many_chunk_boundaries() {
    let config = DownloadConfig {
        chunk_size: 7,
        ..Default::default()
    };
    download_len(10_001, config).await;
}

#[tokio::test]
async fn existing_file_is_truncated() {
    let server = serve_media(b"new".to_vec()).await;
    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("video.mp4");
    std::fs::write(&output, b"a much longer stale partial download").expect("seed file");

    let engine = DownloadEngine::new(DownloadConfig::default()).expect("engine");
    engine
        .download(&format!("{}/videoplayback", server.uri()), &output)
        .await
        .expect("download");

    assert_eq!(std::fs::read(&output).expect("read output"), b"new");
}

#[tokio::test]
async fn not_found_fails_without_creating_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("video.mp4");
    let engine = DownloadEngine::new(DownloadConfig::default()).expect("engine");

    let err = engine
        .download(&format!("{}/videoplayback", server.uri()), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, YtgrabError::HttpStatus(404)));
    assert!(err.to_string().contains("404"));
    assert!(!output.exists());
}

#[tokio::test]
async fn non_ok_success_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(media_bytes(16)))
        .mount(&server)
        .await;

    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("video.mp4");
    let engine = DownloadEngine::new(DownloadConfig::default()).expect("engine");

    let err = engine.download(&server.uri(), &output).await.unwrap_err();
    assert!(matches!(err, YtgrabError::HttpStatus(206)));
    assert!(!output.exists());
}

#[tokio::test]
async fn unwritable_destination_is_io_error() {
    let server = serve_media(media_bytes(32)).await;
    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("missing-dir").join("video.mp4");
    let engine = DownloadEngine::new(DownloadConfig::default()).expect("engine");

    let err = engine
        .download(&format!("{}/videoplayback", server.uri()), &output)
        .await
        .unwrap_err();

    assert!(matches!(err, YtgrabError::Io(_)));
}

#[tokio::test]
async fn configured_timeout_bounds_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(media_bytes(8))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("video.mp4");
    let engine = DownloadEngine::new(DownloadConfig {
        timeout: Some(Duration::from_millis(200)),
        ..Default::default()
    })
    .expect("engine");

    let err = engine.download(&server.uri(), &output).await.unwrap_err();
    assert!(matches!(err, YtgrabError::Transport(_)));
}

#[tokio::test]
async fn huge_chunk_size_is_capped() {
    let config = DownloadConfig {
        chunk_size: usize::MAX,
        ..Default::default()
    };
    download_len(1024, config).await;
}

#[tokio::test]
async fn truncated_body_is_io_error_and_keeps_partial_file() {
    // Announces 100 bytes, sends 10, then hangs up
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\n0123456789")
            .await
            .expect("write response");
        socket.shutdown().await.expect("shutdown");
    });

    let temp = TempDir::new().expect("temp dir");
    let output = temp.path().join("video.mp4");
    let engine = DownloadEngine::new(DownloadConfig::default()).expect("engine");

    let err = engine
        .download(&format!("http://{}/videoplayback", addr), &output)
        .await
        .unwrap_err();
    server.await.expect("server task");

    assert!(matches!(err, YtgrabError::Io(_)), "unexpected error: {err:?}");
    assert_eq!(std::fs::read(&output).expect("partial file"), b"0123456789");
}
