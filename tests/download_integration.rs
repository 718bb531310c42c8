//! Integration tests for single-file fetching.
//!
//! These tests verify the full fetch flow against a mock HTTP server.

mod support;

use pagegrab_core::{
    CancelFlag, DownloadEvent, EventSink, FetchError, FetchFileError, FileFetcher, HttpClient,
    WriteError,
};
use support::socket_guard::{bind_listener_or_skip, start_mock_server_or_skip};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn drain(receiver: &mut tokio::sync::mpsc::UnboundedReceiver<DownloadEvent>) -> Vec<u8> {
    let mut percents = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        if let Some(percent) = event.percent() {
            percents.push(percent);
        }
    }
    percents
}

#[tokio::test]
async fn test_fetch_full_flow_preserves_content() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let content: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/download/archive.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.clone()))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dest = temp_dir.path().join("Pack");

    let (events, mut receiver) = EventSink::channel();
    let written = HttpClient::new()
        .fetch(
            &format!("{}/download/archive.bin", server.uri()),
            &dest,
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect("fetch should succeed");

    assert_eq!(written, content.len() as u64);
    let on_disk = std::fs::read(dest.join("archive.bin")).expect("file should exist");
    assert_eq!(on_disk, content);

    let percents = drain(&mut receiver);
    assert_eq!(percents.last(), Some(&100));
    assert!(
        percents.windows(2).all(|pair| pair[0] <= pair[1]),
        "progress must not go backwards: {percents:?}"
    );
}

#[tokio::test]
async fn test_fetch_hundred_byte_body_ends_at_hundred_percent() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/download/small.dat"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 100]))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (events, mut receiver) = EventSink::channel();
    HttpClient::new()
        .fetch(
            &format!("{}/download/small.dat", server.uri()),
            temp_dir.path(),
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect("fetch should succeed");

    let percents = drain(&mut receiver);
    assert!(!percents.is_empty());
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(percents.last(), Some(&100));
}

/// Serves one chunked response without a `Content-Length` header.
async fn serve_chunked_once(listener: tokio::net::TcpListener, body: Vec<u8>) {
    let (mut socket, _) = listener.accept().await.expect("accept");
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.expect("read request");
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);
    }

    let mut response =
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n".to_vec();
    for piece in body.chunks(5000) {
        response.extend_from_slice(format!("{:x}\r\n", piece.len()).as_bytes());
        response.extend_from_slice(piece);
        response.extend_from_slice(b"\r\n");
    }
    response.extend_from_slice(b"0\r\n\r\n");
    socket.write_all(&response).await.expect("write response");
    socket.shutdown().await.ok();
}

#[tokio::test]
async fn test_fetch_without_content_length_reports_zero_then_hundred() {
    let Some(listener) = bind_listener_or_skip().await else {
        return;
    };
    let addr = listener.local_addr().expect("local addr");
    let body: Vec<u8> = (0..20_000u32).map(|i| (i % 97) as u8).collect();
    let server = tokio::spawn(serve_chunked_once(listener, body.clone()));
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (events, mut receiver) = EventSink::channel();
    let written = HttpClient::new()
        .fetch(
            &format!("http://{addr}/download/stream.bin"),
            temp_dir.path(),
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect("fetch should succeed");
    server.await.expect("server task");

    assert_eq!(written, 20_000);
    assert_eq!(std::fs::read(temp_dir.path().join("stream.bin")).unwrap(), body);
    // 8192 + 8192 + 3616 bytes, then the closing update.
    assert_eq!(drain(&mut receiver), vec![0, 0, 0, 100]);
}

#[tokio::test]
async fn test_fetch_trailing_slash_uses_fallback_name() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/download/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"abc".to_vec()))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (events, _receiver) = EventSink::channel();
    HttpClient::new()
        .fetch(
            &format!("{}/download/", server.uri()),
            temp_dir.path(),
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect("fetch should succeed");

    assert_eq!(
        std::fs::read(temp_dir.path().join("download")).expect("fallback file"),
        b"abc"
    );
}

#[tokio::test]
async fn test_fetch_empty_body_reports_completion() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/download/empty.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (events, mut receiver) = EventSink::channel();
    let written = HttpClient::new()
        .fetch(
            &format!("{}/download/empty.txt", server.uri()),
            temp_dir.path(),
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect("fetch should succeed");

    assert_eq!(written, 0);
    assert!(temp_dir.path().join("empty.txt").exists());
    assert_eq!(drain(&mut receiver), vec![100]);
}

#[tokio::test]
async fn test_fetch_server_error_is_fetch_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/download/broken.zip"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let (events, _receiver) = EventSink::channel();
    let error = HttpClient::new()
        .fetch(
            &format!("{}/download/broken.zip", server.uri()),
            temp_dir.path(),
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect_err("500 must fail");

    assert!(
        matches!(
            error,
            FetchFileError::Fetch(FetchError::HttpStatus { status: 500, .. })
        ),
        "unexpected error: {error:?}"
    );
    assert!(!temp_dir.path().join("broken.zip").exists());
}

#[tokio::test]
async fn test_fetch_into_file_path_is_write_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/download/a.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zip".to_vec()))
        .mount(&server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").expect("seed file");

    let (events, _receiver) = EventSink::channel();
    let error = HttpClient::new()
        .fetch(
            &format!("{}/download/a.zip", server.uri()),
            &blocker,
            &events,
            &CancelFlag::new(),
        )
        .await
        .expect_err("destination under a file must fail");

    assert!(
        matches!(error, FetchFileError::Write(WriteError::CreateDir { .. })),
        "unexpected error: {error:?}"
    );
}
