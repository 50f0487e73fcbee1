use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use ytdl_client::common::api::client::ApiClient;
use ytdl_client::jobs::models::JobStatus;
use ytdl_client::jobs::{JobRegistry, progress};

// 模拟下载服务：/ws/{id} 依次推送给定事件，其余请求按 /api/downloads
// 计数并返回空列表
async fn spawn_backend(
    events: Vec<String>,
    hold_open: bool,
    list_hits: Arc<AtomicUsize>,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let events = events.clone();
            let list_hits = Arc::clone(&list_hits);
            tokio::spawn(async move {
                let mut head = [0u8; 512];
                let n = stream.peek(&mut head).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&head[..n]).to_string();

                if head.starts_with("GET /ws/") {
                    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
                    for event in events {
                        if ws.send(Message::text(event)).await.is_err() {
                            return;
                        }
                        tokio::time::sleep(Duration::from_millis(20)).await;
                    }
                    if hold_open {
                        // 发完后保持连接，等客户端先关
                        while let Some(Ok(_)) = ws.next().await {}
                    } else {
                        let _ = ws.close(None).await;
                    }
                } else {
                    if head.contains("/api/downloads") {
                        list_hits.fetch_add(1, Ordering::SeqCst);
                    }
                    let mut stream = stream;
                    let mut buf = [0u8; 2048];
                    let _ = stream.read(&mut buf).await;
                    let _ = stream
                        .write_all(
                            b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n[]",
                        )
                        .await;
                }
            });
        }
    });
    format!("http://{}", addr)
}

#[test]
fn test_channel_url() {
    let http = Url::parse("http://127.0.0.1:8000").unwrap();
    assert_eq!(
        progress::channel_url(&http, "abc").unwrap().as_str(),
        "ws://127.0.0.1:8000/ws/abc"
    );

    let https = Url::parse("https://dl.example.com").unwrap();
    assert_eq!(
        progress::channel_url(&https, "abc").unwrap().as_str(),
        "wss://dl.example.com/ws/abc"
    );
}

#[test]
fn test_duplicate_registration_refused() {
    let registry = JobRegistry::hidden();
    registry.register("job-1", "视频A").unwrap();
    // 同一个任务至多一条订阅
    assert!(registry.register("job-1", "视频A").is_err());
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_downloading_event_updates_view() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = spawn_backend(
        vec![r#"{"status":"downloading","progress":42.5,"speed":"1.2MB/s","eta":"00:10"}"#.to_string()],
        true,
        Arc::clone(&hits),
    )
    .await;

    let api = ApiClient::new(&server).unwrap();
    let registry = Arc::new(JobRegistry::hidden());
    registry.register("job-1", "测试视频").unwrap();

    let task = tokio::spawn(progress::follow_job(
        api,
        Arc::clone(&registry),
        "job-1".to_string(),
    ));
    tokio::time::sleep(Duration::from_millis(500)).await;

    let view = registry.get("job-1").unwrap().snapshot();
    assert_eq!(view.status, JobStatus::Downloading);
    assert_eq!(view.percent, Some(42.5));
    assert_eq!(view.line.as_deref(), Some("1.2MB/s • ETA: 00:10"));

    // 移除条目即撤销订阅
    registry.remove("job-1");
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("订阅协程应随取消退出")
        .unwrap();
}

#[tokio::test]
async fn test_completed_removes_entry_and_refreshes_once() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = spawn_backend(
        vec![
            r#"{"status":"downloading","progress":90.0,"speed":"2MB/s","eta":"00:02"}"#.to_string(),
            r#"{"status":"completed","progress":100}"#.to_string(),
        ],
        true,
        Arc::clone(&hits),
    )
    .await;

    let api = ApiClient::new(&server).unwrap();
    let registry = Arc::new(JobRegistry::hidden());
    registry.register("job-1", "测试视频").unwrap();

    let task = tokio::spawn(progress::follow_job(
        api,
        Arc::clone(&registry),
        "job-1".to_string(),
    ));
    // completed 后条目保留 3 秒再移除
    tokio::time::timeout(Duration::from_secs(10), task)
        .await
        .expect("订阅协程应在终态后退出")
        .unwrap();

    assert!(registry.get("job-1").is_none());
    assert!(registry.is_empty());
    // 文件列表恰好刷新一次
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_keeps_entry_and_closes_channel() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = spawn_backend(
        vec![r#"{"status":"failed","error":"network timeout"}"#.to_string()],
        true,
        Arc::clone(&hits),
    )
    .await;

    let api = ApiClient::new(&server).unwrap();
    let registry = Arc::new(JobRegistry::hidden());
    registry.register("job-1", "测试视频").unwrap();

    let task = tokio::spawn(progress::follow_job(
        api,
        Arc::clone(&registry),
        "job-1".to_string(),
    ));
    // failed 是终态，订阅立即关闭
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("订阅协程应在失败后退出")
        .unwrap();

    let view = registry.get("job-1").expect("失败条目保留展示").snapshot();
    assert_eq!(view.status, JobStatus::Failed);
    assert_eq!(view.line.as_deref(), Some("network timeout"));
    assert!(!view.connected);
    // 失败不触发文件列表刷新
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_channel_drop_leaves_last_state() {
    let hits = Arc::new(AtomicUsize::new(0));
    let server = spawn_backend(
        vec![r#"{"status":"downloading","progress":30.0,"speed":"1MB/s","eta":"01:00"}"#.to_string()],
        false,
        Arc::clone(&hits),
    )
    .await;

    let api = ApiClient::new(&server).unwrap();
    let registry = Arc::new(JobRegistry::hidden());
    registry.register("job-1", "测试视频").unwrap();

    let task = tokio::spawn(progress::follow_job(
        api,
        Arc::clone(&registry),
        "job-1".to_string(),
    ));
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("订阅协程应随通道关闭退出")
        .unwrap();

    // 通道断开不重连，条目停在最后一次的展示状态
    let view = registry.get("job-1").expect("条目保留").snapshot();
    assert_eq!(view.status, JobStatus::Downloading);
    assert_eq!(view.percent, Some(30.0));
    assert!(!view.connected);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
