use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, warn};
use url::Url;

use crate::common::api::client::ApiClient;
use crate::common::api::models::ProgressEvent;
use crate::files;

use super::JobRegistry;
use super::error::JobError;
use super::models::Transition;

// 条目到达 completed 后保留展示的时长
const COMPLETED_LINGER: Duration = Duration::from_secs(3);

enum Outcome {
    Completed,
    Failed,
    Closed,
    Cancelled,
}

/// 任务级推送通道地址: {ws|wss}://<host>/ws/{job_id}
pub fn channel_url(server: &Url, job_id: &str) -> Result<Url, JobError> {
    let mut url = server.clone();
    let scheme = if server.scheme() == "https" { "wss" } else { "ws" };
    url.set_scheme(scheme)
        .map_err(|_| JobError::BadServerUrl(server.to_string()))?;
    url.set_path(&format!("/ws/{}", job_id));
    url.set_query(None);
    Ok(url)
}

/// 订阅一个任务的进度通道并跟到终态
///
/// 消息按到达顺序应用到该任务的条目上；通道断开（正常或异常）
/// 只注销连接，不重连，条目停留在最后一次的展示状态
pub async fn follow_job(api: ApiClient, registry: Arc<JobRegistry>, job_id: String) {
    let Some(handle) = registry.get(&job_id) else {
        warn!("任务未注册，忽略订阅请求: {}", job_id);
        return;
    };

    let url = match channel_url(api.base(), &job_id) {
        Ok(url) => url,
        Err(e) => {
            warn!("{}", e);
            handle.set_disconnected();
            return;
        }
    };

    debug!("连接进度通道: {}", url);
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            warn!("进度通道连接失败 ({}): {}", job_id, e);
            handle.set_disconnected();
            return;
        }
    };
    let (write, mut read) = stream.split();

    let outcome = loop {
        tokio::select! {
            _ = handle.cancel.cancelled() => break Outcome::Cancelled,
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let event: ProgressEvent = match serde_json::from_str(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            warn!("无法解析进度消息 ({}): {}", job_id, e);
                            continue;
                        }
                    };
                    match registry.apply(&handle, &event) {
                        Transition::Stay => {}
                        Transition::Completed => break Outcome::Completed,
                        Transition::Failed => break Outcome::Failed,
                    }
                }
                Some(Ok(Message::Close(_))) | None => break Outcome::Closed,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("进度通道错误 ({}): {}", job_id, e);
                    break Outcome::Closed;
                }
            }
        }
    };

    // 到这里订阅一定已经结束，连接随句柄一起丢弃
    drop(read);
    drop(write);

    match outcome {
        Outcome::Completed => {
            tokio::time::sleep(COMPLETED_LINGER).await;
            registry.remove(&job_id);
            if registry.is_empty() {
                debug!("活跃下载区已清空");
            }
            // 每个完成的任务只触发一次文件列表刷新
            files::refresh_files(&api).await;
        }
        Outcome::Failed => {
            handle.set_disconnected();
            debug!("任务失败，条目保留展示: {}", job_id);
        }
        Outcome::Closed => {
            handle.set_disconnected();
            debug!("进度通道关闭，任务注销连接: {}", job_id);
        }
        Outcome::Cancelled => {}
    }
}
