use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::cli::Cli;
use crate::common::api::client::ApiClient;
use crate::common::logger::PrettyLogger;
use crate::files;
use crate::info::{pick_quality, quality_options, render_info};
use crate::jobs::{JobRegistry, progress};
use crate::{Result, log_error, log_success, log_warning};

/// 应用根
///
/// 持有 API 客户端和任务注册表，注册表随 App 创建、
/// 条目在任务终结时移除、App 结束时一起销毁
pub struct App {
    api: ApiClient,
    registry: Arc<JobRegistry>,
    tasks: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(server: &str) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(server)?,
            registry: Arc::new(JobRegistry::new()),
            tasks: Vec::new(),
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }

    pub async fn run(&mut self, args: &Cli) -> Result<()> {
        // 启动时先展示一次已完成文件列表
        files::refresh_files(&self.api).await;

        for url in &args.urls {
            self.handle_url(url, args).await;
        }

        self.wait_all().await;
        Ok(())
    }

    // 单个链接的完整流程：取信息 -> 选清晰度 -> 发起任务 -> 订阅进度
    async fn handle_url(&mut self, url: &str, args: &Cli) {
        let url = url.trim();
        if url.is_empty() {
            log_error!("请输入视频链接");
            return;
        }

        PrettyLogger::waiting(format!("获取视频信息: {}", url));
        let video_info = match self.api.fetch_info(url).await {
            Ok(info) => info,
            Err(e) => {
                // 失败只终止本次操作，已有的任务和展示不动
                log_error!("Error: {}", e);
                return;
            }
        };
        render_info(&video_info);

        if args.info_only {
            return;
        }

        let options = quality_options(&video_info);
        let quality = match &args.quality {
            Some(quality) => quality.clone(),
            None => pick_quality(&options),
        };

        let is_playlist = args.playlist || video_info.is_playlist;
        let resp = match self.api.start_download(url, &quality, is_playlist).await {
            Ok(resp) => resp,
            Err(e) => {
                // 链接还在用户手里，重试就是重新执行一次
                log_error!("Error: {}", e);
                return;
            }
        };

        log_success!("下载任务已创建: {}", resp.download_id);
        match self.registry.register(&resp.download_id, &video_info.title) {
            Ok(_) => {
                let task = tokio::spawn(progress::follow_job(
                    self.api.clone(),
                    Arc::clone(&self.registry),
                    resp.download_id.clone(),
                ));
                self.tasks.push(task);
            }
            Err(e) => log_warning!("{}", e),
        }
    }

    /// 等所有任务的订阅结束（到达终态或通道断开）
    pub async fn wait_all(&mut self) {
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                warn!("任务跟踪协程异常退出: {}", e);
            }
        }
    }
}
