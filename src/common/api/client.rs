use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use super::error::ApiError;
use super::models::{DownloadRequest, DownloadResponse, FileInfo, InfoRequest, VideoInfo};

// 下载服务的 REST 客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub inner: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(server: &str) -> Result<Self, ApiError> {
        let base =
            Url::parse(server).map_err(|_| ApiError::InvalidServer(server.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidServer(server.to_string()));
        }

        let inner = ClientBuilder::new()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(ApiError::Reqwest)?;

        Ok(Self { inner, base })
    }

    /// 服务根地址，进度通道地址由它推导
    pub fn base(&self) -> &Url {
        &self.base
    }

    // 获取视频元信息: POST /api/info
    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo, ApiError> {
        let endpoint = self.endpoint("api/info");
        debug!("请求视频信息: {}", endpoint);
        let resp = self
            .inner
            .post(endpoint)
            .json(&InfoRequest {
                url: url.to_string(),
            })
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    // 创建服务端下载任务: POST /api/download
    pub async fn start_download(
        &self,
        url: &str,
        quality: &str,
        is_playlist: bool,
    ) -> Result<DownloadResponse, ApiError> {
        let resp = self
            .inner
            .post(self.endpoint("api/download"))
            .json(&DownloadRequest {
                url: url.to_string(),
                quality: quality.to_string(),
                is_playlist,
            })
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    // 已完成文件列表: GET /api/downloads
    pub async fn list_files(&self) -> Result<Vec<FileInfo>, ApiError> {
        let resp = self.inner.get(self.endpoint("api/downloads")).send().await?;
        Self::handle_response(resp).await
    }

    /// 单个文件的直链，文件名做百分号编码
    pub fn file_url(&self, name: &str) -> String {
        format!(
            "{}api/download-file/{}",
            self.base,
            urlencoding::encode(name)
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp.text().await?;

        // 非成功状态时服务端返回 {"detail": "..."}，原样透传给用户
        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            error!("请求失败 ({}): {}", status.as_u16(), detail);
            return Err(ApiError::Api(status.as_u16(), detail));
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("解析响应失败: {}. 原始响应: {}", e, body))
        })
    }
}
