use serde::{Deserialize, Serialize};

// 服务端 /api/info 返回的视频元信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    pub is_playlist: bool,
    #[serde(default)]
    pub video_count: Option<u64>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    pub resolution: String,
    pub ext: String,
    #[serde(default)]
    pub filesize: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
    pub quality: String,
    pub is_playlist: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DownloadResponse {
    pub download_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 推送通道里的单条进度消息
///
/// status 取值由服务端定义（starting/downloading/processing/completed/failed
/// 以及将来可能新增的状态），客户端不把未知状态当作错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    #[serde(default)]
    pub download_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// 已完成文件列表项，modified 是 ISO-8601 字符串
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub modified: String,
}
