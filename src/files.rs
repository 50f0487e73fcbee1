use chrono::NaiveDateTime;
use tracing::warn;

use crate::common::api::client::ApiClient;
use crate::common::api::models::FileInfo;
use crate::common::logger::PrettyLogger;
use crate::common::utils::format_size;

/// 拉取并展示已完成文件列表
///
/// 拉取失败只记日志，沿用上一次的展示，不打扰用户
pub async fn refresh_files(api: &ApiClient) {
    match api.list_files().await {
        Ok(files) => render_files(api, &files),
        Err(e) => warn!("获取已完成文件列表失败: {}", e),
    }
}

pub fn render_files(api: &ApiClient, files: &[FileInfo]) {
    PrettyLogger::title("Downloaded Files");

    if files.is_empty() {
        PrettyLogger::info("No downloads yet");
        return;
    }

    for file in files {
        let meta = format!(
            "{} • {}",
            format_size(file.size),
            format_modified(&file.modified)
        );
        PrettyLogger::file_entry(&file.name, meta, api.file_url(&file.name));
    }
    PrettyLogger::separator();
}

/// ISO-8601 时间戳转可读格式，解析不了就原样展示
pub fn format_modified(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
