use std::io::{self, Write};

use crate::common::api::models::VideoInfo;
use crate::common::logger::PrettyLogger;
use crate::common::utils::{format_duration, playlist_badge};

// 服务端没给格式列表时的固定回退集合
const FALLBACK_QUALITIES: [&str; 4] = ["1080p", "720p", "480p", "360p"];

/// 渲染视频信息面板
pub fn render_info(info: &VideoInfo) {
    PrettyLogger::title("Video Info");

    let badge = if info.is_playlist {
        playlist_badge(info.video_count.unwrap_or(0))
    } else {
        String::new()
    };
    PrettyLogger::video_info(&info.title, badge);

    PrettyLogger::field("Uploader", info.uploader.as_deref().unwrap_or("Unknown"));
    if let Some(duration) = info.duration {
        PrettyLogger::field("Duration", format_duration(duration));
    }
    if let Some(thumbnail) = &info.thumbnail {
        // 终端里放不下图，给出缩略图地址
        PrettyLogger::field("Thumbnail", thumbnail);
    }
    PrettyLogger::separator();
}

/// 质量选项：best 哨兵在前，其后是服务端格式或固定回退集合
pub fn quality_options(info: &VideoInfo) -> Vec<String> {
    let mut options = vec!["best".to_string()];
    if info.formats.is_empty() {
        options.extend(FALLBACK_QUALITIES.iter().map(|q| q.to_string()));
    } else {
        options.extend(info.formats.iter().map(|f| f.resolution.clone()));
    }
    options
}

/// 交互式选择清晰度，输入无效时退回 best
pub fn pick_quality(options: &[String]) -> String {
    println!("可选清晰度:");
    for (index, quality) in options.iter().enumerate() {
        let label = if quality == "best" {
            "Best Quality"
        } else {
            quality.as_str()
        };
        println!("  [{}] {}", index, label);
    }
    print!("选择编号 (回车默认 best): ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return "best".to_string();
    }
    match line.trim().parse::<usize>() {
        Ok(index) if index < options.len() => options[index].clone(),
        _ => "best".to_string(),
    }
}
