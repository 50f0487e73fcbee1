// 展示层用的格式化小工具

/// 把字节数格式化成带单位的可读字符串
///
/// 0 -> "0 Bytes"，其余按 1024 进位，单位表到 GB 封顶，
/// 数值保留两位小数并去掉无意义的尾随零（1536 -> "1.5 KB"）
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let i = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let i = i.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(i as i32);

    let mut num = format!("{:.2}", (value * 100.0).round() / 100.0);
    while num.ends_with('0') {
        num.pop();
    }
    if num.ends_with('.') {
        num.pop();
    }

    format!("{} {}", num, UNITS[i])
}

/// 秒数格式化为 M:SS（125 -> "2:05"）
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// 播放列表角标文本
pub fn playlist_badge(video_count: u64) -> String {
    format!("Playlist ({} videos)", video_count)
}

/// 任务条目的速度/ETA 副行
pub fn speed_line(speed: &str, eta: Option<&str>) -> String {
    format!("{} • ETA: {}", speed, eta.unwrap_or("N/A"))
}

/// 状态标签展示时首字母大写（downloading -> Downloading）
pub fn status_label(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
