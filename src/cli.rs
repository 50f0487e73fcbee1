use clap::Parser;

/// 视频下载服务终端客户端
#[derive(Parser, Debug)]
#[command(name = "ytdlc")]
#[command(version = "1.0")]
#[command(about = "连接视频下载服务，创建下载任务并实时跟踪进度", long_about = None)]
pub struct Cli {
    /// 视频链接（可重复，多个链接并发创建任务）
    #[arg(long = "url", value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub urls: Vec<String>,

    /// 下载服务地址
    #[arg(long, value_name = "SERVER")]
    #[arg(default_value = "http://127.0.0.1:8000")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub server: String,

    /// 目标清晰度（如 1080p/720p/480p/360p 或 best），不指定时交互选择
    #[arg(long, value_name = "QUALITY")]
    pub quality: Option<String>,

    /// 按播放列表整体下载
    #[arg(long)]
    pub playlist: bool,

    /// 只展示视频信息，不创建下载任务
    #[arg(long)]
    pub info_only: bool,

    /// 只刷新并展示已完成文件列表
    #[arg(long)]
    pub list_files: bool,
}
