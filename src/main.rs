use clap::Parser;
use colored::Colorize;
use tracing::info;

use ytdl_client::app::App;
use ytdl_client::cli::Cli;
use ytdl_client::{Result, files, log_error};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Cli::parse();
    let mut app = App::new(&args.server)?;

    // 手动刷新模式：只拉一次文件列表
    if args.list_files {
        files::refresh_files(app.api()).await;
        return Ok(());
    }

    if args.urls.is_empty() {
        log_error!("请至少提供一个 --url 参数");
        return Ok(());
    }

    info!("连接下载服务: {}", args.server);
    app.run(&args).await?;

    println!("{}", "处理完毕！".green());
    Ok(())
}
