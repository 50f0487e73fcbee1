use colored::*;

/// 漂亮的终端输出工具
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示成功消息
    pub fn success(message: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), message.as_ref());
    }

    /// 显示信息消息
    pub fn info(message: impl AsRef<str>) {
        println!("{} {}", "ℹ".blue().bold(), message.as_ref());
    }

    /// 显示警告消息
    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    /// 显示错误消息
    pub fn error(message: impl AsRef<str>) {
        println!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 显示等待消息
    pub fn waiting(message: impl AsRef<str>) {
        println!("{} {}", "⏳".yellow().bold(), message.as_ref());
    }

    /// 显示视频标题行
    pub fn video_info(title: impl AsRef<str>, extra: impl AsRef<str>) {
        println!(
            "{} {} {}",
            "🎬".magenta().bold(),
            title.as_ref().bold(),
            extra.as_ref().cyan()
        );
    }

    /// 显示键值字段（上传者、时长这类）
    pub fn field(label: impl AsRef<str>, value: impl AsRef<str>) {
        println!("  {}: {}", label.as_ref().bold(), value.as_ref());
    }

    /// 显示单个文件条目
    pub fn file_entry(name: impl AsRef<str>, meta: impl AsRef<str>, link: impl AsRef<str>) {
        println!("  {} {}", "📁".blue().bold(), name.as_ref().bold());
        println!("     {}", meta.as_ref());
        println!("     {}", link.as_ref().bright_black());
    }

    /// 显示分割线
    pub fn separator() {
        println!("{}", "─".repeat(50).bright_black());
    }

    /// 显示标题
    pub fn title(text: impl AsRef<str>) {
        let text = text.as_ref();
        let padding = (48usize.saturating_sub(text.len())) / 2;
        let rest = 48usize.saturating_sub(padding + text.len());
        println!(
            "{} {} {}",
            "─".repeat(padding).bright_black(),
            text.bold(),
            "─".repeat(rest).bright_black()
        );
    }
}

/// 便捷宏用于漂亮的终端输出
#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::success(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}
