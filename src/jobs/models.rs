use crate::common::api::models::ProgressEvent;
use crate::common::utils::speed_line;

// 任务状态，未知取值保留原文透传展示
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Starting,
    Downloading,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "starting" => Self::Starting,
            "downloading" => Self::Downloading,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// 单个任务的展示状态（键控视图模型，渲染层只读这里）
#[derive(Debug, Clone)]
pub struct JobView {
    pub raw_status: String,
    pub status: JobStatus,
    pub percent: Option<f64>,
    /// 速度/ETA 副行，失败后替换为错误信息
    pub line: Option<String>,
    /// 进度通道是否仍然存活
    pub connected: bool,
}

impl JobView {
    pub fn starting() -> Self {
        Self {
            raw_status: "starting".to_string(),
            status: JobStatus::Starting,
            percent: None,
            line: None,
            connected: true,
        }
    }
}

/// 应用一条进度消息后由调用方执行的通道动作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// 继续接收
    Stay,
    /// 3 秒后移除条目并刷新文件列表
    Completed,
    /// 立刻关闭通道，条目保留
    Failed,
}

// 进度消息按到达顺序覆盖式应用，字段缺失时保留上次的值
pub fn apply_event(view: &mut JobView, event: &ProgressEvent) -> Transition {
    view.raw_status = event.status.clone();
    view.status = JobStatus::parse(&event.status);

    if let Some(progress) = event.progress {
        view.percent = Some(progress);
    }
    if let Some(speed) = &event.speed {
        view.line = Some(speed_line(speed, event.eta.as_deref()));
    }

    match view.status {
        JobStatus::Completed => Transition::Completed,
        JobStatus::Failed => {
            view.line = Some(
                event
                    .error
                    .clone()
                    .unwrap_or_else(|| "Download failed".to_string()),
            );
            Transition::Failed
        }
        _ => Transition::Stay,
    }
}
