use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("进度通道连接失败: {0}")]
    Channel(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("无法构造进度通道地址: {0}")]
    BadServerUrl(String),

    #[error("任务已存在: {0}")]
    DuplicateJob(String),
}
