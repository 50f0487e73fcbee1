use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("{1}")]
    Api(u16, String),

    #[error("无效的服务地址: {0}")]
    InvalidServer(String),
}

impl ApiError {
    /// 服务端通过 `{"detail": "..."}` 返回的错误描述
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api(_, detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
