pub mod app;
pub mod cli;
pub mod common;
pub mod files;
pub mod info;
pub mod jobs;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
