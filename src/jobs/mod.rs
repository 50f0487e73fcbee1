use std::sync::{Arc, Mutex};

use colored::Colorize;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio_util::sync::CancellationToken;

use crate::common::api::models::ProgressEvent;
use crate::common::utils::status_label;

pub mod error;
pub mod models;
pub mod progress;

use error::JobError;
use models::{JobStatus, JobView, Transition, apply_event};

// 进度条满格对应 100.0%，保留一位小数的粒度
const BAR_SCALE: u64 = 1000;

/// 单个下载任务的句柄
///
/// 持有展示条目、视图状态和该任务订阅的取消令牌，
/// 从注册表移除即代表条目销毁
pub struct JobHandle {
    pub id: String,
    pub title: String,
    pub bar: ProgressBar,
    pub cancel: CancellationToken,
    view: Mutex<JobView>,
}

impl JobHandle {
    pub fn snapshot(&self) -> JobView {
        self.view.lock().unwrap().clone()
    }

    pub fn set_disconnected(&self) {
        self.view.lock().unwrap().connected = false;
    }
}

/// 任务注册表: job_id -> 句柄
///
/// 由应用根持有并传给各处理器，同一个 job_id 至多注册一次，
/// 也就保证了每个任务至多一条进度订阅
pub struct JobRegistry {
    jobs: DashMap<String, Arc<JobHandle>>,
    multi: MultiProgress,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: DashMap::new(),
            multi: MultiProgress::new(),
        }
    }

    /// 不画进度条的注册表，给纯列表模式用
    pub fn hidden() -> Self {
        Self {
            jobs: DashMap::new(),
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    // 注册新任务并挂出 "Starting..." 条目
    pub fn register(&self, id: &str, title: &str) -> Result<Arc<JobHandle>, JobError> {
        match self.jobs.entry(id.to_string()) {
            Entry::Occupied(_) => Err(JobError::DuplicateJob(id.to_string())),
            Entry::Vacant(slot) => {
                let bar = self.multi.add(ProgressBar::new(BAR_SCALE));
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{prefix:.bold} [{bar:30.cyan/blue}] {msg}")
                        .unwrap()
                        .progress_chars("#>-"),
                );
                bar.set_prefix(title.to_string());
                bar.set_message("Starting...".to_string());

                let handle = Arc::new(JobHandle {
                    id: id.to_string(),
                    title: title.to_string(),
                    bar,
                    cancel: CancellationToken::new(),
                    view: Mutex::new(JobView::starting()),
                });
                slot.insert(Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<JobHandle>> {
        self.jobs.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// 移除条目：取消订阅、撤下进度条
    pub fn remove(&self, id: &str) -> bool {
        if let Some((_, handle)) = self.jobs.remove(id) {
            handle.cancel.cancel();
            handle.bar.finish_and_clear();
            self.multi.remove(&handle.bar);
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    // 把一条进度消息应用到任务条目上，返回通道动作
    pub fn apply(&self, handle: &JobHandle, event: &ProgressEvent) -> Transition {
        let transition = {
            let mut view = handle.view.lock().unwrap();
            apply_event(&mut view, event)
        };
        self.redraw(handle);
        transition
    }

    fn redraw(&self, handle: &JobHandle) {
        let view = handle.view.lock().unwrap();

        if let Some(percent) = view.percent {
            let pos = ((percent / 100.0) * BAR_SCALE as f64).round() as u64;
            handle.bar.set_position(pos.min(BAR_SCALE));
        }

        let label = status_label(&view.raw_status);
        let label = match view.status {
            JobStatus::Completed => label.green().to_string(),
            JobStatus::Failed => label.red().to_string(),
            _ => label,
        };

        let mut msg = match view.percent {
            Some(percent) => format!("{} {:.1}%", label, percent),
            None => label,
        };
        if let Some(line) = &view.line {
            msg.push_str(&format!(" | {}", line));
        }
        handle.bar.set_message(msg);
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}
