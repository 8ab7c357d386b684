//! Core: 下载任务编排、单文件传输、目录清理与事件广播等核心逻辑模块

pub mod error;
pub mod event;
pub mod fetcher;
pub mod job;
pub mod orchestrator;
pub mod reconcile;

// 只导出主流程和其它模块实际用到的类型
pub use error::{FetchError, JobError};
pub use event::{DownloadListener, Event, EventBus};
pub use fetcher::{FetchOutcome, SingleFileFetcher};
pub use job::{DownloadJob, JobSummary};
pub use orchestrator::DownloadOrchestrator;
