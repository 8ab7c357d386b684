//! 事件与监听器：核心通过同步广播把传输进度通知给外部

/// 下载过程中产生的事件
///
/// 事件是一次性的值对象，核心发出后不再保留。单个文件的事件序列固定为
/// `FileStarted → UrlOpened → ConnectionOpened → SizeKnown →
/// InputStreamOpened → OutputStreamOpened → Progress* → FileFinished`，
/// 任何一步失败则以 `FileFailed` 结束。文件 i+1 的事件不会早于
/// 文件 i 的 `FileFinished`/`FileFailed` 出现。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// 任务开始（在目录清理之后）
    JobStarted,
    /// 目录清理删除了一个不在期望集合内的条目
    FilePruned { name: String },
    /// 开始处理一个 URL
    FileStarted { url: String },
    /// URL 解析成功
    UrlOpened,
    /// 请求已就绪
    ConnectionOpened,
    /// 大小探测完成，0 表示未知
    SizeKnown { total_bytes: u64 },
    /// 响应体输入流已打开
    InputStreamOpened,
    /// 目标文件输出流已打开
    OutputStreamOpened,
    /// 拷贝进度，bytes_so_far 单调不减
    Progress { bytes_so_far: u64, total_bytes: u64 },
    /// 单个文件处理完成（包含已存在跳过的情况）
    FileFinished { url: String },
    /// 单个文件处理失败，任务继续
    FileFailed { url: String, reason: String },
    /// 任务结束
    JobFinished,
}

/// 下载事件监听器
///
/// 监听器在工作任务上同步执行：阻塞的监听器会直接拖慢传输速度。
/// 监听器内部的 panic 不会被广播器捕获。
pub trait DownloadListener: Send {
    fn on_event(&mut self, event: &Event);
}

/// 事件广播器：按注册顺序同步转发每个事件
///
/// 任务开始后不再注册或注销监听器。
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn DownloadListener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    /// 注册一个监听器，排在已有监听器之后
    pub fn register(&mut self, listener: Box<dyn DownloadListener>) {
        self.listeners.push(listener);
    }

    /// 把事件按注册顺序转发给所有监听器，没有监听器时事件被丢弃
    pub fn emit(&mut self, event: Event) {
        for listener in self.listeners.iter_mut() {
            listener.on_event(&event);
        }
    }
}
