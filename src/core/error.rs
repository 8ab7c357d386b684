use thiserror::Error;

/// 单文件传输错误
///
/// 每个变体对应传输序列中的一个失败点。失败由编排器吸收，
/// 只影响当前文件，不会中断整个任务。
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL 解析失败
    #[error("无法打开URL: {0}")]
    OpenUrl(#[from] url::ParseError),

    /// HEAD 探测请求失败或返回非 2xx 状态码（对当前文件是致命的，不降级为未知大小）
    #[error("无法确定文件大小: {0}")]
    ProbeSize(#[source] reqwest::Error),

    /// GET 请求失败或返回非 2xx 状态码
    #[error("无法打开输入流: {0}")]
    OpenInput(#[source] reqwest::Error),

    /// 创建目标文件失败
    #[error("无法打开输出流: {0}")]
    OpenOutput(#[source] std::io::Error),

    /// 数据拷贝过程中的网络或磁盘 I/O 错误，已写入的部分保留在磁盘上
    #[error("传输中断: {0}")]
    Transfer(String),
}

/// 任务级错误，只在任何下载开始之前出现，出现即终止整个运行
#[derive(Error, Debug)]
pub enum JobError {
    #[error("未提供任何URL。请通过命令行参数、文件或远程清单提供至少一个URL")]
    EmptyUrlList,
}
