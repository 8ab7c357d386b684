//! 下载任务：目标目录 + 有序 URL 列表

use std::collections::HashSet;

use super::error::JobError;

/// 一次下载运行的不可变描述
///
/// URL 的顺序就是传输顺序，也是 `FileFinished`/`FileFailed` 事件的顺序。
/// 空行和重复的 URL 原样保留。
#[derive(Debug, Clone)]
pub struct DownloadJob {
    download_dir: String,
    urls: Vec<String>,
}

impl DownloadJob {
    /// 创建任务，目录被规范化为以分隔符开头和结尾
    ///
    /// URL 列表为空时拒绝创建：列表获取失败是任务级致命错误，
    /// 核心只接受已经解析好的非空任务。
    pub fn new(download_dir: &str, urls: Vec<String>) -> Result<Self, JobError> {
        if urls.is_empty() {
            return Err(JobError::EmptyUrlList);
        }
        Ok(Self {
            download_dir: normalize_dir(download_dir),
            urls,
        })
    }

    pub fn download_dir(&self) -> &str {
        &self.download_dir
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// URL 对应的目标文件名：最后一个 '/' 之后的部分
    ///
    /// 两个 URL 共享同一个文件名时不去重，后写的覆盖先写的。
    pub fn file_name_of(url: &str) -> &str {
        match url.rfind('/') {
            Some(idx) => &url[idx + 1..],
            None => url,
        }
    }

    /// URL 对应的完整目标路径
    pub fn dest_path_of(&self, url: &str) -> String {
        format!("{}{}", self.download_dir, Self::file_name_of(url))
    }

    /// 任务期望目录中保留的文件名集合
    pub fn expected_file_names(&self) -> HashSet<String> {
        self.urls
            .iter()
            .map(|url| Self::file_name_of(url).to_string())
            .collect()
    }
}

/// 运行结果汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    /// 结果为成功或跳过的 URL 数量
    pub completed_count: usize,
    /// 任务中的 URL 总数
    pub total_count: usize,
}

/// 规范化目录：确保以 '/' 开头和结尾
fn normalize_dir(dir: &str) -> String {
    let mut dir = dir.to_string();
    if !dir.starts_with('/') {
        dir.insert(0, '/');
    }
    if !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}
