//! URL 列表来源：命令行参数、本地文件或远程清单
//!
//! 核心只接受已经解析好的非空任务，列表获取失败
//! 在任何下载开始之前就终止整个运行。

use async_trait::async_trait;
use thiserror::Error;

/// 获取 URL 列表失败，对整个运行是致命的
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("无法读取URL列表文件: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("无法获取远程清单: {0}")]
    FetchManifest(#[from] reqwest::Error),
}

/// “产出有序 URL 列表”这一能力
///
/// 所有实现都按原始顺序返回列表，空行和重复的 URL 原样保留，
/// 不做过滤或去重。
#[async_trait]
pub trait UrlListProvider: Send + Sync {
    async fn fetch_urls(&self) -> Result<Vec<String>, ProviderError>;
}

/// 命令行参数直接给出的列表
pub struct StaticListProvider {
    urls: Vec<String>,
}

impl StaticListProvider {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl UrlListProvider for StaticListProvider {
    async fn fetch_urls(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.urls.clone())
    }
}

/// 本地文本文件，每行一个 URL
pub struct FileListProvider {
    path: String,
}

impl FileListProvider {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait]
impl UrlListProvider for FileListProvider {
    async fn fetch_urls(&self) -> Result<Vec<String>, ProviderError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(split_lines(&content))
    }
}

/// 远程清单：GET 之后按行拆分
pub struct ManifestListProvider {
    url: String,
    client: reqwest::Client,
}

impl ManifestListProvider {
    pub fn new(url: String, client: reqwest::Client) -> Self {
        Self { url, client }
    }
}

#[async_trait]
impl UrlListProvider for ManifestListProvider {
    async fn fetch_urls(&self) -> Result<Vec<String>, ProviderError> {
        let content = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(split_lines(&content))
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
