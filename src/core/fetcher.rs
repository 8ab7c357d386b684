//! 单文件传输：大小探测、流式拷贝与进度事件

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use futures::StreamExt;
use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;
use url::Url;

use super::error::FetchError;
use super::event::{Event, EventBus};

/// 单个文件的传输结果
#[derive(Debug)]
pub enum FetchOutcome {
    /// 完整传输成功
    Succeeded,
    /// 目标文件已存在，跳过传输
    Skipped,
    /// 传输失败，编排器继续处理下一个 URL
    Failed(FetchError),
}

/// 单文件的可变计数器，每个文件开始时归零
#[derive(Debug, Default)]
struct TransferState {
    bytes_so_far: u64,
    total_bytes: u64,
}

/// 把一个 URL 传输到一个目标路径
///
/// 传输按固定序列进行，每一步先发出对应事件再继续；
/// 任何一步失败都发出 `FileFailed` 并立即返回，不会让任务中断。
pub struct SingleFileFetcher {
    client: Client,
}

impl SingleFileFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 传输一个文件
    ///
    /// 目标路径已存在普通文件时完全跳过传输，既不校验也不覆盖。
    pub async fn fetch(&self, url: &str, dest_path: &str, bus: &mut EventBus) -> FetchOutcome {
        bus.emit(Event::FileStarted {
            url: url.to_string(),
        });

        if Path::new(dest_path).is_file() {
            log::info!("文件已存在，跳过: {}", dest_path);
            bus.emit(Event::FileFinished {
                url: url.to_string(),
            });
            return FetchOutcome::Skipped;
        }

        match self.transfer(url, dest_path, bus).await {
            Ok(()) => {
                bus.emit(Event::FileFinished {
                    url: url.to_string(),
                });
                FetchOutcome::Succeeded
            }
            Err(e) => {
                log::error!("下载失败: {}: {}", url, e);
                bus.emit(Event::FileFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn transfer(
        &self,
        url: &str,
        dest_path: &str,
        bus: &mut EventBus,
    ) -> Result<(), FetchError> {
        let parsed = Url::parse(url)?;
        bus.emit(Event::UrlOpened);

        let request = self.client.get(parsed.clone());
        bus.emit(Event::ConnectionOpened);

        // HEAD 探测失败（传输错误或非 2xx 状态码）对这个文件是致命的；
        // 探测成功但响应里没有 Content-Length 时大小按 0（未知）处理
        let head = self
            .client
            .head(parsed)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::ProbeSize)?;
        let mut state = TransferState::default();
        state.total_bytes = head
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        bus.emit(Event::SizeKnown {
            total_bytes: state.total_bytes,
        });

        let response = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(FetchError::OpenInput)?;
        let mut stream = response.bytes_stream();
        bus.emit(Event::InputStreamOpened);

        let output = File::create(dest_path).map_err(FetchError::OpenOutput)?;
        let mut writer = BufWriter::new(output);
        bus.emit(Event::OutputStreamOpened);

        // 按块拷贝，每写入一块广播一次进度；
        // 拷贝中断时已写入的部分保留在磁盘上
        bus.emit(Event::Progress {
            bytes_so_far: 0,
            total_bytes: state.total_bytes,
        });
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| FetchError::Transfer(e.to_string()))?;
            writer
                .write_all(&chunk)
                .map_err(|e| FetchError::Transfer(e.to_string()))?;
            state.bytes_so_far += chunk.len() as u64;
            bus.emit(Event::Progress {
                bytes_so_far: state.bytes_so_far,
                total_bytes: state.total_bytes,
            });
        }
        writer
            .flush()
            .map_err(|e| FetchError::Transfer(e.to_string()))?;

        log::info!("下载完成: {} ({} 字节)", dest_path, state.bytes_so_far);
        Ok(())
    }
}
