use indicatif::{ProgressBar, ProgressStyle};

use crate::core::{DownloadListener, Event};
use crate::ui;

/// 控制台进度渲染监听器
///
/// 订阅核心的全部事件，负责所有面向用户的输出：
/// 每个文件一条进度条，每个文件结束后打印一次总进度。
/// 监听器在工作任务上同步执行，这里只做格式化和打印。
pub struct ConsoleListener {
    total_files: usize,
    finished_files: usize,
    current_total: u64,
    bar: Option<ProgressBar>,
}

impl ConsoleListener {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            finished_files: 0,
            current_total: 0,
            bar: None,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn print_total_progress(&self) {
        let percent = if self.total_files == 0 {
            100
        } else {
            self.finished_files * 100 / self.total_files
        };
        println!(
            "总进度: {}/{} ({}%)",
            self.finished_files, self.total_files, percent
        );
    }

    fn close_bar(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl DownloadListener for ConsoleListener {
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::JobStarted => {
                println!("开始下载 {} 个文件...", self.total_files);
                self.print_total_progress();
            }
            Event::FilePruned { name } => {
                println!("移除文件: {}", name);
            }
            Event::FileStarted { url } => {
                println!("\n开始下载: {}", url);
            }
            Event::UrlOpened => log::debug!("URL已打开"),
            Event::ConnectionOpened => log::debug!("连接已建立"),
            Event::SizeKnown { total_bytes } => {
                self.current_total = *total_bytes;
                if *total_bytes > 0 {
                    println!("文件大小: {}", ui::format_size(*total_bytes));
                } else {
                    println!("文件大小未知");
                }
            }
            Event::InputStreamOpened => log::debug!("输入流已打开"),
            Event::OutputStreamOpened => {
                let bar = if self.current_total > 0 {
                    let bar = ProgressBar::new(self.current_total);
                    bar.set_style(Self::bar_style());
                    bar
                } else {
                    ProgressBar::new_spinner()
                };
                self.bar = Some(bar);
            }
            Event::Progress { bytes_so_far, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_position(*bytes_so_far);
                }
            }
            Event::FileFinished { .. } => {
                self.close_bar();
                self.finished_files += 1;
                ui::print_success("下载完成");
                self.print_total_progress();
            }
            Event::FileFailed { url, reason } => {
                self.close_bar();
                ui::print_error(&format!("下载失败: {}: {}", url, reason));
            }
            Event::JobFinished => {
                println!("\n全部下载结束");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 监听器对任意事件序列都不恐慌，包括没有 SizeKnown 直接收到 Progress
    #[test]
    fn test_listener_tolerates_any_order() {
        let mut listener = ConsoleListener::new(2);
        listener.on_event(&Event::JobStarted);
        listener.on_event(&Event::Progress {
            bytes_so_far: 10,
            total_bytes: 0,
        });
        listener.on_event(&Event::FileFailed {
            url: "https://example.com/a.jar".to_string(),
            reason: "传输中断".to_string(),
        });
        listener.on_event(&Event::JobFinished);
    }

    #[test]
    fn test_finished_files_counts_finish_events() {
        let mut listener = ConsoleListener::new(3);
        listener.on_event(&Event::FileFinished {
            url: "https://example.com/a.jar".to_string(),
        });
        listener.on_event(&Event::FileFinished {
            url: "https://example.com/b.jar".to_string(),
        });
        assert_eq!(listener.finished_files, 2);
    }
}
