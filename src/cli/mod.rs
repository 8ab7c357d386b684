//! CLI: 命令行接口和参数解析模块
//!
//! ## 主要功能
//!
//! - 命令行参数解析和验证
//! - 配置文件路径管理
//! - URL 列表来源选择（命令行参数、本地文件、远程清单）
//! - 平台特定的路径处理
//! - 配置文件编辑器集成
//!
//! ## 支持的命令
//!
//! - 基本下载：`modsync <url>`
//! - 批量下载：`modsync -f modlist.txt`
//! - 远程清单：`modsync --manifest-url https://example.com/modlist.txt`
//! - 编辑配置：`modsync -e`
//! - 指定配置：`modsync -c config.conf <url>`
//!
//! ## 平台支持
//!
//! - Windows: `%APPDATA%/modsync/modsync.conf`
//! - macOS: `~/Library/Application Support/modsync/modsync.conf`
//! - Linux: `~/.config/modsync/modsync.conf`

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;

use crate::config::Config;
use crate::provider::{
    FileListProvider, ManifestListProvider, StaticListProvider, UrlListProvider,
};
use crate::utils::validator;

/// 获取平台默认配置文件路径
pub fn default_config_path() -> String {
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        format!("{}/modsync/modsync.conf", appdata)
    }
    #[cfg(target_os = "macos")]
    {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{}/Library/Application Support/modsync/modsync.conf", home)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
        format!("{}/.config/modsync/modsync.conf", home)
    }
}

/// 打开配置文件编辑器
pub fn open_config_in_editor(config_path: &str) {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("notepad")
            .arg(config_path)
            .status()
            .ok();
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg("-e")
            .arg(config_path)
            .status()
            .ok();
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        // 优先 xdg-open，否则 nano
        if std::process::Command::new("xdg-open")
            .arg(config_path)
            .status()
            .is_err()
        {
            let _ = std::process::Command::new("nano").arg(config_path).status();
        }
    }
}

/// ModSync 命令行参数
///
/// 示例用法：
///   modsync https://example.com/mods/a.jar
///   modsync -f modlist.txt
///   modsync --manifest-url https://example.com/modlist.txt
///   modsync -e  # 编辑配置文件
///
/// 更多用法请加 --help 查看
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modsync",
    version = env!("CARGO_PKG_VERSION"),
    about = "一个用 Rust 编写的顺序下载与目录同步工具",
    long_about = "从命令行参数、本地文件或远程清单获取 URL 列表，顺序下载到目标目录，\n并删除目录中不在列表内的过期文件。\n\n示例：\n  modsync https://example.com/mods/a.jar\n  modsync -f modlist.txt\n  modsync --manifest-url https://example.com/modlist.txt\n  modsync -d /path/to/mods -f modlist.txt\n"
)]
pub struct Args {
    /// 要下载的URL列表（可同时指定多个）
    #[arg(required = false, help = "要下载的URL列表，可以同时指定多个URL。")]
    pub urls: Vec<String>,

    /// 包含URL列表的文件路径
    #[arg(short, long, help = "包含URL列表的文件路径，每行一个URL。")]
    pub file: Option<String>,

    /// 远程清单URL
    #[arg(long, help = "远程清单URL，获取后按行解析为URL列表。")]
    pub manifest_url: Option<String>,

    /// 配置文件路径，默认为平台推荐路径
    #[arg(short = 'c', long, default_value_t = default_config_path(), help = "配置文件路径，默认为平台推荐路径。")]
    pub config: String,

    /// 编辑配置文件（-e 或 --edit）
    #[arg(short = 'e', long = "edit", help = "用系统默认编辑器打开配置文件并退出。")]
    pub edit_config: bool,

    /// 指定下载目录
    #[arg(long, short = 'd', help = "指定下载目录，覆盖配置文件中的设置。")]
    pub download_dir: Option<String>,
}

impl Args {
    /// 解析命令行参数，加载配置并合并覆盖项
    pub fn parse_args() -> Result<(Self, Config)> {
        let args = Args::parse();

        // --edit 逻辑
        if args.edit_config {
            open_config_in_editor(&args.config);
            std::process::exit(0);
        }

        // 命令行直接给出的URL在进入任务前做一次粗校验；
        // 文件和远程清单里的行原样传递，不在这里过滤
        for url in &args.urls {
            if !validator::is_valid_url(url) {
                bail!("无效的URL: {}", url);
            }
        }

        // 加载或创建配置文件
        let mut config = Config::load(&args.config)
            .with_context(|| format!("无法加载配置文件: {}", args.config))?;

        // 合并命令行参数到配置
        config.merge_from_args(&args);

        // 验证配置
        config.validate().context("配置无效")?;

        Ok((args, config))
    }

    /// 根据参数选择 URL 列表来源
    ///
    /// 优先级：--file > --manifest-url > 命令行参数。
    /// 两种列表来源没有哪一个是默认的，全部由参数显式选择。
    pub fn make_provider(&self, client: &reqwest::Client) -> Box<dyn UrlListProvider> {
        if let Some(path) = &self.file {
            Box::new(FileListProvider::new(path.clone()))
        } else if let Some(url) = &self.manifest_url {
            Box::new(ManifestListProvider::new(url.clone(), client.clone()))
        } else {
            Box::new(StaticListProvider::new(self.urls.clone()))
        }
    }
}
