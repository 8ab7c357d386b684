//! modsync: 顺序下载与目录同步库
//!
//! 拉取一份远程文件列表，把文件逐个下载到本地目录，
//! 并把目录内容与期望集合对齐。下载严格顺序执行，
//! 进度通过同步事件广播给监听器。
//!
//! ## 模块结构
//!
//! - `cli`: 命令行参数解析
//! - `config`: TOML 配置文件
//! - `core`: 任务编排、单文件传输、目录清理、事件广播
//! - `provider`: URL 列表来源（命令行参数、本地文件、远程清单）
//! - `ui`: 控制台进度渲染
//! - `utils`: 日志与校验工具

pub mod cli;
pub mod config;
pub mod core;
pub mod provider;
pub mod ui;
pub mod utils;
