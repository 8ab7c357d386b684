use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// 配置文件错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("无法序列化配置: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("配置无效: {0}")]
    Invalid(String),
}

/// 配置结构体
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// 默认下载目录
    pub download_dir: String,
    /// 网络超时时间（秒），0 表示不超时（默认行为：挂起的连接会一直等待）
    pub timeout: u64,
    /// User-Agent
    pub user_agent: String,
    /// 最大重定向次数
    pub max_redirects: usize,
}

/// 获取默认下载目录：当前工作目录下的 downloads 子目录
///
/// 任务创建时目录会被规范化为以分隔符开头和结尾，
/// 相对路径会被锚定到文件系统根部，所以这里必须给出绝对路径
fn default_download_dir() -> String {
    std::env::current_dir()
        .map(|p| p.join("downloads").display().to_string())
        .unwrap_or_else(|_| "/tmp/downloads".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            timeout: 0, // 默认不超时
            user_agent: "ModSync/0.1".to_string(),
            max_redirects: 10,
        }
    }
}

impl Config {
    /// 加载配置文件；格式错误时退回默认配置并重写文件
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            let content = fs::read_to_string(path)?;
            match toml::from_str(&content) {
                Ok(config) => Ok(config),
                Err(e) => {
                    eprintln!("配置文件格式错误: {}，将使用默认配置", e);
                    let config = Config::default();
                    config.save_with_tutorial(path)?;
                    Ok(config)
                }
            }
        } else {
            let config = Config::default();
            config.save_with_tutorial(path)?;
            Ok(config)
        }
    }

    /// 保存带教程的配置文件（唯一写入方法）
    pub fn save_with_tutorial(&self, path: &str) -> Result<(), ConfigError> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let tutorial_content = Config::generate_tutorial_content();
        let config_content = toml::to_string_pretty(self)?;
        let full_content = format!("{}\n{}", tutorial_content, config_content);
        fs::write(path, full_content)?;
        Ok(())
    }

    /// 生成配置文件教程内容（静态方法）
    fn generate_tutorial_content() -> String {
        r#"# ModSync 配置文件
# ====================
#
# 这是一个 TOML 格式的配置文件，用于配置 ModSync 的行为。
# 命令行参数会覆盖配置文件中的设置，优先级：命令行 > 配置文件 > 默认值
#
# 配置文件位置：
# - Windows: %APPDATA%/modsync/modsync.conf
# - macOS: ~/Library/Application Support/modsync/modsync.conf
# - Linux: ~/.config/modsync/modsync.conf
#
# 使用示例：
#   modsync https://example.com/mods/a.jar          # 下载单个文件
#   modsync -f modlist.txt                          # 从文件批量下载
#   modsync --manifest-url https://example.com/modlist.txt  # 从远程清单下载
#   modsync -d /path/to/mods -f modlist.txt         # 指定下载目录
#   modsync -e                                      # 编辑配置文件

# 默认下载目录：当前工作目录下的 downloads 子目录
# 请使用绝对路径，相对路径会被锚定到文件系统根部
# download_dir = "/home/user/downloads"

# 网络超时时间（秒）
# 0 表示不超时：挂起的连接会一直等待，这是默认行为
# timeout = 0

# User-Agent 字符串，某些服务器可能需要特定的 User-Agent
# user_agent = "ModSync/0.1"

# 最大重定向次数
# max_redirects = 10
"#
        .to_string()
    }

    /// 校验配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.download_dir.is_empty() {
            return Err(ConfigError::Invalid("下载目录不能为空".to_string()));
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid("User-Agent不能为空".to_string()));
        }

        Ok(())
    }

    /// 合并命令行参数到配置
    pub fn merge_from_args(&mut self, args: &crate::cli::Args) {
        // 命令行参数覆盖配置文件
        if let Some(download_dir) = &args.download_dir {
            self.download_dir = download_dir.clone();
        }
    }

    /// 根据配置构建 HTTP 客户端
    pub fn build_client(&self) -> reqwest::Client {
        let mut builder = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .redirect(reqwest::redirect::Policy::limited(self.max_redirects));
        if self.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout));
        }
        builder.build().unwrap_or_default()
    }

    /// 获取配置摘要信息
    pub fn get_summary(&self) -> String {
        format!(
            "配置摘要:\n\
            - 下载目录: {}\n\
            - 超时时间: {}\n\
            - User-Agent: {}\n\
            - 最大重定向: {}",
            self.download_dir,
            if self.timeout == 0 {
                "不超时".to_string()
            } else {
                format!("{} 秒", self.timeout)
            },
            self.user_agent,
            self.max_redirects
        )
    }
}
