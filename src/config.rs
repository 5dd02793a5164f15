//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 配置文件查找顺序
const CONFIG_PATHS: [&str; 2] = ["config.json", "config/config.json"];

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 财报数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsConfig {
    /// 雅虎财经查询接口地址
    #[serde(default = "default_earnings_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 财报数据源配置
    #[serde(default)]
    pub earnings: EarningsConfig,
    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_earnings_base_url() -> String { "https://query1.finance.yahoo.com".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for EarningsConfig {
    fn default() -> Self {
        Self {
            base_url: default_earnings_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 配置加载结果，日志系统初始化后再输出
#[derive(Debug, Default)]
pub struct ConfigSource {
    /// 成功加载的配置文件（None 表示使用默认配置）
    pub loaded_from: Option<String>,
    /// 加载失败的配置文件及原因
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    ///
    /// 此时日志系统尚未初始化，加载结果通过 ConfigSource 返回
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(&CONFIG_PATHS)
    }

    /// 按顺序尝试候选路径，跳过不存在或格式错误的文件
    pub fn load_from<P: AsRef<Path>>(paths: &[P]) -> (Self, ConfigSource) {
        let mut source = ConfigSource::default();

        for path in paths {
            let path: &Path = path.as_ref();
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    source.loaded_from = Some(path.display().to_string());
                    return (config, source);
                }
                Err(e) => {
                    source
                        .warnings
                        .push(format!("加载配置文件 {} 失败: {}", path.display(), e));
                }
            }
        }

        (Self::default(), source)
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ConfigSource {
    /// 输出配置加载结果
    pub fn log(&self) {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
        match &self.loaded_from {
            Some(path) => log::info!("从 {} 加载配置成功", path),
            None => log::info!("使用默认配置"),
        }
    }
}
