use crate::service::{ChartConfig, DEFAULT_SAMPLE_SIZE};
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 环境变量前缀, 嵌套字段用 `__` 分隔 (如 SHIPPLUG_SERVER__PORT)
pub const ENV_PREFIX: &str = "SHIPPLUG";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub audit: AuditConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 审计相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub sample_size: usize,      // 样例数据默认条数
    pub max_sample_size: usize,  // 单次请求允许的最大样例条数
    pub max_upload_bytes: usize, // 上传文件大小上限
    pub chart_y_min: f64,
    pub chart_y_max: f64,
    pub chart_tick_step: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            audit: AuditConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            max_sample_size: 1_000_000,
            max_upload_bytes: 64 * 1024 * 1024,
            chart_y_min: 0.0,
            chart_y_max: 6000.0,
            chart_tick_step: 500.0,
        }
    }
}

impl AuditConfig {
    pub fn chart(&self) -> crate::Result<ChartConfig> {
        ChartConfig::new(self.chart_y_min, self.chart_y_max, self.chart_tick_step)
    }
}

impl AppConfig {
    /// 从环境变量加载配置, 未设置的项取默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
    }

    /// 默认值之上叠加一个配置源
    pub fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Config::try_from(&AppConfig::default())?;
        let config: AppConfig = Config::builder()
            .add_source(defaults)
            .add_source(source)
            .build()?
            .try_deserialize()?;
        config.max_log_level()?;
        Ok(config)
    }

    /// 日志级别 (trace/debug/info/warn/error, 不区分大小写)
    pub fn max_log_level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::Message(format!("invalid log_level `{}`", self.log_level)))
    }
}
