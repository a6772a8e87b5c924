//! 装配设置
//!
//! 从可选的 TOML 文件和 `WIRING_*` 环境变量加载：
//!
//! ```toml
//! descriptor = "config/wiring.xml"
//! manifest = "config/types.toml"
//!
//! [logging]
//! enabled = true
//! level = "debug"
//! ```
//!
//! 嵌套键使用双下划线，例如 `WIRING_LOGGING__LEVEL=info`。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use wiring_common::{ConfigError, ConfigResult};

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "WIRING";

/// 装配设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringSettings {
    /// 描述文件路径
    pub descriptor: PathBuf,
    /// 类型清单路径，未设置时使用类型目录扫描
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    /// 日志设置
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 是否初始化日志
    pub enabled: bool,
    /// 日志级别
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl WiringSettings {
    /// 仅指定描述文件的设置
    pub fn for_descriptor(descriptor: impl Into<PathBuf>) -> Self {
        Self {
            descriptor: descriptor.into(),
            manifest: None,
            logging: LoggingSettings::default(),
        }
    }

    /// 从配置文件和 `WIRING_*` 环境变量加载
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_prefix(path, DEFAULT_ENV_PREFIX)
    }

    /// 从配置文件和指定前缀的环境变量加载
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            builder = builder
                .add_source(config::File::from(path).format(config::FileFormat::Toml));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| {
                error!("装配设置构建失败: {}", e);
                ConfigError::ParseError {
                    source: Box::new(e),
                }
            })?;

        let settings: Self = settings.try_deserialize().map_err(|e| {
            error!("装配设置绑定失败: {}", e);
            match e {
                config::ConfigError::NotFound(key) => ConfigError::KeyNotFound { key },
                other => ConfigError::ParseError {
                    source: Box::new(other),
                },
            }
        })?;

        debug!("装配设置加载成功: {:?}", settings);
        Ok(settings)
    }

    /// 相对路径按给定目录解析
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.descriptor.is_relative() {
            self.descriptor = base.join(&self.descriptor);
        }
        if let Some(manifest) = self.manifest.take() {
            self.manifest = Some(if manifest.is_relative() {
                base.join(manifest)
            } else {
                manifest
            });
        }
        self
    }
}
