//! 装配构建器

use crate::context::WiringContext;
use crate::session::WiringSession;
use config_impl::{DescriptorParser, LoggingSettings, WiringSettings};
use di_abstractions::NamespaceScanner;
use di_impl::{CatalogScanner, ManifestScanner};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};
use wiring_common::{
    global_type_catalog, ConfigError, ConfigResult, DescriptorError, ManagerHandle, TypeCatalog,
    WiringResult,
};

/// 进程内只初始化一次日志
static LOGGING_INITIALIZED: OnceCell<()> = OnceCell::new();

/// 装配构建器
///
/// 使用建造者模式配置类型目录、管理器句柄和扫描器。
/// 每次装配都使用新的注册表，多次装配之间不共享组件。
pub struct WiringBuilder {
    /// 类型目录，未设置时使用全局类型目录
    catalog: Option<Arc<TypeCatalog>>,
    /// 传给数据访问组件的管理器句柄
    manager: ManagerHandle,
    /// 命名空间扫描器，未设置时基于类型目录扫描
    scanner: Option<Rc<dyn NamespaceScanner>>,
    /// 日志配置
    logging_config: Option<LoggingConfig>,
}

impl WiringBuilder {
    /// 创建新的装配构建器
    pub fn new() -> Self {
        Self {
            catalog: None,
            manager: ManagerHandle::detached(),
            scanner: None,
            logging_config: None,
        }
    }

    /// 设置类型目录
    pub fn with_catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// 设置管理器句柄
    pub fn with_manager(mut self, manager: ManagerHandle) -> Self {
        self.manager = manager;
        self
    }

    /// 设置命名空间扫描器
    pub fn with_scanner(mut self, scanner: impl NamespaceScanner + 'static) -> Self {
        self.scanner = Some(Rc::new(scanner));
        self
    }

    /// 启用日志初始化
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 创建一次装配会话
    pub fn session(&self) -> WiringResult<WiringSession> {
        if let Some(config) = &self.logging_config {
            initialize_logging(config)?;
        }

        let catalog = match &self.catalog {
            Some(catalog) => catalog.clone(),
            None => global_type_catalog().unwrap_or_else(|| {
                warn!("未设置类型目录，使用空目录");
                Arc::new(TypeCatalog::new())
            }),
        };
        let scanner: Rc<dyn NamespaceScanner> = match &self.scanner {
            Some(scanner) => scanner.clone(),
            None => Rc::new(CatalogScanner::new(catalog.clone())),
        };
        debug!("创建装配会话: {} 个类型, 扫描器 '{}'", catalog.len(), scanner.name());

        Ok(WiringSession::new(catalog, scanner, self.manager.clone()))
    }

    /// 装配描述文件文本
    pub fn wire_str(&self, content: &str) -> WiringResult<WiringContext> {
        let session = DescriptorParser::parse_str(content, self.session()?)?;
        session.into_context()
    }

    /// 读取并装配描述文件
    pub async fn wire_file(&self, path: impl AsRef<Path>) -> WiringResult<WiringContext> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(DescriptorError::from)?;
        info!("装配描述文件: {}", path.display());
        self.wire_str(&content)
    }

    /// 按装配设置装配
    ///
    /// 设置中的日志和类型清单覆盖构建器上的对应配置。
    pub async fn wire_with_settings(&self, settings: &WiringSettings) -> WiringResult<WiringContext> {
        if settings.logging.enabled {
            initialize_logging(&LoggingConfig::from_settings(&settings.logging)?)?;
        }

        match &settings.manifest {
            Some(manifest) => {
                let scanner =
                    ManifestScanner::from_path(manifest).map_err(|e| ConfigError::ParseError {
                        source: Box::new(e),
                    })?;
                let builder = Self {
                    catalog: self.catalog.clone(),
                    manager: self.manager.clone(),
                    scanner: Some(Rc::new(scanner)),
                    logging_config: None,
                };
                builder.wire_file(&settings.descriptor).await
            }
            None => self.wire_file(&settings.descriptor).await,
        }
    }
}

impl Default for WiringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 初始化日志系统，进程内只生效一次
pub fn initialize_logging(config: &LoggingConfig) -> ConfigResult<()> {
    LOGGING_INITIALIZED.get_or_try_init(|| {
        if tracing::dispatcher::has_been_set() {
            warn!("日志系统已由其他组件初始化，跳过");
            return Ok(());
        }

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(config.level)
            .with_target(config.show_target)
            .with_thread_ids(config.show_thread_ids)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number);

        if config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| ConfigError::LoggingInit {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    })?;
    Ok(())
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
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

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 从日志设置创建
    pub fn from_settings(settings: &LoggingSettings) -> ConfigResult<Self> {
        let level =
            tracing::Level::from_str(&settings.level).map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;
        Ok(Self {
            level,
            show_target: settings.show_target,
            show_thread_ids: settings.show_thread_ids,
            show_file: settings.show_file,
            show_line_number: settings.show_line_number,
            json_format: settings.json_format,
        })
    }
}
