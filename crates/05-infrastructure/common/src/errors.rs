//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 构造失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// 类型没有符合组件种类要求的构造器
    MissingConstructor,
    /// 构造器拒绝了传入的参数
    IllegalArgument,
    /// 类型无法被实例化
    InstantiationFailure,
    /// 构造器不允许被访问
    AccessDenied,
    /// 构造器执行过程中失败
    ConstructionException,
}

impl FailureCategory {
    /// 类别的稳定名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingConstructor => "missing-constructor",
            Self::IllegalArgument => "illegal-argument",
            Self::InstantiationFailure => "instantiation-failure",
            Self::AccessDenied => "access-denied",
            Self::ConstructionException => "construction-exception",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 组件工厂返回的构造错误
#[derive(Error, Debug)]
#[error("{category}: {message}")]
pub struct ConstructionError {
    /// 失败类别
    pub category: FailureCategory,
    /// 失败描述
    pub message: String,
    /// 底层原因
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConstructionError {
    /// 创建指定类别的构造错误
    pub fn new(category: FailureCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            source: None,
        }
    }

    /// 参数非法
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new(FailureCategory::IllegalArgument, message)
    }

    /// 无法实例化
    pub fn instantiation(message: impl Into<String>) -> Self {
        Self::new(FailureCategory::InstantiationFailure, message)
    }

    /// 访问被拒绝
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(FailureCategory::AccessDenied, message)
    }

    /// 构造器内部失败，保留底层原因
    pub fn exception<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            category: FailureCategory::ConstructionException,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}

/// 描述文件错误类型
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("'{attribute}' 属性未定义或为空: '{element}' 元素")]
    MissingAttribute { element: String, attribute: String },

    #[error("'class' 或 'package' 属性未定义或为空: '{element}' 元素")]
    MissingTarget { element: String },

    #[error("'{element}' 元素同时声明了类 '{class}' 和包 '{package}'")]
    AmbiguousTarget {
        element: String,
        class: String,
        package: String,
    },

    #[error("发现 'property' 元素，但没有打开的 'properties' 元素")]
    PropertyOutsideBlock,

    #[error("描述文件格式错误 (位置 {position}): {message}")]
    Malformed { position: u64, message: String },

    #[error("描述文件已经结束，不能继续处理事件")]
    AlreadyFinished,

    #[error("描述文件读取失败: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("类型 '{type_name}' 未找到")]
    TypeNotFound { type_name: String },

    #[error("类型 '{type_name}' 构造失败 ({category}): {source}")]
    ConstructionFailed {
        type_name: String,
        category: FailureCategory,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("服务 '{service}' 的字段依赖 '{capability}' 未在描述文件中声明")]
    UnresolvedInjection { service: String, capability: String },

    #[error("服务 '{service}' 的字段 '{field}' 无法接收 '{capability}': {message}")]
    InjectionRejected {
        service: String,
        field: String,
        capability: String,
        message: String,
    },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },
}

impl DependencyError {
    /// 包装构造错误，保留类型名称和失败类别
    pub fn construction(type_name: impl Into<String>, error: ConstructionError) -> Self {
        Self::ConstructionFailed {
            type_name: type_name.into(),
            category: error.category,
            source: Box::new(error),
        }
    }

    /// 缺少符合要求的构造器
    pub fn missing_constructor(type_name: impl Into<String>, expected: &str) -> Self {
        let type_name = type_name.into();
        let error = ConstructionError::new(
            FailureCategory::MissingConstructor,
            format!("'{type_name}' 没有 {expected} 构造器"),
        );
        Self::construction(type_name, error)
    }

    /// 失败类别（仅构造失败时存在）
    pub fn category(&self) -> Option<FailureCategory> {
        match self {
            Self::ConstructionFailed { category, .. } => Some(*category),
            _ => None,
        }
    }
}

/// 命名空间扫描错误类型
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("命名空间 '{namespace}' 格式错误: {reason}")]
    MalformedNamespace { namespace: String, reason: String },

    #[error("类型清单读取失败: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("类型清单解析失败: {message}")]
    Manifest { message: String },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置项缺失: {key}")]
    KeyNotFound { key: String },

    #[error("日志初始化失败: {message}")]
    LoggingInit { message: String },
}

/// 装配过程错误类型
///
/// 每次装配只会产生一个错误，任何致命错误都会中止整个装配过程。
#[derive(Error, Debug)]
pub enum WiringError {
    #[error("描述文件错误: {source}")]
    Descriptor {
        #[from]
        source: DescriptorError,
    },

    #[error("依赖注入错误: {source}")]
    Dependency {
        #[from]
        source: DependencyError,
    },

    #[error("扫描命名空间 '{namespace}' 失败: {source}")]
    Scan { namespace: String, source: ScanError },

    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

impl WiringError {
    /// 用命名空间包装扫描错误
    pub fn scan(namespace: impl Into<String>, source: ScanError) -> Self {
        Self::Scan {
            namespace: namespace.into(),
            source,
        }
    }
}

/// 结果类型别名
pub type DescriptorResult<T> = Result<T, DescriptorError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ScanResult<T> = Result<T, ScanError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type WiringResult<T> = Result<T, WiringError>;
