//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件注册、命名空间扫描和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentRegistry`] - 多键组件注册表接口
//! - [`NamespaceScanner`] - 命名空间扫描器接口
//! - [`ComponentResolver`] - 组件解析器接口
//! - [`DependencyInjector`] - 字段注入器接口

pub mod injector;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use injector::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
