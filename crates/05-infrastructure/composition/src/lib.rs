//! # 装配组合层
//!
//! 把描述文件解析、组件解析注册和字段注入组合成一次完整的装配过程。
//!
//! ## 主要功能
//!
//! - **装配构建器**: 使用构建者模式配置类型目录、管理器句柄、扫描器和日志
//! - **装配会话**: 声明按文档顺序注册，文档结束后运行一次字段注入
//! - **装配结果**: 数据访问注册表、服务注册表和属性表的只读视图
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wiring_common::TypeCatalog;
//! use wiring_composition::{LoggingConfig, WiringBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Arc::new(TypeCatalog::new());
//!
//!     let context = WiringBuilder::new()
//!         .with_catalog(catalog)
//!         .with_logging(LoggingConfig::development())
//!         .wire_file("config/wiring.xml")
//!         .await?;
//!
//!     println!("timeout = {:?}", context.property("timeout"));
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod session;

pub use builder::{initialize_logging, LoggingConfig, WiringBuilder};
pub use context::{WiringContext, WiringSummary};
pub use session::WiringSession;

#[cfg(test)]
#[path = "tests/integration_tests.rs"]
mod integration_tests;
