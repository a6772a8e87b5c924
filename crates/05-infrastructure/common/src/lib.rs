//! # Wiring Common
//!
//! 组件装配的公共类型与工具。
//!
//! ## 核心组件
//!
//! - [`TypeKey`] / [`ComponentKind`] - 类型标识与组件种类
//! - [`TypeCatalog`] / [`TypeEntry`] - 类型目录与工厂函数表
//! - [`DataAccess`] / [`Service`] - 组件能力与显式注入契约
//! - [`Injected`] - 服务字段上的注入槽
//! - [`MemoCache`] - 记忆化查找缓存
//! - [`WiringError`] - 装配错误分类
//!
//! ## 设计原则
//!
//! - 以显式的工厂函数表代替运行时反射
//! - 能力接口以类型标识列表表达，而不是类型层次遍历
//! - 注入通过服务声明的契约完成

pub mod cache;
pub mod catalog;
pub mod component;
pub mod errors;
pub mod factory;
pub mod metadata;

pub use cache::*;
pub use catalog::*;
pub use component::*;
pub use errors::*;
pub use factory::*;
pub use metadata::*;

use std::sync::Arc;

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: once_cell::sync::Lazy<parking_lot::RwLock<Option<Arc<TypeCatalog>>>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(None));

/// 获取全局类型目录
pub fn global_type_catalog() -> Option<Arc<TypeCatalog>> {
    GLOBAL_TYPE_CATALOG.read().clone()
}

/// 设置全局类型目录
pub fn set_global_type_catalog(catalog: Arc<TypeCatalog>) {
    *GLOBAL_TYPE_CATALOG.write() = Some(catalog);
}
