//! # Configuration Abstractions
//!
//! 描述文件抽象层，定义描述文件语法、标记事件和声明处理接口。
//!
//! ## 核心接口
//!
//! - [`Declaration`] - 组件声明（类型或命名空间）
//! - [`PropertyTable`] - 属性表
//! - [`MarkupEvent`] - 标记事件流
//! - [`DescriptorHandler`] - 声明处理者接口

pub mod descriptor;
pub mod events;
pub mod handler;

pub use descriptor::*;
pub use events::*;
pub use handler::*;
