//! 声明处理者接口

use crate::descriptor::{Declaration, PropertyTable};
use wiring_common::WiringResult;

/// 描述文件声明处理者
///
/// 声明按文档顺序到达；文档结束时 [`DescriptorHandler::finish`] 恰好调用一次。
/// 任何一个方法返回错误后都不会再收到调用。
pub trait DescriptorHandler {
    /// 处理一个组件声明
    fn declare(&mut self, declaration: Declaration) -> WiringResult<()>;

    /// 文档结束，交付最终的属性表
    fn finish(&mut self, properties: PropertyTable) -> WiringResult<()>;
}
