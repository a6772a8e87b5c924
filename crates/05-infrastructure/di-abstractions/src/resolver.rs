//! 组件解析器抽象接口
//!
//! 把类型引用或命名空间引用转换为一个或多个已注册的组件实例

use wiring_common::{ComponentKind, WiringResult};

/// 组件解析器 trait
pub trait ComponentResolver {
    /// 按类型名称解析并注册组件
    ///
    /// 类型为接口、能力的基础实现类型或不具备该种类能力时不做任何事。
    fn resolve_by_class(&mut self, kind: ComponentKind, type_name: &str) -> WiringResult<()>;

    /// 扫描命名空间并注册其中所有符合条件的组件
    fn resolve_by_namespace(&mut self, kind: ComponentKind, namespace: &str) -> WiringResult<()>;
}
